#![allow(dead_code)]

use api_lib::adapters::InMemoryAdapter;
use api_lib::web::state::AppState;
use assistance_core::domain::{
    AssistanceCategory, Gender, IncomeRange, MaritalStatus, NewApplication,
};
use assistance_core::ports::{Clock, TrackingCodeSource};
use assistance_core::tracking::RandomTrackingCodes;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// A clock that moves forward one second on every read.
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

pub struct Harness {
    pub repo: Arc<InMemoryAdapter>,
    pub state: Arc<AppState>,
}

pub fn harness() -> Harness {
    harness_with(false)
}

pub fn harness_with(seed_initial_timeline: bool) -> Harness {
    let repo = Arc::new(InMemoryAdapter::new());
    let clock: Arc<dyn Clock> = Arc::new(StepClock::starting_at(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    ));
    let codes: Arc<dyn TrackingCodeSource> = Arc::new(RandomTrackingCodes::new("SA"));
    let state = Arc::new(AppState::with_parts(
        repo.clone(),
        clock,
        codes,
        seed_initial_timeline,
    ));
    Harness { repo, state }
}

pub fn application(nik: &str) -> NewApplication {
    NewApplication {
        full_name: "Siti Aminah".to_string(),
        nik: nik.to_string(),
        place_of_birth: "Bandung".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        gender: Gender::Perempuan,
        marital_status: MaritalStatus::Menikah,
        phone: "081234567890".to_string(),
        email: "siti@example.id".to_string(),
        address: "Jl. Merdeka No. 10".to_string(),
        village: "Sukamaju".to_string(),
        district: "Cibeunying".to_string(),
        assistance_category: AssistanceCategory::Sosial,
        assistance_type: "Bantuan Pangan".to_string(),
        reason: "Penghasilan tidak mencukupi".to_string(),
        family_members_count: 4,
        monthly_income_range: IncomeRange::KurangDari1Jt,
    }
}

pub const NIK_A: &str = "3201234567890001";
pub const NIK_B: &str = "3201234567890002";
