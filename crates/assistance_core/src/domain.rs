//! crates/assistance_core/src/domain.rs
//!
//! Defines the core data structures of the social assistance portal.
//! These types carry no knowledge of the database; serde and OpenAPI
//! derives describe their public wire shape only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::patch::present;

//=========================================================================================
// Closed Enumerations
//=========================================================================================

/// Returned when a stored or submitted string is not a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Generates `as_str`, `ALL`, `Display` and `FromStr` for a wire-named enum.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "LAKI_LAKI")]
    LakiLaki,
    #[serde(rename = "PEREMPUAN")]
    Perempuan,
}
wire_enum!(Gender, "gender", {
    LakiLaki => "LAKI_LAKI",
    Perempuan => "PEREMPUAN",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MaritalStatus {
    #[serde(rename = "BELUM_MENIKAH")]
    BelumMenikah,
    #[serde(rename = "MENIKAH")]
    Menikah,
    #[serde(rename = "CERAI_HIDUP")]
    CeraiHidup,
    #[serde(rename = "CERAI_MATI")]
    CeraiMati,
}
wire_enum!(MaritalStatus, "marital status", {
    BelumMenikah => "BELUM_MENIKAH",
    Menikah => "MENIKAH",
    CeraiHidup => "CERAI_HIDUP",
    CeraiMati => "CERAI_MATI",
});

/// Monthly household income bracket, in Indonesian rupiah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum IncomeRange {
    #[serde(rename = "KURANG_DARI_1JT")]
    KurangDari1Jt,
    #[serde(rename = "1JT_SAMPAI_2JT")]
    Antara1Dan2Jt,
    #[serde(rename = "2JT_SAMPAI_3JT")]
    Antara2Dan3Jt,
    #[serde(rename = "3JT_SAMPAI_5JT")]
    Antara3Dan5Jt,
    #[serde(rename = "LEBIH_DARI_5JT")]
    LebihDari5Jt,
}
wire_enum!(IncomeRange, "income range", {
    KurangDari1Jt => "KURANG_DARI_1JT",
    Antara1Dan2Jt => "1JT_SAMPAI_2JT",
    Antara2Dan3Jt => "2JT_SAMPAI_3JT",
    Antara3Dan5Jt => "3JT_SAMPAI_5JT",
    LebihDari5Jt => "LEBIH_DARI_5JT",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AssistanceCategory {
    #[serde(rename = "BANTUAN_SOSIAL")]
    Sosial,
    #[serde(rename = "BANTUAN_PENDIDIKAN")]
    Pendidikan,
    #[serde(rename = "BANTUAN_KESEHATAN")]
    Kesehatan,
    #[serde(rename = "BANTUAN_EKONOMI")]
    Ekonomi,
    #[serde(rename = "BANTUAN_BENCANA")]
    Bencana,
}
wire_enum!(AssistanceCategory, "assistance category", {
    Sosial => "BANTUAN_SOSIAL",
    Pendidikan => "BANTUAN_PENDIDIKAN",
    Kesehatan => "BANTUAN_KESEHATAN",
    Ekonomi => "BANTUAN_EKONOMI",
    Bencana => "BANTUAN_BENCANA",
});

/// The lifecycle state of an application.
///
/// No transition graph is enforced: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Verified,
    Approved,
    Rejected,
    Completed,
}
wire_enum!(ApplicationStatus, "application status", {
    Submitted => "SUBMITTED",
    UnderReview => "UNDER_REVIEW",
    Verified => "VERIFIED",
    Approved => "APPROVED",
    Rejected => "REJECTED",
    Completed => "COMPLETED",
});

impl ApplicationStatus {
    /// The state every new application starts in.
    pub const INITIAL: ApplicationStatus = ApplicationStatus::Submitted;

    /// Progress shown to applicants. Informational only.
    pub fn progress_percent(&self) -> u8 {
        match self {
            ApplicationStatus::Submitted => 20,
            ApplicationStatus::UnderReview => 40,
            ApplicationStatus::Verified => 60,
            ApplicationStatus::Approved => 80,
            ApplicationStatus::Completed => 100,
            ApplicationStatus::Rejected => 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Ktp,
    KartuKeluarga,
    SuratKeteranganTidakMampu,
    FotoRumah,
    DokumenTambahan,
}
wire_enum!(DocumentType, "document type", {
    Ktp => "KTP",
    KartuKeluarga => "KARTU_KELUARGA",
    SuratKeteranganTidakMampu => "SURAT_KETERANGAN_TIDAK_MAMPU",
    FotoRumah => "FOTO_RUMAH",
    DokumenTambahan => "DOKUMEN_TAMBAHAN",
});

//=========================================================================================
// Application Aggregate
//=========================================================================================

/// One social-assistance request as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Application {
    pub id: Uuid,
    pub tracking_number: String,
    pub full_name: String,
    pub nik: String,
    pub place_of_birth: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub village: String,
    pub district: String,
    pub assistance_category: AssistanceCategory,
    pub assistance_type: String,
    pub reason: String,
    pub family_members_count: i32,
    pub monthly_income_range: IncomeRange,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The applicant-supplied fields of a new application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewApplication {
    pub full_name: String,
    pub nik: String,
    pub place_of_birth: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub village: String,
    pub district: String,
    pub assistance_category: AssistanceCategory,
    pub assistance_type: String,
    pub reason: String,
    pub family_members_count: i32,
    pub monthly_income_range: IncomeRange,
}

/// An immutable audit record of one status assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusTimelineEntry {
    pub id: Uuid,
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for a direct timeline append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewTimelineEntry {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Metadata of one uploaded supporting file. The bytes live elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub id: Uuid,
    pub application_id: Uuid,
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewDocument {
    pub application_id: Uuid,
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
}

/// The two pieces of shared knowledge that unlock a tracking lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackApplicationQuery {
    pub tracking_number: String,
    pub nik: String,
}

/// Everything an applicant sees after a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationTracking {
    pub application: Application,
    pub documents: Vec<Document>,
    /// Newest first.
    pub timeline: Vec<StatusTimelineEntry>,
}

//=========================================================================================
// Content: Services ("Layanan Kami")
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewService {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_index: i32,
}

/// Partial update. `None` leaves a field alone; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServicePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub order_index: Option<i32>,
}

//=========================================================================================
// Content: Featured Programs ("Program Unggulan")
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeaturedProgram {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub target_beneficiaries: Option<String>,
    pub budget: Option<f64>,
    pub is_active: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewFeaturedProgram {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub target_beneficiaries: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeaturedProgramPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image_path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub target_beneficiaries: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub budget: Option<Option<f64>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub order_index: Option<i32>,
}

//=========================================================================================
// Content: News & Announcements ("Berita & Pengumuman")
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub image_path: Option<String>,
    pub is_announcement: bool,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub is_announcement: bool,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewsPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub image_path: Option<Option<String>>,
    #[serde(default)]
    pub is_announcement: Option<bool>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_round_trip_through_their_wire_names() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>(), Ok(*status));
        }
        assert_eq!(ApplicationStatus::UnderReview.to_string(), "UNDER_REVIEW");
    }

    #[test]
    fn income_ranges_keep_their_digit_prefixed_names() {
        let json = serde_json::to_string(&IncomeRange::Antara1Dan2Jt).unwrap();
        assert_eq!(json, "\"1JT_SAMPAI_2JT\"");
        let parsed: IncomeRange = serde_json::from_str("\"KURANG_DARI_1JT\"").unwrap();
        assert_eq!(parsed, IncomeRange::KurangDari1Jt);
        assert_eq!(
            "3JT_SAMPAI_5JT".parse::<IncomeRange>(),
            Ok(IncomeRange::Antara3Dan5Jt)
        );
    }

    #[test]
    fn unknown_members_are_rejected() {
        let err = "PENDING".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.kind, "application status");
        assert!(serde_json::from_str::<DocumentType>("\"PASSPORT\"").is_err());
    }

    #[test]
    fn document_types_use_screaming_snake_case() {
        let json = serde_json::to_string(&DocumentType::SuratKeteranganTidakMampu).unwrap();
        assert_eq!(json, "\"SURAT_KETERANGAN_TIDAK_MAMPU\"");
        assert_eq!(DocumentType::Ktp.as_str(), "KTP");
    }

    #[test]
    fn progress_is_monotonic_along_the_happy_path() {
        let path = [
            ApplicationStatus::Submitted,
            ApplicationStatus::UnderReview,
            ApplicationStatus::Verified,
            ApplicationStatus::Approved,
            ApplicationStatus::Completed,
        ];
        assert!(path.windows(2).all(|w| w[0].progress_percent() < w[1].progress_percent()));
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!ApplicationStatus::Verified.is_terminal());
    }

    #[test]
    fn content_defaults_apply_when_fields_are_omitted() {
        let service: NewService =
            serde_json::from_str(r#"{"title":"Bansos","description":"Bantuan"}"#).unwrap();
        assert!(service.is_active);
        assert_eq!(service.order_index, 0);
        assert_eq!(service.icon, None);

        let news: NewNews = serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert!(!news.is_published);
        assert!(!news.is_announcement);
    }
}
