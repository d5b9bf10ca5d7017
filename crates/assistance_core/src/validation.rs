//! crates/assistance_core/src/validation.rs
//!
//! Shape checks applied to every inbound payload before it reaches a repository.
//! Enumerated fields are already constrained by their Rust types; the rules here
//! cover string presence and length, the NIK format and numeric positivity.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use utoipa::ToSchema;

use crate::domain::{
    FeaturedProgramPatch, NewApplication, NewDocument, NewFeaturedProgram, NewNews, NewService,
    NewTimelineEntry, NewsPatch, ServicePatch, TrackApplicationQuery,
};

/// Length of a national identification number (NIK).
pub const NIK_LENGTH: usize = 16;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every rule a payload broke, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    fn require_optional_text(&mut self, field: &str, value: Option<&String>) {
        if let Some(v) = value {
            self.require_text(field, v);
        }
    }

    fn require_nik(&mut self, value: &str) {
        if value.chars().count() != NIK_LENGTH {
            self.push("nik", format!("must be exactly {NIK_LENGTH} characters"));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every inbound payload.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

impl NewApplication {
    /// Rejects a date of birth later than `today`.
    pub fn validate_birth_date(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.date_of_birth > today {
            errors.push("date_of_birth", "must not be in the future");
        }
        errors.into_result()
    }
}

impl Validate for NewApplication {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("full_name", &self.full_name);
        errors.require_nik(&self.nik);
        errors.require_text("place_of_birth", &self.place_of_birth);
        errors.require_text("phone", &self.phone);
        if !is_valid_email(&self.email) {
            errors.push("email", "must be a valid email address");
        }
        errors.require_text("address", &self.address);
        errors.require_text("village", &self.village);
        errors.require_text("district", &self.district);
        errors.require_text("assistance_type", &self.assistance_type);
        errors.require_text("reason", &self.reason);
        if self.family_members_count < 1 {
            errors.push("family_members_count", "must be at least 1");
        }
        errors.into_result()
    }
}

impl Validate for TrackApplicationQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("tracking_number", &self.tracking_number);
        errors.require_nik(&self.nik);
        errors.into_result()
    }
}

impl Validate for NewTimelineEntry {
    fn validate(&self) -> Result<(), ValidationErrors> {
        // Notes are free text and may be absent or empty.
        Ok(())
    }
}

impl Validate for NewDocument {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("file_name", &self.file_name);
        errors.require_text("file_path", &self.file_path);
        if self.file_size <= 0 {
            errors.push("file_size", "must be positive");
        }
        errors.into_result()
    }
}

impl Validate for NewService {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("description", &self.description);
        errors.into_result()
    }
}

impl Validate for ServicePatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_optional_text("title", self.title.as_ref());
        errors.require_optional_text("description", self.description.as_ref());
        errors.into_result()
    }
}

/// Budgets are stored as `NUMERIC(15, 2)`: 13 integer digits, rounded to cents.
pub const BUDGET_LIMIT: f64 = 1e13;

fn check_budget(errors: &mut ValidationErrors, budget: Option<f64>) {
    let Some(b) = budget else {
        return;
    };
    let cents = (b * 100.0).round() / 100.0;
    if !b.is_finite() || cents < 0.01 {
        errors.push("budget", "must be at least 0.01");
    } else if cents >= BUDGET_LIMIT {
        errors.push("budget", "must be less than 10000000000000");
    }
}

impl Validate for NewFeaturedProgram {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("description", &self.description);
        check_budget(&mut errors, self.budget);
        errors.into_result()
    }
}

impl Validate for FeaturedProgramPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_optional_text("title", self.title.as_ref());
        errors.require_optional_text("description", self.description.as_ref());
        check_budget(&mut errors, self.budget.flatten());
        errors.into_result()
    }
}

impl Validate for NewNews {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("content", &self.content);
        errors.into_result()
    }
}

impl Validate for NewsPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_optional_text("title", self.title.as_ref());
        errors.require_optional_text("content", self.content.as_ref());
        errors.into_result()
    }
}
