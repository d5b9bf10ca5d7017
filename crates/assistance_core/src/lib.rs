pub mod content;
pub mod domain;
pub mod lifecycle;
pub mod patch;
pub mod ports;
pub mod tracking;
pub mod validation;

pub use content::ContentService;
pub use domain::{
    Application, ApplicationStatus, ApplicationTracking, AssistanceCategory, Document,
    DocumentType, FeaturedProgram, FeaturedProgramPatch, Gender, IncomeRange, MaritalStatus,
    NewApplication, NewDocument, NewFeaturedProgram, NewNews, NewService, NewTimelineEntry, News,
    NewsPatch, Service, ServicePatch, StatusTimelineEntry, TrackApplicationQuery,
};
pub use lifecycle::ApplicationService;
pub use ports::{
    ApplicationRepository, Clock, ContentRepository, PortError, PortResult, SystemClock,
    TrackingCodeSource,
};
pub use tracking::RandomTrackingCodes;
pub use validation::{FieldError, Validate, ValidationErrors};
