pub mod gallery;
pub mod navigation;
pub mod relay;
pub mod scroll_spy;
pub mod sheets;
pub mod submission;
pub mod tabs;
pub mod validator;

pub use crate::domain::model::{
    ContactFormInput, FormField, ScrollState, Section, SubmissionOutcome, SubmissionState,
    ValidationResult,
};
pub use crate::domain::ports::{Relay, SheetSink};
pub use crate::utils::error::Result;
