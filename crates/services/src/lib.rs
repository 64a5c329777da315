#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_progress;
pub mod error;
pub mod progress_store;
pub mod tutor;

pub use patterns_core::Clock;

pub use app_services::AppServices;
pub use catalog_progress::{
    DashboardSummary, DifficultySection, HintState, HintView, PatternProgress,
};
pub use error::{AppServicesError, HintError, TutorError};
pub use progress_store::ProgressStore;
pub use tutor::{OfflineTutor, Tutor, TutorRequest};
