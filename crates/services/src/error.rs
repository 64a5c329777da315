use thiserror::Error;

use storage::catalog::CatalogLoadError;

/// Errors emitted by the hint gating policy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HintError {
    #[error("unknown problem: {0}")]
    UnknownProblem(String),
    #[error("all {max} hints of {problem} are already unlocked")]
    AllUnlocked { problem: String, max: u32 },
    #[error("{problem} has hints up to level {max}, not {level}")]
    LevelOutOfRange { problem: String, level: u32, max: u32 },
}

/// Errors emitted by the tutor seam.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TutorError {
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
    #[error("tutor backend is not available")]
    Unavailable,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}
