mod catalog;
mod ids;
mod progress;

pub use catalog::{Catalog, CatalogError, Difficulty, Hint, Pattern, PatternDifficulty, Problem};
pub use ids::{PatternId, ProblemId};
pub use progress::{ProgressError, ProgressRecord, ToggleOutcome};
