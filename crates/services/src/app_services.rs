use std::path::Path;
use std::sync::Arc;

use patterns_core::model::{Catalog, Pattern, Problem};
use storage::Storage;
use storage::catalog::load_catalog;

use crate::Clock;
use crate::catalog_progress::{self, DashboardSummary, DifficultySection, HintView, PatternProgress};
use crate::error::{AppServicesError, HintError, TutorError};
use crate::progress_store::ProgressStore;
use crate::tutor::{self, OfflineTutor, Tutor};

/// Assembles the catalog, the single `ProgressStore` and the tutor.
///
/// Built once at startup and handed to the presentation layer by reference.
pub struct AppServices {
    catalog: Arc<Catalog>,
    progress: ProgressStore,
    tutor: Box<dyn Tutor>,
}

impl AppServices {
    /// Build services around an already loaded catalog.
    #[must_use]
    pub fn new(catalog: Catalog, storage: &Storage, clock: Clock) -> Self {
        let progress = ProgressStore::open(
            clock,
            Arc::clone(&storage.progress),
            catalog.total_problems(),
        );
        Self {
            catalog: Arc::new(catalog),
            progress,
            tutor: Box::new(OfflineTutor),
        }
    }

    /// Build services from a catalog file on disk.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the catalog cannot be read or is invalid.
    pub fn from_catalog_file(
        path: &Path,
        storage: &Storage,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let catalog = load_catalog(path)?;
        Ok(Self::new(catalog, storage, clock))
    }

    /// Replace the tutor backend.
    #[must_use]
    pub fn with_tutor(mut self, tutor: Box<dyn Tutor>) -> Self {
        self.tutor = tutor;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_store(&self.progress)
    }

    #[must_use]
    pub fn sections(&self) -> Vec<DifficultySection> {
        catalog_progress::difficulty_sections(&self.catalog, &self.progress)
    }

    #[must_use]
    pub fn pattern(&self, pattern_id: &str) -> Option<(&Pattern, PatternProgress)> {
        let pattern = self.catalog.pattern(pattern_id)?;
        Some((pattern, PatternProgress::for_pattern(pattern, &self.progress)))
    }

    #[must_use]
    pub fn hint_states<'a>(&self, problem: &'a Problem) -> Vec<HintView<'a>> {
        catalog_progress::hint_states(problem, &self.progress)
    }

    /// Unlock the next hint of a catalog problem.
    ///
    /// # Errors
    ///
    /// See [`catalog_progress::unlock_next_hint`].
    pub fn unlock_next_hint(&mut self, problem_id: &str) -> Result<u32, HintError> {
        catalog_progress::unlock_next_hint(&self.catalog, &mut self.progress, problem_id)
    }

    /// Unlock hints of a catalog problem up to an explicit level.
    ///
    /// # Errors
    ///
    /// See [`catalog_progress::unlock_hint_to`].
    pub fn unlock_hint_to(&mut self, problem_id: &str, level: u32) -> Result<u32, HintError> {
        catalog_progress::unlock_hint_to(&self.catalog, &mut self.progress, problem_id, level)
    }

    /// Ask the tutor about a catalog pattern. A `None` question requests the
    /// default explanation.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::UnknownPattern` for ids not in the catalog and
    /// `TutorError::EmptyQuestion` for a blank question.
    pub fn ask_tutor(
        &self,
        pattern_id: &str,
        question: Option<&str>,
    ) -> Result<String, TutorError> {
        let pattern = self
            .catalog
            .pattern(pattern_id)
            .ok_or_else(|| TutorError::UnknownPattern(pattern_id.to_owned()))?;
        match question {
            Some(question) => tutor::ask_tutor(self.tutor.as_ref(), &pattern.title, question),
            None => Ok(tutor::explain_pattern(self.tutor.as_ref(), &pattern.title)),
        }
    }
}
