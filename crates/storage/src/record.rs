use std::collections::BTreeMap;

use chrono::NaiveDate;
use patterns_core::model::{ProblemId, ProgressError, ProgressRecord};
use serde::{Deserialize, Deserializer, Serialize};

use crate::repository::StorageError;

/// Storage key of the progress blob. Blobs under other keys are never read.
pub const PROGRESS_STORAGE_KEY: &str = "algoPatternProgress_v2";

/// Persisted shape of a `ProgressRecord`.
///
/// The completed set is stored as a sorted array and hints as an ordered map so
/// the same progress always serializes to the same bytes. Missing fields fall
/// back to their empty value, as do explicit nulls; fields of the wrong type
/// reject the whole blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBlob {
    #[serde(deserialize_with = "null_as_default")]
    pub completed_problems: Vec<ProblemId>,
    #[serde(deserialize_with = "null_as_default")]
    pub unlocked_hints: BTreeMap<ProblemId, u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub streak: u32,
    pub last_practice_date: Option<NaiveDate>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ProgressBlob {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        let mut completed_problems: Vec<ProblemId> = record.completed().iter().cloned().collect();
        completed_problems.sort();

        Self {
            completed_problems,
            unlocked_hints: record
                .unlocked_hints()
                .iter()
                .map(|(id, level)| (id.clone(), *level))
                .collect(),
            streak: record.streak(),
            last_practice_date: record.last_practice_date(),
        }
    }

    /// Convert the blob back into a domain `ProgressRecord`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the streak fields contradict each other.
    pub fn into_record(self) -> Result<ProgressRecord, ProgressError> {
        ProgressRecord::from_persisted(
            self.completed_problems,
            self.unlocked_hints,
            self.streak,
            self.last_practice_date,
        )
    }
}

/// Serialize a record to its JSON storage form.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if JSON encoding fails.
pub fn encode_progress(record: &ProgressRecord) -> Result<String, StorageError> {
    serde_json::to_string(&ProgressBlob::from_record(record))
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Parse a JSON storage blob into a record.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON, mismatched field
/// types, or inconsistent streak fields.
pub fn decode_progress(raw: &str) -> Result<ProgressRecord, StorageError> {
    let blob: ProgressBlob =
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))?;
    blob.into_record()
        .map_err(|err| StorageError::Serialization(err.to_string()))
}
