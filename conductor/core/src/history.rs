//! Correction history record
//!
//! A timestamped snapshot of one successful correction. Nothing stores
//! these yet; the type exists so a surface can keep a session-local list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::CorrectionResult;

/// One past correction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier
    pub id: Uuid,
    /// When the correction completed
    pub timestamp: DateTime<Utc>,
    /// The correction itself, serialized inline
    #[serde(flatten)]
    pub result: CorrectionResult,
}

impl HistoryItem {
    /// Record a result now with a fresh id
    #[must_use]
    pub fn from_result(result: CorrectionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            result,
        }
    }
}
