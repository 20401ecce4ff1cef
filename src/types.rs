//! Core types for booru-dl

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Field of a post record holding the media URL
pub const MEDIA_URL_FIELD: &str = "file_url";

/// One entry of the listing array
///
/// Only the media URL is consumed; the rest of the record is kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostRecord(pub Map<String, Value>);

impl PostRecord {
    /// Media URL of this post, if the record carries one as a string
    pub fn media_url(&self) -> Option<&str> {
        self.0.get(MEDIA_URL_FIELD).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for PostRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// What happened to a single listing entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The media file was written in full
    Downloaded {
        /// Position of the record in the listing
        index: usize,
        /// Name of the written file (e.g. "000.jpg")
        file_name: String,
        /// Bytes written
        bytes: u64,
    },
    /// The record had no media URL
    MissingUrl {
        /// Position of the record in the listing
        index: usize,
    },
    /// The media download failed; the counter was not advanced
    Failed {
        /// Position of the record in the listing
        index: usize,
        /// URL that failed
        url: String,
        /// Error description
        reason: String,
    },
}

/// Result of a completed run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of files successfully written
    pub downloaded: usize,
    /// Directory the files were written to
    pub destination: PathBuf,
    /// True if the run stopped because the download cap was reached
    pub cap_reached: bool,
    /// Per-record outcomes, in listing order, for every record that was visited
    pub outcomes: Vec<RecordOutcome>,
}

impl RunSummary {
    /// Number of records skipped for lack of a media URL
    pub fn missing(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::MissingUrl { .. }))
            .count()
    }

    /// Number of records whose download failed
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Failed { .. }))
            .count()
    }

    /// Names of the written files, in write order
    pub fn file_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                RecordOutcome::Downloaded { file_name, .. } => Some(file_name.as_str()),
                _ => None,
            })
            .collect()
    }
}
