use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A library track as exported by the music-library collaborator.
///
/// Only `bpm` and `grouping` are ever written back; everything else is
/// identity/duration input. `id` is the library's persistent ID, stable
/// across renames. A `bpm` of 0 means the library has no tempo value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub duration: f64, // seconds
    #[serde(default)]
    pub bpm: f64,
    #[serde(default)]
    pub grouping: String,
}

/// One entry of a djay analysis database, keyed by slug or persistent ID.
/// Absent fields stay absent; a record never fabricates a zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<f64>,
    /// Index into [`crate::keys::KEYS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
}

/// A parsed analysis database: lookup key -> record. Two instances exist per
/// run (automatic and manual values), both read-only during the sync loop.
pub type MetadataTable = HashMap<String, AnalysisRecord>;

/// Which track fields the user asked to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelection {
    Bpm,
    Key,
    Both,
}

impl FieldSelection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bpm => "bpm",
            Self::Key => "key",
            Self::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "bpm" => Some(Self::Bpm),
            "key" => Some(Self::Key),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn writes_bpm(&self) -> bool {
        matches!(self, Self::Bpm | Self::Both)
    }

    pub fn writes_key(&self) -> bool {
        matches!(self, Self::Key | Self::Both)
    }
}

/// User-chosen knobs for one sync run, threaded explicitly into every call.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub fields: FieldSelection,
    /// Replace existing library values instead of only filling empty ones.
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    /// At least one field was written.
    Updated,
    /// Resolution succeeded for some field but policy declined every write.
    Unchanged,
    /// Neither database knows this track under any candidate key.
    Unmatched,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// Per-track result of one pass through the sync pipeline. A batch of N
/// tracks always yields exactly N of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOutcome {
    pub track_id: String,
    pub name: String,
    pub artist: String,
    pub status: TrackStatus,
    pub changes: Vec<FieldDiff>,
}
