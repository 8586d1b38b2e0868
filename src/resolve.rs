//! Best-value resolution across the two analysis databases.
//!
//! Manual (user-corrected) values always beat automatic ones, slug matches
//! beat persistent-ID matches, and BPM and key resolve independently: each
//! field takes the first probe that carries it, so they may come from
//! different databases or different lookup keys.

use crate::slug;
use crate::types::{AnalysisRecord, MetadataTable, Track};

/// Resolver output for one track. `bpm` is already rounded to the nearest
/// integer; `key` is an index into [`crate::keys::KEYS`], still unvalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolved {
    pub bpm: Option<f64>,
    pub key: Option<i64>,
}

impl Resolved {
    pub fn is_unmatched(&self) -> bool {
        self.bpm.is_none() && self.key.is_none()
    }
}

/// Resolve the best available BPM and key for `track`.
///
/// Probe order per field: manual by floor slug, manual by ceil slug, manual
/// by persistent ID, then the same three against the automatic database. A
/// missing entry is a normal miss, never an error; if no probe carries a
/// field, that field stays absent.
pub fn resolve(track: &Track, auto: &MetadataTable, manual: &MetadataTable) -> Resolved {
    let [id, slug_floor, slug_ceil] = slug::candidate_keys(track);

    let probes: [Option<&AnalysisRecord>; 6] = [
        manual.get(&slug_floor),
        manual.get(&slug_ceil),
        manual.get(&id),
        auto.get(&slug_floor),
        auto.get(&slug_ceil),
        auto.get(&id),
    ];

    Resolved {
        bpm: first_value(&probes, |rec| rec.bpm).map(f64::round),
        key: first_value(&probes, |rec| rec.key),
    }
}

fn first_value<T>(
    probes: &[Option<&AnalysisRecord>; 6],
    field: impl Fn(&AnalysisRecord) -> Option<T>,
) -> Option<T> {
    probes.iter().flatten().find_map(|rec| field(rec))
}
