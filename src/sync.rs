//! The per-track sync pipeline: slug -> resolve -> merge.
//!
//! Stateless between tracks; the two analysis tables are the only shared
//! input and are never mutated. Every track always produces an outcome, so
//! a batch of N tracks yields exactly N outcomes regardless of how many of
//! them were unmatched or declined by the overwrite policy.

use crate::types::{
    FieldDiff, MetadataTable, SyncOptions, Track, TrackOutcome, TrackStatus,
};
use crate::{keys, merge, resolve};

/// Aggregate result of one sync run.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub outcomes: Vec<TrackOutcome>,
    /// Tracks with at least one field written.
    pub updated: usize,
    pub total: usize,
}

/// Run the pipeline for a single track, writing `bpm`/`grouping` in place
/// when the field selection and overwrite policy allow it.
///
/// Never fails: a malformed analysis record (out-of-range key index) is
/// treated as an absent key, and a track unknown to both databases comes
/// back as `Unmatched`.
pub fn sync_track(
    track: &mut Track,
    auto: &MetadataTable,
    manual: &MetadataTable,
    opts: &SyncOptions,
) -> TrackOutcome {
    let resolved = resolve::resolve(track, auto, manual);

    let mut changes = Vec::new();

    if opts.fields.writes_bpm()
        && let Some(bpm) = merge::merge_bpm(track.bpm, resolved.bpm, opts.overwrite)
    {
        changes.push(FieldDiff {
            field: "bpm".to_string(),
            old_value: format_bpm(track.bpm),
            new_value: format_bpm(bpm),
        });
        track.bpm = bpm;
    }

    if opts.fields.writes_key() {
        // Out-of-range indices become the empty label, which the merger
        // treats as "nothing to write".
        let label = resolved.key.and_then(keys::label_of).unwrap_or("");
        if let Some(grouping) = merge::merge_grouping(&track.grouping, label, opts.overwrite) {
            changes.push(FieldDiff {
                field: "grouping".to_string(),
                old_value: track.grouping.clone(),
                new_value: grouping.clone(),
            });
            track.grouping = grouping;
        }
    }

    let status = if !changes.is_empty() {
        TrackStatus::Updated
    } else if resolved.is_unmatched() {
        TrackStatus::Unmatched
    } else {
        TrackStatus::Unchanged
    };

    TrackOutcome {
        track_id: track.id.clone(),
        name: track.name.clone(),
        artist: track.artist.clone(),
        status,
        changes,
    }
}

/// Process every track in order. Tracks are independent; one unmatched or
/// malformed entry never affects the rest of the batch.
pub fn sync_tracks(
    tracks: &mut [Track],
    auto: &MetadataTable,
    manual: &MetadataTable,
    opts: &SyncOptions,
) -> SyncSummary {
    let total = tracks.len();
    let outcomes: Vec<TrackOutcome> = tracks
        .iter_mut()
        .map(|track| sync_track(track, auto, manual, opts))
        .collect();
    let updated = outcomes
        .iter()
        .filter(|o| o.status == TrackStatus::Updated)
        .count();

    SyncSummary {
        outcomes,
        updated,
        total,
    }
}

/// BPM values are whole numbers after resolution; print them without the
/// trailing ".0".
fn format_bpm(bpm: f64) -> String {
    format!("{}", bpm as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisRecord, FieldSelection};
    use std::collections::HashMap;

    fn make_track(id: &str, bpm: f64, grouping: &str) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {id}"),
            artist: "Artist".to_string(),
            duration: 180.4,
            bpm,
            grouping: grouping.to_string(),
        }
    }

    fn table(entries: &[(&str, Option<f64>, Option<i64>)]) -> MetadataTable {
        entries
            .iter()
            .map(|&(k, bpm, key)| (k.to_string(), AnalysisRecord { bpm, key }))
            .collect()
    }

    fn opts(fields: FieldSelection, overwrite: bool) -> SyncOptions {
        SyncOptions { fields, overwrite }
    }

    #[test]
    fn fills_both_fields_and_reports_diffs() {
        let mut track = make_track("t1", 0.0, "");
        let auto = table(&[("t1", Some(124.0), Some(5))]);

        let outcome = sync_track(
            &mut track,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Both, false),
        );

        assert_eq!(track.bpm, 124.0);
        assert_eq!(track.grouping, "10A-Bm");
        assert_eq!(outcome.status, TrackStatus::Updated);
        assert_eq!(outcome.changes.len(), 2);
        assert!(
            outcome
                .changes
                .iter()
                .any(|c| c.field == "bpm" && c.old_value == "0" && c.new_value == "124")
        );
        assert!(
            outcome
                .changes
                .iter()
                .any(|c| c.field == "grouping" && c.new_value == "10A-Bm")
        );
    }

    #[test]
    fn bpm_selection_never_touches_grouping() {
        let mut track = make_track("t1", 0.0, "Chill");
        let auto = table(&[("t1", Some(124.0), Some(5))]);

        let outcome = sync_track(
            &mut track,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Bpm, true),
        );

        assert_eq!(track.bpm, 124.0);
        assert_eq!(track.grouping, "Chill");
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].field, "bpm");
    }

    #[test]
    fn key_selection_never_touches_bpm() {
        let mut track = make_track("t1", 100.0, "");
        let auto = table(&[("t1", Some(124.0), Some(5))]);

        let outcome = sync_track(
            &mut track,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Key, true),
        );

        assert_eq!(track.bpm, 100.0);
        assert_eq!(track.grouping, "10A-Bm");
        assert_eq!(outcome.changes.len(), 1);
        assert_eq!(outcome.changes[0].field, "grouping");
    }

    #[test]
    fn unmatched_track_is_marked() {
        let mut track = make_track("t1", 0.0, "");
        let outcome = sync_track(
            &mut track,
            &HashMap::new(),
            &HashMap::new(),
            &opts(FieldSelection::Both, true),
        );

        assert_eq!(outcome.status, TrackStatus::Unmatched);
        assert!(outcome.changes.is_empty());
        assert_eq!(track.bpm, 0.0);
        assert_eq!(track.grouping, "");
    }

    #[test]
    fn declined_write_is_unchanged_not_unmatched() {
        let mut track = make_track("t1", 120.0, "8A-Am Chill");
        let auto = table(&[("t1", Some(124.0), Some(5))]);

        let outcome = sync_track(
            &mut track,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Both, false),
        );

        assert_eq!(outcome.status, TrackStatus::Unchanged);
        assert_eq!(track.bpm, 120.0);
        assert_eq!(track.grouping, "8A-Am Chill");
    }

    #[test]
    fn out_of_range_key_index_is_treated_as_absent() {
        let mut track = make_track("t1", 0.0, "8A-Am Chill");
        let auto = table(&[("t1", None, Some(42))]);

        let outcome = sync_track(
            &mut track,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Key, true),
        );

        // The record matched, so the track is not unmatched, but the bogus
        // index must not erase the existing annotation.
        assert_eq!(outcome.status, TrackStatus::Unchanged);
        assert_eq!(track.grouping, "8A-Am Chill");
    }

    #[test]
    fn batch_yields_one_outcome_per_track_in_order() {
        let mut tracks = vec![
            make_track("t1", 0.0, ""),
            make_track("t2", 120.0, ""),
            make_track("t3", 0.0, ""),
        ];
        let auto = table(&[("t1", Some(124.0), None), ("t2", Some(128.0), None)]);

        let summary = sync_tracks(
            &mut tracks,
            &auto,
            &HashMap::new(),
            &opts(FieldSelection::Both, false),
        );

        assert_eq!(summary.total, 3);
        assert_eq!(summary.outcomes.len(), 3);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.outcomes[0].track_id, "t1");
        assert_eq!(summary.outcomes[0].status, TrackStatus::Updated);
        assert_eq!(summary.outcomes[1].status, TrackStatus::Unchanged);
        assert_eq!(summary.outcomes[2].status, TrackStatus::Unmatched);
    }

    #[test]
    fn manual_slug_bpm_with_auto_id_key() {
        // Track known to the manual table by its floor slug and to the auto
        // table by persistent ID only.
        let mut track = Track {
            id: "X1".to_string(),
            name: "Song".to_string(),
            artist: "Artist".to_string(),
            duration: 180.4,
            bpm: 0.0,
            grouping: String::new(),
        };
        let manual = table(&[("song\tartist\t180", Some(124.0), None)]);
        let auto = table(&[("X1", None, Some(5))]);

        let outcome = sync_track(&mut track, &auto, &manual, &opts(FieldSelection::Both, false));

        assert_eq!(outcome.status, TrackStatus::Updated);
        assert_eq!(track.bpm, 124.0);
        assert_eq!(track.grouping, "10A-Bm");
    }
}
