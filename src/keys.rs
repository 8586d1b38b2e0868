/// The 24 harmonic key labels djay uses, in djay's own index order.
/// A key field in the analysis databases is an index into this table.
/// Each label is `<Camelot code>-<musical key>`, e.g. "8B-C".
pub const KEYS: &[&str; 24] = &[
    "8B-C", "8A-Am", "3B-Db", "3A-Bbm", "10B-D", "10A-Bm", "5B-Eb", "5A-Cm", "12B-E", "12A-C#m",
    "7B-F", "7A-Dm", "2B-Gb", "2A-Ebm", "9B-G", "9A-Em", "4B-Ab", "4A-Fm", "11B-A", "11A-F#m",
    "6B-Bb", "6A-Gm", "1B-B", "1A-G#m",
];

/// Convert a djay key index to its label. Out-of-range indices come from
/// malformed analysis records and yield None rather than aborting the track.
pub fn label_of(index: i64) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| KEYS.get(i).copied())
}
