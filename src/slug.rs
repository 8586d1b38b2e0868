use crate::types::Track;

/// Every key a track may be filed under in the analysis databases, in a
/// fixed order: persistent ID first, then the two duration-bracketing slugs.
///
/// djay keys most entries by a slug of `name \t artist \t duration` in
/// lowercase. djay and the library decode duration independently and can
/// disagree by up to a second, so both the floor and ceil of the library's
/// duration are candidates.
pub fn candidate_keys(track: &Track) -> [String; 3] {
    let name_and_artist = format!(
        "{}\t{}",
        track.name.to_lowercase(),
        track.artist.to_lowercase()
    );
    [
        track.id.clone(),
        format!("{}\t{}", name_and_artist, track.duration.floor() as u64),
        format!("{}\t{}", name_and_artist, track.duration.ceil() as u64),
    ]
}
