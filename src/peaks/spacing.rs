//! Minimum-separation filter for extracted candidates.

use crate::peaks::Candidate;

/// Applies mutual suppression by center distance.
///
/// A candidate is kept only when no other candidate, kept or not, lies within
/// `spacing` of its center (Euclidean, compared in exact squared integers).
/// The rule is symmetric rather than priority-ordered: every member of a
/// cluster closer than `spacing` is suppressed, including the strongest.
/// Re-running the filter on its own kept output is a no-op.
pub fn spacing_filter(candidates: &mut [Candidate], spacing: usize) {
    let limit = (spacing as i64) * (spacing as i64);
    for i in 0..candidates.len() {
        let mut isolated = true;
        for j in 0..candidates.len() {
            if i == j {
                continue;
            }
            let dx = candidates[i].x as i64 - candidates[j].x as i64;
            let dy = candidates[i].y as i64 - candidates[j].y as i64;
            if dx * dx + dy * dy <= limit {
                isolated = false;
                break;
            }
        }
        candidates[i].keep = isolated;
    }
}
