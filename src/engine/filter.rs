//! Slot-containment filtering of similarity candidates

use crate::index::SimilarityCandidate;
use crate::schedule::SlotSet;
use tracing::debug;

/// A candidate that survived slot filtering, with its slot set parsed once
/// at this boundary so the raw comma-joined form goes no further.
#[derive(Debug, Clone)]
pub struct FilteredCandidate {
    pub candidate: SimilarityCandidate,
    pub slots: SlotSet,
}

/// Keep candidates whose meeting slots fit entirely inside `availability`.
///
/// Pure and order-preserving: survivors stay in the similarity order the
/// index produced, never re-sorted. A malformed or absent slot string
/// parses as the empty set and the candidate is admitted — losing an
/// otherwise-relevant course to a metadata defect is worse than showing
/// it (fail-open at the metadata layer only).
pub fn filter_candidates(
    candidates: Vec<SimilarityCandidate>,
    availability: &SlotSet,
) -> Vec<FilteredCandidate> {
    let total = candidates.len();
    let admitted: Vec<FilteredCandidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let slots = SlotSet::parse(&candidate.document.time_slots);
            if slots.contained_in(availability) {
                Some(FilteredCandidate { candidate, slots })
            } else {
                None
            }
        })
        .collect();

    debug!("Slot filter admitted {}/{} candidates", admitted.len(), total);
    admitted
}
