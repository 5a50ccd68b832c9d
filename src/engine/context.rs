//! Bounded prompt-context assembly

use super::filter::FilteredCandidate;

/// Separator between course documents in the assembled context
const DOC_SEPARATOR: &str = "\n\n";

/// Join the display text of the first `max_docs` candidates.
///
/// Input is already similarity-ranked and slot-filtered; truncation keeps
/// the context bounded regardless of how many courses survive. An empty
/// input yields the empty string, which the orchestrator treats as "no
/// evidence" and never forwards to the model.
pub fn assemble_context(filtered: &[FilteredCandidate], max_docs: usize) -> String {
    filtered
        .iter()
        .take(max_docs)
        .map(|f| f.candidate.document.text.as_str())
        .collect::<Vec<_>>()
        .join(DOC_SEPARATOR)
}
