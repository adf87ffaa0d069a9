//! Reconciling capture start and end identifiers

/// Result of closing a capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Captured text was stored under `id`
    Committed { id: String },
    /// Captured text was dropped because no single identifier could be chosen
    Discarded {
        start_id: Option<String>,
        end_id: Option<String>,
    },
}

impl CaptureOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CaptureOutcome::Committed { .. })
    }
}

/// Pick the content id a capture commits under, if any.
///
/// Empty identifiers count as absent. Equal identifiers, or exactly one
/// present identifier, yield that id. Two different identifiers, or none at
/// all, yield `None`.
pub fn reconcile<'a>(start_id: Option<&'a str>, end_id: Option<&'a str>) -> Option<&'a str> {
    let start_id = start_id.filter(|id| !id.is_empty());
    let end_id = end_id.filter(|id| !id.is_empty());

    match (start_id, end_id) {
        (Some(start), Some(end)) if start == end => Some(start),
        (Some(_), Some(_)) => None,
        (Some(id), None) | (None, Some(id)) => Some(id),
        (None, None) => None,
    }
}
