//! Persisted Request Record
//!
//! Tracks per-permission request history across process lifetimes. The
//! platform alone cannot distinguish "never asked" from "don't ask again"
//! (both report no rationale), so each requested permission carries a
//! small record that only ever moves forward.

use serde::{Deserialize, Serialize};

/// Request history for a single permission key.
///
/// Ordering matters: `First < Seen < DontAsk`, and a record never
/// regresses. An external grant bypasses the record entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestRecord {
    /// Never requested before (also the default for unknown keys).
    #[default]
    First,
    /// A rationale has been shown at least once.
    Seen,
    /// The platform stopped offering a rationale after a prior request,
    /// i.e. the user picked "don't ask again".
    DontAsk,
}

impl RequestRecord {
    /// Advance towards `target`, never regressing.
    pub fn advance_to(self, target: RequestRecord) -> RequestRecord {
        self.max(target)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestRecord::First => "first",
            RequestRecord::Seen => "seen",
            RequestRecord::DontAsk => "dont-ask",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first() {
        assert_eq!(RequestRecord::default(), RequestRecord::First);
    }

    #[test]
    fn test_advance_is_monotonic() {
        assert_eq!(
            RequestRecord::First.advance_to(RequestRecord::Seen),
            RequestRecord::Seen
        );
        assert_eq!(
            RequestRecord::Seen.advance_to(RequestRecord::DontAsk),
            RequestRecord::DontAsk
        );
        // never backwards
        assert_eq!(
            RequestRecord::DontAsk.advance_to(RequestRecord::Seen),
            RequestRecord::DontAsk
        );
        assert_eq!(
            RequestRecord::Seen.advance_to(RequestRecord::First),
            RequestRecord::Seen
        );
    }
}
