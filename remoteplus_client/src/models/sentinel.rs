use std::fmt;

use serde::{Deserialize, Serialize};

/// Why Remote Plus returned no value for a requested item.
///
/// Remote Plus signals a non-response by placing one of eight reserved codes
/// in the cell where the value would have been. The mapping is 1:1; any other
/// string (including the empty string) is a literal data value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoValueReason {
    /// `!NA` — not available.
    NotAvailable,
    /// `!NH` — holiday (US/Canadian securities only).
    Holiday,
    /// `!NE` — not expected, e.g. a price for a future date.
    NotExpected,
    /// `!NR` — not reported.
    NotReported,
    /// `!N5` — provider returned error code 5000.
    Error5000,
    /// `!N6` — provider returned error code 6000.
    Error6000,
    /// `!N7` — provider returned error code 7000.
    Error7000,
    /// `!N8` — provider returned error code 8000.
    Error8000,
}

impl NoValueReason {
    /// Maps a raw cell value onto a reason, or `None` if the value is real
    /// data. The match is exact; sentinels never appear with padding once the
    /// parser has cleaned the cell.
    pub fn from_sentinel(raw: &str) -> Option<Self> {
        match raw {
            "!NA" => Some(Self::NotAvailable),
            "!NH" => Some(Self::Holiday),
            "!NE" => Some(Self::NotExpected),
            "!NR" => Some(Self::NotReported),
            "!N5" => Some(Self::Error5000),
            "!N6" => Some(Self::Error6000),
            "!N7" => Some(Self::Error7000),
            "!N8" => Some(Self::Error8000),
            _ => None,
        }
    }

    /// The wire code for this reason.
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::NotAvailable => "!NA",
            Self::Holiday => "!NH",
            Self::NotExpected => "!NE",
            Self::NotReported => "!NR",
            Self::Error5000 => "!N5",
            Self::Error6000 => "!N6",
            Self::Error7000 => "!N7",
            Self::Error8000 => "!N8",
        }
    }
}

impl fmt::Display for NoValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotAvailable => "not available",
            Self::Holiday => "holiday (US/Canadian securities only)",
            Self::NotExpected => "not expected",
            Self::NotReported => "not reported",
            Self::Error5000 => "provider error code 5000",
            Self::Error6000 => "provider error code 6000",
            Self::Error7000 => "provider error code 7000",
            Self::Error8000 => "provider error code 8000",
        };
        write!(f, "{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sentinel_round_trips() {
        for code in ["!NA", "!NH", "!NE", "!NR", "!N5", "!N6", "!N7", "!N8"] {
            let reason = NoValueReason::from_sentinel(code).unwrap();
            assert_eq!(reason.sentinel(), code);
        }
    }

    #[test]
    fn non_sentinels_are_data() {
        assert_eq!(NoValueReason::from_sentinel(""), None);
        assert_eq!(NoValueReason::from_sentinel("NA"), None);
        assert_eq!(NoValueReason::from_sentinel("!NX"), None);
        assert_eq!(NoValueReason::from_sentinel("!na"), None); // match is exact
        assert_eq!(NoValueReason::from_sentinel("90.48611"), None);
    }
}
