//! Garment size enumeration.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when text is not one of the known sizes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("size must be one of XS, S, M, L, XL (got {0:?})")]
pub struct SizeError(pub String);

/// Garment size. Parsing is case-insensitive; storage and JSON are upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    Xs,
    S,
    M,
    L,
    Xl,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 5] = [Self::Xs, Self::S, Self::M, Self::L, Self::Xl];

    /// Canonical upper-case label, as stored in the `size` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SizeError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("m".parse::<Size>().unwrap(), Size::M);
        assert_eq!(" xl ".parse::<Size>().unwrap(), Size::Xl);
        assert_eq!("Xs".parse::<Size>().unwrap(), Size::Xs);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("XXL".parse::<Size>().is_err());
        assert!("".parse::<Size>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Size::Xl).unwrap(), "\"XL\"");
        assert_eq!(serde_json::from_str::<Size>("\"XS\"").unwrap(), Size::Xs);
    }
}
