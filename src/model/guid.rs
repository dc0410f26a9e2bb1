//! Profile identity.

use std::fmt;

use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// A stable 128-bit profile identity.
///
/// Serializes and deserializes in the braced form `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
/// used throughout the settings file (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid(pub Uuid);

impl Guid {
    /// The reserved sentinel identity. Never a valid assigned profile GUID; the anonymous
    /// `profiles.defaults` entry has its GUID explicitly cleared to this value, and the
    /// universal invariant "every profile's GUID is non-zero" is checked against it.
    pub const ZERO: Self = Self(Uuid::nil());

    /// The fixed well-known namespace used to synthesize GUIDs for user-declared profiles
    /// that have a name but no explicit GUID (spec.md §4.2).
    pub const USER_NAMESPACE: Uuid = Uuid::from_u128(0x6d96_08b2_1a8b_4a9a_8a1c_3e9f_d4c7_0a11);

    /// Deterministically synthesizes a GUID from a namespace and a name via UUID v5.
    ///
    /// The same `(namespace, name)` pair always yields the same GUID; this is the
    /// cornerstone of the re-hide-after-delete behavior (spec.md §4.9).
    pub fn synthesize(namespace: &str, name: &str) -> Self {
        let ns = Uuid::new_v5(&Self::USER_NAMESPACE, namespace.as_bytes());
        Self(Uuid::new_v5(&ns, name.as_bytes()))
    }

    /// `true` if this is [`Self::ZERO`].
    pub const fn is_zero(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated())
    }
}

impl Serialize for Guid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.trim_start_matches('{').trim_end_matches('}');
        Uuid::parse_str(trimmed).map(Guid).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_is_deterministic() {
        assert_eq!(Guid::synthesize("WSL", "Ubuntu"), Guid::synthesize("WSL", "Ubuntu"));
        assert_ne!(Guid::synthesize("WSL", "Ubuntu"), Guid::synthesize("WSL", "Debian"));
        assert_ne!(Guid::synthesize("WSL", "Ubuntu"), Guid::synthesize("PowershellCore", "Ubuntu"));
    }

    #[test]
    fn round_trips_braced_form() {
        let guid = Guid::synthesize("Test", "x");
        let s = serde_json::to_string(&guid).unwrap();
        assert!(s.starts_with("\"{") && s.ends_with("}\""));
        let back: Guid = serde_json::from_str(&s).unwrap();
        assert_eq!(guid, back);
    }

    #[test]
    fn zero_is_nil() {
        assert!(Guid::ZERO.is_zero());
        assert!(!Guid::synthesize("a", "b").is_zero());
    }
}
