//! The tri-state setting value described in spec.md §9.

use serde::{Serialize, Deserialize, Serializer, Deserializer};

/// A single configurable field: absent, explicitly cleared, or set to a value.
///
/// `Cleared` is not `Set(None)` — it shadows parent values during inheritance finalization
/// (spec.md §4.7) where `Unset` defers to the parent chain. On the wire, a missing key
/// deserializes to `Unset` and an explicit JSON `null` deserializes to `Cleared`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Setting<V> {
    /// The key was absent; look further up the parent chain.
    #[default]
    Unset,
    /// The key was explicitly `null`; stop looking up the parent chain, the value is absent.
    Cleared,
    /// The key was set to `V`.
    Set(V)
}

impl<V> Setting<V> {
    /// `true` for [`Self::Unset`]. Used as `skip_serializing_if` so unset fields never
    /// appear in reserialized output.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Converts to `Option<&V>`, treating both `Unset` and `Cleared` as absent.
    pub const fn as_option(&self) -> Option<&V> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset | Self::Cleared => None
        }
    }

    /// Converts to an owned `Option<V>`, treating both `Unset` and `Cleared` as absent.
    pub fn into_option(self) -> Option<V> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset | Self::Cleared => None
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Setting<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<V>::deserialize(deserializer)? {
            Some(v) => Self::Set(v),
            None => Self::Cleared
        })
    }
}

impl<V: Serialize> Serialize for Setting<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(v) => v.serialize(serializer),
            Self::Cleared | Self::Unset => serializer.serialize_none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Setting::is_unset")]
        field: Setting<String>
    }

    #[test]
    fn missing_key_is_unset() {
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(h.field, Setting::Unset);
    }

    #[test]
    fn null_is_cleared() {
        let h: Holder = serde_json::from_str(r#"{"field":null}"#).unwrap();
        assert_eq!(h.field, Setting::Cleared);
    }

    #[test]
    fn value_is_set() {
        let h: Holder = serde_json::from_str(r#"{"field":"bar"}"#).unwrap();
        assert_eq!(h.field, Setting::Set("bar".to_string()));
    }

    #[test]
    fn unset_is_omitted_on_serialize() {
        let h = Holder { field: Setting::Unset };
        assert_eq!(serde_json::to_string(&h).unwrap(), "{}");
    }

    #[test]
    fn cleared_serializes_as_null() {
        let h = Holder { field: Setting::Cleared };
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"field":null}"#);
    }
}
