use crate::ProductNumber;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes as the fixed-width decimal string, e.g. `"007"`.
///
/// The string form is the canonical wire format: it is what gets persisted
/// alongside the product row and echoed back in API responses, and it
/// preserves the width that a bare integer would lose.
impl Serialize for ProductNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Deserializes from the fixed-width decimal string, validating digits and
/// inferring the width from the string length.
impl<'de> Deserialize<'de> for ProductNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
