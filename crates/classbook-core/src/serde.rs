use serde::{Deserialize, Deserializer};

/// Distinguishes an absent patch field from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// a missing key stays `None`, `null` becomes `Some(None)` and a value
/// becomes `Some(Some(value))`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
