//! crates/assistance_core/src/patch.rs
//!
//! Serde support for partial updates of nullable columns.
//!
//! A patch field of type `Option<Option<T>>` has three states:
//! key absent (`None`, leave alone), key set to `null` (`Some(None)`, clear)
//! and key set to a value (`Some(Some(v))`, overwrite). Pair this function with
//! `#[serde(default)]` so that an absent key falls back to `None`.

use serde::{Deserialize, Deserializer};

pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use crate::domain::{FeaturedProgramPatch, ServicePatch};

    #[test]
    fn absent_null_and_value_are_distinct() {
        let untouched: ServicePatch = serde_json::from_str(r#"{"title":"Baru"}"#).unwrap();
        assert_eq!(untouched.icon, None);
        assert_eq!(untouched.title.as_deref(), Some("Baru"));

        let cleared: ServicePatch = serde_json::from_str(r#"{"icon":null}"#).unwrap();
        assert_eq!(cleared.icon, Some(None));

        let set: ServicePatch = serde_json::from_str(r#"{"icon":"hand-heart"}"#).unwrap();
        assert_eq!(set.icon, Some(Some("hand-heart".to_string())));
    }

    #[test]
    fn numeric_fields_can_be_cleared() {
        let patch: FeaturedProgramPatch =
            serde_json::from_str(r#"{"budget":null,"order_index":3}"#).unwrap();
        assert_eq!(patch.budget, Some(None));
        assert_eq!(patch.order_index, Some(3));
        assert_eq!(patch.image_path, None);
    }
}
