//! Helpers for explicit "provided / not provided" update payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field into `Option<Option<T>>`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// an absent key stays `None`, `null` becomes `Some(None)` (clear the column),
/// and a value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treat blank form values as "not given".
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Blank-to-null for a nullable patch field, keeping the absent/provided split.
pub fn non_blank_patch(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(non_blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        salary: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"salary": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"salary": "GH₵ 5,000"}"#).unwrap();

        assert_eq!(absent.salary, None);
        assert_eq!(null.salary, Some(None));
        assert_eq!(value.salary, Some(Some("GH₵ 5,000".to_string())));
    }

    #[test]
    fn blank_strings_clear_nullable_fields() {
        assert_eq!(non_blank_patch(Some(Some("  ".into()))), Some(None));
        assert_eq!(non_blank_patch(None), None);
        assert_eq!(non_blank(Some(" Accra ".into())), Some("Accra".into()));
    }
}
