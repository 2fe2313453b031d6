use std::collections::HashMap;

use crate::error::ValidationError;

/// Pre-coercion rewrite of a raw page value.
pub type Transform = fn(&str) -> String;

/// One declared field of a record: canonical name, optional page label and
/// the transforms run before coercion.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub transforms: &'static [Transform],
}

impl FieldSpec {
    pub const fn new(name: &'static str) -> Self {
        FieldSpec {
            name,
            alias: None,
            transforms: &[],
        }
    }

    pub const fn alias(self, alias: &'static str) -> Self {
        FieldSpec {
            alias: Some(alias),
            ..self
        }
    }

    pub const fn transforms(self, transforms: &'static [Transform]) -> Self {
        FieldSpec { transforms, ..self }
    }

    /// True if `key` names this field, either as the canonical name or the
    /// page label, ignoring case and space/underscore differences.
    pub fn matches(&self, key: &str) -> bool {
        let key = normalize_label(key);
        key == self.name || self.alias.is_some_and(|a| key == normalize_label(a))
    }

    fn apply(&self, raw: &str) -> String {
        self.transforms
            .iter()
            .fold(raw.trim().to_string(), |value, transform| transform(&value))
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// "/block/775796" → "775796". Bare values pass through unchanged.
pub fn last_path_segment(value: &str) -> String {
    value
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(value)
        .to_string()
}

/// A coerced field value, as read back through [`Record::field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Field values of one record after alias resolution and transforms,
/// keyed by canonical name.
#[derive(Debug)]
pub struct Fields {
    record: &'static str,
    values: HashMap<&'static str, String>,
}

impl Fields {
    pub fn text(&mut self, name: &'static str) -> Result<String, ValidationError> {
        self.values
            .remove(name)
            .ok_or(ValidationError::MissingField {
                record: self.record,
                field: name,
            })
    }

    pub fn unsigned(&mut self, name: &'static str) -> Result<u64, ValidationError> {
        let raw = self.text(name)?;
        raw.parse().map_err(|_| self.invalid_integer(name, raw))
    }

    pub fn signed(&mut self, name: &'static str) -> Result<i64, ValidationError> {
        let raw = self.text(name)?;
        raw.parse().map_err(|_| self.invalid_integer(name, raw))
    }

    fn invalid_integer(&self, field: &'static str, value: String) -> ValidationError {
        ValidationError::InvalidInteger {
            record: self.record,
            field,
            value,
        }
    }
}

/// Map raw `(label, value)` pairs onto `specs`. Every pair must name exactly
/// one declared field, and every declared field must be present.
pub fn resolve<I, K, V>(
    record: &'static str,
    specs: &'static [FieldSpec],
    pairs: I,
) -> Result<Fields, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut values = HashMap::with_capacity(specs.len());

    for (key, value) in pairs {
        let key = key.as_ref();
        let spec = specs
            .iter()
            .find(|s| s.matches(key))
            .ok_or_else(|| ValidationError::UnknownField {
                record,
                field: key.to_string(),
            })?;
        if values.insert(spec.name, spec.apply(value.as_ref())).is_some() {
            return Err(ValidationError::DuplicateField {
                record,
                field: spec.name,
            });
        }
    }

    if let Some(missing) = specs.iter().find(|s| !values.contains_key(s.name)) {
        return Err(ValidationError::MissingField {
            record,
            field: missing.name,
        });
    }

    Ok(Fields { record, values })
}

/// A typed value object built from a page's attribute table.
pub trait Record: Sized {
    const NAME: &'static str;
    const FIELDS: &'static [FieldSpec];

    fn from_fields(fields: Fields) -> Result<Self, ValidationError>;

    /// Every field with its coerced value, in declaration order.
    fn values(&self) -> Vec<(&'static str, FieldValue)>;

    /// Build from `(name, value)` pairs keyed by canonical name or page label.
    fn build<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_fields(resolve(Self::NAME, Self::FIELDS, pairs)?)
    }

    /// The declared field `key` refers to, by canonical name or page label.
    fn spec(key: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|s| s.matches(key))
    }

    /// Look a field up by canonical name or page label.
    fn field(&self, name: &str) -> Option<FieldValue> {
        let spec = Self::spec(name)?;
        self.values()
            .into_iter()
            .find(|(n, _)| *n == spec.name)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SPECS: &[FieldSpec] = &[
        FieldSpec::new("script_pubkey").alias("script pubkey"),
        FieldSpec::new("value"),
        FieldSpec::new("genesis_height")
            .alias("genesis height")
            .transforms(&[last_path_segment]),
    ];

    #[test]
    fn last_segment_of_paths() {
        assert_eq!(last_path_segment("/block/775796"), "775796");
        assert_eq!(last_path_segment("/tx/abc/"), "abc");
        assert_eq!(last_path_segment("775796"), "775796");
        assert_eq!(last_path_segment(&last_path_segment("/block/7")), "7");
    }

    #[test]
    fn labels_match_either_spelling() {
        let spec = SPECS[0];
        assert!(spec.matches("script_pubkey"));
        assert!(spec.matches("script pubkey"));
        assert!(spec.matches("Script  Pubkey"));
        assert!(!spec.matches("script"));
    }

    #[test]
    fn resolve_applies_transforms() {
        let mut fields = resolve(
            "test",
            SPECS,
            [("script pubkey", " OP_1 "), ("value", "5"), ("genesis height", "/block/9")],
        )
        .unwrap();
        assert_eq!(fields.text("script_pubkey").unwrap(), "OP_1");
        assert_eq!(fields.unsigned("value").unwrap(), 5);
        assert_eq!(fields.unsigned("genesis_height").unwrap(), 9);
    }

    #[test]
    fn resolve_rejects_unknown() {
        let err = resolve(
            "test",
            SPECS,
            [("script pubkey", "x"), ("value", "1"), ("genesis_height", "1"), ("colour", "red")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                record: "test",
                field: "colour".into()
            }
        );
    }

    #[test]
    fn resolve_rejects_alias_and_name_together() {
        let err = resolve(
            "test",
            SPECS,
            [("script pubkey", "x"), ("script_pubkey", "y")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateField {
                record: "test",
                field: "script_pubkey"
            }
        );
    }

    #[test]
    fn resolve_rejects_missing() {
        let err = resolve("test", SPECS, [("script pubkey", "x"), ("value", "1")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                record: "test",
                field: "genesis_height"
            }
        );
    }

    #[test]
    fn bad_integer_names_field() {
        let mut fields = resolve(
            "test",
            SPECS,
            [("script pubkey", "x"), ("value", "ten"), ("genesis height", "1")],
        )
        .unwrap();
        assert_eq!(
            fields.unsigned("value").unwrap_err(),
            ValidationError::InvalidInteger {
                record: "test",
                field: "value",
                value: "ten".into()
            }
        );
    }
}
