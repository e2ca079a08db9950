// Licensed under the Apache-2.0 license

//! Decoded form of a peripheral description.
//!
//! Every key is optional at this stage so that an absent key surfaces as
//! [`GeneratorError::MissingField`] from the resolver rather than as a decoder
//! error. Keys the generator does not use are ignored.

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// Top-level peripheral description, as decoded from YAML.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PeripheralSpec {
    #[serde(default, deserialize_with = "text")]
    pub shortname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub longname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub shortdocname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub longdocname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub baseref: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub registers_baserefext: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub definition_baserefext: Option<String>,
    /// Key into the license table.
    #[serde(default, deserialize_with = "text")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub copyright: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub projectname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub includeguard: Option<String>,
    #[serde(default)]
    pub registers: Option<Vec<RegisterSpec>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RegisterSpec {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    /// Byte offset from the peripheral base.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Suffix appended to the register's "See ... for definitions" sentence.
    #[serde(default, deserialize_with = "text")]
    pub details: Option<String>,
    /// Overrides the peripheral's `definition_baserefext` for this register.
    #[serde(default, deserialize_with = "text")]
    pub definition_baserefext: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub values: Option<Vec<ValueSpec>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FieldSpec {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default)]
    pub shift: Option<u32>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default, deserialize_with = "text")]
    pub doc: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<ValueSpec>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ValueSpec {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Literal>,
    #[serde(default, deserialize_with = "text")]
    pub doc: Option<String>,
}

/// A value expression: either a number or a symbolic expression that is
/// copied into the output as written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Symbol(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl PeripheralSpec {
    pub fn from_yaml(input: &str) -> GeneratorResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> GeneratorResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_yaml(&input)
    }
}

/// Accepts any YAML scalar as text. Descriptions routinely leave numbers such
/// as years or section numbers unquoted.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_register_with_fields() {
        let spec = PeripheralSpec::from_yaml(
            r#"
shortname: FOO
copyright: 2012
ingroup: EFM32TG
registers:
  - name: CTRL
    offset: 0x10
    fields:
      - name: MODE
        shift: 4
        length: 2
        values:
          - {name: OFF, value: 0, doc: Disabled}
          - {name: EXT, value: _FOO_EXT}
"#,
        )
        .unwrap();
        assert_eq!(spec.shortname.as_deref(), Some("FOO"));
        assert_eq!(spec.copyright.as_deref(), Some("2012"));
        let regs = spec.registers.unwrap();
        assert_eq!(regs[0].offset, Some(0x10));
        let field = &regs[0].fields.as_ref().unwrap()[0];
        assert_eq!(field.length, Some(2));
        let values = field.values.as_ref().unwrap();
        assert_eq!(values[0].value, Some(Literal::Int(0)));
        assert_eq!(values[0].doc.as_deref(), Some("Disabled"));
        assert_eq!(values[1].value, Some(Literal::Symbol("_FOO_EXT".into())));
    }

    #[test]
    fn test_missing_keys_decode_as_none() {
        let spec = PeripheralSpec::from_yaml("longname: Foo\n").unwrap();
        assert!(spec.shortname.is_none());
        assert!(spec.registers.is_none());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Int(12).to_string(), "12");
        assert_eq!(Literal::Symbol("FOO_X".into()).to_string(), "FOO_X");
    }

    #[test]
    fn test_non_scalar_text_rejected() {
        assert!(PeripheralSpec::from_yaml("shortname: [a, b]\n").is_err());
    }
}
