// Licensed under the Apache-2.0 license

//! License texts placed at the top of every generated header.
//!
//! The license table maps a license key (the `license` key of a peripheral
//! description) to a text template. Templates use the same placeholders as
//! doc fragments, e.g. `{projectname}` or `{copyright}`.

use crate::error::{GeneratorError, GeneratorResult};
use crate::template::Placeholders;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// License key to license template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LicenseTable {
    templates: BTreeMap<String, String>,
}

impl LicenseTable {
    pub fn from_yaml(input: &str) -> GeneratorResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> GeneratorResult<Self> {
        let input = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))?;
        Self::from_yaml(&input)
    }

    pub fn insert(mut self, key: &str, template: &str) -> Self {
        self.templates.insert(key.to_string(), template.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render the license the peripheral refers to.
    pub fn render(&self, placeholders: &Placeholders) -> GeneratorResult<String> {
        let peripheral = placeholders.peripheral();
        let key = peripheral.license.as_deref().ok_or_else(|| {
            GeneratorError::missing("license", format!("peripheral {}", peripheral.shortname))
        })?;
        let template = self
            .get(key)
            .ok_or_else(|| GeneratorError::UnknownLicense(key.to_string()))?;
        placeholders.render(template)
    }
}
