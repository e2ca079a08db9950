// Licensed under the Apache-2.0 license

//! Configuration for the fixed parts of a generated header.
//!
//! [`HeaderConfig`] carries the values that are the same for every peripheral
//! of a family: the default project name, the prefix of the derived include
//! guard, and the include directives emitted after the guard.

/// Family-wide settings used when resolving and generating headers.
///
/// # Example
///
/// ```
/// use registers_header_generator::config::HeaderConfig;
///
/// let config = HeaderConfig::with_defaults();
/// assert_eq!(config.include_guard("cmu"), "LIBOPENCM3_EFM32_TINYGECKO_CMU_H");
///
/// let config = HeaderConfig::with_defaults()
///     .guard_prefix("MYPROJ_EFM32_GECKO_")
///     .add_include("libopencm3/efm32/gecko/irq.h");
/// assert_eq!(config.include_guard("LCD"), "MYPROJ_EFM32_GECKO_LCD_H");
/// assert_eq!(config.includes.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct HeaderConfig {
    /// Project name used when the description does not set `projectname`.
    pub project_name: String,

    /// Prefix of the derived include guard; the uppercased short name and
    /// `_H` are appended.
    pub guard_prefix: String,

    /// Headers pulled in with `#include <...>` after the include guard, in order.
    pub includes: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HeaderConfig {
    /// Settings for the libopencm3 EFM32 Tiny Gecko headers.
    pub fn with_defaults() -> Self {
        Self {
            project_name: "libopencm3".to_string(),
            guard_prefix: "LIBOPENCM3_EFM32_TINYGECKO_".to_string(),
            includes: vec![
                "libopencm3/cm3/common.h".to_string(),
                "libopencm3/efm32/memorymap.h".to_string(),
            ],
        }
    }

    pub fn project_name(mut self, name: &str) -> Self {
        self.project_name = name.to_string();
        self
    }

    pub fn guard_prefix(mut self, prefix: &str) -> Self {
        self.guard_prefix = prefix.to_string();
        self
    }

    pub fn add_include(mut self, header: &str) -> Self {
        self.includes.push(header.to_string());
        self
    }

    /// Derive the include guard for a peripheral short name.
    pub fn include_guard(&self, shortname: &str) -> String {
        format!("{}{}_H", self.guard_prefix, shortname.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_include_guard() {
        let config = HeaderConfig::with_defaults();
        assert_eq!(config.include_guard("FOO"), "LIBOPENCM3_EFM32_TINYGECKO_FOO_H");
        assert_eq!(config.include_guard("gpio"), "LIBOPENCM3_EFM32_TINYGECKO_GPIO_H");
    }

    #[test]
    fn test_default_includes() {
        let config = HeaderConfig::default();
        assert_eq!(
            config.includes,
            vec!["libopencm3/cm3/common.h", "libopencm3/efm32/memorymap.h"]
        );
        assert_eq!(config.project_name, "libopencm3");
    }

    #[test]
    fn test_builder() {
        let config = HeaderConfig::with_defaults()
            .project_name("other")
            .guard_prefix("X_");
        assert_eq!(config.project_name, "other");
        assert_eq!(config.include_guard("uart"), "X_UART_H");
    }
}
