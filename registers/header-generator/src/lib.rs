// Licensed under the Apache-2.0 license

//! YAML register descriptions to C header generator.
//!
//! This crate turns a peripheral description (short name, documentation names,
//! manual references and an ordered list of registers with their bit fields or
//! values) into a libopencm3-style C header: `MMIO32` register address macros,
//! bit and value definitions, and the Doxygen groups documenting them.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use registers_header_generator::{
//!     generate_header_from_file, generate_header_from_file_with_config, HeaderConfig,
//!     LicenseTable,
//! };
//!
//! let licenses = LicenseTable::from_file(Path::new("generate-license.yaml")).unwrap();
//!
//! // Reads cmu.yaml and cmu.convenienceheaders
//! let header = generate_header_from_file(Path::new("cmu.yaml"), &licenses).unwrap();
//!
//! // Or for another family
//! let config = HeaderConfig::with_defaults().guard_prefix("LIBOPENCM3_EFM32_GECKO_");
//! let header =
//!     generate_header_from_file_with_config(Path::new("cmu.yaml"), &licenses, &config)
//!         .unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: decoded description ([`PeripheralSpec`])
//! - [`resolve`]: required keys and defaults ([`Peripheral`])
//! - [`template`]: `{placeholder}` substitution ([`Placeholders`])
//! - [`comment`]: wrapped Doxygen comment blocks
//! - [`define`]: aligned `#define` lines ([`Definition`])
//! - [`output`]: header text and documentation group balance ([`HeaderWriter`])
//! - [`license`]: license templates ([`LicenseTable`])
//! - [`config`]: family-wide settings ([`HeaderConfig`])
//! - [`util`]: identifier and offset formatting
//! - `codegen`: the header layout and the public entry points

pub mod comment;
pub mod config;
pub mod define;
pub mod error;
pub mod license;
pub mod output;
pub mod resolve;
pub mod template;
pub mod types;
pub mod util;

mod codegen;

// Re-export main public API
pub use codegen::{
    convenience_path, generate_header, generate_header_from_file,
    generate_header_from_file_with_config, CONVENIENCE_EXTENSION, DESCRIPTION_EXTENSION,
};
pub use config::HeaderConfig;
pub use define::Definition;
pub use error::{GeneratorError, GeneratorResult};
pub use license::LicenseTable;
pub use output::HeaderWriter;
pub use resolve::{resolve, Peripheral};
pub use template::Placeholders;
pub use types::PeripheralSpec;
