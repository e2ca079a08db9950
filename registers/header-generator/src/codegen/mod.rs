// Licensed under the Apache-2.0 license

//! Entry points for generating one peripheral header.
//!
//! The work is split into:
//! - [`crate::resolve`]: applying defaults to the decoded description
//! - `generate`: writing the header sections in order

mod generate;

use crate::config::HeaderConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::license::LicenseTable;
use crate::resolve::resolve;
use crate::types::PeripheralSpec;
use std::path::{Path, PathBuf};

use generate::HeaderGenerator;

/// Extension of the hand-written fragment copied into each header.
pub const CONVENIENCE_EXTENSION: &str = "convenienceheaders";

/// Extension of peripheral descriptions.
pub const DESCRIPTION_EXTENSION: &str = "yaml";

/// Generate the header text for a decoded description.
///
/// `convenience` is copied verbatim into the header, inside the peripheral's
/// documentation group.
pub fn generate_header(
    spec: PeripheralSpec,
    licenses: &LicenseTable,
    convenience: &str,
    config: &HeaderConfig,
) -> GeneratorResult<String> {
    let peripheral = resolve(spec, config)?;
    HeaderGenerator::new(&peripheral, config).generate(licenses, convenience)
}

/// Generate the header for a description file using the default configuration.
///
/// The convenience fragment is read from the file next to `description` with
/// the `.convenienceheaders` extension.
pub fn generate_header_from_file(
    description: &Path,
    licenses: &LicenseTable,
) -> GeneratorResult<String> {
    generate_header_from_file_with_config(description, licenses, &HeaderConfig::with_defaults())
}

/// Generate the header for a description file with a custom configuration.
pub fn generate_header_from_file_with_config(
    description: &Path,
    licenses: &LicenseTable,
    config: &HeaderConfig,
) -> GeneratorResult<String> {
    log::debug!("Reading {}", description.display());
    let spec = PeripheralSpec::from_file(description)?;
    let convenience_path = convenience_path(description);
    let convenience = std::fs::read_to_string(&convenience_path)
        .map_err(|e| GeneratorError::io(&convenience_path, e))?;
    generate_header(spec, licenses, &convenience, config)
}

/// Path of the convenience fragment belonging to `description`.
pub fn convenience_path(description: &Path) -> PathBuf {
    description.with_extension(CONVENIENCE_EXTENSION)
}
