// Licensed under the Apache-2.0 license

//! Generate every header listed in a directory's manifest.
//!
//! The directory holds:
//! - `generate.yaml`: ordered list of peripheral identifiers
//! - `generate-license.yaml`: license key to license template
//! - `<id>.yaml` and `<id>.convenienceheaders` for every identifier
//!
//! and receives `<id>.h` for every identifier. Headers are written through a
//! temporary file in the same directory and renamed into place, so a failed
//! run never leaves a truncated header behind. A replaced header keeps its
//! permissions; a new one is created `0644`.

use anyhow::{bail, Context, Result};
use log::info;
use registers_header_generator::{generate_header_from_file, LicenseTable, DESCRIPTION_EXTENSION};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Ordered list of peripheral identifiers.
pub const MANIFEST: &str = "generate.yaml";

/// License key to license template.
pub const LICENSE_TABLE: &str = "generate-license.yaml";

/// Generate all headers in `dir`.
///
/// With `check` set nothing is written; instead the run fails if any header on
/// disk differs from what would be generated.
pub fn generate(dir: &Path, check: bool) -> Result<()> {
    let manifest = load_manifest(&dir.join(MANIFEST))?;
    let license_path = dir.join(LICENSE_TABLE);
    let licenses = LicenseTable::from_file(&license_path)
        .with_context(|| format!("failed to load {}", license_path.display()))?;
    info!(
        "{} peripherals, {} licenses in {}",
        manifest.len(),
        licenses.len(),
        dir.display()
    );

    let mut stale = Vec::new();
    for id in &manifest {
        let description = dir.join(format!("{id}.{DESCRIPTION_EXTENSION}"));
        let header = generate_header_from_file(&description, &licenses)
            .with_context(|| format!("failed to generate header for {id}"))?;
        let output = header_path(dir, id);

        if check {
            let current = match fs::read_to_string(&output) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to read {}", output.display()))
                }
            };
            if current.as_deref() != Some(header.as_str()) {
                stale.push(output);
            }
        } else {
            write_atomically(&output, &header)?;
            info!("Generated {} ({} bytes)", output.display(), header.len());
        }
    }

    if !stale.is_empty() {
        let list = stale
            .iter()
            .map(|p| format!("  {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{} headers are out of date:\n{list}", stale.len());
    }
    Ok(())
}

fn load_manifest(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("failed to decode {}", path.display()))
}

fn header_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.h"))
}

fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    #[cfg(unix)]
    {
        let permissions = header_permissions(path)?;
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("failed to set permissions of {}", path.display()))?;
    }
    file.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// Permissions for a header written to `path`: those of the header it
/// replaces, else `0644`. Temporary files are created `0600`.
#[cfg(unix)]
fn header_permissions(path: &Path) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(fs::Permissions::from_mode(0o644)),
        Err(e) => Err(e).with_context(|| format!("failed to stat {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TESTDATA: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../registers/header-generator/testdata"
    );

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in [MANIFEST, LICENSE_TABLE, "tim.yaml", "tim.convenienceheaders"] {
            fs::copy(Path::new(TESTDATA).join(name), dir.path().join(name)).unwrap();
        }
        dir
    }

    fn expected_tim() -> String {
        fs::read_to_string(Path::new(TESTDATA).join("tim.h")).unwrap()
    }

    fn file_count(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_generate() {
        let dir = setup();
        generate(dir.path(), false).unwrap();
        let header = fs::read_to_string(dir.path().join("tim.h")).unwrap();
        assert_eq!(header, expected_tim());
        // Four inputs plus the header, no temporary files.
        assert_eq!(file_count(dir.path()), 5);
    }

    #[test]
    fn test_check_mode() {
        let dir = setup();
        let err = generate(dir.path(), true).unwrap_err();
        assert!(err.to_string().contains("out of date"));
        assert!(!dir.path().join("tim.h").exists());

        generate(dir.path(), false).unwrap();
        generate(dir.path(), true).unwrap();

        fs::write(dir.path().join("tim.h"), "stale\n").unwrap();
        assert!(generate(dir.path(), true).is_err());
        assert_eq!(
            fs::read_to_string(dir.path().join("tim.h")).unwrap(),
            "stale\n"
        );
    }

    #[test]
    fn test_check_mode_reports_unreadable_header() {
        let dir = setup();
        fs::write(dir.path().join("tim.h"), [0xff, 0xfe, 0x00]).unwrap();
        let err = generate(dir.path(), true).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to read"), "{message}");
        assert!(!message.contains("out of date"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn test_header_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        let dir = setup();
        let header = dir.path().join("tim.h");
        generate(dir.path(), false).unwrap();
        assert_eq!(mode(&header), 0o644);

        fs::write(&header, "stale\n").unwrap();
        fs::set_permissions(&header, fs::Permissions::from_mode(0o664)).unwrap();
        generate(dir.path(), false).unwrap();
        assert_eq!(mode(&header), 0o664);
        assert_eq!(fs::read_to_string(&header).unwrap(), expected_tim());
    }

    #[test]
    fn test_failure_keeps_previous_header() {
        let dir = setup();
        fs::write(dir.path().join(MANIFEST), "- tim\n- bad\n").unwrap();
        fs::write(
            dir.path().join("bad.yaml"),
            "longname: No short name\nregisters: []\n",
        )
        .unwrap();
        fs::write(dir.path().join("bad.convenienceheaders"), "").unwrap();
        fs::write(dir.path().join("bad.h"), "previous\n").unwrap();

        let err = generate(dir.path(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("bad"));
        assert!(format!("{:#}", err).contains("shortname"));
        assert_eq!(
            fs::read_to_string(dir.path().join("bad.h")).unwrap(),
            "previous\n"
        );
        // Peripherals before the failing one are generated.
        assert_eq!(
            fs::read_to_string(dir.path().join("tim.h")).unwrap(),
            expected_tim()
        );
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = generate(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains(MANIFEST));
    }

    #[test]
    fn test_unknown_license_aborts() {
        let dir = setup();
        fs::write(dir.path().join(LICENSE_TABLE), "mit: \"/* MIT */\\n\"\n").unwrap();
        let err = generate(dir.path(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown license `lgpl`"));
        assert!(!dir.path().join("tim.h").exists());
    }
}
