// src/config/loader.rs

use std::path::Path;

use tracing::{debug, info};

use crate::config::ini::IniDocument;
use crate::config::model::ConfigSection;
use crate::errors::{Result, SutError};
use crate::fs::FileSystem;

/// Read and parse an INI configuration file.
///
/// This only performs parsing; it does **not** check that any particular
/// section exists. Use [`apply_file_overrides`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<IniDocument> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    IniDocument::parse(&contents).map_err(|e| SutError::ConfigParse {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })
}

/// Overlay the values of the section's namesake in `file_path` on top of
/// `section`.
///
/// - No path: `section` is returned unchanged.
/// - Options present in the file replace the in-memory value.
/// - Options absent from the file keep their current value.
/// - Keys the section does not declare are ignored.
///
/// Fails with `ConfigParse` for a malformed file, `MissingSection` when the
/// file has no `[<section>]` header, and `InvalidValue` when an integer
/// option is given a non-numeric value.
pub fn apply_file_overrides(
    fs: &dyn FileSystem,
    mut section: ConfigSection,
    file_path: Option<&Path>,
) -> Result<ConfigSection> {
    let Some(path) = file_path else {
        return Ok(section);
    };

    let doc = load_from_path(fs, path)?;
    let section_name = section.name().to_string();

    if !doc.has_section(&section_name) {
        return Err(SutError::MissingSection {
            section: section_name,
            path: path.to_path_buf(),
        });
    }

    for key in doc.keys(&section_name) {
        if !section.contains(key) {
            debug!(
                section = %section_name,
                key,
                path = ?path,
                "ignoring unknown configuration key"
            );
        }
    }

    let names: Vec<String> = section.option_names().map(str::to_string).collect();
    for name in names {
        if let Some(raw) = doc.get(&section_name, &name) {
            section.set_raw(&name, raw)?;
            info!(section = %section_name, option = %name, value = raw, "value overridden from file");
        }
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{keys, load_defaults};
    use crate::config::model::{Mode, OptionValue};
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn no_path_returns_section_unchanged() {
        let fs = MockFileSystem::new();
        let section = load_defaults(Mode::Run);
        let resolved = apply_file_overrides(&fs, section.clone(), None).unwrap();
        assert_eq!(resolved, section);
    }

    #[test]
    fn file_values_override_defaults() {
        let fs = MockFileSystem::new();
        fs.add_file("/etc/sut.ini", "[build]\ndriver_branch = 4.x\n");

        let resolved = apply_file_overrides(
            &fs,
            load_defaults(Mode::Build),
            Some(Path::new("/etc/sut.ini")),
        )
        .unwrap();

        assert_eq!(
            resolved.value(keys::DRIVER_BRANCH).unwrap(),
            &OptionValue::from("4.x")
        );
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let fs = MockFileSystem::new();
        let err = apply_file_overrides(
            &fs,
            load_defaults(Mode::Build),
            Some(Path::new("/missing.ini")),
        )
        .unwrap_err();
        assert!(matches!(err, SutError::Other(_)));
    }

    #[test]
    fn parse_errors_carry_path_and_line() {
        let fs = MockFileSystem::new();
        fs.add_file("/etc/sut.ini", "[run]\nnot an option\n");

        let err = apply_file_overrides(
            &fs,
            load_defaults(Mode::Run),
            Some(Path::new("/etc/sut.ini")),
        )
        .unwrap_err();

        match err {
            SutError::ConfigParse { path, line, .. } => {
                assert_eq!(path, Path::new("/etc/sut.ini"));
                assert_eq!(line, 2);
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }
}
