//! Loader for RON content files at startup.

use std::fs;
use std::path::{Path, PathBuf};

use ron::Options;
use thiserror::Error;

use super::data::*;
use super::registry::FighterRegistry;
use super::validation::{ValidationError, validate_defaults, validate_fighter};

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid content in {file}: {source}")]
    Invalid {
        file: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: path.to_path_buf(),
        source,
    })
}

/// Parse RON text containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(contents: &str, file: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> =
        ron_options()
            .from_str(contents)
            .map_err(|source| ContentLoadError::Parse {
                file: file.to_path_buf(),
                source,
            })?;

    Ok(data.items)
}

/// Parse RON text containing a single struct (not wrapped in DataFile).
pub fn parse_single_file<T>(contents: &str, file: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_path_buf(),
            source,
        })
}

fn invalid(file: &Path) -> impl Fn(ValidationError) -> ContentLoadError + '_ {
    move |source| ContentLoadError::Invalid {
        file: file.to_path_buf(),
        source,
    }
}

/// Build a registry from fighter definitions, dropping (and reporting) any
/// that fail validation.
pub fn build_registry(
    defs: &[FighterDef],
    file: &Path,
) -> (FighterRegistry, Vec<ContentLoadError>) {
    let mut registry = FighterRegistry::default();
    let mut errors = Vec::new();

    for def in defs {
        let problems = validate_fighter(def);
        if !problems.is_empty() {
            errors.extend(problems.into_iter().map(invalid(file)));
            continue;
        }

        if !registry.insert(def) {
            errors.push(invalid(file)(ValidationError::DuplicateFighter(
                def.id.clone(),
            )));
        }
    }

    (registry, errors)
}

/// Load fighters.ron and combat_defaults.ron from `base_path`.
/// Returns every error found; nothing partial is returned on failure.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(FighterRegistry, CombatDefaults), Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let fighters_path = base_path.join("fighters.ron");
    let registry = match read(&fighters_path)
        .and_then(|text| parse_data_file::<FighterDef>(&text, &fighters_path))
    {
        Ok(defs) => {
            let (registry, problems) = build_registry(&defs, &fighters_path);
            errors.extend(problems);
            registry
        }
        Err(e) => {
            errors.push(e);
            FighterRegistry::default()
        }
    };

    // Combat defaults are required
    let defaults_path = base_path.join("combat_defaults.ron");
    let defaults = match read(&defaults_path)
        .and_then(|text| parse_single_file::<CombatDefaults>(&text, &defaults_path))
    {
        Ok(defaults) => defaults,
        Err(e) => {
            errors.push(e);
            return Err(errors);
        }
    };

    errors.extend(
        validate_defaults(&defaults, &registry)
            .into_iter()
            .map(invalid(&defaults_path)),
    );

    if errors.is_empty() {
        Ok((registry, defaults))
    } else {
        Err(errors)
    }
}
