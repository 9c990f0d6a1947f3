//! Locates the configuration source and turns it into validated `Settings`.

use std::path::{Path, PathBuf};

use super::flat::read_flat;
use super::schema::{self, KeyMap, Profile};
use super::script::read_script;
use super::Settings;
use crate::error::{AppError, AppResult};

/// Files probed, in order, when no explicit path is given.
pub const CONVENTIONAL_FILES: [&str; 3] = ["myconfig.py", "config.env", ".env"];

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Script-style constants (`.py`), read without execution
    Script,
    /// `KEY=VALUE` lines
    Flat,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("py") => SourceFormat::Script,
            _ => SourceFormat::Flat,
        }
    }

    /// Key mapping for connection fields. Only script sources honor the profile.
    pub fn key_map(self, profile: Profile) -> KeyMap {
        match self {
            SourceFormat::Script => profile.key_map(),
            SourceFormat::Flat => KeyMap::FLAT,
        }
    }
}

/// Resolves `Settings` from a single configuration file.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    /// Directory searched for conventional file names
    search_dir: PathBuf,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver probing the current working directory.
    pub fn new() -> Self {
        Self::in_dir(".")
    }

    /// Resolver probing `dir` for conventional file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: dir.into(),
        }
    }

    /// Pick the configuration file to read.
    ///
    /// An explicit path must be an existing file. Otherwise the first existing entry of
    /// [`CONVENTIONAL_FILES`] in the search directory is used.
    pub fn locate(&self, explicit: Option<&Path>) -> AppResult<PathBuf> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(AppError::ConfigNotFound {
                    attempted: vec![path.to_path_buf()],
                });
            }
            return Ok(path.to_path_buf());
        }

        let candidates: Vec<PathBuf> = CONVENTIONAL_FILES
            .iter()
            .map(|name| self.search_dir.join(name))
            .collect();

        match candidates.iter().find(|path| path.is_file()) {
            Some(found) => {
                tracing::info!(path = %found.display(), "Found configuration file");
                Ok(found.clone())
            }
            None => Err(AppError::ConfigNotFound {
                attempted: candidates,
            }),
        }
    }

    /// Locate, parse, and validate settings.
    ///
    /// # Example
    /// ```no_run
    /// use deepsearch_core::config::{ConfigResolver, Profile};
    ///
    /// let settings = ConfigResolver::new().resolve(None, Profile::Basic)?;
    /// println!("{}", settings.summary());
    /// # Ok::<(), deepsearch_core::AppError>(())
    /// ```
    pub fn resolve(&self, explicit: Option<&Path>, profile: Profile) -> AppResult<Settings> {
        let path = self.locate(explicit)?;
        let format = SourceFormat::from_path(&path);
        let keys = format.key_map(profile);

        tracing::debug!(path = %path.display(), ?format, %profile, "Reading configuration");

        let contents = std::fs::read_to_string(&path)?;
        let raw = match format {
            SourceFormat::Script => read_script(&contents),
            SourceFormat::Flat => read_flat(&contents),
        };

        let settings = schema::apply(&raw, &keys)?;
        settings.validate_with(&keys)?;

        tracing::debug!("Resolved configuration:\n{}", settings.summary());
        Ok(settings)
    }
}

/// Resolve settings from the current working directory.
pub fn load_settings(explicit: Option<&Path>, profile: Profile) -> AppResult<Settings> {
    ConfigResolver::new().resolve(explicit, profile)
}
