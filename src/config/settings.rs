use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS};
use crate::errors::{ConjureError, Result};

/// Local configuration, loaded from `.conjure.toml`.
///
/// Every field has a default so Conjure works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the vault state file and the secret files.
    /// Relative paths are resolved against the directory the settings
    /// were loaded from.
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,

    /// PBKDF2 iteration count for newly created vaults.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_storage_root() -> PathBuf {
    PathBuf::from(".conjure")
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = ".conjure.toml";

    /// Load settings from `<dir>/.conjure.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            ConjureError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Absolute storage root, resolving a relative one against `base`.
    pub fn storage_root(&self, base: &Path) -> PathBuf {
        base.join(&self.storage_root)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.storage_root, PathBuf::from(".conjure"));
        assert_eq!(s.kdf_iterations, 50_000);
        assert_eq!(s.kdf_params(), KdfParams::default());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.kdf_iterations, 50_000);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
storage_root = "/srv/conjure"
kdf_iterations = 120000
"#;
        fs::write(tmp.path().join(Settings::FILE_NAME), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.storage_root, PathBuf::from("/srv/conjure"));
        assert_eq!(settings.kdf_params().iterations, 120_000);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "kdf_iterations = 75000\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.kdf_iterations, 75_000);
        assert_eq!(settings.storage_root, PathBuf::from(".conjure"));
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(ConjureError::ConfigError(_))
        ));
    }

    #[test]
    fn relative_storage_root_resolves_against_base() {
        let s = Settings::default();
        assert_eq!(
            s.storage_root(Path::new("/home/user")),
            PathBuf::from("/home/user/.conjure")
        );
    }

    #[test]
    fn absolute_storage_root_ignores_base() {
        let s = Settings {
            storage_root: PathBuf::from("/srv/vault"),
            ..Settings::default()
        };
        assert_eq!(
            s.storage_root(Path::new("/home/user")),
            PathBuf::from("/srv/vault")
        );
    }
}
