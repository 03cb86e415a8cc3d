use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "post_stubs.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub logging: LoggingConfig,
}

/// Stub generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub posts_dir: PathBuf,
    pub year: i32,
    /// Schedule file; the built-in schedule is used when unset
    pub input: Option<PathBuf>,
    pub strict: bool,
    pub keep_going: bool,
    pub create_posts_dir: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("_posts"),
            year: 2024,
            input: None,
            strict: false,
            keep_going: false,
            create_posts_dir: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(), // pretty, compact, json
        }
    }
}

impl Config {
    /// Load configuration with precedence (highest first):
    /// 1. Environment variables (POST_STUBS__SECTION__KEY)
    /// 2. post_stubs.toml in the current directory (if it exists)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&std::env::current_dir()?)
    }

    /// Load configuration using `dir/post_stubs.toml` as the file source
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_file = dir.join(CONFIG_FILE_NAME);
        Self::build(config_file.exists().then_some(config_file.as_path()))
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Self::build(Some(path))
    }

    fn build(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("POST_STUBS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize::<Config>()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs::write;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching the process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // Helper to create isolated environment for testing: every POST_STUBS__*
    // variable is cleared for the duration of `f` and restored afterwards
    fn with_isolated_env<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let saved_vars: Vec<_> = env::vars_os()
            .filter(|(key, _)| key.to_string_lossy().starts_with("POST_STUBS__"))
            .collect();

        unsafe {
            for (key, _) in &saved_vars {
                env::remove_var(key);
            }
        }

        let result = f();

        unsafe {
            let leftovers: Vec<_> = env::vars_os()
                .map(|(key, _)| key)
                .filter(|key| key.to_string_lossy().starts_with("POST_STUBS__"))
                .collect();
            for key in leftovers {
                env::remove_var(key);
            }
            for (key, value) in saved_vars {
                env::set_var(key, value);
            }
        }

        result
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.generator.posts_dir, PathBuf::from("_posts"));
        assert_eq!(config.generator.year, 2024);
        assert_eq!(config.generator.input, None);
        assert!(!config.generator.strict);
        assert!(!config.generator.keep_going);
        assert!(!config.generator.create_posts_dir);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            let config_content = r#"
[generator]
posts_dir = "site/_posts"
year = 2025
input = "fall.txt"
strict = true

[logging]
level = "info"
format = "json"
"#;
            write(temp_dir.path().join(CONFIG_FILE_NAME), config_content)?;

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.generator.posts_dir, PathBuf::from("site/_posts"));
            assert_eq!(config.generator.year, 2025);
            assert_eq!(config.generator.input, Some(PathBuf::from("fall.txt")));
            assert!(config.generator.strict);
            // Unset keys keep their defaults
            assert!(!config.generator.keep_going);
            assert_eq!(config.logging.level, "info");
            assert_eq!(config.logging.format, "json");

            Ok(())
        })
    }

    #[test]
    fn test_precedence_env_over_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            write(
                temp_dir.path().join(CONFIG_FILE_NAME),
                "[generator]\nyear = 2023\nposts_dir = \"from_file\"\n",
            )?;

            unsafe {
                env::set_var("POST_STUBS__GENERATOR__YEAR", "2026");
            }

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.generator.year, 2026);
            assert_eq!(config.generator.posts_dir, PathBuf::from("from_file"));

            Ok(())
        })
    }

    #[test]
    fn test_env_sets_every_generator_key() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;

            unsafe {
                env::set_var("POST_STUBS__GENERATOR__CREATE_POSTS_DIR", "true");
                env::set_var("POST_STUBS__GENERATOR__KEEP_GOING", "true");
                env::set_var("POST_STUBS__LOGGING__FORMAT", "json");
            }

            let config = Config::load_from_dir(temp_dir.path())?;

            assert!(config.generator.create_posts_dir);
            assert!(config.generator.keep_going);
            assert_eq!(config.logging.format, "json");

            Ok(())
        })
    }

    #[test]
    fn test_load_no_config_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.generator.posts_dir, PathBuf::from("_posts"));
            assert_eq!(config.generator.year, 2024);

            Ok(())
        })
    }

    #[test]
    fn test_load_from_missing_explicit_file() {
        let result = Config::load_from_file(Path::new("/no/such/post_stubs.toml"));
        assert!(result.is_err());
    }
}
