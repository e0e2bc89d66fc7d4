//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["veriquorum.toml", ".veriquorum.toml"];

/// Prefix of environment overrides, e.g. `VERIQUORUM_DISPATCH__DEADLINE_SECONDS=30`
const ENV_PREFIX: &str = "VERIQUORUM_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables: `VERIQUORUM_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./veriquorum.toml` or `./.veriquorum.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/veriquorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path, Self::project_config_path().as_deref())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File layers without the environment
    fn figment(config_path: Option<&PathBuf>, project_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = project_path {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/veriquorum/config.toml if set,
    /// otherwise falls back to ~/.config/veriquorum/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("veriquorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let status = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", status, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./veriquorum.toml or ./.veriquorum.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.judges.models.is_empty());
        assert_eq!(config.dispatch.deadline_seconds, 45);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("veriquorum"));
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_toml(
            &dir,
            "veriquorum.toml",
            "[consensus]\nmin_quorum = 3\n[dispatch]\ndeadline_seconds = 30\n",
        );
        let explicit = write_toml(&dir, "custom.toml", "[dispatch]\ndeadline_seconds = 10\n");

        let config: FileConfig = ConfigLoader::figment(Some(&explicit), Some(&project))
            .extract()
            .unwrap();

        assert_eq!(config.dispatch.deadline_seconds, 10);
        assert_eq!(config.consensus.min_quorum, 3);
        // Untouched values fall through to defaults
        assert_eq!(config.consensus.min_confidence_threshold, 0.6);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_toml(&dir, "bad.toml", "[dispatch]\ndeadline_seconds = \"soon\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(Some(&explicit), None).extract();

        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_toml(&dir, "custom.toml", "[consensus]\nmin_quorum = 3\n");

        figment::Jail::expect_with(|jail| {
            jail.set_env("VERIQUORUM_CONSENSUS__MIN_QUORUM", "4");
            let config: FileConfig = ConfigLoader::figment(Some(&explicit), None)
                .merge(Env::prefixed(ENV_PREFIX).split("__"))
                .extract()?;
            assert_eq!(config.consensus.min_quorum, 4);
            Ok(())
        });
    }
}
