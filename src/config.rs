//! Configuration for the veritas client.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (VERITAS_SERVICE_URL, VERITAS_TIMEOUT_SECONDS)
//! 2. Config file (.veritas/config.yaml)
//! 3. Defaults (local service on port 8000)
//!
//! Config file discovery:
//! - Searches current directory and parents for .veritas/config.yaml
//! - Falls back to ~/.veritas/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub service: Option<ServiceConfig>,
    #[serde(default)]
    pub analysis: Option<AnalysisConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    pub min_text_chars: Option<usize>,
    pub max_text_chars: Option<usize>,
    pub reliable_threshold: Option<u8>,
    pub caution_threshold: Option<u8>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Analysis service base URL
    pub service_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Text and scoring bounds
    pub analysis: AnalysisSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Product-tuned analysis constants.
///
/// The score thresholds band a 0-100 score into reliable/caution/
/// doubtful; they belong to the service's product tuning, not to the
/// rendering logic, so they live here.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Minimum trimmed characters accepted for submission
    pub min_text_chars: usize,
    /// Maximum characters the service accepts
    pub max_text_chars: usize,
    /// Scores at or above this are reliable
    pub reliable_threshold: u8,
    /// Scores at or above this (and below reliable) warrant caution
    pub caution_threshold: u8,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_text_chars: 10,
            max_text_chars: 2000,
            reliable_threshold: 70,
            caution_threshold: 50,
        }
    }
}

impl ResolvedConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Find config file by searching current directory and parents,
/// then the home directory
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".veritas").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(".veritas").join("config.yaml");
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let (file_service, file_analysis) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        (
            config.service.unwrap_or_default(),
            config.analysis.unwrap_or_default(),
        )
    } else {
        (ServiceConfig::default(), AnalysisConfig::default())
    };

    let service_url = std::env::var("VERITAS_SERVICE_URL")
        .ok()
        .or(file_service.url)
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

    let timeout_seconds = std::env::var("VERITAS_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(file_service.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    let defaults = AnalysisSettings::default();
    let analysis = AnalysisSettings {
        min_text_chars: file_analysis
            .min_text_chars
            .unwrap_or(defaults.min_text_chars),
        max_text_chars: file_analysis
            .max_text_chars
            .unwrap_or(defaults.max_text_chars),
        reliable_threshold: file_analysis
            .reliable_threshold
            .unwrap_or(defaults.reliable_threshold),
        caution_threshold: file_analysis
            .caution_threshold
            .unwrap_or(defaults.caution_threshold),
    };

    Ok(ResolvedConfig {
        service_url,
        timeout_seconds,
        analysis,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = ResolvedConfig {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            analysis: AnalysisSettings::default(),
            config_file: None,
        };

        assert_eq!(config.service_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.analysis.min_text_chars, 10);
        assert_eq!(config.analysis.max_text_chars, 2000);
        assert_eq!(config.analysis.reliable_threshold, 70);
        assert_eq!(config.analysis.caution_threshold, 50);
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let veritas_dir = temp.path().join(".veritas");
        std::fs::create_dir_all(&veritas_dir).unwrap();

        let config_path = veritas_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
service:
  url: https://veritas.example.com
  timeout_seconds: 60
analysis:
  min_text_chars: 10
  max_text_chars: 4000
  reliable_threshold: 75
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        let service = config.service.unwrap();
        assert_eq!(service.url.as_deref(), Some("https://veritas.example.com"));
        assert_eq!(service.timeout_seconds, Some(60));
        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.max_text_chars, Some(4000));
        assert_eq!(analysis.reliable_threshold, Some(75));
        // Unset keys stay None and fall back to defaults at resolve time
        assert_eq!(analysis.caution_threshold, None);
    }

    #[test]
    fn test_minimal_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "version: \"1.0\"\n").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.service.is_none());
        assert!(config.analysis.is_none());
    }
}
