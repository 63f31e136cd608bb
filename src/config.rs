use crate::export::ExportLayout;
use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AssetsConfig {
    /// Static location the built-in question sets are fetched from
    #[serde(default = "default_question_sets_path")]
    pub question_sets_path: String,
    /// Set loaded at startup when no snapshot exists
    #[serde(default = "default_set")]
    pub default_set: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    /// Consecutive restarts allowed for a capture source that keeps
    /// ending mid-capture, before the fault is surfaced
    #[serde(default = "default_max_restart_attempts")]
    pub max_restart_attempts: u32,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Fixed path of the session snapshot
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub layout: ExportLayout,
}

fn default_service_name() -> String {
    "qa-capture".to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8931
}

fn default_question_sets_path() -> String {
    "assets/question_sets".to_string()
}

fn default_set() -> String {
    "extended_questionnaire.csv".to_string()
}

fn default_max_restart_attempts() -> u32 {
    3
}

fn default_snapshot_path() -> String {
    "data/session_snapshot.json".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            question_sets_path: default_question_sets_path(),
            default_set: default_set(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_restart_attempts: default_max_restart_attempts(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            layout: ExportLayout::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load the config file if it exists, otherwise fall back to
    /// defaults. A present-but-malformed file is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let present = std::path::Path::new(path).exists()
            || std::path::Path::new(&format!("{path}.toml")).exists();
        if present {
            Self::load(path)
        } else {
            warn!("No config file at {:?}; using defaults", path);
            Ok(Self::default())
        }
    }
}
