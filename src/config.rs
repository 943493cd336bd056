use std::sync::Arc;
use std::{env, fs, path::PathBuf, time::Duration};

use anyhow::Result;
use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::UploadTarget;

#[derive(Debug, Clone)]
pub struct Config {
    pub targets: Vec<UploadTarget>,
    pub region: Arc<str>,
    pub aws_profile: Option<Arc<str>>,
    pub archive_dir: Arc<str>,
    pub failed_dir: Option<Arc<str>>,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    logs_to_upload: String,
    region: String,
    #[serde(default)]
    aws_profile: Option<String>,
    #[serde(default)]
    archive_dir: Option<String>,
    #[serde(default)]
    failed_dir: Option<String>,
    #[serde(default)]
    http_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut cfg = if let Some(path) = path {
            let raw = fs::read_to_string(path)?;
            Config::try_from(toml::from_str::<RawConfig>(&raw)?)?
        } else {
            let default_path = default_config_path();
            if default_path.exists() {
                let raw = fs::read_to_string(&default_path)?;
                Config::try_from(toml::from_str::<RawConfig>(&raw)?)?
            } else {
                Self::default_from_env()?
            }
        };

        if let Ok(raw) = env::var("LOGS_TO_UPLOAD") {
            let targets = parse_targets(&raw)?;
            if !targets.is_empty() {
                cfg.targets = targets;
            }
        }
        if let Ok(v) = env::var("AWS_REGION") {
            cfg.region = v.into();
        }
        if let Ok(v) = env::var("AWS_PROFILE") {
            cfg.aws_profile = Some(v.into());
        }
        if let Ok(v) = env::var("ARCHIVE_DIR") {
            cfg.archive_dir = v.into();
        }
        if let Ok(v) = env::var("FAILED_DIR") {
            cfg.failed_dir = Some(v.into());
        }
        maybe_env_u64(&mut cfg.http_timeout_secs, "HTTP_TIMEOUT_SECS");

        validate_required(&cfg)?;
        Ok(cfg)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Config {
    fn default_from_env() -> Result<Self> {
        let targets = parse_targets(&env_required("LOGS_TO_UPLOAD")?)?;
        Ok(Self {
            targets,
            region: env_required("AWS_REGION")?.into(),
            aws_profile: env::var("AWS_PROFILE").ok().map(Arc::from),
            archive_dir: env::var("ARCHIVE_DIR")
                .unwrap_or_else(|_| "delete".into())
                .into(),
            failed_dir: env::var("FAILED_DIR").ok().map(Arc::from),
            http_timeout_secs: env_u64("HTTP_TIMEOUT_SECS", 30),
        })
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        Ok(Self {
            targets: parse_targets(&raw.logs_to_upload)?,
            region: raw.region.into(),
            aws_profile: raw.aws_profile.map(Arc::from),
            archive_dir: raw.archive_dir.unwrap_or_else(|| "delete".into()).into(),
            failed_dir: raw.failed_dir.map(Arc::from),
            http_timeout_secs: raw.http_timeout_secs.unwrap_or(30),
        })
    }
}

/// Parse the `path1*group1;path2*group2` target list. Entries keep their
/// input order and duplicates are legal. Every malformed segment is
/// collected so the error names all of them at once.
pub fn parse_targets(raw: &str) -> Result<Vec<UploadTarget>, ConfigError> {
    let mut targets = Vec::new();
    let mut malformed = Vec::new();

    for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match segment.split_once('*') {
            Some((path, group)) if !path.trim().is_empty() && !group.trim().is_empty() => {
                targets.push(UploadTarget {
                    source_dir: PathBuf::from(path.trim()),
                    log_group: group.trim().to_string(),
                });
            }
            _ => malformed.push(segment.to_string()),
        }
    }

    if malformed.is_empty() {
        Ok(targets)
    } else {
        Err(ConfigError::Targets(malformed))
    }
}

fn default_config_path() -> PathBuf {
    ProjectDirs::from("com", "logship", "logship")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".logship/config.toml"))
}

fn validate_required(cfg: &Config) -> Result<()> {
    if cfg.targets.is_empty() {
        return Err(ConfigError::Missing("logs_to_upload").into());
    }
    if cfg.region.trim().is_empty() {
        return Err(ConfigError::Missing("region").into());
    }
    if cfg.archive_dir.trim().is_empty() {
        return Err(ConfigError::Missing("archive_dir").into());
    }
    Ok(())
}

fn maybe_env_u64(val: &mut u64, key: &str) {
    if let Ok(v) = env::var(key) {
        if let Ok(n) = v.parse::<u64>() {
            *val = n;
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_required(key: &str) -> Result<String> {
    let val = env::var(key).unwrap_or_default();
    if val.trim().is_empty() {
        anyhow::bail!("{key} is required");
    }
    Ok(val)
}
