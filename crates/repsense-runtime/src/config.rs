//! Pipeline configuration

use std::path::PathBuf;

use repsense_core::{RepsenseError, RepsenseResult};
use serde::{Deserialize, Serialize};

use crate::{LogFormat, DEFAULT_SKIP_FACTOR};

pub const ENV_SKIP_FACTOR: &str = "REPSENSE_SKIP_FACTOR";
pub const ENV_INFERENCE_SIZE: &str = "REPSENSE_INFERENCE_SIZE";
pub const ENV_HISTORY_PATH: &str = "REPSENSE_HISTORY_PATH";
pub const ENV_LOG_LEVEL: &str = "REPSENSE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "REPSENSE_LOG_FORMAT";

/// Frame pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run inference on every `skip_factor`-th frame
    pub skip_factor: u64,
    /// Width of the copy handed to the pose source
    pub inference_width: u32,
    pub inference_height: u32,
    /// JSON history file
    pub history_path: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            skip_factor: DEFAULT_SKIP_FACTOR,
            inference_width: 640,
            inference_height: 360,
            history_path: PathBuf::from("workout_history.json"),
            log_level: "info".into(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl PipelineConfig {
    /// Fewer, smaller inferences for weak hardware
    pub fn low_power() -> Self {
        PipelineConfig {
            skip_factor: 5,
            inference_width: 480,
            inference_height: 270,
            ..Default::default()
        }
    }

    /// Defaults overridden by `REPSENSE_*` environment variables
    pub fn from_env() -> RepsenseResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> RepsenseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PipelineConfig::default();

        if let Some(raw) = lookup(ENV_SKIP_FACTOR) {
            config.skip_factor = raw.trim().parse().map_err(|_| {
                RepsenseError::InvalidConfig(format!("{ENV_SKIP_FACTOR}: not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_INFERENCE_SIZE) {
            let (width, height) = parse_size(&raw)?;
            config.inference_width = width;
            config.inference_height = height;
        }
        if let Some(raw) = lookup(ENV_HISTORY_PATH) {
            config.history_path = PathBuf::from(raw);
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            config.log_level = raw;
        }
        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RepsenseResult<()> {
        if self.skip_factor == 0 {
            return Err(RepsenseError::InvalidConfig(
                "skip_factor must be at least 1".into(),
            ));
        }
        if self.inference_width == 0 || self.inference_height == 0 {
            return Err(RepsenseError::InvalidConfig(format!(
                "inference size must be non-zero, got {}x{}",
                self.inference_width, self.inference_height
            )));
        }
        Ok(())
    }
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(raw: &str) -> RepsenseResult<(u32, u32)> {
    let invalid = || RepsenseError::InvalidConfig(format!("{ENV_INFERENCE_SIZE}: expected WxH, got {raw}"));

    let (w, h) = raw
        .trim()
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(invalid)?;
    let width = w.trim().parse().map_err(|_| invalid())?;
    let height = h.trim().parse().map_err(|_| invalid())?;
    Ok((width, height))
}
