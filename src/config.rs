// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Calculator Configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::types::{ComputeRequest, Participant, RewardParams};

/// Score sums within this distance of 1 pass the pre-flight check.
pub const DEFAULT_SCORE_TOLERANCE: f64 = 1e-9;

/// Decimal places used when rounding payouts.
pub const DEFAULT_PAYOUT_DECIMALS: u32 = 6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(serde_json::Error),
}

/// Policy knobs around the allocation math. Every field is optional in the
/// JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatorConfig {
    pub score_tolerance: f64,
    /// Refuse to compute when a tier's scores do not sum to 1.
    pub strict_scores: bool,
    pub payout_decimals: u32,
    /// Parameters used when a request file omits them.
    pub default_params: RewardParams,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            score_tolerance: DEFAULT_SCORE_TOLERANCE,
            strict_scores: false,
            payout_decimals: DEFAULT_PAYOUT_DECIMALS,
            default_params: RewardParams::default(),
        }
    }
}

impl CalculatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), "loaded calculator config");
        Ok(config)
    }

    /// Parse a request, filling any omitted pool parameter from
    /// `default_params`.
    pub fn parse_request(&self, json: &str) -> Result<ComputeRequest, ConfigError> {
        let file: RequestFile = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        let d = self.default_params;
        Ok(ComputeRequest {
            params: RewardParams {
                r0: file.r0.unwrap_or(d.r0),
                gamma: file.gamma.unwrap_or(d.gamma),
                alpha_training: file.alpha_training.unwrap_or(d.alpha_training),
                alpha_validator: file.alpha_validator.unwrap_or(d.alpha_validator),
            },
            node_tier: file.node_tier,
            validator_tier: file.validator_tier,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestFile {
    #[serde(alias = "R0")]
    r0: Option<f64>,
    gamma: Option<f64>,
    #[serde(alias = "alphaTrainingTier")]
    alpha_training: Option<f64>,
    #[serde(alias = "alphaValidatorTier")]
    alpha_validator: Option<f64>,
    #[serde(default)]
    node_tier: Vec<Participant>,
    #[serde(default)]
    validator_tier: Vec<Participant>,
}
