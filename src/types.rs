// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Tier ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Node = 0,
    Validator = 1,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Node, Tier::Validator];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Validator => "Validator",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Participant ─────────────────────────────────────────────────────────────

/// One owner entity (training node or validator) together with the stake
/// delegated to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub owner_stake: f64,
    pub delegator_stake: f64,
    pub performance_score: f64,
    /// Owner retention ratio. Intended in [0, 1], never clamped.
    pub sigma: f64,
}

impl Participant {
    pub fn new(owner_stake: f64, delegator_stake: f64, performance_score: f64, sigma: f64) -> Self {
        Self { owner_stake, delegator_stake, performance_score, sigma }
    }

    pub fn total_stake(&self) -> f64 {
        self.owner_stake + self.delegator_stake
    }
}

// ─── Request ─────────────────────────────────────────────────────────────────

/// Pool-wide parameters of one compute invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RewardParams {
    /// Reward pool for the epoch (R0).
    #[serde(alias = "R0")]
    pub r0: f64,
    /// Tier split bias. Intended in [0, 0.5], never clamped.
    pub gamma: f64,
    /// Stake exponent for the training node tier.
    #[serde(alias = "alphaTrainingTier")]
    pub alpha_training: f64,
    /// Stake exponent for the validator tier.
    #[serde(alias = "alphaValidatorTier")]
    pub alpha_validator: f64,
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            r0: 309_157.68,
            gamma: 0.0,
            alpha_training: 1.0,
            alpha_validator: 1.0,
        }
    }
}

impl RewardParams {
    pub fn alpha(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Node => self.alpha_training,
            Tier::Validator => self.alpha_validator,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    #[serde(flatten)]
    pub params: RewardParams,
    #[serde(default)]
    pub node_tier: Vec<Participant>,
    #[serde(default)]
    pub validator_tier: Vec<Participant>,
}

impl ComputeRequest {
    pub fn new(params: RewardParams, node_tier: Vec<Participant>, validator_tier: Vec<Participant>) -> Self {
        Self { params, node_tier, validator_tier }
    }

    /// The calculator's initial form values: three nodes, three validators.
    pub fn reference() -> Self {
        Self {
            params: RewardParams::default(),
            node_tier: vec![
                Participant::new(3000.0, 1000.0, 0.501435, 0.4),
                Participant::new(3500.0, 0.0, 0.498565, 0.4),
                Participant::new(0.0, 0.0, 0.0, 0.4),
            ],
            validator_tier: vec![
                Participant::new(3000.0, 0.0, 0.472768, 0.4),
                Participant::new(6000.0, 0.0, 0.280226, 0.4),
                Participant::new(3000.0, 0.0, 0.247006, 0.4),
            ],
        }
    }

    pub fn participants(&self, tier: Tier) -> &[Participant] {
        match tier {
            Tier::Node => &self.node_tier,
            Tier::Validator => &self.validator_tier,
        }
    }

    /// Aggregate owner ("direct") stake of a tier.
    pub fn direct_total(&self, tier: Tier) -> f64 {
        self.participants(tier).iter().map(|p| p.owner_stake).sum()
    }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Step 1 breakdown: how R0 was divided between the two tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TierSplit {
    pub node_direct_total: f64,
    pub validator_direct_total: f64,
    /// `node / (node + validator)`, or 0 when neither tier has direct stake.
    pub fraction_nodes: f64,
    pub training_reward: f64,
    pub validator_reward: f64,
}

impl TierSplit {
    pub fn pool(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Node => self.training_reward,
            Tier::Validator => self.validator_reward,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSplit {
    pub owner_reward: f64,
    pub delegator_reward: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantAllocation {
    pub fraction: f64,
    pub total_reward_before_split: f64,
    pub owner_reward: f64,
    pub delegator_reward: f64,
}

/// Outcome of one score-sum pre-flight check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCheck {
    pub tier: Tier,
    pub sum: f64,
    pub within_tolerance: bool,
}

/// Zero-denominator situations resolved by the zero policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DegenerateInput {
    /// Neither tier has direct stake; the validator tier absorbs R0.
    NoDirectStake,
    /// Every weight in the tier is zero; all fractions are zero.
    ZeroTierWeight { tier: Tier },
    /// Participant with no stake at all; its share is forfeited.
    ZeroStakeParticipant { tier: Tier, index: usize },
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDirectStake => write!(f, "no direct stake in either tier"),
            Self::ZeroTierWeight { tier } => write!(f, "{} tier has zero weighted stake", tier),
            Self::ZeroStakeParticipant { tier, index } => {
                write!(f, "{} {} has zero total stake", tier, index)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub score_checks: Vec<ScoreCheck>,
    pub degenerate: Vec<DegenerateInput>,
}

impl Diagnostics {
    pub fn scores_valid(&self) -> bool {
        self.score_checks.iter().all(|c| c.within_tolerance)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub training_tier_reward: f64,
    pub validator_tier_reward: f64,
    pub node_results: Vec<ParticipantAllocation>,
    pub validator_results: Vec<ParticipantAllocation>,
    pub tier_split: TierSplit,
    pub diagnostics: Diagnostics,
}

impl Allocation {
    pub fn results(&self, tier: Tier) -> &[ParticipantAllocation] {
        match tier {
            Tier::Node => &self.node_results,
            Tier::Validator => &self.validator_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_json_field_names() {
        let json = r#"{
            "r0": 100.0, "gamma": 0.1, "alphaTraining": 1.0, "alphaValidator": 0.5,
            "nodeTier": [{"ownerStake": 1.0, "delegatorStake": 2.0, "performanceScore": 1.0, "sigma": 0.4}],
            "validatorTier": []
        }"#;
        let req: ComputeRequest = serde_json::from_str(json).expect("test: parse request");
        assert_eq!(req.params.alpha(Tier::Validator), 0.5);
        assert_eq!(req.node_tier[0].total_stake(), 3.0);
        assert!(req.validator_tier.is_empty());
    }

    #[test]
    fn test_reference_direct_totals() {
        let req = ComputeRequest::reference();
        assert_eq!(req.direct_total(Tier::Node), 6500.0);
        assert_eq!(req.direct_total(Tier::Validator), 12000.0);
    }

    #[test]
    fn test_degenerate_serializes_tagged() {
        let d = DegenerateInput::ZeroStakeParticipant { tier: Tier::Node, index: 2 };
        let v = serde_json::to_value(d).expect("test: serialize");
        assert_eq!(v["kind"], "zeroStakeParticipant");
        assert_eq!(v["tier"], "node");
    }
}
