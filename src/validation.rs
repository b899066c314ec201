// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Pre-flight Validation

//! Caller-side checks that run independently of the allocation math.
//!
//! None of these block [`compute`](crate::allocation::compute); they are
//! returned as diagnostics. [`compute_checked`](crate::allocation::compute_checked)
//! turns the blocking ones into a [`ValidationError`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::CalculatorConfig;
use crate::types::{ComputeRequest, Participant, ScoreCheck, Tier};

/// Intended range of the tier split bias.
const GAMMA_RANGE: (f64, f64) = (0.0, 0.5);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    R0,
    Gamma,
    AlphaTraining,
    AlphaValidator,
    OwnerStake,
    DelegatorStake,
    PerformanceScore,
    Sigma,
}

/// Where an offending value sits: pool parameters carry no participant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub tier: Option<Tier>,
    pub index: Option<usize>,
    pub field: Field,
}

impl Location {
    fn param(field: Field) -> Self {
        Self { tier: None, index: None, field }
    }

    fn participant(tier: Tier, index: usize, field: Field) -> Self {
        Self { tier: Some(tier), index: Some(index), field }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.tier, self.index) {
            (Some(tier), Some(index)) => write!(f, "{} {} {:?}", tier, index, self.field),
            _ => write!(f, "{:?}", self.field),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    ScoreSum { tier: Tier, sum: f64 },
    NegativeValue { at: Location, value: f64 },
    NonFinite { at: Location },
    /// Warning only: sigma outside [0, 1].
    SigmaOutOfRange { tier: Tier, index: usize, sigma: f64 },
    /// Warning only: gamma outside [0, 0.5].
    GammaOutOfRange { gamma: f64 },
}

impl ValidationIssue {
    /// Whether computation must refuse the request. Score sums block only
    /// under `strict_scores`.
    pub fn is_blocking(&self, strict_scores: bool) -> bool {
        match self {
            Self::ScoreSum { .. } => strict_scores,
            Self::NegativeValue { .. } | Self::NonFinite { .. } => true,
            Self::SigmaOutOfRange { .. } | Self::GammaOutOfRange { .. } => false,
        }
    }
}

/// Blocking validation failure, as raised by strict computation.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("{tier} scores must sum to 1 (currently: {sum:.6})")]
    ScoreSum { tier: Tier, sum: f64 },

    #[error("negative value {value} at {at}")]
    NegativeValue { at: Location, value: f64 },

    #[error("non-finite value at {at}")]
    NonFinite { at: Location },
}

impl ValidationError {
    pub(crate) fn from_issue(issue: &ValidationIssue) -> Option<Self> {
        match *issue {
            ValidationIssue::ScoreSum { tier, sum } => Some(Self::ScoreSum { tier, sum }),
            ValidationIssue::NegativeValue { at, value } => Some(Self::NegativeValue { at, value }),
            ValidationIssue::NonFinite { at } => Some(Self::NonFinite { at }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub score_checks: Vec<ScoreCheck>,
    pub issues: Vec<ValidationIssue>,
    /// Policy the report was produced under.
    pub strict_scores: bool,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        !self.issues.iter().any(|issue| issue.is_blocking(self.strict_scores))
    }

    /// First blocking issue, if any.
    pub fn first_error(&self) -> Option<ValidationError> {
        self.issues
            .iter()
            .filter(|issue| issue.is_blocking(self.strict_scores))
            .find_map(ValidationError::from_issue)
    }
}

/// Sum a tier's performance scores and compare against 1.
pub fn check_scores(tier: Tier, participants: &[Participant], tolerance: f64) -> ScoreCheck {
    let sum: f64 = participants.iter().map(|p| p.performance_score).sum();
    let within_tolerance = (sum - 1.0).abs() <= tolerance;
    if !within_tolerance {
        warn!(%tier, sum, "performance scores do not sum to 1");
    }
    ScoreCheck { tier, sum, within_tolerance }
}

fn check_value(at: Location, value: f64, issues: &mut Vec<ValidationIssue>) {
    if !value.is_finite() {
        issues.push(ValidationIssue::NonFinite { at });
    } else if value < 0.0 {
        issues.push(ValidationIssue::NegativeValue { at, value });
    }
}

/// Run every pre-flight check on a request.
pub fn validate(request: &ComputeRequest, config: &CalculatorConfig) -> ValidationReport {
    let mut issues = Vec::new();
    let params = &request.params;

    check_value(Location::param(Field::R0), params.r0, &mut issues);
    for (field, value) in [
        (Field::Gamma, params.gamma),
        (Field::AlphaTraining, params.alpha_training),
        (Field::AlphaValidator, params.alpha_validator),
    ] {
        if !value.is_finite() {
            issues.push(ValidationIssue::NonFinite { at: Location::param(field) });
        }
    }
    if params.gamma.is_finite() && (params.gamma < GAMMA_RANGE.0 || params.gamma > GAMMA_RANGE.1) {
        issues.push(ValidationIssue::GammaOutOfRange { gamma: params.gamma });
    }

    let mut score_checks = Vec::with_capacity(Tier::ALL.len());
    for tier in Tier::ALL {
        let participants = request.participants(tier);
        for (index, p) in participants.iter().enumerate() {
            let at = |field| Location::participant(tier, index, field);
            check_value(at(Field::OwnerStake), p.owner_stake, &mut issues);
            check_value(at(Field::DelegatorStake), p.delegator_stake, &mut issues);
            check_value(at(Field::PerformanceScore), p.performance_score, &mut issues);
            if !p.sigma.is_finite() {
                issues.push(ValidationIssue::NonFinite { at: at(Field::Sigma) });
            } else if !(0.0..=1.0).contains(&p.sigma) {
                issues.push(ValidationIssue::SigmaOutOfRange { tier, index, sigma: p.sigma });
            }
        }

        let check = check_scores(tier, participants, config.score_tolerance);
        if !check.within_tolerance {
            issues.push(ValidationIssue::ScoreSum { tier, sum: check.sum });
        }
        score_checks.push(check);
    }

    ValidationReport {
        score_checks,
        issues,
        strict_scores: config.strict_scores,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
