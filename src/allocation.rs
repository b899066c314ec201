// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Allocation Pipeline

//! Runs the three stages for one request:
//!
//! 1. [`split_tiers`] on each tier's direct stake,
//! 2. [`allocate_fractions`] per tier on `(performance_score, total_stake)`,
//! 3. [`split_owner_delegator`] per participant.
//!
//! Output vectors are positionally aligned with the request's tiers.

use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::fractions::allocate_fractions;
use crate::owner_split::split_owner_delegator;
use crate::tier_split::split_tiers;
use crate::types::{
    Allocation, ComputeRequest, DegenerateInput, Diagnostics, Participant, ParticipantAllocation, ScoreCheck, Tier,
};
use crate::validation::{check_scores, validate, ValidationError};

/// Compute the full allocation. Score-sum problems are reported in
/// `diagnostics`, never raised.
pub fn compute_with_tolerance(request: &ComputeRequest, score_tolerance: f64) -> Allocation {
    let score_checks = Tier::ALL
        .iter()
        .map(|&tier| check_scores(tier, request.participants(tier), score_tolerance))
        .collect();
    allocate(request, score_checks)
}

fn allocate(request: &ComputeRequest, score_checks: Vec<ScoreCheck>) -> Allocation {
    let params = &request.params;
    let mut degenerate = Vec::new();

    let tier_split = split_tiers(
        params.r0,
        params.gamma,
        request.direct_total(Tier::Node),
        request.direct_total(Tier::Validator),
    );
    if tier_split.node_direct_total + tier_split.validator_direct_total == 0.0 {
        degenerate.push(DegenerateInput::NoDirectStake);
    }

    let node_results = allocate_tier(
        Tier::Node,
        &request.node_tier,
        tier_split.pool(Tier::Node),
        params.alpha(Tier::Node),
        &mut degenerate,
    );
    let validator_results = allocate_tier(
        Tier::Validator,
        &request.validator_tier,
        tier_split.pool(Tier::Validator),
        params.alpha(Tier::Validator),
        &mut degenerate,
    );

    Allocation {
        training_tier_reward: tier_split.training_reward,
        validator_tier_reward: tier_split.validator_reward,
        node_results,
        validator_results,
        tier_split,
        diagnostics: Diagnostics { score_checks, degenerate },
    }
}

/// [`compute_with_tolerance`] at the default score tolerance.
pub fn compute(request: &ComputeRequest) -> Allocation {
    compute_with_tolerance(request, crate::config::DEFAULT_SCORE_TOLERANCE)
}

/// Compute only if the request passes validation. Score sums block only when
/// `config.strict_scores` is set; negative or non-finite inputs always block.
pub fn compute_checked(request: &ComputeRequest, config: &CalculatorConfig) -> Result<Allocation, ValidationError> {
    let report = validate(request, config);
    if let Some(err) = report.first_error() {
        warn!(error = %err, "request rejected");
        return Err(err);
    }
    Ok(allocate(request, report.score_checks))
}

fn allocate_tier(
    tier: Tier,
    participants: &[Participant],
    pool: f64,
    alpha: f64,
    degenerate: &mut Vec<DegenerateInput>,
) -> Vec<ParticipantAllocation> {
    let scores: Vec<f64> = participants.iter().map(|p| p.performance_score).collect();
    let stakes: Vec<f64> = participants.iter().map(Participant::total_stake).collect();

    // Both vectors come from the same slice, so lengths always agree.
    let fractions = allocate_fractions(&scores, &stakes, alpha).unwrap_or_else(|_| vec![0.0; participants.len()]);

    if !participants.is_empty() && fractions.iter().all(|&f| f == 0.0) {
        warn!(%tier, pool, "tier has zero weighted stake, nothing allocated");
        degenerate.push(DegenerateInput::ZeroTierWeight { tier });
    }

    let results: Vec<ParticipantAllocation> = participants
        .iter()
        .zip(&fractions)
        .enumerate()
        .map(|(index, (p, &fraction))| {
            let total_reward_before_split = fraction * pool;
            if p.total_stake() == 0.0 {
                if total_reward_before_split != 0.0 {
                    warn!(%tier, index, total_reward_before_split, "zero-stake participant forfeits its share");
                }
                degenerate.push(DegenerateInput::ZeroStakeParticipant { tier, index });
            }
            let split = split_owner_delegator(total_reward_before_split, p.owner_stake, p.delegator_stake, p.sigma);
            ParticipantAllocation {
                fraction,
                total_reward_before_split,
                owner_reward: split.owner_reward,
                delegator_reward: split.delegator_reward,
            }
        })
        .collect();

    debug!(%tier, pool, participants = results.len(), "tier allocated");
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
