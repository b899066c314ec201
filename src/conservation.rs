// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Conservation Audit

use serde::{Deserialize, Serialize};

use crate::types::{Allocation, ComputeRequest, Participant, ParticipantAllocation, Tier};

/// Relative tolerance for reward sums, scaled by `max(1, r0)`.
const REWARD_TOLERANCE: f64 = 1e-6;

/// Absolute tolerance for fraction sums.
const FRACTION_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Absolute pool error: `|r0 - (training + validator)|`.
pub fn pool_error(r0: f64, training_reward: f64, validator_reward: f64) -> f64 {
    (r0 - (training_reward + validator_reward)).abs()
}

/// Distance of a tier's fraction sum from 1. A tier with all-zero fractions
/// (or no participants) is normalized by the zero policy and reports 0.
pub fn fraction_error(results: &[ParticipantAllocation]) -> f64 {
    if results.iter().all(|r| r.fraction == 0.0) {
        return 0.0;
    }
    let sum: f64 = results.iter().map(|r| r.fraction).sum();
    (sum - 1.0).abs()
}

/// Largest `|total - (owner + delegator)|` across participants with stake.
/// Zero-stake participants forfeit their share and are skipped.
pub fn max_split_error(participants: &[Participant], results: &[ParticipantAllocation]) -> f64 {
    participants
        .iter()
        .zip(results)
        .filter(|(p, _)| p.total_stake() != 0.0)
        .map(|(_, r)| (r.total_reward_before_split - (r.owner_reward + r.delegator_reward)).abs())
        .fold(0.0_f64, f64::max)
}

/// Sum of the pre-split rewards allocated to zero-stake participants.
pub fn forfeited(participants: &[Participant], results: &[ParticipantAllocation]) -> f64 {
    participants
        .iter()
        .zip(results)
        .filter(|(p, _)| p.total_stake() == 0.0)
        .map(|(_, r)| r.total_reward_before_split)
        .sum()
}

// ---------------------------------------------------------------------------
// Conservation report
// ---------------------------------------------------------------------------

/// Outcome of auditing one allocation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConservationReport {
    /// `|r0 - (training + validator)|`.
    pub pool_error: f64,
    pub node_fraction_error: f64,
    pub validator_fraction_error: f64,
    /// Worst owner/delegator split error over both tiers.
    pub max_split_error: f64,
    /// Reward allocated to zero-stake participants and paid to nobody.
    pub forfeited: f64,
    /// Whether every check passed within tolerance.
    pub balanced: bool,
}

impl ConservationReport {
    pub fn fraction_error(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Node => self.node_fraction_error,
            Tier::Validator => self.validator_fraction_error,
        }
    }
}

/// Verify the three allocation invariants for `allocation` of `request`.
///
/// Invariants:
///   `r0 == training + validator`
///   `sum(fraction) == 1` per tier, unless every fraction is 0
///   `total_before_split == owner + delegator` per participant with stake
pub fn audit(request: &ComputeRequest, allocation: &Allocation) -> ConservationReport {
    let r0 = request.params.r0;
    let reward_tolerance = REWARD_TOLERANCE * r0.abs().max(1.0);

    let pool_error = pool_error(r0, allocation.training_tier_reward, allocation.validator_tier_reward);
    let node_fraction_error = fraction_error(&allocation.node_results);
    let validator_fraction_error = fraction_error(&allocation.validator_results);

    let mut max_split = 0.0_f64;
    let mut forfeited_total = 0.0;
    for tier in Tier::ALL {
        let participants = request.participants(tier);
        let results = allocation.results(tier);
        max_split = max_split.max(max_split_error(participants, results));
        forfeited_total += forfeited(participants, results);
    }

    let balanced = pool_error <= reward_tolerance
        && node_fraction_error <= FRACTION_TOLERANCE
        && validator_fraction_error <= FRACTION_TOLERANCE
        && max_split <= reward_tolerance;

    ConservationReport {
        pool_error,
        node_fraction_error,
        validator_fraction_error,
        max_split_error: max_split,
        forfeited: forfeited_total,
        balanced,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::compute;
    use crate::types::RewardParams;

    fn pa(fraction: f64, total: f64, owner: f64, delegator: f64) -> ParticipantAllocation {
        ParticipantAllocation {
            fraction,
            total_reward_before_split: total,
            owner_reward: owner,
            delegator_reward: delegator,
        }
    }

    #[test]
    fn test_pool_error_exact() {
        assert!(pool_error(100.0, 40.0, 60.0) < f64::EPSILON);
        assert!((pool_error(100.0, 40.0, 50.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fraction_error_all_zero_is_normalized() {
        assert_eq!(fraction_error(&[pa(0.0, 0.0, 0.0, 0.0), pa(0.0, 0.0, 0.0, 0.0)]), 0.0);
        assert_eq!(fraction_error(&[]), 0.0);
    }

    #[test]
    fn test_fraction_error_detects_drift() {
        let err = fraction_error(&[pa(0.5, 0.0, 0.0, 0.0), pa(0.4, 0.0, 0.0, 0.0)]);
        assert!((err - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_split_error() {
        let staked = [Participant::new(1.0, 1.0, 0.5, 0.5); 2];
        let results = [pa(0.5, 10.0, 6.0, 4.0), pa(0.5, 10.0, 6.0, 3.0)];
        assert!((max_split_error(&staked, &results) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_error_skips_zero_stake() {
        let ps = [Participant::new(1.0, 0.0, 0.5, 0.5), Participant::new(0.0, 0.0, 0.5, 0.5)];
        let results = [pa(0.5, 10.0, 10.0, 0.0), pa(0.5, 10.0, 0.0, 0.0)];
        assert_eq!(max_split_error(&ps, &results), 0.0);
        assert_eq!(forfeited(&ps, &results), 10.0);
    }

    #[test]
    fn test_alpha_zero_forfeit_is_balanced() {
        let req = ComputeRequest::new(
            RewardParams { r0: 1000.0, gamma: 0.0, alpha_training: 0.0, alpha_validator: 1.0 },
            vec![Participant::new(10.0, 0.0, 0.5, 0.4), Participant::new(0.0, 0.0, 0.5, 0.4)],
            vec![Participant::new(10.0, 0.0, 1.0, 0.4)],
        );
        let report = audit(&req, &compute(&req));
        assert!(report.balanced, "{report:?}");
        assert_eq!(report.max_split_error, 0.0);
        assert!((report.forfeited - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_allocation_balanced() {
        let req = ComputeRequest::reference();
        let report = audit(&req, &compute(&req));
        assert!(report.balanced, "{report:?}");
        assert!(report.fraction_error(Tier::Validator) < 1e-12);
        assert_eq!(report.forfeited, 0.0);
    }

    #[test]
    fn test_tampered_allocation_unbalanced() {
        let req = ComputeRequest::reference();
        let mut alloc = compute(&req);
        alloc.validator_results[0].owner_reward += 5.0;
        let report = audit(&req, &alloc);
        assert!(!report.balanced);
        assert!((report.max_split_error - 5.0).abs() < 1e-6);
    }
}
