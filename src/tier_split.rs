// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Tier Split (step 1)

//! Divides the epoch pool between the training node tier and the validator
//! tier:
//!
//! ```text
//! training  = R0 * (gamma + (1 - 2*gamma) * node_direct / (node_direct + validator_direct))
//! validator = R0 - training
//! ```
//!
//! The validator tier is always computed as the remainder, so the pool is
//! conserved even when neither tier has direct stake.

use crate::types::TierSplit;
use tracing::{debug, warn};

/// Split `r0` between the two tiers by aggregate direct stake.
///
/// `gamma` is not bounds-checked; values outside [0, 0.5] give consistent
/// but unconventional splits.
pub fn split_tiers(r0: f64, gamma: f64, node_direct_total: f64, validator_direct_total: f64) -> TierSplit {
    let denom = node_direct_total + validator_direct_total;

    let (fraction_nodes, training_reward) = if denom == 0.0 {
        warn!(r0, "no direct stake in either tier, validator tier absorbs the pool");
        (0.0, 0.0)
    } else {
        let fraction_nodes = node_direct_total / denom;
        (fraction_nodes, r0 * (gamma + (1.0 - 2.0 * gamma) * fraction_nodes))
    };
    let validator_reward = r0 - training_reward;

    debug!(fraction_nodes, training_reward, validator_reward, "tier split");

    TierSplit {
        node_direct_total,
        validator_direct_total,
        fraction_nodes,
        training_reward,
        validator_reward,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const R0: f64 = 309_157.68;

    #[test]
    fn test_stake_proportional_with_zero_gamma() {
        let split = split_tiers(R0, 0.0, 6500.0, 9000.0);
        assert!((split.fraction_nodes - 6500.0 / 15500.0).abs() < 1e-12);
        assert!((split.training_reward - 129_646.769_032).abs() < 1e-3);
        assert!((split.validator_reward - 179_510.910_968).abs() < 1e-3);
    }

    #[test]
    fn test_reference_defaults() {
        // nodes [3000, 3500, 0], validators [3000, 6000, 3000]
        let split = split_tiers(R0, 0.0, 6500.0, 12000.0);
        assert!((split.fraction_nodes - 6500.0 / 18500.0).abs() < 1e-12);
        assert!((split.training_reward - 108_622.968_649).abs() < 1e-3);
        assert!((split.training_reward + split.validator_reward - R0).abs() < 1e-6);
    }

    #[test]
    fn test_half_gamma_splits_evenly() {
        let split = split_tiers(1000.0, 0.5, 1.0, 99.0);
        assert!((split.training_reward - 500.0).abs() < 1e-9);
        assert!((split.validator_reward - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_floor_guarantees_minimum_share() {
        // Node tier with no stake still receives gamma * R0.
        let split = split_tiers(1000.0, 0.2, 0.0, 50.0);
        assert!((split.training_reward - 200.0).abs() < 1e-9);
        assert!((split.validator_reward - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_gamma_out_of_range_still_conserves() {
        let split = split_tiers(1000.0, 0.8, 30.0, 70.0);
        // 0.8 + (1 - 1.6) * 0.3 = 0.62
        assert!((split.training_reward - 620.0).abs() < 1e-9);
        assert!((split.training_reward + split.validator_reward - 1000.0).abs() < 1e-9);

        let split = split_tiers(1000.0, -0.5, 30.0, 70.0);
        // -0.5 + 2.0 * 0.3 = 0.1
        assert!((split.training_reward - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_validator_absorbs_pool() {
        let split = split_tiers(500.0, 0.3, 0.0, 0.0);
        assert_eq!(split.fraction_nodes, 0.0);
        assert_eq!(split.training_reward, 0.0);
        assert_eq!(split.validator_reward, 500.0);
    }

    #[test]
    fn test_zero_pool() {
        let split = split_tiers(0.0, 0.1, 10.0, 10.0);
        assert_eq!(split.training_reward, 0.0);
        assert_eq!(split.validator_reward, 0.0);
    }
}
