// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Payout ledger -- fixed-point amounts for an f64 allocation.
//!
//! Every owner and delegator reward is rounded down to `decimals` places so
//! no payout exceeds its computed share. Negative rewards (gamma outside
//! [0, 0.5], sigma above 1) round further negative for the same reason. Whatever is left of the pool (rounding
//! dust, forfeited zero-stake shares, tiers with no weight) is reported as
//! `undistributed`, and the ledger balances exactly in `Decimal`:
//!
//! ```text
//! pool = distributed + undistributed
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapter::{to_decimal, to_payout_amount};
use crate::types::{Allocation, ComputeRequest, Tier};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised when a ledger does not balance.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PayoutError {
    #[error("ledger imbalance: pool {pool}, distributed {distributed}, undistributed {undistributed}")]
    Imbalance {
        pool: Decimal,
        distributed: Decimal,
        undistributed: Decimal,
    },

    #[error("payouts exceed the pool by {0}")]
    Overdrawn(Decimal),
}

// ---------------------------------------------------------------------------
// Ledger types
// ---------------------------------------------------------------------------

/// Payout to one participant's owner and its delegators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutEntry {
    pub tier: Tier,
    pub index: usize,
    pub owner: Decimal,
    pub delegator: Decimal,
}

impl PayoutEntry {
    pub fn total(&self) -> Decimal {
        self.owner + self.delegator
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutLedger {
    pub decimals: u32,
    /// R0 as a Decimal.
    pub pool: Decimal,
    pub entries: Vec<PayoutEntry>,
    pub distributed: Decimal,
    pub undistributed: Decimal,
    /// Part of `undistributed` allocated to participants with no stake.
    pub forfeited: Decimal,
}

impl PayoutLedger {
    /// Check that the entries add up and the pool balances exactly.
    pub fn verify(&self) -> Result<(), PayoutError> {
        let distributed: Decimal = self.entries.iter().map(PayoutEntry::total).sum();
        if distributed != self.distributed || distributed + self.undistributed != self.pool {
            return Err(PayoutError::Imbalance {
                pool: self.pool,
                distributed,
                undistributed: self.undistributed,
            });
        }
        // f64 noise may push the sum a hair past the pool; a full unit may not.
        if self.undistributed < -Decimal::new(1, self.decimals.min(28)) {
            return Err(PayoutError::Overdrawn(-self.undistributed));
        }
        Ok(())
    }

    pub fn entries_for(&self, tier: Tier) -> impl Iterator<Item = &PayoutEntry> {
        self.entries.iter().filter(move |e| e.tier == tier)
    }
}

/// Build the payout ledger for an allocation of `request`.
pub fn build_payouts(request: &ComputeRequest, allocation: &Allocation, decimals: u32) -> PayoutLedger {
    let mut entries = Vec::with_capacity(allocation.node_results.len() + allocation.validator_results.len());
    let mut forfeited = Decimal::ZERO;

    for tier in Tier::ALL {
        let participants = request.participants(tier);
        for (index, result) in allocation.results(tier).iter().enumerate() {
            if participants.get(index).map_or(false, |p| p.total_stake() == 0.0) {
                forfeited += to_payout_amount(result.total_reward_before_split, decimals);
            }
            entries.push(PayoutEntry {
                tier,
                index,
                owner: to_payout_amount(result.owner_reward, decimals),
                delegator: to_payout_amount(result.delegator_reward, decimals),
            });
        }
    }

    let pool = to_decimal(request.params.r0);
    let distributed: Decimal = entries.iter().map(PayoutEntry::total).sum();
    let undistributed = pool - distributed;
    debug!(%pool, %distributed, %undistributed, "payout ledger built");

    PayoutLedger {
        decimals,
        pool,
        entries,
        distributed,
        undistributed,
        forfeited,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::compute;
    use crate::types::{Participant, RewardParams};
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_ledger_balances() {
        let req = ComputeRequest::reference();
        let ledger = build_payouts(&req, &compute(&req), 6);
        ledger.verify().expect("test: reference ledger should balance");
        assert!((ledger.pool - dec!(309157.68)).abs() < dec!(0.000001));
        assert_eq!(ledger.entries.len(), 6);
        assert!(ledger.undistributed >= Decimal::ZERO);
        assert!(ledger.undistributed < dec!(0.0001), "dust too large: {}", ledger.undistributed);
    }

    #[test]
    fn test_thirds_leave_dust() {
        let req = ComputeRequest::new(
            RewardParams { r0: 100.0, gamma: 0.0, alpha_training: 1.0, alpha_validator: 1.0 },
            vec![],
            vec![
                Participant::new(1.0, 0.0, 1.0 / 3.0, 1.0),
                Participant::new(1.0, 0.0, 1.0 / 3.0, 1.0),
                Participant::new(1.0, 0.0, 1.0 / 3.0, 1.0),
            ],
        );
        let ledger = build_payouts(&req, &compute(&req), 2);
        ledger.verify().expect("test: should balance");
        assert!(ledger.entries.iter().all(|e| e.owner == dec!(33.33) && e.delegator == Decimal::ZERO));
        assert_eq!(ledger.undistributed, dec!(0.01));
    }

    #[test]
    fn test_forfeited_share_is_undistributed() {
        // alpha = 0 gives the zero-stake validator a nonzero fraction it cannot keep.
        let req = ComputeRequest::new(
            RewardParams { r0: 100.0, gamma: 0.0, alpha_training: 1.0, alpha_validator: 0.0 },
            vec![],
            vec![Participant::new(10.0, 0.0, 0.5, 0.4), Participant::new(0.0, 0.0, 0.5, 0.4)],
        );
        let ledger = build_payouts(&req, &compute(&req), 6);
        ledger.verify().expect("test: should balance");
        assert_eq!(ledger.forfeited, dec!(50));
        assert_eq!(ledger.undistributed, dec!(50));
        assert_eq!(ledger.entries_for(Tier::Validator).count(), 2);
    }

    #[test]
    fn test_negative_rewards_never_overdraw() {
        // gamma < 0 with no node direct stake gives the node tier a negative pool.
        let req = ComputeRequest::new(
            RewardParams { r0: 100.0, gamma: -0.5, alpha_training: 1.0, alpha_validator: 1.0 },
            vec![
                Participant::new(0.0, 1.0, 1.0 / 3.0, 0.4),
                Participant::new(0.0, 2.0, 1.0 / 3.0, 0.4),
                Participant::new(0.0, 4.0, 1.0 / 3.0, 0.4),
            ],
            vec![Participant::new(7.0, 3.0, 1.0, 0.4)],
        );
        let alloc = compute(&req);
        assert!(alloc.training_tier_reward < 0.0);

        let ledger = build_payouts(&req, &alloc, 2);
        ledger.verify().expect("test: negative amounts should still balance");
        assert!(ledger.entries_for(Tier::Node).all(|e| e.owner <= Decimal::ZERO && e.delegator <= Decimal::ZERO));
        assert!(ledger.undistributed >= Decimal::ZERO);
    }

    #[test]
    fn test_tampered_ledger_fails_verify() {
        let req = ComputeRequest::reference();
        let mut ledger = build_payouts(&req, &compute(&req), 6);
        ledger.entries[0].owner += dec!(1);
        assert!(matches!(ledger.verify(), Err(PayoutError::Imbalance { .. })));
    }
}
