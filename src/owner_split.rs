// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Owner/Delegator Split (step 3)

use crate::types::OwnerSplit;

/// Split a participant's reward between its owner and its delegators.
///
/// ```text
/// owner     = total * (sigma + (1 - sigma) * owner_stake / (owner_stake + delegator_stake))
/// delegator = total - owner
/// ```
///
/// With no stake at all both sides get zero and the share is forfeited.
pub fn split_owner_delegator(total_reward: f64, owner_stake: f64, delegator_stake: f64, sigma: f64) -> OwnerSplit {
    let total_stake = owner_stake + delegator_stake;
    if total_stake == 0.0 {
        return OwnerSplit::default();
    }

    let owner_reward = total_reward * (sigma + (1.0 - sigma) * (owner_stake / total_stake));
    OwnerSplit {
        owner_reward,
        delegator_reward: total_reward - owner_reward,
    }
}
