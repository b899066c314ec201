// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Report Rows

use serde::Serialize;

use crate::types::{Allocation, ComputeRequest, Tier};

/// Participant letter: 0 -> "A", 25 -> "Z", 26 -> "AA", 27 -> "AB", ...
pub fn letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// "Node A", "Validator C", ...
pub fn label(tier: Tier, index: usize) -> String {
    format!("{} {}", tier.label(), letter(index))
}

/// One participant's inputs and outputs side by side.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub tier: Tier,
    pub index: usize,
    pub direct_stake: f64,
    pub delegator_stake: f64,
    pub total_stake: f64,
    pub performance: f64,
    pub sigma: f64,
    pub fraction: f64,
    /// Sub-pool of the participant's tier.
    pub tier_pool: f64,
    pub total_reward: f64,
    pub owner_reward: f64,
    pub delegator_reward: f64,
}

/// Rows for every participant, nodes first, in request order.
pub fn report_rows(request: &ComputeRequest, allocation: &Allocation) -> Vec<ReportRow> {
    Tier::ALL
        .iter()
        .flat_map(move |&tier| {
            let pool = allocation.tier_split.pool(tier);
            request
                .participants(tier)
                .iter()
                .zip(allocation.results(tier))
                .enumerate()
                .map(move |(index, (p, r))| ReportRow {
                    label: label(tier, index),
                    tier,
                    index,
                    direct_stake: p.owner_stake,
                    delegator_stake: p.delegator_stake,
                    total_stake: p.total_stake(),
                    performance: p.performance_score,
                    sigma: p.sigma,
                    fraction: r.fraction,
                    tier_pool: pool,
                    total_reward: r.total_reward_before_split,
                    owner_reward: r.owner_reward,
                    delegator_reward: r.delegator_reward,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::compute;

    #[test]
    fn test_letters() {
        assert_eq!(letter(0), "A");
        assert_eq!(letter(2), "C");
        assert_eq!(letter(25), "Z");
        assert_eq!(letter(26), "AA");
        assert_eq!(letter(27), "AB");
        assert_eq!(letter(701), "ZZ");
        assert_eq!(letter(702), "AAA");
    }

    #[test]
    fn test_reference_rows() {
        let req = ComputeRequest::reference();
        let alloc = compute(&req);
        let rows = report_rows(&req, &alloc);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Node A", "Node B", "Node C", "Validator A", "Validator B", "Validator C"]
        );
        assert_eq!(rows[0].total_stake, 4000.0);
        assert_eq!(rows[3].tier_pool, alloc.validator_tier_reward);
        assert_eq!(rows[4].owner_reward, alloc.validator_results[1].owner_reward);
    }
}
