// Scenario Definitions -- random request families for invariant sweeps
// All scenario logic lives in parameter ranges; the engine is untouched.

use std::ops::RangeInclusive;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub nodes: RangeInclusive<usize>,
    pub validators: RangeInclusive<usize>,
    pub r0: RangeInclusive<f64>,
    pub gamma: RangeInclusive<f64>,
    pub alpha: RangeInclusive<f64>,
    pub stake: RangeInclusive<f64>,
    pub sigma: RangeInclusive<f64>,
    /// Probability that a participant has no delegators.
    pub p_no_delegators: f64,
    /// Probability that a participant has no stake at all.
    pub p_zero_stake: f64,
    /// Rescale scores so each tier sums to 1.
    pub normalize_scores: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "",
            label: "",
            category: "",
            nodes: 1..=8,
            validators: 1..=8,
            r0: 1_000.0..=1_000_000.0,
            gamma: 0.0..=0.5,
            alpha: 0.5..=2.0,
            stake: 0.0..=10_000.0,
            sigma: 0.0..=1.0,
            p_no_delegators: 0.3,
            p_zero_stake: 0.0,
            normalize_scores: true,
        }
    }
}

impl Scenario {
    pub fn sigma_fixed_at_one(&self) -> bool {
        *self.sigma.start() == 1.0 && *self.sigma.end() == 1.0
    }

    pub fn alpha_fixed_at_zero(&self) -> bool {
        *self.alpha.start() == 0.0 && *self.alpha.end() == 0.0
    }
}

// ─── Scenario Registry ──────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "REFERENCE_SHAPE",
            label: "3 nodes + 3 validators",
            category: "baseline",
            nodes: 3..=3,
            validators: 3..=3,
            r0: 309_157.68..=309_157.68,
            gamma: 0.0..=0.0,
            alpha: 1.0..=1.0,
            sigma: 0.4..=0.4,
            ..Scenario::default()
        },
        Scenario {
            name: "WIDE_TIERS",
            label: "Large tiers, mixed params",
            category: "baseline",
            nodes: 20..=200,
            validators: 20..=200,
            ..Scenario::default()
        },
        Scenario {
            name: "SIGMA_ONE",
            label: "Owner keeps everything",
            category: "boundary",
            sigma: 1.0..=1.0,
            p_no_delegators: 0.0,
            ..Scenario::default()
        },
        Scenario {
            name: "ALPHA_ZERO",
            label: "Stake-blind fractions",
            category: "boundary",
            alpha: 0.0..=0.0,
            p_zero_stake: 0.2,
            ..Scenario::default()
        },
        Scenario {
            name: "ZERO_STAKE_HEAVY",
            label: "Many zero-stake participants",
            category: "degenerate",
            p_zero_stake: 0.6,
            ..Scenario::default()
        },
        Scenario {
            name: "NEGATIVE_ALPHA",
            label: "Inverse stake weighting",
            category: "degenerate",
            alpha: -2.0..=-0.1,
            p_zero_stake: 0.3,
            ..Scenario::default()
        },
        Scenario {
            name: "GAMMA_OUT_OF_RANGE",
            label: "Gamma outside [0, 0.5]",
            category: "degenerate",
            gamma: -1.0..=1.5,
            ..Scenario::default()
        },
        Scenario {
            name: "UNNORMALIZED_SCORES",
            label: "Scores not summing to 1",
            category: "validation",
            normalize_scores: false,
            ..Scenario::default()
        },
        Scenario {
            name: "DUST_POOL",
            label: "Tiny pool, tiny stakes",
            category: "precision",
            r0: 0.0..=1.0,
            stake: 0.0..=0.001,
            ..Scenario::default()
        },
    ]
}
