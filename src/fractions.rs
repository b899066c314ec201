// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator - Fraction Allocator (step 2)

//! Per-tier participant shares:
//!
//! ```text
//! fraction_i = score_i * stake_i^alpha / sum_j(score_j * stake_j^alpha)
//! ```

use tracing::debug;

/// Errors from fraction allocation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AllocationError {
    #[error("score and stake vectors differ in length ({scores} vs {stakes})")]
    LengthMismatch { scores: usize, stakes: usize },
}

/// `stake^alpha` with zero stake pinned to standard power semantics:
/// `0^0 = 1`, and `0^alpha = 0` for every other alpha so a zero stake never
/// feeds an infinity into the weight sum.
pub fn stake_weight(stake: f64, alpha: f64) -> f64 {
    if stake == 0.0 {
        if alpha == 0.0 { 1.0 } else { 0.0 }
    } else {
        stake.powf(alpha)
    }
}

/// Raw (unnormalized) weights `score_i * stake_i^alpha`.
pub fn weights(scores: &[f64], stakes: &[f64], alpha: f64) -> Result<Vec<f64>, AllocationError> {
    if scores.len() != stakes.len() {
        return Err(AllocationError::LengthMismatch {
            scores: scores.len(),
            stakes: stakes.len(),
        });
    }
    Ok(scores
        .iter()
        .zip(stakes)
        .map(|(&score, &stake)| score * stake_weight(stake, alpha))
        .collect())
}

/// Normalize weights into fractions. A zero or non-finite denominator
/// yields all zeros; a negative one still normalizes.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let denom: f64 = weights.iter().sum();
    if denom == 0.0 || !denom.is_finite() {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| w / denom).collect()
}

/// Compute each participant's fraction of the tier pool.
pub fn allocate_fractions(scores: &[f64], stakes: &[f64], alpha: f64) -> Result<Vec<f64>, AllocationError> {
    let w = weights(scores, stakes, alpha)?;
    let fractions = normalize(&w);
    debug!(n = fractions.len(), alpha, "allocated fractions");
    Ok(fractions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(v: &[f64]) -> f64 {
        v.iter().sum()
    }

    #[test]
    fn test_linear_alpha() {
        let f = allocate_fractions(&[0.5, 0.5], &[100.0, 300.0], 1.0).expect("test: equal lengths");
        assert!((f[0] - 0.25).abs() < 1e-12);
        assert!((f[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let f = allocate_fractions(
            &[0.472768, 0.280226, 0.247006],
            &[3000.0, 6000.0, 3000.0],
            1.0,
        )
        .expect("test: equal lengths");
        assert!((sum(&f) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_zero_ignores_stake() {
        let f = allocate_fractions(&[0.2, 0.3, 0.5], &[1.0, 1e6, 0.0], 0.0).expect("test: equal lengths");
        assert!((f[0] - 0.2).abs() < 1e-12);
        assert!((f[1] - 0.3).abs() < 1e-12);
        assert!((f[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sqrt_alpha_dampens_stake() {
        let f = allocate_fractions(&[0.5, 0.5], &[100.0, 400.0], 0.5).expect("test: equal lengths");
        // 10 : 20
        assert!((f[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((f[1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_stake_with_negative_alpha_contributes_nothing() {
        let f = allocate_fractions(&[0.5, 0.5], &[0.0, 4.0], -1.0).expect("test: equal lengths");
        assert_eq!(f[0], 0.0);
        assert!((f[1] - 1.0).abs() < 1e-12);
        assert!(f.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_zero_denominator_gives_zeros() {
        let f = allocate_fractions(&[0.0, 0.0, 1.0], &[10.0, 10.0, 0.0], 1.0).expect("test: equal lengths");
        assert_eq!(f, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalize_denominator_edges() {
        assert_eq!(normalize(&[f64::INFINITY, 1.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(&[f64::NAN, 1.0]), vec![0.0, 0.0]);

        let f = normalize(&[-1.0, -3.0]);
        assert!((f[0] - 0.25).abs() < 1e-12);
        assert!((f[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_tier() {
        let f = allocate_fractions(&[], &[], 1.0).expect("test: empty is fine");
        assert!(f.is_empty());
    }

    #[test]
    fn test_unnormalized_scores_still_sum_to_one() {
        let f = allocate_fractions(&[2.0, 3.0], &[1.0, 1.0], 1.0).expect("test: equal lengths");
        assert!((sum(&f) - 1.0).abs() < 1e-12);
        assert!((f[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let err = allocate_fractions(&[1.0], &[1.0, 2.0], 1.0);
        assert_eq!(err, Err(AllocationError::LengthMismatch { scores: 1, stakes: 2 }));
    }

    #[test]
    fn test_stake_weight_edge_cases() {
        assert_eq!(stake_weight(0.0, 0.0), 1.0);
        assert_eq!(stake_weight(0.0, 2.0), 0.0);
        assert_eq!(stake_weight(0.0, -2.0), 0.0);
        assert!((stake_weight(9.0, 0.5) - 3.0).abs() < 1e-12);
    }
}
