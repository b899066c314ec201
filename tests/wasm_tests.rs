#![cfg(target_arch = "wasm32")]

use arena_rewards::{compute_rewards, Allocation, ComputeRequest, RewardsCalculator};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_reference_input_round_trips() {
    let calc = RewardsCalculator::new(false, 6);
    let input = calc.reference_input();
    let request: ComputeRequest = serde_wasm_bindgen::from_value(input).expect("test: decode reference");
    assert_eq!(request, ComputeRequest::reference());
}

#[wasm_bindgen_test]
fn test_compute_rewards_from_js() {
    let input = serde_wasm_bindgen::to_value(&ComputeRequest::reference()).expect("test: encode");
    let out = compute_rewards(input).expect("test: compute");
    let alloc: Allocation = serde_wasm_bindgen::from_value(out).expect("test: decode allocation");
    assert!((alloc.training_tier_reward + alloc.validator_tier_reward - 309_157.68).abs() < 1e-6);
}

#[wasm_bindgen_test]
fn test_strict_calculator_rejects_bad_scores() {
    let calc = RewardsCalculator::new(true, 6);
    let mut request = ComputeRequest::reference();
    request.node_tier[0].performance_score = 0.9;
    let input = serde_wasm_bindgen::to_value(&request).expect("test: encode");
    assert!(calc.compute(input).is_err());
}
