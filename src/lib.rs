// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Arena Rewards Calculator

pub mod types;
pub mod config;
pub mod tier_split;
pub mod fractions;
pub mod owner_split;
pub mod validation;
pub mod allocation;
pub mod conservation;
pub mod report;

// Fixed-point payout ledger
pub mod adapter;
pub mod payout;

pub use types::*;
pub use allocation::{compute, compute_checked, compute_with_tolerance};
pub use config::CalculatorConfig;
pub use validation::{validate, ValidationError, ValidationIssue, ValidationReport};

use serde::Serialize;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn parse_request(input: JsValue) -> Result<ComputeRequest, JsValue> {
    serde_wasm_bindgen::from_value(input).map_err(|e| JsValue::from_str(&format!("invalid request: {}", e)))
}

/// Calculator handle for the browser front end. Holds only policy
/// configuration; every call is an independent evaluation.
#[wasm_bindgen]
pub struct RewardsCalculator {
    config: CalculatorConfig,
}

#[wasm_bindgen]
impl RewardsCalculator {
    #[wasm_bindgen(constructor)]
    pub fn new(strict_scores: bool, payout_decimals: u32) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            config: CalculatorConfig {
                strict_scores,
                payout_decimals,
                ..CalculatorConfig::default()
            },
        }
    }

    /// The calculator's initial form values.
    pub fn reference_input(&self) -> JsValue {
        to_js(&ComputeRequest::reference())
    }

    /// Full allocation. Rejects only what the configured policy blocks.
    pub fn compute(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let request = parse_request(input)?;
        compute_checked(&request, &self.config)
            .map(|allocation| to_js(&allocation))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn validate(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let request = parse_request(input)?;
        Ok(to_js(&validate(&request, &self.config)))
    }

    /// Fixed-point payouts at the configured precision.
    pub fn payouts(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let request = parse_request(input)?;
        let allocation = compute_checked(&request, &self.config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let ledger = payout::build_payouts(&request, &allocation, self.config.payout_decimals);
        ledger.verify().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(to_js(&ledger))
    }

    /// Labelled per-participant rows for charts and detail tables.
    pub fn report_rows(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let request = parse_request(input)?;
        let allocation = compute_with_tolerance(&request, self.config.score_tolerance);
        Ok(to_js(&report::report_rows(&request, &allocation)))
    }

    pub fn audit(&self, input: JsValue) -> Result<JsValue, JsValue> {
        let request = parse_request(input)?;
        let allocation = compute_with_tolerance(&request, self.config.score_tolerance);
        Ok(to_js(&conservation::audit(&request, &allocation)))
    }
}

/// One-shot lenient computation, for callers that need no configuration.
#[wasm_bindgen]
pub fn compute_rewards(input: JsValue) -> Result<JsValue, JsValue> {
    let request = parse_request(input)?;
    Ok(to_js(&compute(&request)))
}
