//! Fixed-price quoting.
//!
//! The token price is a constant, not a market quote. Costs are computed in
//! integer micro-ETH so the six-digit rendering is exact for every amount.

use crate::{BisouError, Result};
use bisou_types::BISOU;
use serde::Serialize;

/// Price of one token in ETH, as displayed.
pub const UNIT_PRICE: &str = "0.00042";

/// Price of one token in micro-ETH (1e-6 ETH).
const UNIT_PRICE_MICRO: u128 = 420;

const MICRO_PER_ETH: u128 = 1_000_000;

/// Amounts offered on the initial frame, in button order.
pub const PRESET_AMOUNTS: [u64; 3] = [50, 250, 500];

/// Parse a user-entered token amount.
///
/// Accepts a base-10 integer greater than zero, ignoring surrounding
/// whitespace.
pub fn parse_amount(input: &str) -> Result<u64> {
    match input.trim().parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(BisouError::InvalidAmount(input.to_string())),
    }
}

/// ETH cost of `amount` tokens with exactly six fractional digits.
pub fn format_cost(amount: u64) -> String {
    let micro = u128::from(amount) * UNIT_PRICE_MICRO;
    format!("{}.{:06}", micro / MICRO_PER_ETH, micro % MICRO_PER_ETH)
}

/// A priced amount of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub amount: u64,
    pub cost: String,
    pub unit_price: &'static str,
    pub symbol: &'static str,
}

impl Quote {
    pub fn for_amount(amount: u64) -> Self {
        Self {
            amount,
            cost: format_cost(amount),
            unit_price: UNIT_PRICE,
            symbol: BISOU.symbol,
        }
    }
}

/// Outcome of a simulated purchase. No transaction is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    #[serde(flatten)]
    pub quote: Quote,
    pub status: &'static str,
}

/// Execute a purchase against nothing.
pub fn simulate_purchase(amount: u64) -> PurchaseReceipt {
    tracing::info!(
        target: "bisou::purchase",
        "Simulated purchase of {} {}",
        amount,
        BISOU.symbol
    );
    PurchaseReceipt {
        quote: Quote::for_amount(amount),
        status: "simulated",
    }
}
