//! What each step shows.
//!
//! A [`FrameView`] is the single description of a step's content. The HTML
//! document and the SVG image are both rendered from it.

use crate::pricing::{format_cost, PRESET_AMOUNTS};
use crate::step::Step;
use bisou_types::BISOU;

/// Visual emphasis for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Warning,
}

/// Content of one frame step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub step: Step,
    /// `og:title`.
    pub title: String,
    /// `og:description`.
    pub description: String,
    /// Large heading drawn on the image.
    pub heading: String,
    pub lines: Vec<String>,
    /// Button labels in index order, at most four.
    pub buttons: Vec<String>,
    /// Placeholder for the frame's text input, when it has one.
    pub input_prompt: Option<String>,
    pub tone: Tone,
}

impl FrameView {
    pub fn for_step(step: Step) -> Self {
        let symbol = BISOU.symbol;
        match step {
            Step::Initial => Self {
                step,
                title: format!("{symbol} Token"),
                description: format!("Purchase {symbol} tokens on {} network", BISOU.network),
                heading: format!("{symbol} TOKEN"),
                lines: vec![format!("Buy {symbol} tokens now!")],
                buttons: PRESET_AMOUNTS
                    .iter()
                    .map(|amount| format!("Buy {amount} {symbol}"))
                    .chain(std::iter::once("Custom Amount".to_string()))
                    .collect(),
                input_prompt: None,
                tone: Tone::Normal,
            },
            Step::CustomAmount => Self {
                step,
                title: format!("{symbol} Custom Amount"),
                description: format!("Enter a custom amount of {symbol} tokens to purchase"),
                heading: "CUSTOM AMOUNT".to_string(),
                lines: vec![format!("How many {symbol} tokens would you like to purchase?")],
                buttons: vec!["Continue".to_string(), "Go Back".to_string()],
                input_prompt: Some(format!("Enter amount of {symbol}")),
                tone: Tone::Normal,
            },
            Step::Confirmation { amount } => Self {
                step,
                title: format!("{symbol} Token Purchase"),
                description: format!("Confirm your purchase of {amount} {symbol} tokens"),
                heading: "CONFIRM PURCHASE".to_string(),
                lines: vec![
                    format!("{symbol} Amount: {amount} tokens"),
                    format!("Cost: ~{} ETH", format_cost(amount)),
                ],
                buttons: vec!["Confirm Purchase".to_string(), "Go Back".to_string()],
                input_prompt: None,
                tone: Tone::Normal,
            },
            Step::Error => Self {
                step,
                title: format!("{symbol} Error"),
                description: "Invalid amount entered".to_string(),
                heading: "INVALID AMOUNT".to_string(),
                lines: vec!["Please enter a valid number of tokens greater than zero.".to_string()],
                buttons: vec!["Try Again".to_string(), "Go Back".to_string()],
                input_prompt: None,
                tone: Tone::Warning,
            },
            Step::Receipt { amount } => Self {
                step,
                title: format!("{symbol} Purchase Complete"),
                description: format!("Simulated purchase of {amount} {symbol} tokens"),
                heading: "PURCHASE COMPLETE".to_string(),
                lines: vec![
                    format!("{amount} {symbol} for ~{} ETH", format_cost(amount)),
                    "Simulated purchase. No funds were moved.".to_string(),
                ],
                buttons: vec!["Buy Again".to_string(), "Go Back".to_string()],
                input_prompt: None,
                tone: Tone::Normal,
            },
        }
    }
}
