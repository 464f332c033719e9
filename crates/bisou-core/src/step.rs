//! Frame step state machine.
//!
//! No state survives between requests. The step a button press belongs to is
//! recovered from the route the client posted to, and any amount travels in
//! the post-back URL's query string. [`transition`] is a pure function of
//! that step and the pressed button.

use crate::pricing::{parse_amount, PRESET_AMOUNTS};
use crate::{BisouError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Route prefix every frame URL hangs off.
pub const FRAME_ROOT: &str = "/frame-entry";

/// Step identity without its data, as it appears in route segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Initial,
    CustomAmount,
    Confirmation,
    Error,
    Receipt,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Initial => "initial",
            StepKind::CustomAmount => "custom-amount",
            StepKind::Confirmation => "confirmation",
            StepKind::Error => "error",
            StepKind::Receipt => "receipt",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame step together with the data it carries forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Preset amounts plus a custom-amount button.
    Initial,
    /// Free-text amount entry.
    CustomAmount,
    /// Shows the amount and its cost before buying.
    Confirmation { amount: u64 },
    /// An entered or carried amount did not parse.
    Error,
    /// A simulated purchase went through.
    Receipt { amount: u64 },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Initial => StepKind::Initial,
            Step::CustomAmount => StepKind::CustomAmount,
            Step::Confirmation { .. } => StepKind::Confirmation,
            Step::Error => StepKind::Error,
            Step::Receipt { .. } => StepKind::Receipt,
        }
    }

    pub fn amount(&self) -> Option<u64> {
        match self {
            Step::Confirmation { amount } | Step::Receipt { amount } => Some(*amount),
            _ => None,
        }
    }

    /// Rebuild a step from its route and the `amount` query parameter.
    ///
    /// Returns `None` when the step needs an amount and it is missing or
    /// malformed.
    pub fn resume(kind: StepKind, amount: Option<&str>) -> Option<Step> {
        let parsed = amount.and_then(|a| parse_amount(a).ok());
        match (kind, parsed) {
            (StepKind::Initial, _) => Some(Step::Initial),
            (StepKind::CustomAmount, _) => Some(Step::CustomAmount),
            (StepKind::Error, _) => Some(Step::Error),
            (StepKind::Confirmation, Some(amount)) => Some(Step::Confirmation { amount }),
            (StepKind::Receipt, Some(amount)) => Some(Step::Receipt { amount }),
            (StepKind::Confirmation | StepKind::Receipt, None) => None,
        }
    }

    /// Label written to the frame state log.
    pub fn label(&self) -> String {
        match self.amount() {
            Some(amount) => format!("{}:{}", self.kind(), amount),
            None => self.kind().to_string(),
        }
    }

    /// Path of the image route for this step, query string included.
    pub fn image_path(&self) -> String {
        match self {
            Step::Initial => format!("{FRAME_ROOT}/image"),
            Step::Confirmation { amount } | Step::Receipt { amount } => format!(
                "{FRAME_ROOT}/{}?amount={}&cost={}",
                self.kind(),
                amount,
                crate::pricing::format_cost(*amount)
            ),
            Step::CustomAmount | Step::Error => format!("{FRAME_ROOT}/{}", self.kind()),
        }
    }

    /// Path the client posts the next button press to.
    pub fn post_path(&self) -> String {
        match self {
            Step::Initial => format!("{FRAME_ROOT}/action"),
            Step::Confirmation { amount } | Step::Receipt { amount } => {
                format!("{FRAME_ROOT}/action/{}?amount={}", self.kind(), amount)
            }
            Step::CustomAmount | Step::Error => format!("{FRAME_ROOT}/action/{}", self.kind()),
        }
    }
}

/// What a button press meant, for the interaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// One of the preset amounts on the initial step.
    BuyPreset(u64),
    OpenCustom,
    /// Custom amount submitted, valid or not.
    BuyCustom,
    ConfirmPurchase,
    BuyAgain,
    Retry,
    Back,
    /// Press on a post-back URL whose amount did not survive the trip.
    BrokenContinuation,
}

impl Action {
    pub fn label(&self) -> String {
        match self {
            Action::BuyPreset(amount) => format!("buy_{amount}"),
            Action::OpenCustom => "open_custom".to_string(),
            Action::BuyCustom => "buy_custom".to_string(),
            Action::ConfirmPurchase => "confirm_purchase".to_string(),
            Action::BuyAgain => "buy_again".to_string(),
            Action::Retry => "retry".to_string(),
            Action::Back => "back".to_string(),
            Action::BrokenContinuation => "invalid_amount".to_string(),
        }
    }
}

/// Result of applying a button press to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    pub next: Step,
    /// Token amount the press refers to, if any.
    pub amount: Option<u64>,
}

impl Transition {
    fn to(action: Action, next: Step) -> Self {
        let amount = match action {
            Action::Back | Action::Retry | Action::OpenCustom | Action::BrokenContinuation => None,
            _ => next.amount(),
        };
        Self {
            action,
            next,
            amount,
        }
    }

    /// Whether this press executes a (simulated) purchase.
    pub fn is_purchase(&self) -> bool {
        self.action == Action::ConfirmPurchase
    }
}

/// Next step for a press on a post-back URL that [`Step::resume`] could not
/// rebuild. The press goes straight to the error step; buttons the step
/// would not have shown are still rejected.
pub fn broken_continuation(kind: StepKind, button: u8) -> Result<Transition> {
    match (kind, button) {
        (StepKind::Confirmation | StepKind::Receipt, 1 | 2) => {
            Ok(Transition::to(Action::BrokenContinuation, Step::Error))
        }
        _ => Err(BisouError::InvalidButton {
            step: kind.as_str(),
            index: button,
        }),
    }
}

/// Compute the next step for `button` pressed on `step`.
///
/// `input` is the frame's text input and only matters on the custom-amount
/// step. Buttons the step does not show are rejected.
pub fn transition(step: Step, button: u8, input: Option<&str>) -> Result<Transition> {
    let invalid = || BisouError::InvalidButton {
        step: step.kind().as_str(),
        index: button,
    };

    let transition = match (step, button) {
        (Step::Initial, 1..=3) => {
            let amount = PRESET_AMOUNTS[usize::from(button - 1)];
            Transition::to(Action::BuyPreset(amount), Step::Confirmation { amount })
        }
        (Step::Initial, 4) => Transition::to(Action::OpenCustom, Step::CustomAmount),

        (Step::CustomAmount, 1) => match input.map(parse_amount) {
            Some(Ok(amount)) => Transition::to(Action::BuyCustom, Step::Confirmation { amount }),
            _ => Transition::to(Action::BuyCustom, Step::Error),
        },

        (Step::Confirmation { amount }, 1) => {
            Transition::to(Action::ConfirmPurchase, Step::Receipt { amount })
        }

        (Step::Error, 1) => Transition::to(Action::Retry, Step::CustomAmount),

        (Step::Receipt { amount }, 1) => {
            Transition::to(Action::BuyAgain, Step::Confirmation { amount })
        }

        (Step::CustomAmount | Step::Confirmation { .. } | Step::Error | Step::Receipt { .. }, 2) => {
            Transition::to(Action::Back, Step::Initial)
        }

        _ => return Err(invalid()),
    };

    Ok(transition)
}
