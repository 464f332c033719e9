//! Audit records kept by the frame stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One button press, as written to the interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInteraction {
    /// Store-assigned id, strictly increasing from 1.
    pub id: i64,
    pub frame_id: String,
    /// Farcaster user id.
    pub fid: u64,
    /// Action label such as `buy_50` or `confirm_purchase`.
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

/// An interaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFrameInteraction {
    pub frame_id: String,
    pub fid: u64,
    pub action: String,
    pub amount: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl NewFrameInteraction {
    /// Create an interaction stamped with the current time.
    pub fn new(
        frame_id: impl Into<String>,
        fid: u64,
        action: impl Into<String>,
        amount: Option<u64>,
    ) -> Self {
        Self {
            frame_id: frame_id.into(),
            fid,
            action: action.into(),
            amount,
            timestamp: Utc::now(),
        }
    }

    /// Attach the store-assigned id.
    pub fn into_record(self, id: i64) -> FrameInteraction {
        FrameInteraction {
            id,
            frame_id: self.frame_id,
            fid: self.fid,
            action: self.action,
            amount: self.amount,
            timestamp: self.timestamp,
        }
    }
}

/// Latest step label recorded for a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameState {
    pub id: i64,
    /// Unique per frame.
    pub frame_id: String,
    pub state: String,
    pub updated_at: DateTime<Utc>,
}
