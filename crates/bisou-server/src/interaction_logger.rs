//! Write-only audit trail for frame button presses.
//!
//! Store failures are logged and dropped here so they can never change the
//! response a frame client sees.

use bisou_core::{FrameStore, Step, Transition};
use bisou_types::{FrameInteraction, NewFrameInteraction};
use std::sync::Arc;
use tracing::{debug, warn};

/// Frame id used for purchases made through the browser app.
pub const WEB_APP_FRAME_ID: &str = "web-app";

pub struct InteractionLogger {
    store: Arc<dyn FrameStore>,
}

impl InteractionLogger {
    pub fn new(store: Arc<dyn FrameStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn FrameStore> {
        &self.store
    }

    /// Append one interaction. Returns the stored record, or `None` if the
    /// store failed.
    pub fn record(
        &self,
        frame_id: &str,
        fid: u64,
        action: &str,
        amount: Option<u64>,
    ) -> Option<FrameInteraction> {
        match self
            .store
            .record_interaction(NewFrameInteraction::new(frame_id, fid, action, amount))
        {
            Ok(record) => {
                debug!(
                    target: "bisou::store",
                    "Logged interaction {} ({}) for frame {}",
                    record.id, record.action, record.frame_id
                );
                Some(record)
            }
            Err(e) => {
                warn!(target: "bisou::store", "Failed to log frame interaction: {}", e);
                None
            }
        }
    }

    /// Log a state machine transition and remember the step it led to.
    pub fn record_transition(&self, frame_id: &str, fid: u64, transition: &Transition) {
        self.record(frame_id, fid, &transition.action.label(), transition.amount);
        self.save_step(frame_id, transition.next);
    }

    fn save_step(&self, frame_id: &str, step: Step) {
        if let Err(e) = self.store.save_frame_state(frame_id, &step.label()) {
            warn!(target: "bisou::store", "Failed to save frame state: {}", e);
        }
    }
}
