//! Storage interface for the interaction log and frame states.

use crate::{BisouError, Result};
use bisou_types::{FrameInteraction, FrameState, NewFrameInteraction};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// Append-only interaction log plus per-frame state labels.
///
/// Implementations must accept concurrent `record_interaction` calls without
/// losing writes.
pub trait FrameStore: Send + Sync {
    /// Append one interaction and return it with its assigned id.
    fn record_interaction(&self, interaction: NewFrameInteraction) -> Result<FrameInteraction>;

    /// All interactions for a frame, oldest first.
    fn interactions_for_frame(&self, frame_id: &str) -> Result<Vec<FrameInteraction>>;

    /// Total number of logged interactions.
    fn interaction_count(&self) -> Result<u64>;

    /// Create the frame's state, or update it in place if it exists.
    fn save_frame_state(&self, frame_id: &str, state: &str) -> Result<FrameState>;

    fn frame_state(&self, frame_id: &str) -> Result<Option<FrameState>>;

    /// Update an existing frame state. Returns `None` if the frame has none.
    fn update_frame_state(&self, frame_id: &str, state: &str) -> Result<Option<FrameState>>;
}

#[derive(Default)]
struct MemoryInner {
    interactions: Vec<FrameInteraction>,
    frame_states: HashMap<String, FrameState>,
    next_state_id: i64,
}

/// In-process store behind a single mutex. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>> {
        self.inner.lock().map_err(|_| BisouError::LockPoisoned)
    }
}

impl FrameStore for MemoryStore {
    fn record_interaction(&self, interaction: NewFrameInteraction) -> Result<FrameInteraction> {
        let mut inner = self.lock()?;
        let id = inner.interactions.len() as i64 + 1;
        let record = interaction.into_record(id);
        inner.interactions.push(record.clone());
        Ok(record)
    }

    fn interactions_for_frame(&self, frame_id: &str) -> Result<Vec<FrameInteraction>> {
        let inner = self.lock()?;
        Ok(inner
            .interactions
            .iter()
            .filter(|i| i.frame_id == frame_id)
            .cloned()
            .collect())
    }

    fn interaction_count(&self) -> Result<u64> {
        Ok(self.lock()?.interactions.len() as u64)
    }

    fn save_frame_state(&self, frame_id: &str, state: &str) -> Result<FrameState> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        if let Some(existing) = inner.frame_states.get_mut(frame_id) {
            existing.state = state.to_string();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        inner.next_state_id += 1;
        let record = FrameState {
            id: inner.next_state_id,
            frame_id: frame_id.to_string(),
            state: state.to_string(),
            updated_at: now,
        };
        inner
            .frame_states
            .insert(frame_id.to_string(), record.clone());
        Ok(record)
    }

    fn frame_state(&self, frame_id: &str) -> Result<Option<FrameState>> {
        Ok(self.lock()?.frame_states.get(frame_id).cloned())
    }

    fn update_frame_state(&self, frame_id: &str, state: &str) -> Result<Option<FrameState>> {
        let mut inner = self.lock()?;
        Ok(inner.frame_states.get_mut(frame_id).map(|existing| {
            existing.state = state.to_string();
            existing.updated_at = Utc::now();
            existing.clone()
        }))
    }
}
