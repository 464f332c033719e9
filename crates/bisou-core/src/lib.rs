//! Frame state machine, rendering and storage for the $BISOU frame server.

mod db;
mod error;
mod pricing;
mod render;
mod step;
mod store;
mod view;

pub use db::SqliteStore;
pub use error::BisouError;
pub use pricing::{
    format_cost, parse_amount, simulate_purchase, PurchaseReceipt, Quote, PRESET_AMOUNTS,
    UNIT_PRICE,
};
pub use render::{escape, render_document, render_svg, FRAME_VERSION, IMAGE_HEIGHT, IMAGE_WIDTH};
pub use step::{broken_continuation, transition, Action, Step, StepKind, Transition, FRAME_ROOT};
pub use store::{FrameStore, MemoryStore};
pub use view::{FrameView, Tone};

/// Result type for frame server operations.
pub type Result<T> = std::result::Result<T, BisouError>;
