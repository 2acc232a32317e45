//! BRSR Navigation
//!
//! Per-tab history as an append/truncate log with a cursor, the rules for
//! folding navigations reported by the native layer back into that log,
//! and normalization of addresses typed into the top bar.

mod error;
mod history;
mod input;
mod observe;

pub use error::NavigationError;
pub use history::{can_go_back, can_go_forward, move_back, move_forward, record, HistoryLog};
pub use input::normalize_address;
pub use observe::{NavigationKind, Observation};

pub type Result<T> = std::result::Result<T, NavigationError>;
