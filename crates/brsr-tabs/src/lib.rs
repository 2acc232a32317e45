//! BRSR Tab Management
//!
//! A tab is a logical browsing context bound to one native webview surface
//! by its label. The tab set owns every tab, keeps their strip order and
//! tracks which one is active.

mod error;
mod state;
mod tab;
mod tab_set;

pub use error::TabError;
pub use state::NavState;
pub use tab::Tab;
pub use tab_set::TabSet;

pub type Result<T> = std::result::Result<T, TabError>;
