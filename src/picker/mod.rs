//! Classification lookup & selection.
//!
//! - [`ClassificationPicker`] - open/confirm/cancel around a session
//! - [`PickerSession`] - filters, debounced queries, results, selection
//! - [`ResultTree`] - results grouped by Nice group or Vienna category/division
//! - [`SelectionSet`] / [`ExpandState`] - the two pieces of per-session UI state
//! - [`Debouncer`] - single-slot delayed task

mod debounce;
mod expand;
mod grouping;
mod selection;
mod session;
mod widget;

pub use debounce::Debouncer;
pub use expand::ExpandState;
pub use grouping::{CategoryNode, DivisionNode, NiceGroupNode, ResultTree};
pub use selection::SelectionSet;
pub use session::{PickerPhase, PickerSession, QueryCriteria};
pub use widget::{ClassificationPicker, OnSelect};
