//! IPMS console: classification lookup & selection.
//!
//! A headless rendition of the console's Nice and Vienna pickers. A UI
//! layer drives a [`ClassificationPicker`] (open, edit filters, toggle,
//! confirm/cancel) and renders its session state; the lookups go through a
//! [`taxonomy_client::TaxonomySource`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use ipms_console::{ClassificationPicker, PickerConfig};
//! use ipms_types::TaxonomyKind;
//! use taxonomy_client::HttpSource;
//!
//! let source = Arc::new(HttpSource::new("http://localhost:4200")?);
//! let mut picker = ClassificationPicker::new(
//!     TaxonomyKind::Nice,
//!     source,
//!     PickerConfig::from_env(),
//!     Box::new(|selected| println!("{} selected", selected.len())),
//! );
//! picker.open(&[]);
//! picker.set_group(Some(9))?;
//! picker.settle().await?;
//! // Document `_id`; the sample exports use the class code as id
//! picker.toggle_entry("090001")?;
//! picker.confirm()?;
//! ```

pub mod config;
pub mod error;
pub mod picker;

pub use config::PickerConfig;
pub use error::PickerError;
pub use picker::{
    ClassificationPicker, ExpandState, PickerPhase, PickerSession, ResultTree, SelectionSet,
};
