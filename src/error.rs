//! Picker errors.
//!
//! Lookup failures are not here: they degrade to an empty result set and
//! are logged by the session.

use ipms_types::TaxonomyKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickerError {
    #[error("picker is not open")]
    NotOpen,

    #[error("{0} picker has no group filter")]
    GroupFilterUnsupported(TaxonomyKind),

    #[error("group {0} is outside the Nice range 1-45")]
    InvalidGroup(u32),

    #[error("entry '{0}' is neither in the results nor selected")]
    UnknownEntry(String),
}
