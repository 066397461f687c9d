//! taxonomy-server - HTTP gateway over the reference-data store.
//!
//! Every route answers with the `{success, data, message}` envelope from
//! `ipms-types`; errors keep the envelope and set the status code.

pub mod error;
pub mod handlers;
pub mod router;
