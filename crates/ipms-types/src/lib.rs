//! Shared API Types for IPMS
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing the
//! reference-data HTTP boundary.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────────┐
//! │  taxonomy-server │  JSON   │  taxonomy-client     │
//! │  (Axum)          │ ◄─────► │  (picker sessions)   │
//! └──────────────────┘         └──────────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All wire types live here - no inline struct definitions in handlers
//! 2. Tagged enums only: `#[serde(tag = "type")]`
//! 3. Reference rows are read-only; string fields decode leniently so one
//!    malformed row never poisons a whole result set

pub mod classification;
pub mod envelope;
pub mod lenient;
pub mod reference;

pub use classification::*;
pub use envelope::{ApiResponse, NiceClassesPayload};
pub use reference::{CountryOption, PartyOption};
