//! senia-core
//!
//! Pure domain types for the elder-care assessment workflow.
//! No I/O and no async — this is the shared vocabulary of the Senia system.

pub mod error;
pub mod models;
