//! senia-engine
//!
//! The assessment state and scoring engine: a reducer-style state store
//! over the section-partitioned aggregate, required-field validation,
//! completion calculators, the create-vs-update persistence coordinator,
//! and the debounced auto-save scheduler. All I/O goes through the
//! `DocumentStore` boundary in senia-storage.

mod autosave;

pub mod completion;
pub mod error;
pub mod export;
pub mod save;
pub mod session;
pub mod state;
pub mod validation;
