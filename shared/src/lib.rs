//! Shared types and computations for the Grain Contract Management Platform
//!
//! This crate contains the contract domain models and the inventory
//! reconciliation / sub-contract allocation engine shared between the
//! native client and the browser dashboard (via WASM). Everything here is
//! a pure transformation over already-fetched data: no I/O, no async, no
//! hidden state.

pub mod allocation;
pub mod models;
pub mod page_state;
pub mod progress;
pub mod reconcile;
pub mod types;
pub mod validation;

pub use allocation::*;
pub use models::*;
pub use page_state::*;
pub use progress::*;
pub use reconcile::*;
pub use types::*;
pub use validation::*;
