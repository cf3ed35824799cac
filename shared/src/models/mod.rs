//! Domain models for the Grain Contract Management Platform

mod contract;
mod sub_contract;

pub use contract::*;
pub use sub_contract::*;
