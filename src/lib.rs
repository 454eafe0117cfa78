//! Decide in which equally long time slots to switch a controllable load off,
//! given a price per slot.
//!
//! The [`crate::core::validator`] is a feasibility oracle over on/off sequences, and the
//! [`crate::core::Optimizer`] greedily commits the best-paying off-intervals the validator accepts.

pub mod cli;
pub mod core;
pub mod prelude;
pub mod prices;
pub mod quantity;
pub mod tables;
