pub mod candidate;
pub mod constraints;
pub mod interval;
pub mod optimizer;
pub mod schedule;
pub mod solution;
pub mod trailing;
pub mod validator;

pub use self::{
    candidate::Candidate,
    constraints::Constraints,
    optimizer::Optimizer,
    schedule::Schedule,
    solution::{Solution, Summary},
    trailing::TrailingContext,
    validator::{Violation, ViolationKind, is_valid, validate},
};
