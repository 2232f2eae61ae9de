//! Usecases layer - pipeline orchestration over the domain components.

pub mod advisor;

pub use advisor::{BetAdvice, MatchAdvisor};
