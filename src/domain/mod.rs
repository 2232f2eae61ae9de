//! Domain layer - Core decision logic and models.
//!
//! This module contains the pure quantitative engine: Poisson outcome
//! probabilities, value detection against bookmaker odds, and Kelly stake
//! sizing. Everything here is a pure function over immutable inputs, with
//! no I/O and no cross-call state, so the components are trivially safe to
//! call concurrently and to retry.

pub mod error;
pub mod fixture;
pub mod kelly;
pub mod poisson;
pub mod value;

// Re-export core types for convenience
pub use error::EngineError;
pub use fixture::{MatchContext, OddsQuote, OutcomeMap, TeamStats};
pub use kelly::{KellyParameters, StakeRecommendation, StakeSizer};
pub use poisson::{MatchProbabilities, ProbabilityModel};
pub use value::{Confidence, ValueBetSignal, ValueDetector};
