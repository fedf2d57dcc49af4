//! RPS Judge Core Library
//!
//! Adjudicates rounds of Rock-Paper-Scissors with a single-use bomb:
//! free-text intent, rule validation, round outcome, bomb bookkeeping and
//! three-round matches. Judging can be delegated to a language model, with
//! the local rule pipeline as fallback.

pub mod config;
pub mod games;
pub mod judge;
pub mod protocol;
pub mod session;

pub use config::{ConfigError, JudgeConfig};
pub use games::{IntentResolver, KeywordIntentResolver, MoveCategory};
pub use judge::{DeterministicBackend, ExternalBackend, GeminiClient, Judge, JudgeBackend, JudgeError};
pub use protocol::{DecisionRecord, RoundContext, RoundWinner, ValidationStatus};
pub use session::{GameState, MatchSummary, MatchTally, MatchVerdict, ResourceState, RoundReport, Session};
