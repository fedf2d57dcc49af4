//! Protocol types and messages.

mod messages;
mod types;

pub use messages::{
    BombsRemaining, DecisionRecord, FinalResult, GameLogic, IntentUnderstanding, RoundContext,
    SchemaError, StateUpdate, Validation,
};
pub use types::{MatchId, RoundAction, RoundWinner, ValidationStatus};
