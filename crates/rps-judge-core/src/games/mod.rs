//! Game definitions and logic.

mod intent;
mod moves;
mod rules;
mod traits;

pub use intent::{Intent, IntentResolver, KeywordIntentResolver};
pub use moves::{MoveCategory, ParseMoveError};
pub use rules::RpsPlusRules;
pub use traits::{GameRules, RoundOutcome};
