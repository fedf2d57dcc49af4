//! Free-text to move category mapping.

use super::MoveCategory;

/// Synonym substrings per category, scanned in priority order
const MOVE_SYNONYMS: [(MoveCategory, &[&str]); 4] = [
    (MoveCategory::Rock, &["rock", "rok", "stone", "boulder", "fist"]),
    (MoveCategory::Paper, &["paper", "ppr", "pap", "sheet", "document"]),
    (MoveCategory::Scissors, &["scissors", "scissor", "sciz", "snip", "shears"]),
    (
        MoveCategory::Bomb,
        &["bomb", "boom", "nuke", "dynamite", "c4", "explosion"],
    ),
];

/// Phrases that mean the player declines to move
const REFUSAL_PHRASES: [&str; 6] = ["pass", "skip", "i don't want", "dont want", "not play", "nope"];

/// Result of reading a player's input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intent {
    /// `None` when the input is unresolved or a refusal
    pub move_understood: Option<MoveCategory>,
    pub reasoning: String,
}

/// Anything that can turn raw player text into a move category
pub trait IntentResolver: Send + Sync {
    fn resolve(&self, raw_input: &str) -> Intent;
}

/// Keyword matcher over fixed synonym and refusal lists
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordIntentResolver;

impl KeywordIntentResolver {
    /// First category with a matching synonym, and the synonym that hit
    fn match_move(normalized: &str) -> Option<(MoveCategory, &'static str)> {
        MOVE_SYNONYMS.iter().find_map(|(category, synonyms)| {
            synonyms
                .iter()
                .find(|synonym| normalized.contains(*synonym))
                .map(|synonym| (*category, *synonym))
        })
    }

    fn match_refusal(normalized: &str) -> Option<&'static str> {
        REFUSAL_PHRASES
            .iter()
            .copied()
            .find(|phrase| normalized.contains(phrase))
    }
}

impl IntentResolver for KeywordIntentResolver {
    fn resolve(&self, raw_input: &str) -> Intent {
        let normalized = raw_input.to_lowercase();

        if let Some(phrase) = Self::match_refusal(&normalized) {
            return Intent {
                move_understood: None,
                reasoning: format!("Input contains refusal phrase \"{phrase}\"; no move played."),
            };
        }

        match Self::match_move(&normalized) {
            Some((category, keyword)) => Intent {
                move_understood: Some(category),
                reasoning: format!("Matched keyword \"{keyword}\" as {category}."),
            },
            None => Intent {
                move_understood: None,
                reasoning: "No known move keyword found in input.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(input: &str) -> Option<MoveCategory> {
        KeywordIntentResolver.resolve(input).move_understood
    }

    #[test]
    fn test_resolve_plain_moves() {
        assert_eq!(resolve("rock"), Some(MoveCategory::Rock));
        assert_eq!(resolve("PAPER"), Some(MoveCategory::Paper));
        assert_eq!(resolve("Scissors"), Some(MoveCategory::Scissors));
        assert_eq!(resolve("bomb"), Some(MoveCategory::Bomb));
    }

    #[test]
    fn test_resolve_synonyms() {
        assert_eq!(resolve("I throw a rock at you"), Some(MoveCategory::Rock));
        assert_eq!(resolve("a big Boulder"), Some(MoveCategory::Rock));
        assert_eq!(resolve("a sheet of A4"), Some(MoveCategory::Paper));
        assert_eq!(resolve("snip snip"), Some(MoveCategory::Scissors));
        assert_eq!(resolve("nuke em"), Some(MoveCategory::Bomb));
        assert_eq!(resolve("set off the C4"), Some(MoveCategory::Bomb));
    }

    #[test]
    fn test_priority_order() {
        // rock is checked before bomb
        assert_eq!(resolve("rock bomb"), Some(MoveCategory::Rock));
        assert_eq!(resolve("boom, paper"), Some(MoveCategory::Paper));
    }

    #[test]
    fn test_refusal_overrides_move() {
        assert_eq!(resolve("pass"), None);
        assert_eq!(resolve("I don't want to play rock"), None);
        assert_eq!(resolve("nope, no bomb"), None);
        assert_eq!(resolve("skip this, paper next time"), None);
    }

    #[test]
    fn test_unresolved_input() {
        assert_eq!(resolve("hello there"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_reasoning_names_keyword() {
        let intent = KeywordIntentResolver.resolve("dynamite!");
        assert!(intent.reasoning.contains("dynamite"));
        let refused = KeywordIntentResolver.resolve("I pass");
        assert!(refused.reasoning.contains("pass"));
    }
}
