//! RPS Judge terminal client
//!
//! Reads one free-text move per round from stdin, lets the judge decide the
//! round against a random bot move, and prints the verdict. Every three
//! rounds the match is scored and a new match starts.

use rps_judge_core::{
    DecisionRecord, JudgeConfig, JudgeError, MatchSummary, MoveCategory, Session,
    ValidationStatus,
};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const RULE: &str = "======================================================================";

fn is_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

fn print_round_result(decision: &DecisionRecord) {
    println!("\n{RULE}");
    println!("ROUND {}", decision.round_number);
    println!("{RULE}");

    let intent = &decision.intent_understanding;
    println!("\n[INTENT UNDERSTANDING]");
    println!("  Raw Input: {}", decision.player2_raw_input);
    println!("  Move Understood: {}", display_move(intent.move_understood));
    println!("  Reasoning: {}", intent.reasoning);

    println!("\n[VALIDATION]");
    println!("  Status: {}", decision.validation.status);
    println!("  Reason: {}", decision.validation.reason);

    if let (ValidationStatus::Valid, Some(logic)) = (decision.status(), &decision.game_logic) {
        println!("\n[GAME LOGIC]");
        println!("  Player 1 Move: {}", display_move(logic.player1_move));
        println!("  Player 2 Move: {}", display_move(logic.player2_move));
        println!(
            "  Round Winner: {}",
            logic
                .round_winner
                .map(|w| w.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        println!("  Explanation: {}", logic.round_explanation);
    }

    let update = &decision.state_update;
    println!("\n[STATE UPDATE]");
    println!("  Player 1 Bomb Used: {}", update.player1_bomb_used);
    println!("  Player 2 Bomb Used: {}", update.player2_bomb_used);
    println!(
        "  Bombs Remaining: P1={}, P2={}",
        update.bombs_remaining.player1, update.bombs_remaining.player2
    );

    let result = &decision.final_result;
    println!("\n[RESULT]");
    println!("  Move Accepted: {}", result.move_accepted);
    println!("  Action: {}", result.action);
    println!("  Message: {}", result.player_message);
}

fn print_match_summary(summary: &MatchSummary) {
    let tally = &summary.tally;
    println!("\n{RULE}");
    println!("FINAL RESULT FOR THE LAST 3 ROUNDS:");
    println!(
        "  User wins: {}, Bot wins: {}, Draws: {}",
        tally.user_wins, tally.bot_wins, tally.draws
    );
    println!("\nFinal result: {}", tally.verdict);
    println!("{RULE}\n");
}

fn display_move(m: Option<MoveCategory>) -> String {
    m.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = JudgeConfig::from_env()?;
    let system_prompt = config.load_system_prompt()?;
    let judge = config.build_judge(system_prompt)?;
    info!(backend = judge.backend_name(), "Judge ready");

    let mut session = Session::new(judge);

    println!("\n{RULE}");
    println!("ROCK-PAPER-SCISSORS PLUS: AI JUDGE");
    println!("{RULE}");
    println!("\nWelcome! The AI Judge will evaluate your moves.");
    println!("Valid moves: rock, paper, scissors, bomb");
    println!("(Bomb can be used only once per player)\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        println!("\n--- Round {} ---", session.state().round_number);
        stdout.write_all(b"Your move: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if is_quit(input) {
            break;
        }
        if input.is_empty() {
            println!("Please provide a move.");
            continue;
        }

        let bot_move = MoveCategory::random(session.state().resources.player1_bomb_used);

        match session.play_round(input, Some(bot_move)).await {
            Ok(report) => {
                print_round_result(&report.decision);
                if let Some(summary) = &report.match_summary {
                    print_match_summary(summary);
                }
            }
            Err(JudgeError::Schema(e)) => {
                error!(error = %e, "Judge returned an unusable decision");
                println!("The judge returned an unreadable decision; please play this round again.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nThanks for playing!");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "rps-judge stopped");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_words() {
        assert!(is_quit("quit"));
        assert!(is_quit("EXIT"));
        assert!(is_quit("Q"));
        assert!(!is_quit("quite a rock"));
        assert!(!is_quit(""));
    }
}
