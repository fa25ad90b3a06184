use std::str::FromStr;

use chess_core::coaching::ChatMessage;
use chess_core::record::{GameRecord, GameRecordStore};
use chess_core::reply::{RandomReply, ReplyPolicy};
use chess_core::storage::{KeyValueStore, SqliteStore};
use chess_core::theme::ThemeStore;
use chess_core::{Move, PlayerColor, Session};
use coach_client::api::CoachApi;
use coach_client::config::ClientConfig;
use coach_client::{Played, TurnCoordinator};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  <move>          play a move (e2e4, e7e8q, Nf3, O-O)
  undo            take back your last move
  new [color]     start a new game, optionally as white or black
  hint            ask the coach for a hint
  ask <question>  chat with the coach
  history         list the moves so far
  stats           show your record
  theme           toggle light/dark
  quit            leave";

type Coordinator<P> = TurnCoordinator<SqliteStore, P>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::from_env();
    let api = CoachApi::new(&config.api_url, config.request_timeout)?;
    if let Err(e) = api.health().await {
        tracing::warn!("Coach API at {} is unreachable: {e}", config.api_url);
    }

    let records = GameRecordStore::open(SqliteStore::open(&config.db_path)?);
    let themes = ThemeStore::new(SqliteStore::open(&config.db_path)?);
    let coordinator = TurnCoordinator::new(
        Session::new(config.player_color),
        records,
        RandomReply::new(),
    )
    .with_reply_delay(config.reply_delay);

    println!("Chess Coach ({} theme). Type 'help' for commands.", themes.theme());
    let mut chat: Vec<ChatMessage> = Vec::new();

    if coordinator.reply_due() {
        reply(&coordinator, &api).await;
    }
    print_board(&coordinator);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "undo" => match coordinator.undo() {
                Ok(()) => {
                    if coordinator.reply_due() {
                        reply(&coordinator, &api).await;
                    }
                    print_board(&coordinator);
                }
                Err(e) => println!("{e}"),
            },
            "new" => {
                let color = match rest.trim() {
                    "" => None,
                    text => match PlayerColor::from_str(text) {
                        Ok(color) => Some(color),
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                };
                coordinator.new_game(color);
                chat.clear();
                if coordinator.reply_due() {
                    reply(&coordinator, &api).await;
                }
                print_board(&coordinator);
            }
            "history" => coordinator.with_session(|s| {
                for (i, pair) in s.history().chunks(2).enumerate() {
                    println!("{}. {}", i + 1, pair.join(" "));
                }
            }),
            "stats" => {
                let metrics = coordinator.metrics();
                println!(
                    "{} games: {}W {}L {}D ({}% wins), trend {:?}",
                    metrics.total_games,
                    metrics.wins,
                    metrics.losses,
                    metrics.draws,
                    metrics.win_rate,
                    metrics.recent_trend
                );
                println!(
                    "{} moves played, {} brilliant, {} blunders",
                    metrics.total_moves, metrics.total_brilliant_moves, metrics.total_blunders
                );
            }
            "theme" => match themes.toggle() {
                Ok(theme) => println!("Theme set to {theme}"),
                Err(e) => println!("Could not save theme: {e}"),
            },
            "hint" => {
                let (fen, color) = coordinator.with_session(|s| (s.fen(), s.player_color()));
                match api.hint(&fen, color).await {
                    Ok(hint) => println!("Coach: {hint}"),
                    Err(e) => println!("{e}"),
                }
            }
            "ask" => {
                if rest.trim().is_empty() {
                    println!("Usage: ask <question>");
                    continue;
                }
                match api.chat(rest, &chat).await {
                    Ok(answer) => {
                        println!("Coach: {answer}");
                        chat.push(ChatMessage::user(rest));
                        chat.push(ChatMessage::assistant(&answer));
                    }
                    Err(e) => println!("{e}"),
                }
            }
            _ => {
                let submitted = match Move::from_str(line) {
                    Ok(mv) => coordinator.submit_move(mv),
                    Err(_) => coordinator.submit_san(line),
                };
                match submitted {
                    Ok(played) => {
                        announce("You", &played, &api).await;
                        if played.reply_due {
                            reply(&coordinator, &api).await;
                        }
                        print_board(&coordinator);
                    }
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    Ok(())
}

async fn reply<S: KeyValueStore, P: ReplyPolicy>(coordinator: &TurnCoordinator<S, P>, api: &CoachApi) {
    if let Some(played) = coordinator.play_reply().await {
        announce("Opponent", &played, api).await;
    }
}

async fn announce(who: &str, played: &Played, api: &CoachApi) {
    println!("{who}: {}", played.san);
    if let Some(outcome) = played.outcome {
        println!("Game over: {outcome}");
    }
    if let Some(e) = &played.save_error {
        println!("Could not save the game: {e}");
    }
    if let Some(record) = &played.record {
        review(record, api).await;
    }
}

async fn review(record: &GameRecord, api: &CoachApi) {
    println!("Asking the coach to review the game...");
    match api.analyze_game(&record.pgn, record.player_color, record.result).await {
        Ok(analysis) => {
            println!("{}", analysis.summary);
            let tally = analysis.tally();
            println!(
                "Blunders {}, mistakes {}, good {}, brilliant {}",
                tally.blunders, tally.mistakes, tally.good_moves, tally.brilliant_moves
            );
            for suggestion in &analysis.suggestions {
                println!("  - {suggestion}");
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn print_board<P: ReplyPolicy>(coordinator: &Coordinator<P>) {
    let (fen, flipped) = coordinator.with_session(|s| (s.fen(), s.player_color() == PlayerColor::Black));
    println!("{}", render_board(&fen, flipped));
}

/// ASCII diagram of the placement field of `fen`, seen from the player's side.
fn render_board(fen: &str, flipped: bool) -> String {
    let placement = fen.split_whitespace().next().unwrap_or_default();
    let grid: Vec<Vec<char>> = placement
        .split('/')
        .map(|rank| {
            rank.chars()
                .flat_map(|c| match c.to_digit(10) {
                    Some(n) => vec!['.'; n as usize],
                    None => vec![c],
                })
                .collect()
        })
        .collect();

    let ranks: Vec<usize> = if flipped { (0..8).rev().collect() } else { (0..8).collect() };
    let files: Vec<usize> = if flipped { (0..8).rev().collect() } else { (0..8).collect() };

    let mut out = String::new();
    for &r in &ranks {
        out.push_str(&format!("{} ", 8 - r));
        for &f in &files {
            let square = grid.get(r).and_then(|row| row.get(f)).copied().unwrap_or('.');
            out.push(' ');
            out.push(square);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &f in &files {
        out.push(' ');
        out.push((b'a' + f as u8) as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

    #[test]
    fn test_render_from_white() {
        let board = render_board(START, false);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . P . . .");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn test_render_from_black() {
        let board = render_board(START, true);
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines[0], "1  R N B K Q B N R");
        assert_eq!(lines[4], "5  . . . . . . . .");
        assert_eq!(lines[3], "4  . . . P . . . .");
        assert_eq!(lines[8], "   h g f e d c b a");
    }
}
