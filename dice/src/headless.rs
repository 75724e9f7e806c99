//! Headless mode for the dice game.
//!
//! A line-oriented interface for scripts and tests: one command per line on
//! stdin, tagged result lines on stdout. Rolls still honour the configured
//! timing, so pass `--instant` when driving it from a script.

use std::io::{self, BufRead, Write};

use dice_core::{Action, GameEvent, GameSession, GameSnapshot, PlayerId, Settings};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play(Action),
    Status { json: bool },
    Name { player: PlayerId, name: String },
    Target(String),
    Defaults,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    match head.as_str() {
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        "defaults" => Ok(Command::Defaults),
        "status" => Ok(Command::Status {
            json: rest == "--json",
        }),
        "target" if !rest.is_empty() => Ok(Command::Target(rest.to_string())),
        "target" => Err("Usage: target <n>".to_string()),
        "name" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let player = match args.next() {
                Some("1") => PlayerId::First,
                Some("2") => PlayerId::Second,
                _ => return Err("Usage: name <1|2> <name>".to_string()),
            };
            let name = args.next().map(str::trim).unwrap_or_default();
            Ok(Command::Name {
                player,
                name: name.to_string(),
            })
        }
        other => other
            .parse::<Action>()
            .map(Command::Play)
            .map_err(|e| format!("{e}. Type help for help.")),
    }
}

/// Format an event as a tagged output line
fn describe(event: &GameEvent, snapshot: &GameSnapshot) -> Option<String> {
    let name = |id: PlayerId| snapshot.player(id).name.as_str();
    let line = match event {
        GameEvent::RollStarted { .. } => return None,
        GameEvent::Rolled {
            player,
            face,
            turn_score,
        } => format!("[ROLL] {} rolled {face} (turn: {turn_score})", name(*player)),
        GameEvent::Busted { player, next } => format!(
            "[BUST] {} rolled a 1 and lost the turn. {} to play.",
            name(*player),
            name(*next)
        ),
        GameEvent::Held {
            player,
            banked,
            total,
            next,
        } => format!(
            "[HOLD] {} banked {banked} (total: {total}). {} to play.",
            name(*player),
            name(*next)
        ),
        GameEvent::Won { player, total } => {
            format!("[WIN] {} wins with {total}!", name(*player))
        }
        GameEvent::Reset => format!("[RESET] New game. First to {} wins.", snapshot.target_score),
        GameEvent::Configured => format!(
            "[CONFIG] {} vs {}, target {}",
            name(PlayerId::First),
            name(PlayerId::Second),
            snapshot.target_score
        ),
    };
    Some(line)
}

fn print_status(snapshot: &GameSnapshot) {
    println!("[STATUS]");
    for id in PlayerId::ALL {
        let player = snapshot.player(id);
        let marker = if id == snapshot.active_player { '>' } else { ' ' };
        let history: Vec<String> = player.history.iter().map(|f| f.to_string()).collect();
        println!(
            "  {marker} {}: {} ({}%) rolls [{}]",
            player.name,
            player.total,
            player.progress,
            history.join(" ")
        );
    }
    println!("  Turn score: {}", snapshot.current_score);
    println!("  Die: {}", snapshot.face_shown);
    println!("  Target: {}", snapshot.target_score);
    match snapshot.winner {
        Some(winner) => println!("  Winner: {}", snapshot.player(winner).name),
        None => println!("  To play: {}", snapshot.active().name),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  roll, r            - Roll the die");
    println!("  hold, h            - Bank the turn score");
    println!("  reset, new, n      - Start a new game");
    println!("  status [--json]    - Show the table");
    println!("  name <1|2> <name>  - Rename a player");
    println!("  target <n>         - Set the winning score");
    println!("  defaults           - Restore default names and target");
    println!("  help               - Show this help");
    println!("  quit               - Exit");
}

/// Print every event received since the last drain
fn drain_events(events: &mut broadcast::Receiver<GameEvent>, snapshot: &GameSnapshot) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(line) = describe(&event, snapshot) {
                    println!("{line}");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                log::warn!("headless output skipped {skipped} events");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// Run the game in headless mode.
pub async fn run_headless(session: GameSession) -> io::Result<()> {
    let mut events = session.events();
    let snapshot = session.snapshot();

    println!("=== Dice Masters Headless Mode ===");
    println!(
        "{} vs {}. First to {} wins.",
        snapshot.players[0].name, snapshot.players[1].name, snapshot.target_score
    );
    println!();
    print_help();
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                println!("[ERROR] {message}");
                stdout.flush()?;
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("Goodbye!");
                break;
            }
            Command::Help => print_help(),
            Command::Status { json: true } => match serde_json::to_string(&session.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => println!("[ERROR] {e}"),
            },
            Command::Status { json: false } => print_status(&session.snapshot()),
            Command::Play(action) => {
                if session.dispatch(action).await {
                    let snapshot = session.wait_idle().await;
                    drain_events(&mut events, &snapshot);
                } else {
                    println!("[ERROR] {action} is not available right now");
                }
            }
            Command::Name { player, name } => {
                let settings = Settings::new().with_player_name(player, name);
                apply_settings(&session, &settings, &mut events).await;
            }
            Command::Target(value) => {
                let settings = Settings::new().with_target_text(value);
                apply_settings(&session, &settings, &mut events).await;
            }
            Command::Defaults => {
                session.restore_defaults().await;
                drain_events(&mut events, &session.snapshot());
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

async fn apply_settings(
    session: &GameSession,
    settings: &Settings,
    events: &mut broadcast::Receiver<GameEvent>,
) {
    let result = session.configure(settings).await;
    drain_events(events, &session.snapshot());
    if let Err(e) = result {
        println!("[ERROR] {e}");
    }
}
