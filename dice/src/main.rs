//! Dice Masters terminal application.
//!
//! Two players share one keyboard: `r` rolls, `h` holds, `n` starts a new
//! game, `s` opens settings, `?` shows help.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! cargo run -p dice -- --headless --instant --target 20
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dice_core::{GameSession, MatchConfig, RollTiming, Settings};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

/// Command line options.
#[derive(Debug, Default)]
struct CliOptions {
    headless: bool,
    instant: bool,
    target: Option<String>,
    help: bool,
}

impl CliOptions {
    fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--headless" => options.headless = true,
                "--instant" => options.instant = true,
                "--target" => options.target = iter.next().cloned(),
                "--help" | "-h" => options.help = true,
                other => eprintln!("Ignoring unknown argument: {other}"),
            }
        }
        options
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = std::env::args().collect();
    let options = CliOptions::parse(&args);

    if options.help {
        print_help();
        return Ok(());
    }

    let mut config = MatchConfig::from_env()?;
    if let Some(target) = &options.target {
        config.apply(&Settings::new().with_target_text(target.as_str()))?;
    }
    let timing = if options.instant {
        RollTiming::instant()
    } else {
        RollTiming::from_env()?
    };
    info!("starting with target {} and {:?}", config.target_score, timing);

    let session = GameSession::new(config, timing);

    if options.headless {
        return headless::run_headless(session).await.map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| render(f, &app))?;

        // Short poll keeps the rolling die moving between key presses
        if event::poll(Duration::from_millis(50))? {
            let ev = event::read()?;

            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::Action(action) => {
                    if !app.session.dispatch(action).await {
                        app.set_status(format!("{action} is not available right now"));
                    } else {
                        app.clear_status();
                    }
                }
                EventResult::OpenSettings => app.open_settings().await,
                EventResult::SaveSettings(settings) => {
                    match app.session.configure(&settings).await {
                        Ok(()) => {
                            app.session.reset().await;
                            app.close_overlay();
                            app.set_status("Settings saved, new game started");
                        }
                        Err(e) => app.set_status(format!("Not saved: {e}")),
                    }
                }
                EventResult::RestoreDefaults => {
                    app.session.restore_defaults().await;
                    app.session.reset().await;
                    app.close_overlay();
                    app.set_status("Defaults restored, new game started");
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }
    }
}

fn print_help() {
    println!("Dice Masters - two-player Pig dice game");
    println!();
    println!("USAGE:");
    println!("  dice [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Run in headless mode (text-only, no TUI)");
    println!("  --instant        Resolve rolls immediately");
    println!("  --target <N>     Score needed to win (default: 50)");
    println!();
    println!("ENVIRONMENT:");
    println!("  DICE_TARGET_SCORE   Score needed to win");
    println!("  DICE_PLAYER_ONE     First player's name");
    println!("  DICE_PLAYER_TWO     Second player's name");
    println!("  DICE_ROLL_MS        Roll duration in milliseconds (default: 1000)");
    println!("  DICE_TICK_MS        Rolling face interval, 0 disables (default: 100)");
    println!("  RUST_LOG            Log filter, e.g. dice_core=debug");
    println!();
    println!("KEYS:");
    println!("  r  roll     h  hold     n  new game");
    println!("  s  settings ?  help     q  quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dice")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_flags() {
        let options = CliOptions::parse(&args(&["--headless", "--target", "20", "--instant"]));
        assert!(options.headless);
        assert!(options.instant);
        assert_eq!(options.target.as_deref(), Some("20"));
        assert!(!options.help);
    }

    #[test]
    fn test_parse_defaults() {
        let options = CliOptions::parse(&args(&[]));
        assert!(!options.headless);
        assert!(options.target.is_none());
    }
}
