mod app;
mod game;
mod highscore;
mod render;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Instant;

/// Sliding puzzle in the terminal.
#[derive(Parser)]
#[command(name = "fifteen", version, about)]
struct Args {
    /// Board size N, for an N×N puzzle
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=12))]
    size: u8,
    /// Seed for a reproducible first board
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, args: &Args) -> io::Result<()> {
    let mut app = App::new(args.size as usize, args.seed);
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Handle input with a timeout so the timer and auto-solve keep
        // moving without key presses.
        let tick_rate = app.tick_rate();
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
