//! A scroll-driven depth path in the terminal.
//!
//! Scrolling moves a camera down a path of cards.  Cards the camera has
//! passed lay down and light up; the last card carries a portal.
//! Run with `--print-deck` to check how a deck file was parsed.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders},
    Terminal,
};

use crate::app::{
    event::spawn_event_reader,
    handler,
    state::{ActiveView, AppState},
};
use crate::core::{clock::ClockConfig, deck, motion::MotionProfile};
use crate::ui::{
    layout::AppLayout, particles::ParticleField, path_widget::PathWidget, popup,
    status::StatusBar, theme::Theme,
};

/// Ambient particles drawn behind the path.
const PARTICLE_COUNT: usize = 15;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven depth path of cards")]
struct Cli {
    /// Deck file to show (defaults to the built-in deck).
    deck: Option<PathBuf>,

    /// Target frame rate for the animation clock.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Tone down ambient motion and cap the frame rate.
    #[arg(long = "reduced-motion")]
    reduced_motion: bool,

    /// Print the parsed deck and exit.
    #[arg(long = "print-deck")]
    print_deck: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load deck ─────────────────────────────────────────────
    let items = match &cli.deck {
        Some(path) => deck::load_deck(path).with_context(|| "could not load deck")?,
        None => deck::default_deck(),
    };

    if cli.print_deck {
        for item in &items {
            println!("{:02}  {}", item.index + 1, item.title);
            if !item.body.is_empty() {
                println!("    {}", item.body);
            }
        }
        return Ok(());
    }

    let motion = MotionProfile::from_flag(cli.reduced_motion);
    let fps = motion.safe_fps(cli.fps);
    let user_config = config::AppConfig::load();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(
        items,
        user_config,
        ClockConfig::with_fps(fps),
        motion,
        Rect::new(0, 0, size.width, size.height),
    );

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(250));
    let (clock_tx, mut clock_rx) = tokio::sync::mpsc::unbounded_channel();
    if !state.clock.start(clock_tx) {
        state.status_message = Some("animation clock unavailable, motion disabled".into());
    }
    tracing::debug!(fps, cards = state.scene.items().len(), "depth-path started");

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            if state.config.show_particles {
                frame.render_widget(
                    ParticleField {
                        clock: state.clock.state(),
                        motion: state.motion,
                        count: PARTICLE_COUNT,
                        px_per_row: state.config.px_per_row,
                    },
                    layout.path_area,
                );
            }

            if state.scene.items().is_empty() {
                let empty = Block::default()
                    .title(" empty deck ")
                    .title_style(Theme::title_style())
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style());
                frame.render_widget(empty, layout.path_area);
            } else {
                frame.render_widget(PathWidget { scene: &state.scene }, layout.path_area);
            }

            frame.render_widget(StatusBar { state: &state }, layout.status_area);

            if state.active_view == ActiveView::SettingsMenu {
                frame.render_widget(popup::SettingsPopup { state: &state }, frame.area());
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                handler::handle_event(&mut state, event);
            }

            Some(signal) = clock_rx.recv() => {
                // Coalesce frames that piled up while we were drawing; the
                // clock still counts every one of them.
                let mut ticked = state.clock.on_signal(signal);
                while let Ok(signal) = clock_rx.try_recv() {
                    ticked |= state.clock.on_signal(signal);
                }
                if ticked {
                    state.advance_frame(Instant::now());
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.clock.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
