//! Terminal runner (default binary).
//!
//! The game loop runs as a tokio task, key input is read on a blocking
//! thread and the render loop draws the latest frame every frame period.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use block_stacking::core::GameState;
use block_stacking::engine::{render_loop, spawn_game, RunConfig};
use block_stacking::input::{map_key, KeyAction};
use block_stacking::term::{FrameBuffer, GameView, Menu, MenuPage, Screen, Viewport};
use block_stacking::types::GameCommand;

const INPUT_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    init_logging(config.log_path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let mut screen = Screen::new();
    screen.enter()?;

    let result = runtime.block_on(run(&mut screen, &config));

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

/// Stdout belongs to the UI, so logs only go to a file.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::DEBUG)
        .init();
    Ok(())
}

async fn run(screen: &mut Screen, config: &RunConfig) -> Result<()> {
    let mut game = spawn_game(GameState::new(config.seed), config);

    let (menu_tx, mut menu_rx) = mpsc::unbounded_channel();
    let input = tokio::task::spawn_blocking({
        let commands = game.commands();
        let stopper = game.stopper();
        let stop = game.stop_signal();
        move || {
            let result = read_keys(commands, menu_tx, stop);
            stopper.send_replace(true);
            result
        }
    });

    let view = GameView::default();
    let mut menu = Menu::new();
    let mut fb = FrameBuffer::new(0, 0);
    let frames = game.frames();
    let stop = game.stop_signal();

    let drawn = render_loop(frames, stop, config.frame_period(), |frame| {
        while let Some(event) = game.try_next_event() {
            menu.on_event(&event);
        }
        while let Ok(page) = menu_rx.try_recv() {
            if page == MenuPage::Main {
                menu.show_main();
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(frame, &menu, Viewport::new(w, h), &mut fb);
        screen.present(&fb)
    })
    .await;

    game.stop();
    let input = input.await.context("input thread panicked")?;
    let state = game.join().await.context("game loop panicked")?;
    tracing::info!(score = state.score(), "session ended");

    drawn?;
    input
}

/// Forward key presses until quit or the stop signal.
fn read_keys(
    commands: mpsc::Sender<GameCommand>,
    menu: mpsc::UnboundedSender<MenuPage>,
    stop: watch::Receiver<bool>,
) -> Result<()> {
    while !*stop.borrow() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match map_key(key) {
            Some(KeyAction::Quit) => break,
            Some(KeyAction::MenuBack) => {
                let _ = menu.send(MenuPage::Main);
            }
            Some(KeyAction::Command(command)) => {
                if command == GameCommand::TogglePause {
                    let _ = menu.send(MenuPage::Main);
                }
                if commands.blocking_send(command).is_err() {
                    break;
                }
            }
            None => {}
        }
    }
    Ok(())
}
