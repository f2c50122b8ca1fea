//! Game session: one task owns the [`GameState`].
//!
//! Commands arrive over a bounded mpsc queue, gravity comes from a tokio
//! interval, and every handled message republishes a [`Frame`] on a watch
//! channel. Readers may see a slightly stale frame; nothing else touches
//! the state. A shared stop signal ends the game loop and the render loop.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::RunConfig;
use crate::core::{Frame, GameState};
use crate::types::{GameCommand, GameEvent};

/// Handle to a running game loop.
pub struct GameHandle {
    commands: mpsc::Sender<GameCommand>,
    frames: watch::Receiver<Frame>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    stop: watch::Sender<bool>,
    task: JoinHandle<GameState>,
}

impl GameHandle {
    /// Sender for the command queue, e.g. for an input thread.
    pub fn commands(&self) -> mpsc::Sender<GameCommand> {
        self.commands.clone()
    }

    /// Queue a command. Returns false once the loop has stopped.
    pub async fn send(&self, command: GameCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Subscribe to published frames.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// Subscribe to the stop signal.
    pub fn stop_signal(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }

    /// Sender side of the stop signal, for other tasks that may end the session.
    pub fn stopper(&self) -> watch::Sender<bool> {
        self.stop.clone()
    }

    pub fn try_next_event(&mut self) -> Option<GameEvent> {
        self.events.try_recv().ok()
    }

    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    /// Stop the loop and hand back the final state.
    pub async fn join(self) -> Result<GameState, tokio::task::JoinError> {
        self.stop.send_replace(true);
        self.task.await
    }
}

/// Spawn the game loop onto the current tokio runtime.
pub fn spawn_game(state: GameState, config: &RunConfig) -> GameHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(config.command_queue.max(1));
    let (frame_tx, frame_rx) = watch::channel(state.frame());
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = watch::channel(false);

    let task = tokio::spawn(run_game_loop(
        state,
        cmd_rx,
        frame_tx,
        event_tx,
        stop_rx,
        config.tick_period(),
    ));

    GameHandle {
        commands: cmd_tx,
        frames: frame_rx,
        events: event_rx,
        stop: stop_tx,
        task,
    }
}

/// Serialize commands and ticks onto one state until stopped.
///
/// Returns the final state. Also stops when every command sender is gone.
pub async fn run_game_loop(
    mut state: GameState,
    mut commands: mpsc::Receiver<GameCommand>,
    frames: watch::Sender<Frame>,
    events: mpsc::UnboundedSender<GameEvent>,
    mut stop: watch::Receiver<bool>,
    tick_period: Duration,
) -> GameState {
    let mut ticker = time::interval_at(Instant::now() + tick_period, tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!(seed = state.seed(), ?tick_period, "game loop started");

    while !*stop.borrow() {
        tokio::select! {
            biased;

            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    break;
                }
                continue;
            }
            command = commands.recv() => match command {
                Some(command) => {
                    tracing::trace!(command = command.as_str(), "command");
                    state.apply_command(command);
                }
                None => break,
            },
            _ = ticker.tick() => {
                state.tick();
            }
        }

        if let Some(event) = state.take_last_event() {
            let _ = events.send(event);
        }
        frames.send_replace(state.frame());
    }

    tracing::info!(score = state.score(), "game loop stopped");
    state
}

/// Call `draw` with the latest frame once per `period` until stopped.
///
/// Stops at the next period boundary after the signal, or on the first
/// draw error, which is returned.
pub async fn render_loop<E>(
    mut frames: watch::Receiver<Frame>,
    mut stop: watch::Receiver<bool>,
    period: Duration,
    mut draw: impl FnMut(&Frame) -> Result<(), E>,
) -> Result<(), E> {
    let mut pacer = time::interval(period);
    pacer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !*stop.borrow() {
        tokio::select! {
            biased;

            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = pacer.tick() => {
                let frame = frames.borrow_and_update().clone();
                draw(&frame)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grid;
    use crate::types::ShapeId;

    fn config() -> RunConfig {
        RunConfig {
            seed: 3,
            ..RunConfig::default()
        }
    }

    fn running(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.apply_command(GameCommand::TogglePause);
        state
    }

    fn rows_of(frame: &Frame) -> Vec<usize> {
        frame.active.cells.iter().map(|&(row, _)| row).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut state = running(3);
        state.spawn(ShapeId::O);
        let handle = spawn_game(state, &config());
        let mut frames = handle.frames();

        let start = Instant::now();
        frames.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(rows_of(&frames.borrow()), vec![1, 1, 2, 2]);

        frames.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(rows_of(&frames.borrow()), vec![2, 2, 3, 3]);

        handle.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn paused_game_does_not_fall() {
        let mut state = GameState::new(3);
        state.spawn(ShapeId::O);
        let handle = spawn_game(state, &config());
        let mut frames = handle.frames();

        for _ in 0..3 {
            frames.changed().await.unwrap();
        }
        assert!(frames.borrow().paused);
        assert_eq!(rows_of(&frames.borrow()), vec![0, 0, 1, 1]);
        handle.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn commands_apply_in_order() {
        let mut state = GameState::new(3);
        state.spawn(ShapeId::O);
        let handle = spawn_game(state, &config());
        let mut frames = handle.frames();

        assert!(handle.send(GameCommand::TogglePause).await);
        assert!(handle.send(GameCommand::MoveRight).await);
        assert!(handle.send(GameCommand::MoveRight).await);

        // The watch guard must be released before joining the loop.
        let applied = time::timeout(
            Duration::from_millis(500),
            frames.wait_for(|f| !f.paused && f.active.cells.iter().any(|&(_, col)| col == 7)),
        )
        .await
        .map(|seen| seen.is_ok())
        .unwrap_or(false);
        assert!(applied, "commands were not applied before the first tick");

        let state = handle.join().await.unwrap();
        assert_eq!(state.current().x, 6);
        assert_eq!(state.current().y, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn loss_is_reported_as_event() {
        let mut grid = Grid::new();
        for row in 3..20 {
            grid.set(row, 4, ShapeId::I);
        }
        let mut state = running(3).with_grid(grid);
        state.spawn(ShapeId::O);
        let mut handle = spawn_game(state, &config());

        assert!(handle.send(GameCommand::Place).await);
        assert_eq!(
            handle.next_event().await,
            Some(GameEvent::Lost { score: 0 })
        );

        let state = handle.join().await.unwrap();
        assert!(state.paused());
        assert!(state.grid().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn debug_dump_is_reported_as_event() {
        let mut handle = spawn_game(GameState::new(3), &config());
        assert!(handle.send(GameCommand::DebugDump).await);
        match handle.next_event().await {
            Some(GameEvent::Debug(text)) => assert!(text.contains("\"Score\": 0")),
            other => panic!("unexpected event: {:?}", other),
        }
        handle.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_ends_loop_within_a_tick() {
        let handle = spawn_game(running(3), &config());
        let start = Instant::now();
        handle.stop();
        let state = handle.join().await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(1000));
        assert!(!state.paused());
    }

    #[tokio::test(start_paused = true)]
    async fn render_loop_paces_and_stops() {
        let handle = spawn_game(GameState::new(3), &config());
        let stop = handle.stopper();
        let stop_rx = handle.stop_signal();
        let frames = handle.frames();

        let renderer = tokio::spawn(async move {
            let mut draws = 0u32;
            render_loop(frames, stop_rx, Duration::from_millis(100), |_frame| {
                draws += 1;
                Ok::<(), std::convert::Infallible>(())
            })
            .await
            .unwrap();
            draws
        });

        time::sleep(Duration::from_millis(1050)).await;
        stop.send_replace(true);
        let draws = renderer.await.unwrap();
        // First pace tick is immediate, then every 100ms.
        assert_eq!(draws, 11);
        handle.join().await.unwrap();
    }
}
