use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, ModifierKeyCode, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{ArenaConfig, GameState, TickEngine};
use crate::input::{InputController, KeyState};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// The interactive frame loop: one logical thread of control multiplexing
/// key events, engine polling, and rendering.
pub struct ArcadeMode {
    engine: TickEngine,
    state: GameState,
    controller: InputController,
    keys: KeyState,
    metrics: GameMetrics,
    renderer: Renderer,
    last_tick: Instant,
    should_quit: bool,
    /// Whether the terminal reports key release events. Without them the
    /// speed modifiers degrade to per-keypress pulses.
    release_events: bool,
}

impl ArcadeMode {
    pub fn new(config: ArenaConfig) -> Result<Self> {
        let mut engine = TickEngine::new(config.clone());
        let state = engine.start().context("Failed to place initial food")?;

        Ok(Self {
            engine,
            state,
            controller: InputController::new(&config),
            keys: KeyState::default(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(config),
            last_tick: Instant::now(),
            should_quit: false,
            release_events: false,
        })
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        self.release_events = supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .context("Failed to enable keyboard enhancement")?;
        }

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        self.last_tick = Instant::now();

        // Poll the engine well below the fastest reachable tick interval;
        // the engine itself decides when a tick is due.
        let mut frame_timer = interval(Duration::from_millis(2));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Input + simulation frame
                _ = frame_timer.tick() => {
                    self.frame()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One frame: fold key state into the controller, then poll the
    /// engine with the time accumulated since the last firing tick.
    fn frame(&mut self) -> Result<()> {
        self.controller
            .update(&self.keys, self.state.current_direction);

        if !self.release_events {
            // No release events: modifiers act as one-frame pulses so a
            // stuck flag cannot hold the speed override forever.
            self.keys.boost = false;
            self.keys.brake = false;
        }

        let ticked = self.engine.advance(
            &mut self.state,
            self.last_tick.elapsed(),
            self.controller.tick_interval(),
            self.controller.pending_direction(),
        )?;

        if let Some(info) = ticked {
            self.last_tick = Instant::now();
            if let Some(collision) = info.collision {
                tracing::info!(?collision, score = self.state.score, "game over");
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.on_key(key, true),
                KeyEventKind::Release => self.on_key(key, false),
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, pressed: bool) {
        // Ctrl+C quits even while Ctrl doubles as the brake.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.set_direction_key(key.code, pressed);
            }
            KeyCode::Char(' ') => self.keys.boost = pressed,
            KeyCode::Modifier(ModifierKeyCode::LeftControl) => self.keys.brake = pressed,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                if pressed {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    /// Last direction key pressed wins; a press clears the other three.
    fn set_direction_key(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            self.keys.up = false;
            self.keys.down = false;
            self.keys.left = false;
            self.keys.right = false;
        }
        match code {
            KeyCode::Up => self.keys.up = pressed,
            KeyCode::Down => self.keys.down = pressed,
            KeyCode::Left => self.keys.left = pressed,
            KeyCode::Right => self.keys.right = pressed,
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if self.release_events {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to pop keyboard enhancement")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
