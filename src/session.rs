/// The game loop's owner: one `Session` per run.
///
/// Holds the current `GameState`, the validated config and the injected RNG.
/// There is no global state anywhere in the core; a front-end builds a session
/// once and calls [`Session::step`] at its own fixed cadence.

use log::{debug, info};
use rand::Rng;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::entities::{FrameInput, GameState, GameStatus, TickEvent};
use crate::error::ConfigError;
use crate::snapshot::FrameSnapshot;

pub struct Session<R: Rng> {
    state: GameState,
    config: GameConfig,
    rng: R,
    running: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = init_state(&config, &mut rng);
        Ok(Self {
            state,
            config,
            rng,
            running: true,
        })
    }

    /// Resume from an existing state (used by tests to stage scenarios).
    pub fn from_state(state: GameState, config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let running = state.status == GameStatus::Running;
        Ok(Self {
            state,
            config,
            rng,
            running,
        })
    }

    /// Run one tick.  A quit request is honoured at the tick boundary: the
    /// session stops and the state is left as it was.
    pub fn step(&mut self, input: &FrameInput) -> Vec<TickEvent> {
        if !self.running {
            return Vec::new();
        }
        if input.quit_requested() {
            info!("quit requested at tick {}", self.state.tick);
            self.running = false;
            return Vec::new();
        }

        let (next, events) = tick(&self.state, input, &self.config, &mut self.rng);
        self.state = next;
        for event in &events {
            log_event(event, &self.state);
        }
        if self.state.status == GameStatus::GameOver {
            info!(
                "game over at tick {} with score {}",
                self.state.tick, self.state.score
            );
            self.running = false;
        }
        events
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(&self.state, &self.config)
    }
}

fn log_event(event: &TickEvent, state: &GameState) {
    match event {
        TickEvent::EnemyDestroyed => debug!("enemy destroyed, score {}", state.score),
        TickEvent::ShipDamaged { health } => info!("ship hit, health {}", health),
        TickEvent::ShieldAbsorbed => debug!("shield absorbed a hit"),
        TickEvent::ShipDestroyed => info!("ship destroyed"),
        TickEvent::PowerUpSpawned(kind) => debug!("power-up spawned: {:?}", kind),
        TickEvent::PowerUpCollected(kind) => info!("power-up collected: {:?}", kind),
    }
}
