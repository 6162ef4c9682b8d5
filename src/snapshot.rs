/// Per-tick output feed for the presentation layer.
///
/// The renderer never touches `GameState` directly; it receives a flat copy of
/// everything drawable plus the HUD values, taken after the tick completed.

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, PowerUpKind, Rect};

#[derive(Clone, Debug, PartialEq)]
pub struct ShipView {
    pub rect: Rect,
    pub shield: bool,
    pub double_bullet: bool,
    pub shield_timer: u32,
    pub double_bullet_timer: u32,
    /// Whole seconds left on each power-up at the configured tick rate.
    pub shield_secs: u32,
    pub double_bullet_secs: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub ship: ShipView,
    /// Bullets in firing order.
    pub bullets: Vec<Rect>,
    pub enemies: Vec<Rect>,
    pub power_ups: Vec<(Rect, PowerUpKind)>,
    pub score: u32,
    pub health: u32,
    pub game_over: bool,
    pub tick: u64,
    pub width: i32,
    pub height: i32,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let ship = &state.ship;
        FrameSnapshot {
            ship: ShipView {
                rect: ship.rect,
                shield: ship.shield,
                double_bullet: ship.double_bullet,
                shield_timer: ship.shield_timer,
                double_bullet_timer: ship.double_bullet_timer,
                shield_secs: config.ticks_to_secs(ship.shield_timer),
                double_bullet_secs: config.ticks_to_secs(ship.double_bullet_timer),
            },
            bullets: ship.bullets.iter().map(|b| b.rect).collect(),
            enemies: state.enemies.iter().map(|e| e.rect).collect(),
            power_ups: state.power_ups.iter().map(|p| (p.rect, p.kind)).collect(),
            score: state.score,
            health: ship.health,
            game_over: state.status == GameStatus::GameOver,
            tick: state.tick,
            width: config.width,
            height: config.height,
        }
    }
}
