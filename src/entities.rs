/// All game entity types — pure data and box geometry, no game rules.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in play-area units.  `(x, y)` is the top-left
/// corner; y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of the given size whose centre sits on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(cx - width / 2, cy - height / 2, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center_x(&self) -> i32 {
        self.x.saturating_add(self.width / 2)
    }

    pub fn center_y(&self) -> i32 {
        self.y.saturating_add(self.height / 2)
    }

    /// Saturates rather than wrapping, so an entity left to drift forever
    /// pins at the edge of `i32`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Strict AABB intersection: boxes that only share an edge do not
    /// overlap, and an empty box overlaps nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.width > 0
            && self.height > 0
            && other.width > 0
            && other.height > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if the whole box lies inside `[0, width] × [0, height]`.
    pub fn is_inside(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width && self.bottom() <= height
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived,
    Destroyed,
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Each shot fires two bullets, 10 units either side of the ship's centre.
    DoubleBullet,
    /// Enemy contact costs no health while active.
    Shield,
}

/// A pickup drifting down the play area.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub speed: i32,
    pub kind: PowerUpKind,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Vertical displacement per tick (negative = upward).
    pub velocity: i32,
}

// ── Ship & enemy ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Downward displacement per tick, fixed for the enemy's lifetime.
    pub speed: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spaceship {
    pub rect: Rect,
    pub speed: i32,
    pub health: u32,
    /// Live bullets in firing order.
    pub bullets: Vec<Bullet>,
    pub double_bullet: bool,
    pub shield: bool,
    /// Ticks of shield remaining.
    pub shield_timer: u32,
    /// Ticks of double bullet remaining.
    pub double_bullet_timer: u32,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Movement keys held down during a tick.  Each axis is independent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// One-shot input events.  `Fire` is produced once per key press, never
/// while the key is merely held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Fire,
}

/// Everything the core needs from the input side for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }

    pub fn fire_count(&self) -> usize {
        self.events.iter().filter(|e| **e == InputEvent::Fire).count()
    }
}

// ── Tick events ───────────────────────────────────────────────────────────────

/// Things that happened during a tick, reported alongside the new state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    EnemyDestroyed,
    ShipDamaged { health: u32 },
    ShieldAbsorbed,
    ShipDestroyed,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Spaceship,
    /// Fixed-size population; destroyed or escaped enemies are replaced.
    pub enemies: Vec<Enemy>,
    /// Power-ups currently falling through the play area.
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub status: GameStatus,
    pub tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
        assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
        assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(5, 5, 0, 4)));
    }

    #[test]
    fn from_center_positions_top_left() {
        let r = Rect::from_center(400, 740, 50, 50);
        assert_eq!((r.x, r.y), (375, 715));
        assert_eq!(r.center_x(), 400);
        assert_eq!(r.center_y(), 740);
    }

    #[test]
    fn far_drift_saturates() {
        let r = Rect::new(0, i32::MAX - 2, 30, 30).translate(0, 1_000_000);
        assert_eq!(r.y, i32::MAX);
        assert_eq!(r.bottom(), i32::MAX);
    }

    #[test]
    fn fire_count_ignores_quit() {
        let input = FrameInput {
            held: HeldKeys::default(),
            events: vec![InputEvent::Fire, InputEvent::Quit, InputEvent::Fire],
        };
        assert_eq!(input.fire_count(), 2);
        assert!(input.quit_requested());
    }
}
