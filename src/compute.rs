/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current state (and,
/// where needed, an RNG handle) and returns a brand-new value.  Side effects are
/// limited to the injected RNG, so a seeded RNG replays a session exactly.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Bullet, DamageOutcome, Enemy, FrameInput, GameState, GameStatus, HeldKeys, PowerUp,
    PowerUpKind, Rect, Spaceship, TickEvent,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: a fresh ship and a full enemy population.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    GameState {
        ship: new_spaceship(config),
        enemies: (0..config.enemy_count)
            .map(|_| spawn_enemy(config, rng))
            .collect(),
        power_ups: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        tick: 0,
    }
}

/// Ship centred horizontally, `ship_bottom_offset` above the bottom edge.
pub fn new_spaceship(config: &GameConfig) -> Spaceship {
    Spaceship {
        rect: Rect::from_center(
            config.width / 2,
            config.height - config.ship_bottom_offset,
            config.ship_size,
            config.ship_size,
        ),
        speed: config.ship_speed,
        health: config.ship_health,
        bullets: Vec::new(),
        double_bullet: false,
        shield: false,
        shield_timer: 0,
        double_bullet_timer: 0,
    }
}

/// Bullet whose horizontal centre is `center_x` and whose top edge is `top`.
pub fn new_bullet(center_x: i32, top: i32, config: &GameConfig) -> Bullet {
    Bullet {
        rect: Rect::new(
            center_x - config.bullet_width / 2,
            top,
            config.bullet_width,
            config.bullet_height,
        ),
        velocity: config.bullet_velocity,
    }
}

/// Enemy somewhere above the visible area with a speed drawn once.
pub fn spawn_enemy(config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let cx = rng.gen_range(config.spawn_x_range());
    let cy = rng.gen_range(config.spawn_y_range());
    Enemy {
        rect: Rect::from_center(cx, cy, config.enemy_size, config.enemy_size),
        speed: rng.gen_range(config.enemy_speed_range()),
    }
}

pub fn spawn_power_up(config: &GameConfig, rng: &mut impl Rng) -> PowerUp {
    let cx = rng.gen_range(config.spawn_x_range());
    let cy = rng.gen_range(config.spawn_y_range());
    let kind = if rng.gen_bool(0.5) {
        PowerUpKind::DoubleBullet
    } else {
        PowerUpKind::Shield
    };
    PowerUp {
        rect: Rect::from_center(cx, cy, config.power_up_size, config.power_up_size),
        speed: config.power_up_speed,
        kind,
    }
}

// ── Entity motion ────────────────────────────────────────────────────────────

pub fn move_bullet(bullet: &Bullet) -> Bullet {
    Bullet {
        rect: bullet.rect.translate(0, bullet.velocity),
        ..bullet.clone()
    }
}

pub fn move_enemy(enemy: &Enemy) -> Enemy {
    Enemy {
        rect: enemy.rect.translate(0, enemy.speed),
        ..enemy.clone()
    }
}

pub fn move_power_up(power_up: &PowerUp) -> PowerUp {
    PowerUp {
        rect: power_up.rect.translate(0, power_up.speed),
        ..power_up.clone()
    }
}

/// Entirely above the play area.
pub fn has_exited_top(rect: &Rect) -> bool {
    rect.bottom() < 0
}

/// Entirely below the play area.
pub fn has_exited_bottom(rect: &Rect, config: &GameConfig) -> bool {
    rect.y > config.height
}

// ── Spaceship ────────────────────────────────────────────────────────────────

/// Apply held movement keys.  A step that would leave the play area is
/// dropped for that axis rather than clamped to the edge.
pub fn move_ship(ship: &Spaceship, keys: &HeldKeys, config: &GameConfig) -> Spaceship {
    let step = ship.speed;
    let mut rect = ship.rect;

    if keys.left && rect.x - step >= 0 {
        rect.x -= step;
    }
    if keys.right && rect.right() + step <= config.width {
        rect.x += step;
    }
    if keys.up && rect.y - step >= 0 {
        rect.y -= step;
    }
    if keys.down && rect.bottom() + step <= config.height {
        rect.y += step;
    }

    Spaceship {
        rect,
        ..ship.clone()
    }
}

/// Fire from the ship's nose: one centred bullet, or a pair either side of
/// centre while double bullet is active.
pub fn shoot(ship: &Spaceship, config: &GameConfig) -> Spaceship {
    let cx = ship.rect.center_x();
    let top = ship.rect.y;
    let mut bullets = ship.bullets.clone();
    if ship.double_bullet {
        bullets.push(new_bullet(cx - config.double_bullet_spread, top, config));
        bullets.push(new_bullet(cx + config.double_bullet_spread, top, config));
    } else {
        bullets.push(new_bullet(cx, top, config));
    }
    Spaceship {
        bullets,
        ..ship.clone()
    }
}

/// Advance every bullet and discard those that left through the top.
pub fn update_bullets(ship: &Spaceship) -> Spaceship {
    let bullets = ship
        .bullets
        .iter()
        .map(move_bullet)
        .filter(|b| !has_exited_top(&b.rect))
        .collect();
    Spaceship {
        bullets,
        ..ship.clone()
    }
}

pub fn take_damage(ship: &Spaceship) -> (Spaceship, DamageOutcome) {
    if ship.shield {
        return (ship.clone(), DamageOutcome::Survived);
    }
    let health = ship.health.saturating_sub(1);
    let outcome = if health > 0 {
        DamageOutcome::Survived
    } else {
        DamageOutcome::Destroyed
    };
    (
        Spaceship {
            health,
            ..ship.clone()
        },
        outcome,
    )
}

/// Count both power-up timers down by one tick; a flag stays set only while
/// its timer is non-zero.
pub fn update_power_up_timers(ship: &Spaceship) -> Spaceship {
    let shield_timer = ship.shield_timer.saturating_sub(1);
    let double_bullet_timer = ship.double_bullet_timer.saturating_sub(1);
    Spaceship {
        shield: shield_timer > 0,
        shield_timer,
        double_bullet: double_bullet_timer > 0,
        double_bullet_timer,
        ..ship.clone()
    }
}

/// Activate a power-up.  Collecting one that is already running restarts its
/// countdown; durations never add up.
pub fn apply_power_up(ship: &Spaceship, kind: PowerUpKind, config: &GameConfig) -> Spaceship {
    match kind {
        PowerUpKind::DoubleBullet => Spaceship {
            double_bullet: true,
            double_bullet_timer: config.power_up_duration,
            ..ship.clone()
        },
        PowerUpKind::Shield => Spaceship {
            shield: true,
            shield_timer: config.power_up_duration,
            ..ship.clone()
        },
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick.  Returns the new state together with
/// everything notable that happened during it.  A finished game is returned
/// unchanged.
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (GameState, Vec<TickEvent>) {
    if state.status == GameStatus::GameOver {
        return (state.clone(), Vec::new());
    }
    let mut events = Vec::new();

    // ── 1. Fire once per key press ───────────────────────────────────────────
    let mut ship = (0..input.fire_count()).fold(state.ship.clone(), |s, _| shoot(&s, config));

    // ── 2. Maybe drop a new power-up ─────────────────────────────────────────
    let mut power_ups = state.power_ups.clone();
    if rng.gen_bool(config.power_up_spawn_chance) {
        let power_up = spawn_power_up(config, rng);
        events.push(TickEvent::PowerUpSpawned(power_up.kind));
        power_ups.push(power_up);
    }

    // ── 3. Ship movement & bullets ───────────────────────────────────────────
    ship = move_ship(&ship, &input.held, config);
    ship = update_bullets(&ship);

    // ── 4. Enemies: motion, ship contact, bullet hits ────────────────────────
    let mut status = state.status;
    let mut score = state.score;
    let mut enemies = Vec::with_capacity(state.enemies.len());

    for enemy in state.enemies.iter().map(move_enemy) {
        if has_exited_bottom(&enemy.rect, config) {
            enemies.push(spawn_enemy(config, rng));
            continue;
        }

        if status == GameStatus::Running && enemy.rect.overlaps(&ship.rect) {
            let shielded = ship.shield;
            let (damaged, outcome) = take_damage(&ship);
            ship = damaged;
            match outcome {
                DamageOutcome::Survived if shielded => events.push(TickEvent::ShieldAbsorbed),
                DamageOutcome::Survived => events.push(TickEvent::ShipDamaged {
                    health: ship.health,
                }),
                DamageOutcome::Destroyed => {
                    events.push(TickEvent::ShipDestroyed);
                    status = GameStatus::GameOver;
                }
            }
        }

        // Only the first overlapping bullet counts, so an enemy scores once.
        match ship.bullets.iter().position(|b| b.rect.overlaps(&enemy.rect)) {
            Some(hit) => {
                ship.bullets.remove(hit);
                score += 1;
                events.push(TickEvent::EnemyDestroyed);
                enemies.push(spawn_enemy(config, rng));
            }
            None => enemies.push(enemy),
        }
    }

    // ── 5. Power-ups: motion & pickup ────────────────────────────────────────
    let mut remaining = Vec::with_capacity(power_ups.len());
    for power_up in power_ups.iter().map(move_power_up) {
        if power_up.rect.overlaps(&ship.rect) {
            ship = apply_power_up(&ship, power_up.kind, config);
            events.push(TickEvent::PowerUpCollected(power_up.kind));
        } else if !(config.cull_offscreen_power_ups && has_exited_bottom(&power_up.rect, config)) {
            remaining.push(power_up);
        }
    }

    // ── 6. Power-up countdown ────────────────────────────────────────────────
    ship = update_power_up_timers(&ship);

    (
        GameState {
            ship,
            enemies,
            power_ups: remaining,
            score,
            status,
            tick: state.tick + 1,
        },
        events,
    )
}
