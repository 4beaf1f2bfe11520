//! Game-logic functions.
//!
//! Everything here mutates a `GameState` in place; the only outside inputs
//! are the held-key snapshot, a monotonic clock reading and an injected RNG,
//! so a seeded RNG replays a session exactly.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::Tuning;
use crate::entities::{
    Bullet, Enemy, GameEvent, GameState, GameStatus, InputSnapshot, LifeDrop, Player, Rect,
    Weapon, WeaponDrop,
};
use crate::pool::Pool;

/// Enemy animation advance per tick (one full cycle per second at 60 Hz).
const PHASE_STEP: f32 = 1.0 / 60.0;

/// Background scroll per tick, in arena units.
const SCROLL_STEP: f32 = 1.0;

/// Upper bound on events in a single tick, used to size the event buffer.
const EVENT_HEADROOM: usize = 16;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session.  All pools are allocated here and never resized.
///
/// `tuning` must have passed `Tuning::validate`.  Non-finite speeds or
/// sizes can make the spawn rolls panic.
pub fn init_state(tuning: Tuning) -> GameState {
    let p = &tuning.player;
    let player = Player {
        rect: Rect::new(
            tuning.arena.width / 2.0 - p.width / 2.0,
            tuning.arena.height - p.bottom_margin,
            p.width,
            p.height,
        ),
        speed: p.speed,
        lives: p.lives,
        weapon: Weapon::Single,
    };
    let events = Vec::with_capacity(p.max_bullets + tuning.enemies.max_enemies + EVENT_HEADROOM);

    GameState {
        player,
        bullets: Pool::with_capacity(p.max_bullets),
        enemies: Pool::with_capacity(tuning.enemies.max_enemies),
        life_drop: Pool::with_capacity(1),
        weapon_drop: Pool::with_capacity(1),
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        last_shot_at: Duration::ZERO,
        scroll: 0.0,
        events,
        tuning,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Apply held direction keys and clamp the ship to the arena.
pub fn move_player(state: &mut GameState, input: &InputSnapshot) {
    let player = &mut state.player;
    if input.left {
        player.rect.x -= player.speed;
    }
    if input.right {
        player.rect.x += player.speed;
    }
    let max_x = (state.tuning.arena.width - player.rect.w).max(0.0);
    player.rect.x = player.rect.x.clamp(0.0, max_x);
}

/// Pull the trigger at clock reading `now`.  The cooldown also runs from
/// session start, so the first volley needs `now` past the cooldown too.
///
/// Returns `true` when the cooldown allowed a volley, even if the bullet
/// pool had no room for some (or all) of its bullets.
pub fn player_shoot(state: &mut GameState, now: Duration) -> bool {
    if now.saturating_sub(state.last_shot_at) <= state.tuning.fire_cooldown() {
        return false;
    }
    state.last_shot_at = now;

    let weapon = state.player.weapon;
    let ship = state.player.rect;
    let mut spawned = 0;
    for shot in weapon.volley() {
        let bullet = Bullet {
            rect: Rect::new(
                ship.center_x() + shot.offset - shot.width / 2.0,
                ship.y - shot.height,
                shot.width,
                shot.height,
            ),
            speed: shot.speed,
            weapon,
        };
        match state.bullets.spawn(bullet) {
            Some(_) => spawned += 1,
            None => trace!(weapon = weapon.name(), "bullet pool exhausted, shot dropped"),
        }
    }
    if spawned < weapon.volley().len() {
        debug!(
            weapon = weapon.name(),
            spawned,
            wanted = weapon.volley().len(),
            "volley truncated by full bullet pool"
        );
    }
    state.events.push(GameEvent::Shoot { weapon, spawned });
    true
}

// ── Per-frame advance ────────────────────────────────────────────────────────

fn roll(rng: &mut impl Rng, one_in: u32) -> bool {
    one_in != 0 && rng.gen_ratio(1, one_in)
}

/// Random left edge that keeps an entity of `width` inside the arena.
fn spawn_x(rng: &mut impl Rng, arena_width: f32, width: f32) -> f32 {
    let span = arena_width - width;
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

pub fn advance_bullets(state: &mut GameState) {
    for slot in state.bullets.slot_indices() {
        let gone = match state.bullets.get_mut(slot) {
            Some(b) => {
                b.rect.y -= b.speed;
                b.rect.y < 0.0
            }
            None => continue,
        };
        if gone {
            state.bullets.despawn(slot);
        }
    }
}

/// Move live enemies down, retire those below the arena, then give every
/// slot that was free at the start of the tick a chance to spawn.
pub fn advance_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let arena = state.tuning.arena.clone();
    let tuning = state.tuning.enemies.clone();
    let free = state.enemies.free_count();

    for slot in state.enemies.slot_indices() {
        let gone = match state.enemies.get_mut(slot) {
            Some(e) => {
                e.rect.y += e.speed;
                e.rect.y > arena.height
            }
            None => continue,
        };
        if gone {
            state.enemies.despawn(slot);
        }
    }

    for _ in 0..free {
        if !roll(rng, tuning.spawn_chance) {
            continue;
        }
        let x = spawn_x(rng, arena.width, tuning.width);
        let speed = if tuning.speed_min < tuning.speed_max {
            rng.gen_range(tuning.speed_min..=tuning.speed_max)
        } else {
            tuning.speed_min
        };
        state.enemies.spawn(Enemy {
            rect: Rect::new(x, -tuning.height, tuning.width, tuning.height),
            speed,
            phase: 0.0,
        });
    }
}

pub fn advance_life_drop(state: &mut GameState, rng: &mut impl Rng) {
    let arena = state.tuning.arena.clone();
    let tuning = state.tuning.life_drop.clone();
    let free = state.life_drop.free_count();

    for slot in state.life_drop.slot_indices() {
        let gone = match state.life_drop.get_mut(slot) {
            Some(d) => {
                d.rect.y += d.speed;
                d.rect.y > arena.height
            }
            None => continue,
        };
        if gone {
            state.life_drop.despawn(slot);
        }
    }

    for _ in 0..free {
        if roll(rng, tuning.spawn_chance) {
            let x = spawn_x(rng, arena.width, tuning.size);
            state.life_drop.spawn(LifeDrop {
                rect: Rect::new(x, -tuning.size, tuning.size, tuning.size),
                speed: tuning.speed,
            });
        }
    }
}

pub fn advance_weapon_drop(state: &mut GameState, rng: &mut impl Rng) {
    let arena = state.tuning.arena.clone();
    let tuning = state.tuning.weapon_drop.clone();
    let free = state.weapon_drop.free_count();

    for slot in state.weapon_drop.slot_indices() {
        let gone = match state.weapon_drop.get_mut(slot) {
            Some(d) => {
                d.rect.y += d.speed;
                d.rect.y > arena.height
            }
            None => continue,
        };
        if gone {
            state.weapon_drop.despawn(slot);
        }
    }

    for _ in 0..free {
        if roll(rng, tuning.spawn_chance) {
            let x = spawn_x(rng, arena.width, tuning.size);
            let weapon = Weapon::ALL[rng.gen_range(0..Weapon::ALL.len())];
            state.weapon_drop.spawn(WeaponDrop {
                rect: Rect::new(x, -tuning.size, tuning.size, tuning.size),
                speed: tuning.speed,
                weapon,
            });
        }
    }
}

/// Purely visual state.  Never touches a hitbox.
fn animate(state: &mut GameState) {
    for (_, enemy) in state.enemies.iter_mut() {
        enemy.phase = (enemy.phase + PHASE_STEP).fract();
    }
    state.scroll = (state.scroll + SCROLL_STEP) % state.tuning.arena.height;
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Resolve every overlap in fixed order: bullets vs enemies, enemies vs
/// player, life drop vs player, weapon drop vs player.
pub fn resolve_collisions(state: &mut GameState) {
    for b in state.bullets.slot_indices() {
        for e in state.enemies.slot_indices() {
            let (Some(bullet), Some(enemy)) = (state.bullets.get(b), state.enemies.get(e)) else {
                continue;
            };
            if !bullet.rect.intersects(&enemy.rect) {
                continue;
            }
            let (x, y) = (enemy.rect.center_x(), enemy.rect.center_y());
            state.bullets.despawn(b);
            state.enemies.despawn(e);
            state.score += 1;
            state.events.push(GameEvent::Hit { x, y });
        }
    }

    let ship = state.player.rect;
    for e in state.enemies.slot_indices() {
        let rammed = state
            .enemies
            .get(e)
            .is_some_and(|enemy| enemy.rect.intersects(&ship));
        if !rammed {
            continue;
        }
        state.enemies.despawn(e);
        state.player.lives = state.player.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            lives: state.player.lives,
        });
        if state.player.lives == 0 && state.status == GameStatus::Running {
            state.status = GameStatus::Ended;
            info!(score = state.score, frame = state.frame, "session ended");
            state.events.push(GameEvent::SessionEnded { score: state.score });
        }
    }

    if state.status == GameStatus::Ended {
        return;
    }

    let touched = state
        .life_drop
        .iter()
        .find(|(_, d)| d.rect.intersects(&ship))
        .map(|(slot, _)| slot);
    if let Some(slot) = touched {
        state.life_drop.despawn(slot);
        state.player.lives += 1;
        state.events.push(GameEvent::LifePickup {
            lives: state.player.lives,
        });
    }

    let touched = state
        .weapon_drop
        .iter()
        .find(|(_, d)| d.rect.intersects(&ship))
        .map(|(slot, d)| (slot, d.weapon));
    if let Some((slot, weapon)) = touched {
        state.weapon_drop.despawn(slot);
        debug!(from = state.player.weapon.name(), to = weapon.name(), "weapon pickup");
        state.player.weapon = weapon;
        state.events.push(GameEvent::WeaponPickup(weapon));
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Events from the previous tick are discarded first, so after this returns
/// `state.events()` describes exactly this tick.  An ended session does not
/// move.
pub fn tick(state: &mut GameState, input: &InputSnapshot, now: Duration, rng: &mut impl Rng) {
    state.events.clear();
    if state.status == GameStatus::Ended {
        return;
    }
    state.frame += 1;

    move_player(state, input);
    if input.fire {
        player_shoot(state, now);
    }
    advance_bullets(state);
    advance_enemies(state, rng);
    advance_life_drop(state, rng);
    advance_weapon_drop(state, rng);
    animate(state);
    resolve_collisions(state);
}

// ── HUD ──────────────────────────────────────────────────────────────────────

/// Score, lives and weapon lines for the on-screen UI.
pub fn hud_lines(state: &GameState) -> [String; 3] {
    [
        format!("Score: {}", state.score),
        format!("Lives: {}", state.player.lives),
        format!("Weapon: {}", state.player.weapon.name()),
    ]
}
