//! Gameplay tuning.
//!
//! Defaults reproduce the classic arcade feel; any field can be overridden
//! from a TOML file.  Spawn chances are "one in N" per tick, 0 disables.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal distance per tick while a direction is held.
    pub speed: f32,
    pub lives: u32,
    /// Distance from the bottom of the arena to the ship's top edge.
    pub bottom_margin: f32,
    pub fire_cooldown_ms: u64,
    /// Bullet pool capacity.
    pub max_bullets: usize,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 20.0,
            speed: 6.0,
            lives: 3,
            bottom_margin: 30.0,
            fire_cooldown_ms: 250,
            max_bullets: 40,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub max_enemies: usize,
    pub spawn_chance: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 20.0,
            speed_min: 2.0,
            speed_max: 2.0,
            max_enemies: 6,
            spawn_chance: 150,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeDropTuning {
    pub size: f32,
    pub speed: f32,
    pub spawn_chance: u32,
}

impl Default for LifeDropTuning {
    fn default() -> Self {
        Self {
            size: 20.0,
            speed: 2.0,
            spawn_chance: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponDropTuning {
    pub size: f32,
    pub speed: f32,
    pub spawn_chance: u32,
}

impl Default for WeaponDropTuning {
    fn default() -> Self {
        Self {
            size: 20.0,
            speed: 2.2,
            spawn_chance: 700,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub enemies: EnemyTuning,
    pub life_drop: LifeDropTuning,
    pub weapon_drop: WeaponDropTuning,
}

impl Tuning {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let tuning: Tuning = toml::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.player.fire_cooldown_ms)
    }

    /// Reject values the simulation cannot honour (e.g. a ship wider than the
    /// arena would make the clamp range empty).
    pub fn validate(&self) -> Result<()> {
        let arena = &self.arena;
        positive("arena width", arena.width)?;
        positive("arena height", arena.height)?;

        let player = &self.player;
        positive("player width", player.width)?;
        positive("player height", player.height)?;
        non_negative("player speed", player.speed)?;
        non_negative("player bottom margin", player.bottom_margin)?;
        if player.lives == 0 {
            return Err(invalid("player needs at least one life"));
        }
        if player.width > arena.width {
            return Err(invalid("player is wider than the arena"));
        }
        if player.bottom_margin < player.height || player.bottom_margin > arena.height {
            return Err(invalid("player bottom margin must fit the ship inside the arena"));
        }
        if player.max_bullets == 0 {
            return Err(invalid("bullet pool needs at least one slot"));
        }

        let enemies = &self.enemies;
        positive("enemy width", enemies.width)?;
        positive("enemy height", enemies.height)?;
        non_negative("enemy speed_min", enemies.speed_min)?;
        non_negative("enemy speed_max", enemies.speed_max)?;
        if enemies.speed_min > enemies.speed_max {
            return Err(invalid("enemy speed_min exceeds speed_max"));
        }
        if enemies.width >= arena.width {
            return Err(invalid("enemies must be narrower than the arena"));
        }

        let drops = [
            ("life drop", self.life_drop.size, self.life_drop.speed),
            ("weapon drop", self.weapon_drop.size, self.weapon_drop.speed),
        ];
        for (name, size, speed) in drops {
            positive(&format!("{name} size"), size)?;
            non_negative(&format!("{name} speed"), speed)?;
            if size >= arena.width {
                return Err(invalid(format!("{name} must be narrower than the arena")));
            }
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidTuning(msg.into())
}

// Both helpers refuse inf and NaN; the random spawn ranges need finite bounds.
fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and not negative, got {value}")))
    }
}
