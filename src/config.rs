/// Tunable game values.
///
/// Everything the simulation needs to know about the world lives in a
/// `GameConfig` that is built once at startup and passed by reference into
/// every `compute` function.  Tests build their own with overridden fields.

use std::ops::RangeInclusive;

use anyhow::{bail, Result};

// ── Defaults ──────────────────────────────────────────────────────────────────

const SCREEN_WIDTH: f64 = 1280.0;
const SCREEN_HEIGHT: f64 = 720.0;
const MARGIN: f64 = 50.0;

const SCORE_INCREASE: f64 = 0.1;

const SHIP_HP: i32 = 100;
const SHIP_START_Y: f64 = 100.0;

const BULLET_DAMAGE: i32 = 10;
const BULLET_SPEED: f64 = 10.0;

const NUM_ENEMIES: usize = 5;
const ENEMY_MIN_Y: f64 = 400.0;
const ENEMY_MIN_HP: i32 = 10;
const ENEMY_MAX_HP: i32 = 50;
const ENEMY_MIN_MASS: u32 = 10;
const ENEMY_MAX_MASS: u32 = 100;
const ENEMY_ACCELERATION: f64 = 10.0;
const ENEMY_MAX_ACCELERATION: f64 = 3.0;
const ENEMY_PROB_SHOOT: f64 = 0.01;
const ENEMY_PROB_CHANGE_POS: f64 = 0.1;
const ENEMY_SPRITE_VARIANTS: usize = 9;

const ENEMY_BULLET_SPEED: f64 = -4.0;
const ENEMY_BULLET_DAMAGE: i32 = 4;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Half-width and half-height of an axis-aligned hit box, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub half_w: f64,
    pub half_h: f64,
}

impl HitBox {
    pub const fn new(half_w: f64, half_h: f64) -> Self {
        HitBox { half_w, half_h }
    }
}

/// One row of the level table.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    pub title: String,
    /// Asset id of the background art (`assets/<id>.txt`).
    pub background: String,
    pub enemies: usize,
    /// Scales both ends of the enemy hit-point range.
    pub multiplier: f64,
}

impl LevelSpec {
    pub fn new(title: &str, background: &str, enemies: usize, multiplier: f64) -> Self {
        LevelSpec {
            title: title.to_string(),
            background: background.to_string(),
            enemies,
            multiplier,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,

    pub score_increase: f64,

    pub ship_hp: i32,
    pub ship_max_y: f64,
    pub ship_start: (f64, f64),
    pub ship_hitbox: HitBox,

    pub bullet_damage: i32,
    pub bullet_speed: f64,
    pub bullet_hitbox: HitBox,

    pub enemy_min_y: f64,
    pub enemy_hp: RangeInclusive<i32>,
    pub enemy_mass: RangeInclusive<u32>,
    pub enemy_acceleration: f64,
    pub enemy_max_acceleration: f64,
    pub enemy_prob_shoot: f64,
    pub enemy_prob_change_pos: f64,
    pub enemy_sprite_variants: usize,
    pub enemy_hitbox: HitBox,

    pub enemy_bullet_damage: i32,
    pub enemy_bullet_speed: f64,

    pub levels: Vec<LevelSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            margin: MARGIN,
            score_increase: SCORE_INCREASE,
            ship_hp: SHIP_HP,
            ship_max_y: (SCREEN_HEIGHT / 3.0).floor(),
            ship_start: ((SCREEN_WIDTH / 2.0).floor(), SHIP_START_Y),
            ship_hitbox: HitBox::new(40.0, 30.0),
            bullet_damage: BULLET_DAMAGE,
            bullet_speed: BULLET_SPEED,
            bullet_hitbox: HitBox::new(4.0, 10.0),
            enemy_min_y: ENEMY_MIN_Y,
            enemy_hp: ENEMY_MIN_HP..=ENEMY_MAX_HP,
            enemy_mass: ENEMY_MIN_MASS..=ENEMY_MAX_MASS,
            enemy_acceleration: ENEMY_ACCELERATION,
            enemy_max_acceleration: ENEMY_MAX_ACCELERATION,
            enemy_prob_shoot: ENEMY_PROB_SHOOT,
            enemy_prob_change_pos: ENEMY_PROB_CHANGE_POS,
            enemy_sprite_variants: ENEMY_SPRITE_VARIANTS,
            enemy_hitbox: HitBox::new(40.0, 30.0),
            enemy_bullet_damage: ENEMY_BULLET_DAMAGE,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            levels: vec![
                LevelSpec::new("Level 1", "city1", NUM_ENEMIES, 1.0),
                LevelSpec::new("Level 2", "city2", NUM_ENEMIES + 3, 1.5),
            ],
        }
    }
}

impl GameConfig {
    /// Horizontal band every entity is clamped into.
    pub fn min_x(&self) -> f64 {
        self.margin
    }

    pub fn max_x(&self) -> f64 {
        self.width - self.margin
    }

    /// Vertical band new enemies spawn in and draw wander targets from.
    ///
    /// The lower end deliberately sits below `enemy_min_y`; `update_target`
    /// clamps the draw back into the movement band.
    pub fn enemy_spawn_y(&self) -> (f64, f64) {
        (self.height - self.enemy_min_y, self.height - self.margin)
    }

    /// Hit-point range for enemies on a level, truncated to integers.
    pub fn enemy_hp_for(&self, level: &LevelSpec) -> RangeInclusive<i32> {
        let lo = (*self.enemy_hp.start() as f64 * level.multiplier) as i32;
        let hi = (*self.enemy_hp.end() as f64 * level.multiplier) as i32;
        lo..=hi
    }

    /// Reject configurations that would panic or misbehave mid-game.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 2.0 * self.margin || self.height <= 2.0 * self.margin {
            bail!(
                "world {}x{} is too small for margin {}",
                self.width,
                self.height,
                self.margin
            );
        }
        if self.ship_hp <= 0 {
            bail!("ship_hp must be positive, got {}", self.ship_hp);
        }
        if self.ship_max_y < self.margin {
            bail!("ship_max_y {} is below the margin {}", self.ship_max_y, self.margin);
        }
        if self.enemy_min_y < self.margin {
            bail!("enemy_min_y {} is below the margin {}", self.enemy_min_y, self.margin);
        }
        if self.enemy_min_y > self.height - self.margin {
            bail!("enemy_min_y {} is above the playfield", self.enemy_min_y);
        }
        if self.enemy_hp.is_empty() || *self.enemy_hp.start() <= 0 {
            bail!("enemy hit-point range {:?} must be non-empty and positive", self.enemy_hp);
        }
        if self.enemy_mass.is_empty() || *self.enemy_mass.start() == 0 {
            bail!("enemy mass range {:?} must be non-empty and positive", self.enemy_mass);
        }
        if self.enemy_max_acceleration <= 0.0 {
            bail!("enemy_max_acceleration must be positive");
        }
        for (name, p) in [
            ("enemy_prob_shoot", self.enemy_prob_shoot),
            ("enemy_prob_change_pos", self.enemy_prob_change_pos),
        ] {
            if !(0.0..=1.0).contains(&p) {
                bail!("{} = {} is not a probability", name, p);
            }
        }
        if self.enemy_sprite_variants == 0 {
            bail!("at least one enemy sprite variant is required");
        }
        if self.levels.is_empty() {
            bail!("level table is empty");
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.enemies == 0 {
                bail!("level {} ({}) spawns no enemies", i, level.title);
            }
            if level.multiplier <= 0.0 {
                bail!("level {} ({}) has non-positive multiplier {}", i, level.title, level.multiplier);
            }
            if level.background.is_empty() {
                bail!("level {} ({}) names no background", i, level.title);
            }
            let hp = self.enemy_hp_for(level);
            if hp.is_empty() || *hp.start() <= 0 {
                bail!("level {} ({}) scales the hit-point range to {:?}", i, level.title, hp);
            }
        }
        Ok(())
    }
}
