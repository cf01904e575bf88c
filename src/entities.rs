/// Game entity types and their per-frame kinematics.
///
/// Entities only know how to move themselves; damage, spawning and level
/// flow live in `compute`.

use crate::config::{GameConfig, HitBox};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Every level in the table was cleared.
    Victory,
    /// The player's hit points ran out.
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    Ended(Outcome),
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// True when two boxes centred on `a` and `b` intersect.
pub fn overlaps(a: (f64, f64), a_box: HitBox, b: (f64, f64), b_box: HitBox) -> bool {
    (a.0 - b.0).abs() < a_box.half_w + b_box.half_w && (a.1 - b.1).abs() < a_box.half_h + b_box.half_h
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub hp: i32,
}

impl Player {
    pub fn new(x: f64, y: f64, hp: i32) -> Self {
        Player { x, y, target_x: x, target_y: y, hp }
    }

    /// Remember where the pointer is; the ship moves there on the next update.
    pub fn update_target(&mut self, x: f64, y: f64, config: &GameConfig) {
        self.target_x = x.max(config.min_x()).min(config.max_x());
        self.target_y = y.max(config.margin).min(config.ship_max_y);
    }

    /// Snap to the target, then clamp.
    ///
    /// Only the lower vertical bound is enforced here; the upper bound
    /// (`ship_max_y`) is guaranteed by `update_target` alone.
    pub fn update(&mut self, config: &GameConfig) {
        self.x = self.target_x;
        self.y = self.target_y;
        self.x = self.x.max(config.min_x()).min(config.max_x());
        if self.y <= config.margin {
            self.y = config.margin;
        }
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub dx: f64,
    pub dy: f64,
    pub mass: u32,
    /// Velocity change per frame toward the target (`base / mass`).
    pub acceleration: f64,
    pub hp: i32,
    /// Index into the enemy sprite variants.
    pub sprite: usize,
}

impl Enemy {
    pub fn new(x: f64, y: f64, mass: u32, hp: i32, sprite: usize, config: &GameConfig) -> Self {
        Enemy {
            x,
            y,
            target_x: x,
            target_y: y,
            dx: 0.0,
            dy: 0.0,
            mass,
            acceleration: config.enemy_acceleration / mass.max(1) as f64,
            hp,
            sprite,
        }
    }

    pub fn update_target(&mut self, x: f64, y: f64, config: &GameConfig) {
        self.target_x = x.max(config.min_x()).min(config.max_x());
        self.target_y = y.max(config.enemy_min_y).min(config.height - config.margin);
    }

    /// Steer toward the target, integrate one frame, then bounce off the walls.
    ///
    /// The speed cap applies to each axis on its own, so a diagonal run can
    /// reach `cap * sqrt(2)`.
    pub fn update(&mut self, config: &GameConfig) {
        let cap = config.enemy_max_acceleration;

        if self.x != self.target_x {
            self.dx += self.acceleration * sign(self.target_x - self.x);
            self.dx = self.dx.clamp(-cap, cap);
            self.x += self.dx;
        }
        if self.y != self.target_y {
            self.dy += self.acceleration * sign(self.target_y - self.y);
            self.dy = self.dy.clamp(-cap, cap);
            self.y += self.dy;
        }

        if self.x <= config.min_x() {
            self.x = config.min_x();
            self.dx = self.dx.abs();
        }
        if self.x >= config.max_x() {
            self.x = config.max_x();
            self.dx = -self.dx.abs();
        }
        // Both vertical walls push velocity downward.
        if self.y <= config.margin {
            self.y = config.margin;
            self.dy = -self.dy.abs();
        }
        if self.y >= config.height - config.margin {
            self.y = config.height - config.margin;
            self.dy = -self.dy.abs();
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub damage: i32,
}

impl Bullet {
    pub fn update(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    /// Centre has left the world rectangle grown by `margin` on every side.
    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.x < -config.margin
            || self.x > config.width + config.margin
            || self.y < -config.margin
            || self.y > config.height + config.margin
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Bullets fired by the player; only these can hit enemies.
    pub bullets: Vec<Bullet>,
    /// Bullets fired by enemies; only these can hit the player.
    pub enemy_bullets: Vec<Bullet>,
    pub score: f64,
    /// Index into `GameConfig::levels`.
    pub level: usize,
    pub status: GameStatus,
    /// Frames simulated so far; reported when the session ends.
    pub frame: u64,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
