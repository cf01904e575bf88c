/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` plus the `GameConfig` (and, where needed, an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the injected
/// RNG and log output.

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    overlaps, Bullet, Enemy, GameState, GameStatus, Outcome, Player,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session on the first level, enemies already spawned.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let (x, y) = config.ship_start;
    let mut state = GameState {
        player: Player::new(x, y, config.ship_hp),
        enemies: Vec::new(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0.0,
        level: 0,
        status: GameStatus::Playing,
        frame: 0,
    };
    setup_level(&mut state, config, rng);
    state
}

fn random_coord(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    rng.gen_range(lo as i64..=hi as i64) as f64
}

/// Roll the enemies for one level of the table.
pub fn spawn_enemies(config: &GameConfig, level: usize, rng: &mut impl Rng) -> Vec<Enemy> {
    let spec = &config.levels[level];
    let hp_range = config.enemy_hp_for(spec);
    let (y_lo, y_hi) = config.enemy_spawn_y();

    (0..spec.enemies)
        .map(|_| {
            let x = random_coord(rng, config.min_x(), config.max_x());
            let y = random_coord(rng, y_lo, y_hi);
            let hp = rng.gen_range(hp_range.clone());
            let mass = rng.gen_range(config.enemy_mass.clone());
            let sprite = rng.gen_range(0..config.enemy_sprite_variants);
            debug!("spawn enemy at ({}, {}) hp={} mass={} sprite={}", x, y, hp, mass, sprite);
            Enemy::new(x, y, mass, hp, sprite, config)
        })
        .collect()
}

fn setup_level(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    let spec = &config.levels[state.level];
    info!(
        "entering {} ({} enemies, hp x{})",
        spec.title, spec.enemies, spec.multiplier
    );
    state.enemies = spawn_enemies(config, state.level, rng);
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Pointer moved: aim the ship at the pointer.
pub fn move_player_to(state: &GameState, x: f64, y: f64, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    next.player.update_target(x, y, config);
    next
}

/// Pointer pressed: fire one bullet straight up from the nose of the ship.
/// Ignored once the session has ended.
pub fn player_shoot(state: &GameState, config: &GameConfig) -> GameState {
    if !state.is_playing() {
        return state.clone();
    }
    let mut next = state.clone();
    next.bullets.push(Bullet {
        x: state.player.x,
        y: state.player.y + config.ship_hitbox.half_h.floor(),
        dx: 0.0,
        dy: config.bullet_speed,
        damage: config.bullet_damage,
    });
    next
}

/// The bullet an enemy fires.  Its spawn offset is the player's half height.
pub fn enemy_bullet(enemy: &Enemy, config: &GameConfig) -> Bullet {
    Bullet {
        x: enemy.x,
        y: enemy.y - config.ship_hitbox.half_h.floor(),
        dx: 0.0,
        dy: config.enemy_bullet_speed,
        damage: config.enemy_bullet_damage,
    }
}

// ── Collision & damage ───────────────────────────────────────────────────────

fn apply_player_hits(state: &mut GameState, config: &GameConfig) {
    let bullets = &mut state.bullets;
    state.enemies.retain_mut(|enemy| {
        // A bullet is spent on the first enemy it touches.
        bullets.retain(|b| {
            let hit = overlaps(
                (enemy.x, enemy.y),
                config.enemy_hitbox,
                (b.x, b.y),
                config.bullet_hitbox,
            );
            if hit {
                enemy.hp -= b.damage;
            }
            !hit
        });
        !enemy.is_destroyed()
    });
}

fn apply_enemy_hits(state: &mut GameState, config: &GameConfig) {
    let player = &mut state.player;
    state.enemy_bullets.retain(|b| {
        let hit = overlaps(
            (player.x, player.y),
            config.ship_hitbox,
            (b.x, b.y),
            config.bullet_hitbox,
        );
        if hit {
            player.hp -= b.damage;
        }
        !hit
    });
    if state.player.hp < 0 {
        state.player.hp = 0;
    }
}

fn apply_loss(state: &mut GameState) {
    if state.player.hp > 0 || state.status == GameStatus::Ended(Outcome::Defeat) {
        return;
    }
    info!(
        "ship destroyed on level {} after {} frames, score {}",
        state.level + 1,
        state.frame,
        state.score as u64
    );
    state.status = GameStatus::Ended(Outcome::Defeat);
}

/// Player bullets against every enemy.  Enemies at or below zero hit points
/// are removed.
pub fn resolve_player_hits(state: &GameState, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    apply_player_hits(&mut next, config);
    next
}

/// Enemy bullets against the ship.  Hit points bottom out at zero and end the
/// session.
pub fn resolve_enemy_hits(state: &GameState, config: &GameConfig) -> GameState {
    let mut next = state.clone();
    apply_enemy_hits(&mut next, config);
    apply_loss(&mut next);
    next
}

// ── Level flow ───────────────────────────────────────────────────────────────

fn apply_level_clear(state: &mut GameState, config: &GameConfig, rng: &mut impl Rng) {
    if !state.enemies.is_empty() || !state.is_playing() {
        return;
    }
    info!("{} cleared", config.levels[state.level].title);
    if state.level + 1 < config.levels.len() {
        state.level += 1;
        setup_level(state, config, rng);
    } else {
        info!(
            "all levels cleared after {} frames, score {}",
            state.frame,
            state.score as u64
        );
        state.status = GameStatus::Ended(Outcome::Victory);
    }
}

/// When no enemies remain, move to the next level or end the session as won.
pub fn check_level_clear(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    apply_level_clear(&mut next, config, rng);
    next
}

fn cull_off_screen(state: &mut GameState, config: &GameConfig) {
    let before = state.bullets.len() + state.enemy_bullets.len();
    state.bullets.retain(|b| !b.is_off_screen(config));
    state.enemy_bullets.retain(|b| !b.is_off_screen(config));
    let culled = before - state.bullets.len() - state.enemy_bullets.len();
    if culled > 0 {
        debug!("culled {} off-screen bullets", culled);
    }
}

// ── Per-frame tick (RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// An ended session is returned unchanged.
pub fn tick(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if !state.is_playing() {
        return state.clone();
    }
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Kinematics ────────────────────────────────────────────────────────
    next.player.update(config);
    for enemy in &mut next.enemies {
        enemy.update(config);
    }
    for bullet in next.bullets.iter_mut().chain(next.enemy_bullets.iter_mut()) {
        bullet.update();
    }
    cull_off_screen(&mut next, config);

    // ── 2. Score ─────────────────────────────────────────────────────────────
    next.score += config.score_increase;

    // ── 3. Enemies randomly shoot and wander ─────────────────────────────────
    let (y_lo, y_hi) = config.enemy_spawn_y();
    for enemy in &mut next.enemies {
        if rng.gen_bool(config.enemy_prob_shoot) {
            next.enemy_bullets.push(enemy_bullet(enemy, config));
        }
        if rng.gen_bool(config.enemy_prob_change_pos) {
            let x = random_coord(rng, config.min_x(), config.max_x());
            let y = random_coord(rng, y_lo, y_hi);
            enemy.update_target(x, y, config);
        }
    }

    // ── 4. Collisions ────────────────────────────────────────────────────────
    apply_player_hits(&mut next, config);
    apply_enemy_hits(&mut next, config);

    // ── 5. Level clear, then loss ────────────────────────────────────────────
    apply_level_clear(&mut next, config, rng);
    apply_loss(&mut next);

    next
}
