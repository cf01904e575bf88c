use space_shooter::config::{GameConfig, HitBox};
use space_shooter::entities::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn enemy_at(x: f64, y: f64, mass: u32, config: &GameConfig) -> Enemy {
    Enemy::new(x, y, mass, 20, 0, config)
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_target_does_not_move_ship_until_update() {
    let config = GameConfig::default();
    let mut p = Player::new(640.0, 100.0, 100);
    p.update_target(300.0, 150.0, &config);
    assert_eq!((p.x, p.y), (640.0, 100.0));
    p.update(&config);
    assert_eq!((p.x, p.y), (300.0, 150.0));
}

#[test]
fn player_target_is_clamped() {
    let config = GameConfig::default();
    let mut p = Player::new(640.0, 100.0, 100);
    p.update_target(-500.0, 10_000.0, &config);
    assert_eq!(p.target_x, 50.0);
    assert_eq!(p.target_y, 240.0); // ship_max_y
    p.update_target(5_000.0, -3.0, &config);
    assert_eq!(p.target_x, 1230.0);
    assert_eq!(p.target_y, 50.0);
}

#[test]
fn player_always_lands_inside_its_band() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut p = Player::new(640.0, 100.0, 100);
    for _ in 0..1000 {
        let x = rng.gen_range(-2000.0..4000.0);
        let y = rng.gen_range(-2000.0..4000.0);
        p.update_target(x, y, &config);
        p.update(&config);
        assert!(p.x >= config.margin && p.x <= config.width - config.margin);
        assert!(p.y >= config.margin && p.y <= config.ship_max_y);
    }
}

#[test]
fn player_update_only_enforces_lower_vertical_bound() {
    // A target written directly (bypassing update_target) above ship_max_y is kept.
    let config = GameConfig::default();
    let mut p = Player::new(640.0, 100.0, 100);
    p.target_x = 2000.0;
    p.target_y = 600.0;
    p.update(&config);
    assert_eq!(p.x, 1230.0);
    assert_eq!(p.y, 600.0);

    p.target_y = 0.0;
    p.update(&config);
    assert_eq!(p.y, 50.0);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_acceleration_is_inverse_to_mass() {
    let config = GameConfig::default();
    assert_eq!(enemy_at(100.0, 500.0, 10, &config).acceleration, 1.0);
    assert_eq!(enemy_at(100.0, 500.0, 100, &config).acceleration, 0.1);
}

#[test]
fn enemy_target_is_clamped_to_its_band() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 500.0, 50, &config);
    e.update_target(0.0, 0.0, &config);
    assert_eq!((e.target_x, e.target_y), (50.0, 400.0));
    e.update_target(9999.0, 9999.0, &config);
    assert_eq!((e.target_x, e.target_y), (1230.0, 670.0));
}

#[test]
fn enemy_accelerates_toward_target() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 500.0, 10, &config); // acceleration 1.0
    e.update_target(900.0, 450.0, &config);
    e.update(&config);
    assert_eq!(e.dx, 1.0);
    assert_eq!(e.dy, -1.0);
    assert_eq!((e.x, e.y), (641.0, 499.0));
    e.update(&config);
    assert_eq!(e.dx, 2.0);
    assert_eq!((e.x, e.y), (643.0, 497.0));
}

#[test]
fn enemy_velocity_is_capped_both_ways() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 500.0, 10, &config);
    e.update_target(1200.0, 400.0, &config);
    for _ in 0..10 {
        e.update(&config);
    }
    assert_eq!(e.dx, 3.0);
    assert_eq!(e.dy, -3.0);
}

#[test]
fn enemy_at_target_does_not_move() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 500.0, 10, &config);
    e.update(&config);
    assert_eq!((e.x, e.y, e.dx, e.dy), (640.0, 500.0, 0.0, 0.0));
}

#[test]
fn enemy_bounces_off_left_wall() {
    let config = GameConfig::default();
    let mut e = enemy_at(51.0, 500.0, 10, &config);
    e.dx = -3.0;
    e.target_x = 0.0; // still pulling left
    e.update(&config);
    assert_eq!(e.x, 50.0);
    assert_eq!(e.dx, 3.0);
}

#[test]
fn enemy_bounces_off_right_wall() {
    let config = GameConfig::default();
    let mut e = enemy_at(1229.0, 500.0, 10, &config);
    e.dx = 3.0;
    e.target_x = 2000.0;
    e.update(&config);
    assert_eq!(e.x, 1230.0);
    assert_eq!(e.dx, -3.0);
}

#[test]
fn enemy_lower_wall_forces_velocity_downward() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 51.0, 10, &config);
    e.dy = -3.0;
    e.target_y = 0.0;
    e.update(&config);
    assert_eq!(e.y, 50.0);
    assert_eq!(e.dy, -3.0);
}

#[test]
fn enemy_upper_wall_forces_velocity_downward() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 669.0, 10, &config);
    e.dy = 3.0;
    e.target_y = 2000.0; // still pulling up
    e.update(&config);
    assert_eq!(e.y, 670.0);
    assert_eq!(e.dy, -3.0);
}

#[test]
fn enemy_stays_in_bounds_under_random_targets() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut e = enemy_at(640.0, 500.0, 10, &config);
    for i in 0..5000 {
        if i % 37 == 0 {
            // Raw targets, not routed through update_target, to push the walls.
            e.target_x = rng.gen_range(-500.0..2000.0);
            e.target_y = rng.gen_range(-500.0..2000.0);
        }
        e.update(&config);
        assert!(e.x >= config.margin && e.x <= config.width - config.margin);
        assert!(e.y >= config.margin && e.y <= config.height - config.margin);
        assert!(e.dx.abs() <= config.enemy_max_acceleration);
        assert!(e.dy.abs() <= config.enemy_max_acceleration);
    }
}

#[test]
fn enemy_destroyed_at_zero_hp() {
    let config = GameConfig::default();
    let mut e = enemy_at(640.0, 500.0, 10, &config);
    assert!(!e.is_destroyed());
    e.hp = 0;
    assert!(e.is_destroyed());
    e.hp = -4;
    assert!(e.is_destroyed());
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_moves_linearly() {
    let mut b = Bullet { x: 10.0, y: 20.0, dx: 1.5, dy: -4.0, damage: 4 };
    for _ in 0..3 {
        b.update();
    }
    assert_eq!((b.x, b.y), (14.5, 8.0));
}

#[test]
fn bullet_off_screen_uses_margin_slack() {
    let config = GameConfig::default();
    let mut b = Bullet { x: 640.0, y: 760.0, dx: 0.0, dy: 10.0, damage: 10 };
    assert!(!b.is_off_screen(&config));
    b.y = 771.0;
    assert!(b.is_off_screen(&config));
    b.y = -51.0;
    assert!(b.is_off_screen(&config));
}

#[test]
fn overlap_is_strict_box_intersection() {
    let a = HitBox::new(10.0, 5.0);
    let b = HitBox::new(2.0, 2.0);
    assert!(overlaps((0.0, 0.0), a, (11.0, 6.0), b));
    assert!(!overlaps((0.0, 0.0), a, (12.0, 0.0), b));
    assert!(!overlaps((0.0, 0.0), a, (0.0, -7.0), b));
}
