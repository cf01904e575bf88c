use std::fs;
use std::path::{Path, PathBuf};

use space_shooter::assets::*;
use space_shooter::config::GameConfig;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(asset_path(dir, name), body).unwrap();
}

fn full_asset_dir(config: &GameConfig) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "player", " /^\\\n/_#_\\\n");
    write(dir.path(), "bullet", "|\n");
    write(dir.path(), "enemy_bullet", "!\n");
    for i in 1..=config.enemy_sprite_variants {
        write(dir.path(), &format!("enemy_{:02}", i), &format!("<{}>\n", i));
    }
    for level in &config.levels {
        write(dir.path(), &level.background, "__||__\n");
    }
    dir
}

#[test]
fn sprite_parse_trims_trailing_blank_rows() {
    let s = Sprite::parse(" ab \ncdef\n\n   \n").unwrap();
    assert_eq!(s.lines, vec![" ab".to_string(), "cdef".to_string()]);
    assert_eq!(s.width(), 4);
    assert_eq!(s.height(), 2);
}

#[test]
fn sprite_parse_rejects_blank_text() {
    assert!(Sprite::parse("").is_none());
    assert!(Sprite::parse("  \n\n").is_none());
}

#[test]
fn load_reads_every_sprite() {
    let config = GameConfig::default();
    let dir = full_asset_dir(&config);
    let assets = Assets::load(dir.path(), &config).unwrap();
    assert_eq!(assets.player.height(), 2);
    assert_eq!(assets.enemies.len(), 9);
    assert_eq!(assets.enemy(2).lines, vec!["<3>".to_string()]);
    assert_eq!(assets.enemy(11).lines, vec!["<3>".to_string()]);
    assert!(assets.background("city1").is_some());
    assert!(assets.background("city2").is_some());
    assert!(assets.background("city3").is_none());
}

#[test]
fn missing_enemy_variant_fails_with_path() {
    let config = GameConfig::default();
    let dir = full_asset_dir(&config);
    fs::remove_file(asset_path(dir.path(), "enemy_07")).unwrap();
    let err = Assets::load(dir.path(), &config).unwrap_err();
    assert!(format!("{:#}", err).contains("enemy_07.txt"));
}

#[test]
fn empty_background_fails() {
    let config = GameConfig::default();
    let dir = full_asset_dir(&config);
    write(dir.path(), "city2", "\n\n");
    let err = Assets::load(dir.path(), &config).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Level 2"));
    assert!(msg.contains("is empty"));
}

#[test]
fn shipped_assets_load() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let config = GameConfig::default();
    assert!(Assets::load(&dir, &config).is_ok());
}
