/// Text-art sprites and backgrounds loaded from the `assets/` directory.
///
/// Everything is read once at startup.  A missing or empty file is a fatal
/// error; the game never runs with half its art.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use crate::config::GameConfig;

/// A block of text art, one `String` per terminal row.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub lines: Vec<String>,
}

impl Sprite {
    pub fn parse(text: &str) -> Option<Sprite> {
        let lines: Vec<String> = text
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect();
        // Drop trailing blank rows so the sprite centres on its art.
        let end = lines.iter().rposition(|l| !l.is_empty())? + 1;
        Some(Sprite { lines: lines[..end].to_vec() })
    }

    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemies: Vec<Sprite>,
    pub bullet: Sprite,
    pub enemy_bullet: Sprite,
    /// Background art keyed by the level table's `background` id.
    pub backgrounds: HashMap<String, Sprite>,
}

fn load_sprite(path: &Path) -> Result<Sprite> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read asset {}", path.display()))?;
    match Sprite::parse(&text) {
        Some(sprite) => Ok(sprite),
        None => bail!("asset {} is empty", path.display()),
    }
}

/// Path of `assets/<name>.txt` under `dir`.
pub fn asset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.txt", name))
}

impl Assets {
    /// Load every sprite the configuration can ask for.
    pub fn load(dir: &Path, config: &GameConfig) -> Result<Assets> {
        let player = load_sprite(&asset_path(dir, "player"))?;
        let bullet = load_sprite(&asset_path(dir, "bullet"))?;
        let enemy_bullet = load_sprite(&asset_path(dir, "enemy_bullet"))?;

        let enemies = (1..=config.enemy_sprite_variants)
            .map(|i| load_sprite(&asset_path(dir, &format!("enemy_{:02}", i))))
            .collect::<Result<Vec<_>>>()?;

        let mut backgrounds = HashMap::new();
        for level in &config.levels {
            if backgrounds.contains_key(&level.background) {
                continue;
            }
            let sprite = load_sprite(&asset_path(dir, &level.background))
                .with_context(|| format!("background for {}", level.title))?;
            backgrounds.insert(level.background.clone(), sprite);
        }

        info!(
            "loaded {} enemy sprites and {} backgrounds from {}",
            enemies.len(),
            backgrounds.len(),
            dir.display()
        );
        Ok(Assets { player, enemies, bullet, enemy_bullet, backgrounds })
    }

    /// Sprite for an enemy's variant index; wraps if the index is out of range.
    pub fn enemy(&self, variant: usize) -> &Sprite {
        &self.enemies[variant % self.enemies.len()]
    }

    pub fn background(&self, id: &str) -> Option<&Sprite> {
        self.backgrounds.get(id)
    }
}
