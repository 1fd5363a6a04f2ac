//! Level geometry and deterministic item placement
//!
//! A level is a handful of platforms, the ladders between them, and a goal box
//! on the top platform. Geometry is rebuilt from the level number and never
//! mutated while the round runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::PowerUpKind;
use crate::consts::*;
use crate::placement_hash;

const SLAB: f32 = 20.0;
/// Ladders reach this far above the upper platform so a player standing on it
/// is already inside the ladder box
const LADDER_HEADROOM: f32 = 40.0;
const LADDER_W: f32 = 20.0;

/// Layout family, chosen by level number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    /// Full-width rows with alternating insets
    Zigzag,
    /// Half-width rows alternating left and right
    Staggered,
    /// Rows narrowing toward the top
    Tower,
}

impl Layout {
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 3 {
            0 => Layout::Zigzag,
            1 => Layout::Staggered,
            _ => Layout::Tower,
        }
    }

    /// Rows above the ground as (x, width), bottom to top, plus the ladder x
    /// joining each row to the one below it
    fn rows(self) -> [(f32, f32, f32); 4] {
        match self {
            Layout::Zigzag => [
                (40.0, 720.0, 80.0),
                (80.0, 640.0, 680.0),
                (40.0, 720.0, 140.0),
                (120.0, 560.0, 390.0),
            ],
            Layout::Staggered => [
                (0.0, 520.0, 440.0),
                (280.0, 520.0, 300.0),
                (0.0, 520.0, 480.0),
                (280.0, 520.0, 300.0),
            ],
            Layout::Tower => [
                (80.0, 640.0, 680.0),
                (160.0, 480.0, 180.0),
                (80.0, 640.0, 600.0),
                (240.0, 320.0, 520.0),
            ],
        }
    }
}

/// Static collision geometry for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub layout: Layout,
    /// Index 0 is the ground; the last entry is the top platform
    pub platforms: Vec<Rect>,
    pub ladders: Vec<Rect>,
    pub goal: Rect,
}

impl Geometry {
    pub fn for_level(level: u32) -> Self {
        let layout = Layout::for_level(level);
        let ground = Rect::new(0.0, WORLD_H - 40.0, WORLD_W, 40.0);

        let mut platforms = vec![ground];
        let mut ladders = Vec::new();
        for (row, &(x, w, ladder_x)) in layout.rows().iter().enumerate() {
            let y = ground.y - 100.0 * (row as f32 + 1.0);
            let below = platforms[row];
            platforms.push(Rect::new(x, y, w, SLAB));
            ladders.push(Rect::new(
                ladder_x,
                y - LADDER_HEADROOM,
                LADDER_W,
                below.y - y + LADDER_HEADROOM,
            ));
        }

        let top = platforms[platforms.len() - 1];
        let goal = Rect::new(top.right() - 100.0, top.y - 60.0, 80.0, 60.0);

        Self {
            layout,
            platforms,
            ladders,
            goal,
        }
    }

    pub fn ground(&self) -> &Rect {
        &self.platforms[0]
    }

    /// Topmost platform (barrel and baddie spawn row)
    pub fn top(&self) -> &Rect {
        &self.platforms[self.platforms.len() - 1]
    }

    /// First ladder whose box contains the point
    pub fn ladder_containing(&self, p: Vec2) -> Option<&Rect> {
        self.ladders.iter().find(|l| l.contains_point(p))
    }

    /// Whether some platform is solid at the point
    pub fn support_at(&self, p: Vec2) -> bool {
        self.platforms.iter().any(|plat| plat.contains_point(p))
    }
}

/// Coins along the intermediate platforms (not the ground, not the top)
pub fn coin_layout(geometry: &Geometry) -> Vec<Rect> {
    const PER_PLATFORM: usize = 3;
    let size = WORLD_TILE * 0.8;
    let last = geometry.platforms.len().saturating_sub(1);

    let mut coins = Vec::new();
    for plat in geometry.platforms.iter().take(last).skip(1) {
        for c in 0..PER_PLATFORM {
            if coins.len() >= MAX_COINS {
                return coins;
            }
            let frac = (c + 1) as f32 / (PER_PLATFORM + 1) as f32;
            let center = Vec2::new(plat.x + plat.w * frac, plat.y - WORLD_TILE * 0.6);
            coins.push(Rect::centered(center, size, size));
        }
    }
    coins
}

/// Where a power-up goes and what it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpPlacement {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// Two or three power-ups on distinct non-ground platforms.
///
/// A pure function of the level: platform choice and x position come from a
/// hash of (level, index), and the kind rotates with `level + index`.
pub fn power_up_layout(geometry: &Geometry, level: u32) -> Vec<PowerUpPlacement> {
    let candidates = geometry.platforms.len().saturating_sub(1);
    if candidates == 0 {
        return Vec::new();
    }
    let size = WORLD_TILE * 0.8;
    let count = (2 + placement_hash(level, 0x5eed) % 2) as usize;
    let count = count.min(candidates).min(MAX_POWER_UPS);
    let start = placement_hash(level, 1) as usize % candidates;

    (0..count)
        .map(|i| {
            let plat = &geometry.platforms[1 + (start + i) % candidates];
            let roll = placement_hash(level.wrapping_mul(31).wrapping_add(i as u32), 77) % 70;
            let frac = 0.15 + roll as f32 / 100.0;
            let rect = Rect::new(
                plat.x + plat.w * frac - size * 0.5,
                plat.y - size - 4.0,
                size,
                size,
            );
            let kind = PowerUpKind::ALL[(level as usize + i) % PowerUpKind::ALL.len()];
            PowerUpPlacement { rect, kind }
        })
        .collect()
}
