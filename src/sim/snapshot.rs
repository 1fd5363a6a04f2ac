//! Read-only render feed
//!
//! A renderer draws from a [`RenderSnapshot`] and never touches
//! [`GameState`] directly. Only active slots are included.

use serde::Serialize;

use super::rect::Rect;
use super::state::{BaddieKind, GameState, HeroVariant, Phase, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: f32,
    pub on_ground: bool,
    pub climbing: bool,
    pub run_anim: f32,
    pub variant: HeroVariant,
    pub attacking: bool,
    pub sword_timer: f32,
    pub flame_timer: f32,
    pub super_beast_timer: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarrelView {
    pub slot: usize,
    pub rect: Rect,
    pub broken: bool,
    pub broken_time: f32,
    pub roll_anim: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaddieView {
    pub slot: usize,
    pub rect: Rect,
    pub kind: BaddieKind,
    pub facing: f32,
    pub dying: bool,
    /// Drives the squash-and-rotate death animation
    pub death_time: f32,
    pub walk_anim: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub slot: usize,
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub anim: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinView {
    pub slot: usize,
    pub rect: Rect,
    pub anim: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: Phase,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub coins_collected: u32,
    /// In `Lost`: whether continuing retries the level
    pub can_retry: bool,
    pub time: f32,
    pub princess_t: f32,
    pub platforms: Vec<Rect>,
    pub ladders: Vec<Rect>,
    pub goal: Rect,
    pub player: PlayerView,
    pub barrels: Vec<BarrelView>,
    pub baddies: Vec<BaddieView>,
    pub power_ups: Vec<PowerUpView>,
    pub coins: Vec<CoinView>,
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        let p = &self.player;
        RenderSnapshot {
            phase: self.phase,
            level: self.level,
            score: self.score,
            lives: self.lives,
            coins_collected: self.coins_collected,
            can_retry: self.can_retry(),
            time: self.time,
            princess_t: self.princess_t,
            platforms: self.geometry.platforms.clone(),
            ladders: self.geometry.ladders.clone(),
            goal: self.geometry.goal,
            player: PlayerView {
                rect: p.body.rect,
                facing: p.facing,
                on_ground: p.on_ground,
                climbing: p.climbing,
                run_anim: p.run_anim,
                variant: p.hero_variant(),
                attacking: p.attacking(),
                sword_timer: p.sword_timer,
                flame_timer: p.flame_timer,
                super_beast_timer: p.super_beast_timer,
            },
            barrels: self
                .barrels
                .iter_active()
                .map(|(slot, b)| BarrelView {
                    slot,
                    rect: b.body.rect,
                    broken: b.broken,
                    broken_time: b.broken_time,
                    roll_anim: b.roll_anim,
                })
                .collect(),
            baddies: self
                .baddies
                .iter_active()
                .map(|(slot, b)| BaddieView {
                    slot,
                    rect: b.body.rect,
                    kind: b.kind,
                    facing: b.facing,
                    dying: b.dying,
                    death_time: b.death_time,
                    walk_anim: b.walk_anim,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter_active()
                .map(|(slot, u)| PowerUpView {
                    slot,
                    rect: u.rect,
                    kind: u.kind,
                    anim: u.anim,
                })
                .collect(),
            coins: self
                .coins
                .iter_active()
                .map(|(slot, c)| CoinView {
                    slot,
                    rect: c.rect,
                    anim: c.anim,
                })
                .collect(),
        }
    }
}
