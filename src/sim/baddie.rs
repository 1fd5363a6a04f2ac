//! Baddies: walk the platforms, chase the hero, hop or turn at ledges
//!
//! Spawn slot, position and kind are pure functions of (slot, level). The only
//! random choice is the grunt's hop-or-turn at a ledge, drawn from the level
//! RNG so a retry replays it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{WallResponse, clamp_to_world_x, move_and_collide};
use super::level::Geometry;
use super::rect::Rect;
use super::state::{Baddie, BaddieKind, DeathCause, GameEvent, GameState, Phase};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{placement_hash, signum0};

/// Chasing stays off this long after turning back from a ledge
const TURN_COOLDOWN: f32 = 1.0;
/// Tolerance on "player's feet were above the baddie" for stomps
const STOMP_SLOP: f32 = 4.0;
/// Spawn keeps this far from the top platform's ends
const SPAWN_INSET: f32 = 10.0;

/// What a baddie does when the floor runs out ahead of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgeResponse {
    /// Jump down with half the hero's jump impulse
    Hop,
    /// Reverse facing and stop chasing for a moment
    Turn,
}

impl LedgeResponse {
    fn choose(kind: BaddieKind, hop_chance: f64, rng: &mut Pcg32) -> Self {
        match kind {
            BaddieKind::Grunt if rng.random_bool(hop_chance) => LedgeResponse::Hop,
            BaddieKind::Grunt | BaddieKind::Runner => LedgeResponse::Turn,
            BaddieKind::Jumper => LedgeResponse::Hop,
        }
    }
}

/// Kind for a slot on a level
pub fn baddie_kind(slot: usize, level: u32) -> BaddieKind {
    BaddieKind::ALL[(slot + level as usize) % BaddieKind::ALL.len()]
}

/// Spawn box and initial facing for a slot on a level
pub fn baddie_spawn_point(top: &Rect, slot: usize, level: u32) -> (Rect, f32) {
    let span = (top.w - BADDIE_SIZE - 2.0 * SPAWN_INSET).max(1.0) as u32;
    let hash = placement_hash(slot as u32, level);
    let x = top.x + SPAWN_INSET + (hash % span) as f32;
    let facing = if hash & 0x100 == 0 { -1.0 } else { 1.0 };
    (
        Rect::new(x, top.y - BADDIE_SIZE, BADDIE_SIZE, BADDIE_SIZE),
        facing,
    )
}

pub fn tick_baddie_spawner(state: &mut GameState, dt: f32) -> Option<usize> {
    state.baddie_spawn_timer += dt;
    if state.baddie_spawn_timer < state.tuning.baddie_interval(state.level) {
        return None;
    }
    state.baddie_spawn_timer = 0.0;
    spawn_baddie(state)
}

/// Put a baddie on the top platform. Skipped when the pool is full.
pub fn spawn_baddie(state: &mut GameState) -> Option<usize> {
    let top = *state.geometry.top();
    let level = state.level;
    let Some((slot, baddie)) = state.baddies.claim() else {
        log::trace!("Baddie pool exhausted, skipping spawn");
        return None;
    };
    let (rect, facing) = baddie_spawn_point(&top, slot, level);
    let kind = baddie_kind(slot, level);
    *baddie = Baddie {
        active: true,
        kind,
        facing,
        ..Default::default()
    };
    baddie.body.rect = rect;
    state.events.push(GameEvent::BaddieSpawned { slot, kind });
    log::debug!("Baddie {:?} spawned in slot {} at x={:.0}", kind, slot, rect.x);
    Some(slot)
}

/// AI and physics for one live baddie.
///
/// `base_speed` is the level's walk speed before the kind factor. Returns the
/// ledge response taken this step, if the baddie was at a ledge.
pub fn step_baddie(
    b: &mut Baddie,
    geometry: &Geometry,
    tuning: &Tuning,
    base_speed: f32,
    target_x: f32,
    rng: &mut Pcg32,
    dt: f32,
) -> Option<LedgeResponse> {
    b.turn_cooldown = (b.turn_cooldown - dt).max(0.0);
    b.body.vel.y += tuning.gravity * dt;

    if b.on_ground && b.turn_cooldown <= 0.0 {
        let dx = target_x - b.body.rect.center().x;
        if dx.abs() > tuning.baddie_dead_zone {
            b.facing = signum0(dx);
        }
    }

    let mut response = None;
    if b.on_ground {
        let r = b.body.rect;
        let lead_x = if b.facing > 0.0 { r.right() + 1.0 } else { r.x - 1.0 };
        let probe = Vec2::new(lead_x, r.bottom() + 2.0);
        // The world edge is a wall, not a ledge
        let in_world = (0.0..=WORLD_W).contains(&lead_x);
        if in_world && !geometry.support_at(probe) {
            let choice = LedgeResponse::choose(b.kind, tuning.baddie_hop_chance, rng);
            match choice {
                LedgeResponse::Hop => {
                    b.body.vel.y = -tuning.jump_speed * 0.5;
                    b.on_ground = false;
                }
                LedgeResponse::Turn => {
                    b.facing = -b.facing;
                    b.turn_cooldown = TURN_COOLDOWN;
                }
            }
            response = Some(choice);
        }
    }

    b.body.vel.x = b.facing * base_speed * b.kind.speed_factor();
    let contacts = move_and_collide(&mut b.body, &geometry.platforms, dt, WallResponse::Stop);
    b.on_ground = contacts.landed;
    if contacts.hit_wall {
        b.facing = -b.facing;
    }
    let side = clamp_to_world_x(&mut b.body, WORLD_W);
    if side != 0 {
        b.facing = -(side as f32);
    }

    b.walk_anim += dt;
    if b.body.rect.y > WORLD_H + OUT_OF_WORLD_MARGIN {
        b.active = false;
    }
    response
}

/// Spawn, move, and resolve player contact for every baddie
pub fn update_baddies(state: &mut GameState, dt: f32) {
    tick_baddie_spawner(state, dt);

    let base_speed = state.tuning.baddie_walk_speed(state.level);
    let death_duration = state.tuning.baddie_death_duration;
    let bounce = -state.tuning.jump_speed * 0.5;
    let smashes = state.player.touch_kills() || state.player.attacking();
    let target_x = state.player.body.rect.center().x;
    let mut points = 0;
    let mut lethal = false;

    for (slot, baddie) in state.baddies.slots_mut().iter_mut().enumerate() {
        if !baddie.active {
            continue;
        }
        if baddie.dying {
            baddie.death_time += dt;
            if baddie.death_time >= death_duration {
                baddie.active = false;
            }
            continue;
        }

        step_baddie(
            baddie,
            &state.geometry,
            &state.tuning,
            base_speed,
            target_x,
            &mut state.rng,
            dt,
        );

        let hero = &mut state.player;
        if !baddie.active || lethal || !baddie.body.rect.overlaps(&hero.body.rect) {
            continue;
        }
        let stomped =
            hero.body.vel.y > 0.0 && hero.prev_bottom <= baddie.body.rect.y + STOMP_SLOP;
        if stomped || smashes {
            baddie.kill();
            state.events.push(GameEvent::BaddieKilled {
                slot,
                kind: baddie.kind,
                stomped,
            });
            points += state.tuning.score_baddie;
            if stomped {
                hero.body.vel.y = bounce;
                hero.on_ground = false;
            }
        } else {
            lethal = true;
        }
    }

    state.award(points);
    if lethal && state.phase == Phase::Playing {
        state.lose_life(DeathCause::Baddie);
    }
}
