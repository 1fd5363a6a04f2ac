//! Player controller: walking, jumping, ladders and the sword
//!
//! Horizontal speed comes straight from input each step, so releasing a
//! direction stops the hero at once. Vertical motion is gravity plus jumps,
//! except while attached to a ladder.

use super::collision::{WallResponse, center_distance_sq, clamp_to_world_x, move_and_collide};
use super::level::Geometry;
use super::state::{GameEvent, GameState, Player};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Outcome of one controller step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerMotion {
    pub jumped: bool,
    /// Dropped below the bottom of the world
    pub fell_out: bool,
}

/// Move the player for one step and resolve it against the platforms
pub fn update_player(
    p: &mut Player,
    geometry: &Geometry,
    tuning: &Tuning,
    input: &TickInput,
    dt: f32,
) -> PlayerMotion {
    let mut motion = PlayerMotion::default();
    p.prev_bottom = p.body.rect.bottom();
    p.attack_timer = (p.attack_timer - dt).max(0.0);

    let dir = input.move_right as i32 - input.move_left as i32;
    p.body.vel.x = dir as f32 * tuning.move_speed;
    if dir != 0 {
        p.facing = dir as f32;
    }

    let ladder = geometry.ladder_containing(p.body.rect.center()).copied();
    match ladder {
        None => p.climbing = false,
        Some(_) if input.climb_up || input.climb_down => p.climbing = true,
        Some(_) => {}
    }

    match ladder {
        Some(ladder) if p.climbing => {
            p.body.vel.y = 0.0;
            p.on_ground = false;
            let climb = input.climb_down as i32 - input.climb_up as i32;
            p.body.rect.y += climb as f32 * tuning.climb_speed * dt;
            p.body.rect.x += p.body.vel.x * dt;

            // Foot of the ladder is the top of the row below
            if climb > 0 && p.body.rect.bottom() >= ladder.bottom() {
                p.body.rect.y = ladder.bottom() - p.body.rect.h;
                p.climbing = false;
                p.on_ground = true;
            }
        }
        _ => {
            p.body.vel.y += tuning.gravity * dt;
            if input.jump && p.on_ground {
                p.body.vel.y = -tuning.jump_speed;
                p.on_ground = false;
                motion.jumped = true;
            }
            let contacts =
                move_and_collide(&mut p.body, &geometry.platforms, dt, WallResponse::Stop);
            p.on_ground = contacts.landed;
        }
    }

    clamp_to_world_x(&mut p.body, WORLD_W);

    if p.on_ground && dir != 0 {
        p.run_anim += dt;
    } else {
        p.run_anim = 0.0;
    }

    motion.fell_out = p.body.rect.bottom() > WORLD_H;
    motion
}

/// Swing the sword: break or kill everything whose center is within reach.
///
/// Does nothing without the sword. Broken barrels and dying baddies are
/// skipped, so nothing is credited twice. Returns how many things were hit.
pub fn sword_attack(state: &mut GameState) -> usize {
    if !state.player.has_sword {
        return 0;
    }
    state.player.attack_timer = state.tuning.attack_duration;
    state.events.push(GameEvent::Attacked);

    let hero = state.player.body.rect;
    let reach_sq = state.tuning.attack_radius * state.tuning.attack_radius;
    let mut points = 0;
    let mut hits = 0;

    for (slot, barrel) in state.barrels.slots_mut().iter_mut().enumerate() {
        if barrel.is_solid() && center_distance_sq(&hero, &barrel.body.rect) <= reach_sq {
            barrel.break_apart();
            state.events.push(GameEvent::BarrelBroken { slot });
            points += state.tuning.score_barrel;
            hits += 1;
        }
    }
    for (slot, baddie) in state.baddies.slots_mut().iter_mut().enumerate() {
        if baddie.is_hostile() && center_distance_sq(&hero, &baddie.body.rect) <= reach_sq {
            baddie.kill();
            state.events.push(GameEvent::BaddieKilled {
                slot,
                kind: baddie.kind,
                stomped: false,
            });
            points += state.tuning.score_baddie;
            hits += 1;
        }
    }

    if hits > 0 {
        log::debug!("Sword hit {} targets", hits);
    }
    state.award(points);
    hits
}
