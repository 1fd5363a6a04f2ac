//! Barrels: spawn on a timer, roll, bounce, and either break or kill
//!
//! Barrels fall under damped gravity, reverse on platform sides and world
//! edges, and leave the pool when they drop out of the world, roll into the
//! bottom-left corner of the ground, or finish their broken fade.

use glam::Vec2;

use super::collision::{WallResponse, clamp_to_world_x, move_and_collide};
use super::rect::Rect;
use super::state::{Barrel, DeathCause, GameEvent, GameState, Phase};
use crate::consts::*;

/// Advance the spawn timer; spawn into the first free slot when it fires.
/// Returns the slot used, if any.
pub fn tick_barrel_spawner(state: &mut GameState, dt: f32) -> Option<usize> {
    state.barrel_spawn_timer += dt;
    if state.barrel_spawn_timer < state.tuning.barrel_interval(state.level) {
        return None;
    }
    state.barrel_spawn_timer = 0.0;
    spawn_barrel(state)
}

/// Place a barrel at the left end of the top platform, rolling right.
/// Silently skipped when the pool is full.
pub fn spawn_barrel(state: &mut GameState) -> Option<usize> {
    let top = *state.geometry.top();
    let speed = state.tuning.barrel_roll_speed(state.level);
    let Some((slot, barrel)) = state.barrels.claim() else {
        log::trace!("Barrel pool exhausted, skipping spawn");
        return None;
    };
    *barrel = Barrel {
        active: true,
        ..Default::default()
    };
    barrel.body.rect = Rect::new(top.x + 10.0, top.y - BARREL_SIZE, BARREL_SIZE, BARREL_SIZE);
    barrel.body.vel = Vec2::new(speed, 0.0);
    state.events.push(GameEvent::BarrelSpawned { slot });
    log::debug!("Barrel spawned in slot {slot} at speed {speed}");
    Some(slot)
}

/// Move one barrel for a step (no player interaction). Returns the world
/// edge touched: -1 left, 1 right, 0 none.
pub fn step_barrel(barrel: &mut Barrel, platforms: &[Rect], gravity: f32, dt: f32) -> i32 {
    barrel.body.vel.y += gravity * dt;
    move_and_collide(&mut barrel.body, platforms, dt, WallResponse::Bounce);

    let side = clamp_to_world_x(&mut barrel.body, WORLD_W);
    if side != 0 {
        // Point away from the wall that was touched
        barrel.body.vel.x = -(side as f32) * barrel.body.vel.x.abs();
    }
    barrel.roll_anim += dt;

    let r = barrel.body.rect;
    if r.y > WORLD_H + OUT_OF_WORLD_MARGIN
        || r.x < -OUT_OF_WORLD_MARGIN
        || r.x > WORLD_W + OUT_OF_WORLD_MARGIN
    {
        barrel.active = false;
    }
    side
}

/// Spawn, move, and resolve player contact for every barrel
pub fn update_barrels(state: &mut GameState, dt: f32) {
    tick_barrel_spawner(state, dt);

    let gravity = state.tuning.gravity * state.tuning.barrel_gravity_scale;
    let broken_duration = state.tuning.barrel_broken_duration;
    let smashes = state.player.touch_kills() || state.player.attacking();
    let hero = state.player.body.rect;
    let ground_y = state.geometry.ground().y;
    let mut points = 0;
    let mut lethal = false;

    for (slot, barrel) in state.barrels.slots_mut().iter_mut().enumerate() {
        if !barrel.active {
            continue;
        }
        if barrel.broken {
            barrel.broken_time += dt;
            if barrel.broken_time >= broken_duration {
                barrel.active = false;
            }
            continue;
        }

        let side = step_barrel(barrel, &state.geometry.platforms, gravity, dt);
        // Bottom-left corner of the ground is the drum that swallows barrels
        if side < 0 && barrel.body.rect.bottom() >= ground_y {
            barrel.active = false;
            continue;
        }

        if !barrel.active || lethal || !barrel.body.rect.overlaps(&hero) {
            continue;
        }
        if smashes {
            barrel.break_apart();
            state.events.push(GameEvent::BarrelBroken { slot });
            points += state.tuning.score_barrel;
        } else {
            lethal = true;
        }
    }

    state.award(points);
    if lethal && state.phase == Phase::Playing {
        state.lose_life(DeathCause::Barrel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::collision::Body;

    fn rolling(x: f32, y: f32, vx: f32) -> Barrel {
        Barrel {
            body: Body {
                rect: Rect::new(x, y, BARREL_SIZE, BARREL_SIZE),
                vel: Vec2::new(vx, 0.0),
            },
            active: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_on_top_platform() {
        let mut state = GameState::new(1);
        let slot = spawn_barrel(&mut state).unwrap();
        let b = state.barrels.get(slot).unwrap();
        let top = *state.geometry.top();
        assert_eq!(b.body.rect.x, top.x + 10.0);
        assert_eq!(b.body.rect.bottom(), top.y);
        assert_eq!(b.body.vel, Vec2::new(140.0, 0.0));
    }

    #[test]
    fn test_spawn_speed_scales_with_level() {
        let mut state = GameState::new(1);
        state.start_level(4);
        let slot = spawn_barrel(&mut state).unwrap();
        assert_eq!(state.barrels.get(slot).unwrap().body.vel.x, 170.0);
    }

    #[test]
    fn test_spawner_fires_on_interval() {
        let mut state = GameState::new(1);
        let mut fired = 0;
        // 2.5 s at 60 Hz is 150 steps; run a little past it
        for _ in 0..155 {
            if tick_barrel_spawner(&mut state, SIM_DT).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_pool_exhaustion_skips_spawn() {
        let mut state = GameState::new(1);
        for _ in 0..MAX_BARRELS {
            assert!(spawn_barrel(&mut state).is_some());
        }
        assert!(spawn_barrel(&mut state).is_none());
        assert_eq!(state.barrels.active_count(), MAX_BARRELS);
    }

    #[test]
    fn test_rolling_barrel_rests_on_platform() {
        let platforms = [Rect::new(0.0, 400.0, 800.0, 20.0)];
        let mut b = rolling(100.0, 374.0, 140.0);
        for _ in 0..10 {
            step_barrel(&mut b, &platforms, 840.0, SIM_DT);
        }
        assert_eq!(b.body.rect.bottom(), 400.0);
        assert!(b.body.vel.x > 0.0);
    }

    #[test]
    fn test_world_edge_bounces_alternate_sign() {
        let platforms = [Rect::new(0.0, 400.0, 800.0, 20.0)];
        let mut b = rolling(400.0, 374.0, 300.0);
        let mut signs = Vec::new();
        let mut last = b.body.vel.x.signum();
        for _ in 0..2000 {
            step_barrel(&mut b, &platforms, 840.0, SIM_DT);
            let s = b.body.vel.x.signum();
            if s != last {
                signs.push(s);
                last = s;
            }
            if signs.len() == 4 {
                break;
            }
        }
        assert_eq!(signs, vec![-1.0, 1.0, -1.0, 1.0]);
        assert!(b.active);
    }

    #[test]
    fn test_platform_side_bounce() {
        let platforms = [
            Rect::new(0.0, 400.0, 800.0, 20.0),
            Rect::new(300.0, 300.0, 20.0, 100.0),
        ];
        let mut b = rolling(270.0, 374.0, 140.0);
        step_barrel(&mut b, &platforms, 840.0, SIM_DT);
        assert!(b.body.vel.x > 0.0);
        for _ in 0..5 {
            step_barrel(&mut b, &platforms, 840.0, SIM_DT);
        }
        assert_eq!(b.body.vel.x, -140.0);
        assert!(b.body.rect.right() <= 300.0);
    }

    #[test]
    fn test_ground_barrel_sinks_at_left_edge() {
        let mut state = GameState::new(1);
        state.player.body.rect.x = 700.0;
        let ground = *state.geometry.ground();
        *state.barrels.get_mut(0).unwrap() = rolling(2.0, ground.y - BARREL_SIZE, -140.0);
        update_barrels(&mut state, SIM_DT);
        assert!(!state.barrels.get(0).unwrap().active);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_ground_barrel_bounces_at_right_edge() {
        let mut state = GameState::new(1);
        let ground = *state.geometry.ground();
        *state.barrels.get_mut(0).unwrap() =
            rolling(WORLD_W - BARREL_SIZE - 1.0, ground.y - BARREL_SIZE, 140.0);
        update_barrels(&mut state, SIM_DT);
        let b = state.barrels.get(0).unwrap();
        assert!(b.active);
        assert_eq!(b.body.vel.x, -140.0);
    }

    #[test]
    fn test_falls_out_of_world() {
        let mut b = rolling(400.0, 500.0, 0.0);
        for _ in 0..200 {
            step_barrel(&mut b, &[], 840.0, SIM_DT);
        }
        assert!(!b.active);
    }

    #[test]
    fn test_contact_costs_a_life() {
        let mut state = GameState::new(1);
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = rolling(hero.x, hero.y + 4.0, 0.0);
        update_barrels(&mut state, SIM_DT);
        assert_eq!(state.phase, Phase::Lost);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_two_barrels_cost_one_life() {
        let mut state = GameState::new(1);
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = rolling(hero.x, hero.y + 4.0, 0.0);
        *state.barrels.get_mut(1).unwrap() = rolling(hero.x + 4.0, hero.y + 4.0, 0.0);
        update_barrels(&mut state, SIM_DT);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_flame_auto_breaks() {
        let mut state = GameState::new(1);
        state.player.has_flame = true;
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = rolling(hero.x, hero.y + 4.0, 0.0);
        update_barrels(&mut state, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.barrels.get(0).unwrap().broken);
        assert_eq!(state.score, 200);
    }

    #[test]
    fn test_sword_without_swing_is_still_lethal() {
        let mut state = GameState::new(1);
        state.player.has_sword = true;
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = rolling(hero.x, hero.y + 4.0, 0.0);
        update_barrels(&mut state, SIM_DT);
        assert_eq!(state.phase, Phase::Lost);
    }

    #[test]
    fn test_broken_barrel_is_harmless_and_retires() {
        let mut state = GameState::new(1);
        let hero = *state.player.rect();
        let mut b = rolling(hero.x, hero.y + 4.0, 0.0);
        b.break_apart();
        *state.barrels.get_mut(0).unwrap() = b;

        update_barrels(&mut state, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.barrels.get(0).unwrap().body.rect.y, hero.y + 4.0);

        for _ in 0..40 {
            update_barrels(&mut state, SIM_DT);
        }
        assert!(!state.barrels.get(0).unwrap().active);
        assert_eq!(state.phase, Phase::Playing);
    }
}
