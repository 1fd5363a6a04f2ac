//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::barrel::update_barrels;
use super::baddie::update_baddies;
use super::player::{sword_attack, update_player};
use super::powerup::{update_coins, update_power_ups};
use super::state::{DeathCause, GameEvent, GameState, Phase};

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub climb_up: bool,
    pub climb_down: bool,
    /// Sword swing (needs the sword power-up)
    pub attack: bool,
    /// Pause toggle
    pub pause: bool,
    /// Full run reset from any phase
    pub restart: bool,
    /// Continue from the won/lost screen
    pub advance: bool,
}

impl TickInput {
    pub const LEFT: u32 = 1 << 0;
    pub const RIGHT: u32 = 1 << 1;
    pub const JUMP: u32 = 1 << 2;
    pub const CLIMB_UP: u32 = 1 << 3;
    pub const CLIMB_DOWN: u32 = 1 << 4;
    pub const ATTACK: u32 = 1 << 5;
    pub const PAUSE: u32 = 1 << 6;
    pub const RESTART: u32 = 1 << 7;
    pub const ADVANCE: u32 = 1 << 8;

    /// Decode a host bitmask (see the associated constants)
    pub fn from_bits(bits: u32) -> Self {
        Self {
            move_left: bits & Self::LEFT != 0,
            move_right: bits & Self::RIGHT != 0,
            jump: bits & Self::JUMP != 0,
            climb_up: bits & Self::CLIMB_UP != 0,
            climb_down: bits & Self::CLIMB_DOWN != 0,
            attack: bits & Self::ATTACK != 0,
            pause: bits & Self::PAUSE != 0,
            restart: bits & Self::RESTART != 0,
            advance: bits & Self::ADVANCE != 0,
        }
    }

    /// Merge another sample in: held keys follow `other`, one-shots latch
    /// until a step consumes them
    pub fn latch(&mut self, other: &TickInput) {
        self.move_left = other.move_left;
        self.move_right = other.move_right;
        self.climb_up = other.climb_up;
        self.climb_down = other.climb_down;
        self.jump |= other.jump;
        self.attack |= other.attack;
        self.pause |= other.pause;
        self.restart |= other.restart;
        self.advance |= other.advance;
    }

    /// Drop the edge-triggered intents so a held key fires once
    pub fn clear_one_shots(&mut self) {
        self.jump = false;
        self.attack = false;
        self.pause = false;
        self.restart = false;
        self.advance = false;
    }
}

/// Advance the game state by one fixed timestep.
///
/// Events are appended to `state.events`; the caller clears the buffer once
/// it has read them.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt;
    state.princess_t += dt;

    if input.restart {
        state.reset_run();
        return;
    }

    if input.pause {
        match state.phase {
            Phase::Playing => {
                state.phase = Phase::Paused;
                state.events.push(GameEvent::Paused);
                log::debug!("Paused");
            }
            Phase::Paused => {
                state.phase = Phase::Playing;
                state.events.push(GameEvent::Resumed);
                log::debug!("Resumed");
            }
            Phase::Won | Phase::Lost => {}
        }
    }

    if input.advance {
        match state.phase {
            Phase::Won => {
                let next = state.next_level();
                state.start_level(next);
                return;
            }
            Phase::Lost if state.lives > 0 => {
                let level = state.level;
                state.start_level(level);
                return;
            }
            Phase::Lost => {
                state.reset_run();
                return;
            }
            Phase::Playing | Phase::Paused => {}
        }
    }

    if state.phase != Phase::Playing {
        return;
    }
    simulate(state, input, dt);
}

/// One step of play. Stops early as soon as the round is decided.
fn simulate(state: &mut GameState, input: &TickInput, dt: f32) {
    let motion = update_player(&mut state.player, &state.geometry, &state.tuning, input, dt);
    if motion.jumped {
        state.events.push(GameEvent::Jumped);
    }
    if motion.fell_out {
        state.lose_life(DeathCause::Fell);
        return;
    }

    if input.attack {
        sword_attack(state);
    }

    if state.player.rect().overlaps(&state.geometry.goal) {
        state.win_level();
        return;
    }

    update_barrels(state, dt);
    if state.phase != Phase::Playing {
        return;
    }
    update_baddies(state, dt);
    if state.phase != Phase::Playing {
        return;
    }

    update_power_ups(state, dt);
    update_coins(state, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::Body;
    use crate::sim::rect::Rect;
    use crate::sim::state::Barrel;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn put_on_goal(state: &mut GameState) {
        let goal = state.geometry.goal;
        state.player.body.rect = Rect::centered(goal.center(), PLAYER_W, PLAYER_H);
    }

    fn drop_out_of_world(state: &mut GameState) {
        state.player.body.rect.y = WORLD_H + 10.0;
    }

    #[test]
    fn test_input_bits() {
        let input = TickInput::from_bits(TickInput::RIGHT | TickInput::JUMP | TickInput::ADVANCE);
        assert_eq!(
            input,
            TickInput {
                move_right: true,
                jump: true,
                advance: true,
                ..Default::default()
            }
        );
        assert_eq!(TickInput::from_bits(0), TickInput::default());
    }

    #[test]
    fn test_latch_keeps_one_shots_until_cleared() {
        let mut held = TickInput::from_bits(TickInput::LEFT | TickInput::ATTACK);
        held.latch(&TickInput::from_bits(TickInput::RIGHT));
        assert!(held.attack);
        assert!(held.move_right && !held.move_left);
        held.clear_one_shots();
        assert!(!held.attack);
        assert!(held.move_right);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        state.events.clear();
        let pause = press(|i| i.pause = true);
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, Phase::Paused);
        assert_eq!(state.events, vec![GameEvent::Paused]);

        // Frozen: movement is ignored but the clocks run
        let x = state.player.rect().x;
        let t = state.time;
        tick(&mut state, &press(|i| i.move_right = true), SIM_DT);
        assert_eq!(state.player.rect().x, x);
        assert!(state.time > t);

        state.events.clear();
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.events, vec![GameEvent::Resumed]);
    }

    #[test]
    fn test_pause_ignored_after_round_ends() {
        let mut state = GameState::new(1);
        state.lose_life(DeathCause::Barrel);
        tick(&mut state, &press(|i| i.pause = true), SIM_DT);
        assert_eq!(state.phase, Phase::Lost);
    }

    #[test]
    fn test_win_is_idempotent() {
        let mut state = GameState::new(1);
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(state.score, 1000);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(state.score, 1000);
    }

    #[test]
    fn test_advance_from_won_loads_next_level() {
        let mut state = GameState::new(1);
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &press(|i| i.advance = true), SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1000);
        assert!(state.events.contains(&GameEvent::LevelStarted { level: 2 }));
    }

    #[test]
    fn test_advance_past_cap_wraps() {
        let mut state = GameState::new(1);
        state.start_level(25);
        put_on_goal(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &press(|i| i.advance = true), SIM_DT);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_falling_out_costs_a_life_and_retry_keeps_level() {
        let mut state = GameState::new(1);
        state.start_level(3);
        state.score = 700;
        drop_out_of_world(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, Phase::Lost);
        assert_eq!(state.lives, 2);
        assert!(state.events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Fell,
            lives: 2,
        }));

        tick(&mut state, &press(|i| i.advance = true), SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 3);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 700);
    }

    #[test]
    fn test_out_of_lives_advance_resets_run() {
        let mut state = GameState::new(1);
        state.start_level(4);
        state.score = 2500;
        state.lives = 1;
        drop_out_of_world(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, 0);
        assert!(state.events.contains(&GameEvent::GameOver { score: 2500 }));

        tick(&mut state, &press(|i| i.advance = true), SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_advance_ignored_while_playing() {
        let mut state = GameState::new(1);
        state.start_level(2);
        tick(&mut state, &press(|i| i.advance = true), SIM_DT);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_restart_from_any_phase() {
        let mut state = GameState::new(1);
        state.start_level(6);
        state.score = 4000;
        let pause = press(|i| i.pause = true);
        tick(&mut state, &pause, SIM_DT);
        state.events.clear();
        tick(&mut state, &press(|i| i.restart = true), SIM_DT);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.events[0], GameEvent::RunReset);
    }

    #[test]
    fn test_attack_through_tick() {
        let mut state = GameState::new(1);
        state.player.has_sword = true;
        state.player.sword_timer = 30.0;
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = Barrel {
            body: Body::new(Rect::new(hero.right() + 20.0, hero.y, BARREL_SIZE, BARREL_SIZE)),
            active: true,
            ..Default::default()
        };
        tick(&mut state, &press(|i| i.attack = true), SIM_DT);
        assert!(state.barrels.get(0).unwrap().broken);
        assert_eq!(state.score, 200);
        assert!(state.events.contains(&GameEvent::Attacked));
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_sword_swing_breaks_touching_barrel_without_losing_a_life() {
        let mut state = GameState::new(1);
        state.player.has_sword = true;
        state.player.sword_timer = 30.0;
        let hero = *state.player.rect();
        *state.barrels.get_mut(0).unwrap() = Barrel {
            body: Body::new(Rect::new(hero.x, hero.y + 4.0, BARREL_SIZE, BARREL_SIZE)),
            active: true,
            ..Default::default()
        };
        assert!(state.barrels.get(0).unwrap().body.rect.overlaps(&hero));

        tick(&mut state, &press(|i| i.attack = true), SIM_DT);
        assert!(state.barrels.get(0).unwrap().broken);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 200);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. })));
    }

    #[test]
    fn test_events_accumulate_across_steps() {
        let mut state = GameState::new(1);
        state.events.clear();
        let pause = press(|i| i.pause = true);
        tick(&mut state, &pause, SIM_DT);
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.events, vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_jump_event() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        tick(&mut state, &press(|i| i.jump = true), SIM_DT);
        assert!(state.events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            press(|i| i.move_right = true),
            press(|i| {
                i.move_right = true;
                i.jump = true;
            }),
            TickInput::default(),
            press(|i| i.move_left = true),
        ];

        for step in 0..1200 {
            let input = &inputs[(step / 45) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
            assert_eq!(state1.events, state2.events);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }
}
