//! Power-up timers, power-up pickups and coins

use super::state::{GameEvent, GameState, Player, PowerUpKind};

/// Count the timed power-ups down. A timer that runs out clears its flag and
/// stays at zero.
pub fn tick_power_up_timers(player: &mut Player, dt: f32, events: &mut Vec<GameEvent>) {
    let timers = [
        (PowerUpKind::Sword, &mut player.sword_timer, &mut player.has_sword),
        (PowerUpKind::Flame, &mut player.flame_timer, &mut player.has_flame),
        (
            PowerUpKind::Lightning,
            &mut player.super_beast_timer,
            &mut player.has_super_beast,
        ),
    ];
    for (kind, timer, flag) in timers {
        if !*flag {
            continue;
        }
        *timer -= dt;
        if *timer <= 0.0 {
            *timer = 0.0;
            *flag = false;
            events.push(GameEvent::PowerUpExpired { kind });
            log::debug!("{:?} expired", kind);
        }
    }
}

/// Apply a pickup. Timed kinds restart at the full duration instead of
/// stacking; a heart is one life.
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    let duration = state.tuning.power_up_duration;
    let p = &mut state.player;
    match kind {
        PowerUpKind::Sword => {
            p.has_sword = true;
            p.sword_timer = duration;
        }
        PowerUpKind::Flame => {
            p.has_flame = true;
            p.flame_timer = duration;
        }
        PowerUpKind::Lightning => {
            p.has_super_beast = true;
            p.super_beast_timer = duration;
        }
        PowerUpKind::Heart => {
            state.lives += 1;
            state.events.push(GameEvent::ExtraLife { lives: state.lives });
        }
    }
    state.events.push(GameEvent::PowerUpCollected { kind });
    log::debug!("Picked up {:?}", kind);
}

/// Timers first, then pickups under the player
pub fn update_power_ups(state: &mut GameState, dt: f32) {
    tick_power_up_timers(&mut state.player, dt, &mut state.events);

    let hero = state.player.body.rect;
    let mut picked = Vec::new();
    for power_up in state.power_ups.slots_mut() {
        if !power_up.active {
            continue;
        }
        power_up.anim += dt;
        if power_up.rect.overlaps(&hero) {
            power_up.active = false;
            picked.push(power_up.kind);
        }
    }
    for kind in picked {
        apply_power_up(state, kind);
    }
}

/// Animate coins and collect the ones the player touches
pub fn update_coins(state: &mut GameState, dt: f32) {
    let hero = state.player.body.rect;
    let mut collected = 0;
    for (slot, coin) in state.coins.slots_mut().iter_mut().enumerate() {
        if !coin.active {
            continue;
        }
        coin.anim += dt;
        if coin.rect.overlaps(&hero) {
            coin.active = false;
            state.events.push(GameEvent::CoinCollected { slot });
            collected += 1;
        }
    }
    if collected > 0 {
        state.coins_collected += collected;
        state.award(state.tuning.score_coin * collected as u64);
    }
}
