//! Mini Kong entry point
//!
//! Headless runner: drives the simulation with a scripted autopilot at a
//! fixed display rate, logs the event stream, and prints the final render
//! snapshot as JSON. A renderer front end would replace the autopilot with
//! polled input and draw each snapshot.
//!
//! Usage: `mini-kong [--seed N] [--frames N] [--tuning path.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use mini_kong::consts::*;
    use mini_kong::sim::{GameEvent, GameState, Phase, Rect, TickInput};
    use mini_kong::{FixedStepper, Tuning};

    /// Simulated display refresh (seconds per frame)
    const FRAME_DT: f32 = 1.0 / 144.0;

    struct Options {
        seed: u64,
        frames: u32,
        tuning: Option<String>,
    }

    fn parse_args() -> Options {
        let mut options = Options {
            seed: 0x5eed,
            frames: 144 * 60,
            tuning: None,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let value = args.next();
            match (arg.as_str(), value) {
                ("--seed", Some(v)) => match v.parse() {
                    Ok(seed) => options.seed = seed,
                    Err(e) => log::warn!("Ignoring --seed {v}: {e}"),
                },
                ("--frames", Some(v)) => match v.parse() {
                    Ok(frames) => options.frames = frames,
                    Err(e) => log::warn!("Ignoring --frames {v}: {e}"),
                },
                ("--tuning", Some(v)) => options.tuning = Some(v),
                (other, _) => log::warn!("Unknown or incomplete argument: {other}"),
            }
        }
        options
    }

    /// Scripted player: climb the ladder up from the current row, head for the
    /// goal on the top row, jump barrels, swing at anything in reach.
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        if matches!(state.phase, Phase::Won | Phase::Lost) {
            input.advance = true;
            return input;
        }
        if state.phase != Phase::Playing {
            return input;
        }

        let p = &state.player;
        let hero = p.body.rect;
        let center = hero.center();

        if p.climbing {
            input.climb_up = true;
            return input;
        }

        let target_x = state
            .geometry
            .ladders
            .iter()
            .find(|l| (l.bottom() - hero.bottom()).abs() < 2.0)
            .map(|l| l.center().x);
        match target_x {
            Some(x) if (x - center.x).abs() < 4.0 => input.climb_up = true,
            Some(x) => {
                input.move_right = x > center.x;
                input.move_left = x < center.x;
            }
            None => {
                let goal = state.geometry.goal.center().x;
                input.move_right = goal > center.x;
                input.move_left = goal < center.x;
            }
        }

        let reach_sq = state.tuning.attack_radius * state.tuning.attack_radius;
        let barrel_near = state.barrels.iter_active().any(|(_, b)| {
            b.is_solid()
                && (b.body.rect.center().x - center.x).abs() < 70.0
                && (b.body.rect.bottom() - hero.bottom()).abs() < 8.0
        });
        let in_reach = |r: &Rect| r.center().distance_squared(center) <= reach_sq;
        let threat_in_reach = state
            .barrels
            .iter_active()
            .any(|(_, b)| b.is_solid() && in_reach(&b.body.rect))
            || state
                .baddies
                .iter_active()
                .any(|(_, b)| b.is_hostile() && in_reach(&b.body.rect));

        input.jump = barrel_near && p.on_ground && !p.has_flame && !p.has_super_beast;
        input.attack = p.has_sword && threat_in_reach && !p.attacking();
        input
    }

    fn log_events(state: &GameState) {
        for event in &state.events {
            match event {
                GameEvent::LevelWon { .. }
                | GameEvent::LifeLost { .. }
                | GameEvent::GameOver { .. }
                | GameEvent::ExtraLife { .. } => log::info!("{:?}", event),
                GameEvent::BarrelSpawned { .. } => log::trace!("{:?}", event),
                _ => log::debug!("{:?}", event),
            }
        }
    }

    pub fn run() {
        let options = parse_args();
        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path),
            None => Tuning::default(),
        };

        let mut state = GameState::with_tuning(options.seed, tuning);
        let mut stepper = FixedStepper::new();
        let mut steps = 0u64;

        for _ in 0..options.frames {
            let mut input = autopilot(&state);
            steps += stepper.advance(&mut state, &mut input, FRAME_DT) as u64;
            log_events(&state);
        }

        log::info!(
            "Ran {} frames ({} steps, {:.1}s simulated): level {}, score {}, lives {}",
            options.frames,
            steps,
            steps as f32 * SIM_DT,
            state.level,
            state.score,
            state.lives
        );

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Kong (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `web::start` in the library
}
