//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]: level geometry, entity
//! pools, the player, round scalars and the per-step event buffer. The host
//! owns it and hands it to [`super::tick`] by reference.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::level::{Geometry, coin_layout, power_up_layout};
use super::pool::{Pool, Slot};
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Simulation runs
    Playing,
    /// Frozen until the pause toggle
    Paused,
    /// Goal reached; `advance` loads the next level
    Won,
    /// Died. `advance` retries the level while lives remain, otherwise resets
    /// the run.
    Lost,
}

/// Timed (or instant) player modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Enables the attack action
    Sword,
    /// Touch breaks barrels and kills baddies
    Flame,
    /// "Super beast" form, same touch-kill as flame
    Lightning,
    /// One extra life, no timer
    Heart,
}

impl PowerUpKind {
    /// Placement rotation order
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Sword,
        PowerUpKind::Flame,
        PowerUpKind::Lightning,
        PowerUpKind::Heart,
    ];
}

/// Baddie families. Each walks at its own pace and handles ledges its own way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaddieKind {
    /// Hops down or turns at a ledge, decided by the seeded RNG
    #[default]
    Grunt,
    /// Fast, never leaves its platform voluntarily
    Runner,
    /// Always hops down
    Jumper,
}

impl BaddieKind {
    pub const ALL: [BaddieKind; 3] = [BaddieKind::Grunt, BaddieKind::Runner, BaddieKind::Jumper];

    /// Multiplier on the level's base walk speed
    pub fn speed_factor(self) -> f32 {
        match self {
            BaddieKind::Grunt => 1.0,
            BaddieKind::Runner => 1.4,
            BaddieKind::Jumper => 0.85,
        }
    }
}

/// Which hero sprite set and abilities are in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroVariant {
    Plain,
    Sword,
    SuperBeast,
    SwordSuperBeast,
    Flame,
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Fell,
    Barrel,
    Baddie,
}

/// Something that happened during one step, for audio and UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    RunReset,
    Jumped,
    Attacked,
    BarrelSpawned { slot: usize },
    BarrelBroken { slot: usize },
    BaddieSpawned { slot: usize, kind: BaddieKind },
    BaddieKilled { slot: usize, kind: BaddieKind, stomped: bool },
    CoinCollected { slot: usize },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    ExtraLife { lives: u32 },
    LifeLost { cause: DeathCause, lives: u32 },
    LevelWon { level: u32, bonus: u64 },
    GameOver { score: u64 },
    Paused,
    Resumed,
}

/// The hero
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub on_ground: bool,
    /// Attached to a ladder: no gravity, passes through platforms
    pub climbing: bool,
    /// -1 left, 1 right
    pub facing: f32,
    /// Run cycle time, reset when not running
    pub run_anim: f32,
    pub sword_timer: f32,
    pub flame_timer: f32,
    pub super_beast_timer: f32,
    pub has_sword: bool,
    pub has_flame: bool,
    pub has_super_beast: bool,
    /// Remaining sword swing time; touch kills while positive
    pub attack_timer: f32,
    /// Bottom edge at the start of the current step (stomp detection)
    pub prev_bottom: f32,
}

impl Player {
    /// Fresh player at the level spawn point
    pub fn spawn() -> Self {
        let rect = Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_W, PLAYER_H);
        Self {
            body: Body::new(rect),
            on_ground: false,
            climbing: false,
            facing: 1.0,
            run_anim: 0.0,
            sword_timer: 0.0,
            flame_timer: 0.0,
            super_beast_timer: 0.0,
            has_sword: false,
            has_flame: false,
            has_super_beast: false,
            attack_timer: 0.0,
            prev_bottom: rect.bottom(),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Flame and super-beast break barrels and kill baddies on contact
    pub fn touch_kills(&self) -> bool {
        self.has_flame || self.has_super_beast
    }

    /// Mid sword swing
    pub fn attacking(&self) -> bool {
        self.has_sword && self.attack_timer > 0.0
    }

    pub fn hero_variant(&self) -> HeroVariant {
        match (self.has_sword, self.has_super_beast, self.has_flame) {
            (true, true, _) => HeroVariant::SwordSuperBeast,
            (false, true, _) => HeroVariant::SuperBeast,
            (_, false, true) => HeroVariant::Flame,
            (true, false, false) => HeroVariant::Sword,
            (false, false, false) => HeroVariant::Plain,
        }
    }
}

/// A rolling barrel
#[derive(Debug, Clone, Default)]
pub struct Barrel {
    pub body: Body,
    pub active: bool,
    /// Smashed; only its fade timer runs until the slot frees
    pub broken: bool,
    pub broken_time: f32,
    pub roll_anim: f32,
}

impl Barrel {
    /// Can still be broken or hurt the player
    pub fn is_solid(&self) -> bool {
        self.active && !self.broken
    }

    pub fn break_apart(&mut self) {
        self.broken = true;
        self.broken_time = 0.0;
        self.body.vel = glam::Vec2::ZERO;
    }
}

impl Slot for Barrel {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Default)]
pub struct Baddie {
    pub body: Body,
    pub active: bool,
    /// Playing the squash animation; harmless
    pub dying: bool,
    pub death_time: f32,
    pub kind: BaddieKind,
    pub facing: f32,
    pub on_ground: bool,
    pub walk_anim: f32,
    /// Chasing is suspended while positive (set after turning at a ledge)
    pub turn_cooldown: f32,
}

impl Baddie {
    /// Alive and able to hurt the player
    pub fn is_hostile(&self) -> bool {
        self.active && !self.dying
    }

    pub fn kill(&mut self) {
        self.dying = true;
        self.death_time = 0.0;
        self.body.vel = glam::Vec2::ZERO;
    }
}

impl Slot for Baddie {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// A power-up waiting on a platform
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub rect: Rect,
    pub active: bool,
    pub kind: PowerUpKind,
    pub anim: f32,
}

impl Default for PowerUp {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            active: false,
            kind: PowerUpKind::Sword,
            anim: 0.0,
        }
    }
}

impl Slot for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// A coin hovering over a platform
#[derive(Debug, Clone, Default)]
pub struct Coin {
    pub rect: Rect,
    pub active: bool,
    pub anim: f32,
}

impl Slot for Coin {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed; the per-level RNG derives from it
    pub seed: u64,
    pub tuning: Tuning,
    pub geometry: Geometry,
    pub phase: Phase,
    pub player: Player,
    pub barrels: Pool<Barrel>,
    pub baddies: Pool<Baddie>,
    pub power_ups: Pool<PowerUp>,
    pub coins: Pool<Coin>,
    pub score: u64,
    pub lives: u32,
    /// Score at which the next extra life is granted
    pub next_life_score: u64,
    /// 1-based, capped at `tuning.max_level`
    pub level: u32,
    pub coins_collected: u32,
    /// Seconds since the level loaded (runs in every phase)
    pub time: f32,
    /// Goal idle animation clock
    pub princess_t: f32,
    pub barrel_spawn_timer: f32,
    pub baddie_spawn_timer: f32,
    /// Events from the most recent step
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New run with default tuning, starting at level 1
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, mut tuning: Tuning) -> Self {
        tuning.validate();
        let mut state = Self {
            seed,
            geometry: Geometry::for_level(1),
            phase: Phase::Playing,
            player: Player::spawn(),
            barrels: Pool::with_capacity(MAX_BARRELS),
            baddies: Pool::with_capacity(MAX_BADDIES),
            power_ups: Pool::with_capacity(MAX_POWER_UPS),
            coins: Pool::with_capacity(MAX_COINS),
            score: 0,
            lives: tuning.starting_lives,
            next_life_score: tuning.first_extra_life(),
            level: 1,
            coins_collected: 0,
            time: 0.0,
            princess_t: 0.0,
            barrel_spawn_timer: 0.0,
            baddie_spawn_timer: 0.0,
            events: Vec::new(),
            rng: level_rng(seed, 1),
            tuning,
        };
        state.start_level(1);
        state
    }

    /// (Re)build a level. Score and lives carry over.
    pub fn start_level(&mut self, level: u32) {
        let level = level.clamp(1, self.tuning.max_level);
        self.level = level;
        self.geometry = Geometry::for_level(level);
        self.player = Player::spawn();
        self.barrels.clear();
        self.baddies.clear();
        self.power_ups.clear();
        self.coins.clear();

        for rect in coin_layout(&self.geometry) {
            if let Some((_, coin)) = self.coins.claim() {
                *coin = Coin {
                    rect,
                    active: true,
                    anim: 0.0,
                };
            }
        }
        for placement in power_up_layout(&self.geometry, level) {
            if let Some((_, power_up)) = self.power_ups.claim() {
                *power_up = PowerUp {
                    rect: placement.rect,
                    active: true,
                    kind: placement.kind,
                    anim: 0.0,
                };
            }
        }

        self.phase = Phase::Playing;
        self.coins_collected = 0;
        self.time = 0.0;
        self.princess_t = 0.0;
        self.barrel_spawn_timer = 0.0;
        self.baddie_spawn_timer = 0.0;
        self.rng = level_rng(self.seed, level);
        self.events.push(GameEvent::LevelStarted { level });

        log::info!(
            "Level {} ({:?}): {} power-ups, {} coins, lives {}",
            level,
            self.geometry.layout,
            self.power_ups.active_count(),
            self.coins.active_count(),
            self.lives
        );
    }

    /// Back to level 1 with default score and lives
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.next_life_score = self.tuning.first_extra_life();
        self.events.push(GameEvent::RunReset);
        log::info!("Run reset");
        self.start_level(1);
    }

    /// Add points, granting one life per threshold crossed
    pub fn award(&mut self, points: u64) {
        self.score += points;
        while self.score >= self.next_life_score {
            self.lives += 1;
            self.next_life_score += self.tuning.extra_life_step;
            self.events.push(GameEvent::ExtraLife { lives: self.lives });
            log::debug!("Extra life at {} ({} lives)", self.score, self.lives);
        }
    }

    /// Lethal event for the current life. No-op outside `Playing`.
    pub fn lose_life(&mut self, cause: DeathCause) {
        if self.phase != Phase::Playing {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.phase = Phase::Lost;
        self.events.push(GameEvent::LifeLost {
            cause,
            lives: self.lives,
        });
        if self.lives == 0 {
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over on level {} with {} points", self.level, self.score);
        } else {
            log::info!("Life lost ({:?}), {} left", cause, self.lives);
        }
    }

    /// Goal reached. Awards the bonus once; later calls do nothing.
    pub fn win_level(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::Won;
        let bonus = self.tuning.score_win;
        self.events.push(GameEvent::LevelWon {
            level: self.level,
            bonus,
        });
        self.award(bonus);
        log::info!("Level {} cleared, score {}", self.level, self.score);
    }

    /// Level that follows the current one (wraps past the cap)
    pub fn next_level(&self) -> u32 {
        if self.level < self.tuning.max_level {
            self.level + 1
        } else {
            1
        }
    }

    /// In `Lost`, whether `advance` retries instead of resetting the run
    pub fn can_retry(&self) -> bool {
        self.phase == Phase::Lost && self.lives > 0
    }
}

/// Level RNG, derived from the run seed so retries replay the same choices
fn level_rng(seed: u64, level: u32) -> Pcg32 {
    Pcg32::seed_from_u64(seed ^ (level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
