//! The game state and its per-frame update.
//!
//! `GameState` owns every entity collection.  The host calls `update` once
//! per frame with the elapsed milliseconds and an RNG, then draws from
//! `snapshot`.  All randomness comes through the injected RNG so callers
//! control determinism (tests use a seeded `StdRng`).

use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::ammo::Ammo;
use crate::audio::{Mixer, Silent, Sound, SoundPlayer};
use crate::collision::collides;
use crate::constants::*;
use crate::entities::{
    Background, Body, Difficulty, Enemy, EnemyKind, Explosion, ExplosionKind, Particle, Player,
    SimContext,
};
use crate::input::{HeldKeys, Key};
use crate::power_up::{ExtremePowerUp, LuckyOutcome};
use crate::scheduler::FrameLoop;
use crate::scoring::{LevelVerdict, Outcome, Phase, Scoring};
use crate::spawn::SpawnPolicy;
use crate::storage::{HighScoreStore, MemoryStore};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub max_ammo: f64,
    pub sound_on: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            max_ammo: MAX_AMMO,
            sound_on: true,
        }
    }
}

// ── Hooks ─────────────────────────────────────────────────────────────────────

/// Subscribers notified by lifecycle entry points.
#[derive(Default)]
struct Hooks {
    difficulty_selected: Vec<Box<dyn FnMut(Difficulty)>>,
    reset: Vec<Box<dyn FnMut()>>,
}

// ── Render snapshot ───────────────────────────────────────────────────────────

/// Read-only view of one frame for renderers and UIs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub background: Background,
    pub score: u32,
    pub level_score: u32,
    pub high_score: u32,
    pub level: u32,
    pub player_health: f64,
    pub ammo: f64,
    /// Whole rounds available, for HUDs.
    pub ammo_rounds: u32,
    pub max_ammo: f64,
    pub difficulty: Option<Difficulty>,
    pub speed: f64,
    pub enemy_interval: f64,
    pub level_time: f64,
    pub game_time: f64,
    pub game_started: bool,
    pub game_over: bool,
    pub is_player_dead: bool,
    pub is_level_failed: bool,
    pub player_frozen: bool,
    pub paused: bool,
    pub sound_on: bool,
    pub power_up: bool,
    pub extreme_power_up: bool,
    pub extreme_power_up_timer: f64,
    pub lucky_fish_collisions: u32,
    pub level_message: Option<String>,
    pub outcome: Option<Outcome>,
    pub phase: Phase,
    pub held_keys: HeldKeys,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ── Game state ────────────────────────────────────────────────────────────────

pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub background: Background,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    pub keys: HeldKeys,
    pub ammo: Ammo,
    pub extreme: ExtremePowerUp,
    pub spawner: SpawnPolicy,
    pub scoring: Scoring,
    pub difficulty: Option<Difficulty>,
    /// Global scroll and enemy speed multiplier.
    pub speed: f64,
    pub game_started: bool,
    pub paused: bool,
    pub player_frozen: bool,
    pub frame_loop: FrameLoop,
    mixer: Mixer,
    store: Box<dyn HighScoreStore>,
    hooks: Hooks,
}

impl GameState {
    pub fn new(
        config: GameConfig,
        store: Box<dyn HighScoreStore>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        let high_score = store.high_score().unwrap_or_else(|e| {
            warn!("Failed to load high score: {}", e);
            0
        });
        GameState {
            player: Player::new(),
            background: Background::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            keys: HeldKeys::new(),
            ammo: Ammo::new(config.max_ammo),
            extreme: ExtremePowerUp::default(),
            spawner: SpawnPolicy::default(),
            scoring: Scoring::new(high_score),
            difficulty: None,
            speed: 1.0,
            game_started: false,
            paused: false,
            player_frozen: false,
            frame_loop: FrameLoop::new(),
            mixer: Mixer::new(sound, config.sound_on),
            config,
            store,
            hooks: Hooks::default(),
        }
    }

    /// In-memory high score and no audio.
    pub fn headless() -> Self {
        GameState::new(
            GameConfig::default(),
            Box::new(MemoryStore::default()),
            Box::new(Silent),
        )
    }

    // ── Hooks ─────────────────────────────────────────────────────────────────

    pub fn on_difficulty_selected(&mut self, hook: impl FnMut(Difficulty) + 'static) {
        self.hooks.difficulty_selected.push(Box::new(hook));
    }

    pub fn on_reset(&mut self, hook: impl FnMut() + 'static) {
        self.hooks.reset.push(Box::new(hook));
    }

    // ── Lifecycle entry points ────────────────────────────────────────────────

    pub fn set_difficulty_normal(&mut self) -> bool {
        self.select_difficulty(Difficulty::Normal)
    }

    pub fn set_difficulty_difficult(&mut self) -> bool {
        self.select_difficulty(Difficulty::Difficult)
    }

    /// Start a run.  Ignored once a run has started.
    fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.game_started {
            return false;
        }
        self.difficulty = Some(difficulty);
        self.scoring.level = 1;
        self.scoring.player_health = MAX_HEALTH;
        self.spawner = SpawnPolicy::default();
        self.speed = 1.0;
        self.game_started = true;
        self.frame_loop.start();
        info!("difficulty {:?} selected", difficulty);
        for hook in &mut self.hooks.difficulty_selected {
            hook(difficulty);
        }
        true
    }

    pub fn toggle_pause(&mut self) {
        if !self.game_started {
            return;
        }
        self.paused = !self.paused;
    }

    pub fn toggle_sound(&mut self) {
        self.mixer.sound_on = !self.mixer.sound_on;
    }

    pub fn sound_on(&self) -> bool {
        self.mixer.sound_on
    }

    /// Back to the menu: stop the loop and reinitialise everything except
    /// the recorded high score.
    pub fn full_reset(&mut self) {
        self.frame_loop.cancel();
        self.player = Player::new();
        self.background = Background::new();
        self.enemies.clear();
        self.particles.clear();
        self.explosions.clear();
        self.keys.clear();
        self.ammo = Ammo::new(self.config.max_ammo);
        self.extreme = ExtremePowerUp::default();
        self.spawner = SpawnPolicy::default();
        self.scoring = Scoring::new(self.scoring.high_score);
        self.difficulty = None;
        self.speed = 1.0;
        self.game_started = false;
        self.paused = false;
        self.player_frozen = false;
        info!("game reset");
        for hook in &mut self.hooks.reset {
            hook();
        }
    }

    /// Difficult mode only: step up a level and tighten the pace.
    pub fn next_level(&mut self) -> bool {
        if self.difficulty != Some(Difficulty::Difficult) || self.scoring.game_over {
            return false;
        }
        self.speed += DIFFICULT_SPEED_STEP;
        self.spawner.enemy_interval *= DIFFICULT_INTERVAL_FACTOR;
        if self.scoring.advance_level() {
            self.enter_terminal(Outcome::Won);
        } else {
            self.mixer.play(Sound::LevelUp);
        }
        true
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn press_key(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys.release(key);
    }

    // ── Frame loop ────────────────────────────────────────────────────────────

    /// Drive one scheduler tick at `timestamp` (ms).  Does nothing unless a
    /// loop is active.
    pub fn frame(&mut self, timestamp: f64, rng: &mut impl Rng) {
        if let Some(delta) = self.frame_loop.tick(timestamp) {
            self.update(delta, rng);
        }
    }

    pub fn context(&self) -> SimContext {
        SimContext {
            world_width: self.config.world_width,
            world_height: self.config.world_height,
            speed: self.speed,
            paused: self.paused,
            frozen: self.player_frozen,
            difficulty: self.difficulty,
            player_center_y: self.player.y + self.player.height * 0.5,
        }
    }

    /// Advance the simulation by `delta` milliseconds.
    pub fn update(&mut self, delta: f64, rng: &mut impl Rng) {
        if !self.game_started {
            return;
        }

        // 1. Terminal conditions come first.
        self.check_terminal();

        // 2. Paused: only the scenery moves.
        if self.paused {
            let ctx = self.context();
            self.background.update(&ctx);
            return;
        }

        self.scoring.tick_message(delta);

        // 3. Ammo regeneration.
        if !self.player_frozen {
            self.ammo.tick(delta);
        }

        // 4. Extreme power-up window.
        self.extreme.tick(delta);

        // 5. Clocks.
        self.scoring.advance_clocks(delta, self.difficulty);

        // 6. Difficult-mode bomber.
        if self.difficulty == Some(Difficulty::Difficult) && !self.scoring.game_over {
            let ctx = self.context();
            if let Some(bomber) =
                self.spawner
                    .try_spawn_bomber(self.scoring.game_time, &ctx, rng)
            {
                self.enemies.push(bomber);
                self.mixer.play(Sound::DroneAttack);
            }
        }

        // 7. High score write-through.
        self.persist_high_score();

        // 8. Level boundary (normal mode).
        if self.difficulty == Some(Difficulty::Normal) {
            match self.scoring.level_verdict() {
                Some(LevelVerdict::Advance) => self.advance_normal_level(),
                Some(LevelVerdict::Fail) => self.fail_level(),
                None => {}
            }
        }

        // 9. Scenery, effects and the player.
        let ctx = self.context();
        self.background.update(&ctx);
        for particle in &mut self.particles {
            particle.update(&ctx);
        }
        for explosion in &mut self.explosions {
            explosion.update(delta, &ctx);
        }
        let actions = self
            .player
            .update(delta, &ctx, &self.keys, &mut self.ammo);
        for _ in 0..actions.shots_fired {
            self.mixer.play(Sound::Shoot);
        }
        if actions.power_up_expired {
            debug!("player power-up expired");
        }
        if self.extreme.fire_due(delta) && !self.player_frozen {
            self.player.fire_extreme_fan();
        }

        // 10. Enemies and collisions.
        self.resolve_enemies(&ctx, rng);

        // 11. Sweep.
        self.particles.retain(|p| !p.marked_for_deletion);
        self.explosions.retain(|e| !e.marked_for_deletion);
        self.enemies.retain(|e| !e.marked_for_deletion);
        self.player.projectiles.retain(|p| !p.marked_for_deletion);

        self.check_terminal();

        // 12. Spawning.
        if !self.scoring.game_over && !self.scoring.is_level_failed {
            let ctx = self.context();
            let spawned = self.spawner.try_spawn_enemy(delta, &ctx, rng);
            for enemy in spawned {
                if enemy.kind == EnemyKind::HiveWhale {
                    self.mixer.play(Sound::WhaleSound);
                }
                self.enemies.push(enemy);
            }
        }
    }

    // ── Update helpers ────────────────────────────────────────────────────────

    fn check_terminal(&mut self) {
        if let Some(outcome) = self.scoring.check_terminal() {
            self.enter_terminal(outcome);
        }
    }

    /// One-shot side effects of reaching a terminal state.
    fn enter_terminal(&mut self, outcome: Outcome) {
        self.player_frozen = true;
        match outcome {
            Outcome::Won => self.mixer.play(Sound::LevelUp),
            Outcome::PlayerDead => self.mixer.play(Sound::PlayerExplosion),
            Outcome::LevelFailed => self.mixer.play(Sound::LevelFailed),
        }
        self.persist_high_score();
    }

    fn persist_high_score(&mut self) {
        if let Some(record) = self.scoring.update_high_score() {
            if let Err(e) = self.store.set_high_score(record) {
                warn!("Failed to save high score {}: {}", record, e);
            }
        }
    }

    fn advance_normal_level(&mut self) {
        let completed = self.scoring.level;
        if self.scoring.advance_level() {
            self.enter_terminal(Outcome::Won);
            return;
        }
        self.speed = normal_level_speed(completed);
        self.spawner.enemy_interval = normal_enemy_interval(completed);
        self.spawner.enemy_timer = 0.0;
        self.enemies.clear();
        self.particles.clear();
        self.explosions.clear();
        self.player.projectiles.clear();
        self.mixer.play(Sound::LevelUp);
    }

    fn fail_level(&mut self) {
        self.scoring.fail_level();
        self.enter_terminal(Outcome::LevelFailed);
    }

    /// Move every enemy, then test it against the player and against each
    /// live projectile, in that order.
    fn resolve_enemies(&mut self, ctx: &SimContext, rng: &mut impl Rng) {
        let collisions_enabled = !self.player_frozen;
        let mut enemies = std::mem::take(&mut self.enemies);
        let mut released = Vec::new();

        for enemy in &mut enemies {
            enemy.update(ctx);

            if collisions_enabled && collides(&self.player, &*enemy) {
                enemy.marked_for_deletion = true;
                self.player_contact(enemy, rng);
            }

            for i in 0..self.player.projectiles.len() {
                if enemy.lives <= 0 {
                    break;
                }
                let projectile = &mut self.player.projectiles[i];
                if projectile.marked_for_deletion || !collides(&*projectile, &*enemy) {
                    continue;
                }
                enemy.lives -= projectile.damage;
                projectile.marked_for_deletion = true;
                let (cx, cy) = center_of(&*enemy);
                self.particles.push(Particle::new(cx, cy, rng));
                if enemy.lives <= 0 {
                    enemy.marked_for_deletion = true;
                    self.enemy_killed(enemy, rng, &mut released);
                }
            }
        }

        enemies.extend(released);
        self.enemies = enemies;
    }

    fn player_contact(&mut self, enemy: &Enemy, rng: &mut impl Rng) {
        self.add_explosion(enemy, rng);
        self.burst_particles(enemy, rng);

        if enemy.is_lucky() {
            self.player.enter_power_up();
            self.ammo.refill();
            self.mixer.play(Sound::PowerUp);
            if self.difficulty == Some(Difficulty::Difficult) {
                self.scoring.heal();
            }
            let required = required_lucky_collisions(self.difficulty.unwrap_or(Difficulty::Normal));
            if self.extreme.register_lucky(required) == LuckyOutcome::Armed {
                self.mixer.play(Sound::ExtremePower);
            }
        } else {
            self.extreme.break_streak();
            self.mixer.play(Sound::PlayerExplosion);
            if !self.scoring.game_over {
                self.scoring.penalize_contact(enemy.lives, self.difficulty);
            }
        }
    }

    fn enemy_killed(&mut self, enemy: &Enemy, rng: &mut impl Rng, released: &mut Vec<Enemy>) {
        self.mixer.play(Sound::CollectPoints);
        self.burst_particles(enemy, rng);
        self.add_explosion(enemy, rng);

        if enemy.kind == EnemyKind::HiveWhale {
            for _ in 0..HIVE_DRONE_COUNT {
                let x = enemy.x + rng.gen::<f64>() * enemy.width;
                let y = enemy.y + rng.gen::<f64>() * enemy.height * 0.5;
                released.push(Enemy::at(EnemyKind::Drone, x, y, rng));
            }
        }

        if !self.scoring.game_over {
            self.scoring.add_kill(enemy.score);
            if self.difficulty == Some(Difficulty::Difficult) && enemy.is_lucky() {
                self.scoring.heal();
            }
        }
    }

    fn burst_particles(&mut self, enemy: &Enemy, rng: &mut impl Rng) {
        let (cx, cy) = center_of(enemy);
        for _ in 0..enemy.score {
            self.particles.push(Particle::new(cx, cy, rng));
        }
    }

    fn add_explosion(&mut self, enemy: &Enemy, rng: &mut impl Rng) {
        let (cx, cy) = center_of(enemy);
        let kind = if rng.gen_bool(0.5) {
            ExplosionKind::Smoke
        } else {
            ExplosionKind::Fire
        };
        self.explosions.push(Explosion::new(kind, cx, cy));
    }

    // ── Render contract ───────────────────────────────────────────────────────

    pub fn outcome(&self) -> Option<Outcome> {
        self.scoring.outcome()
    }

    pub fn phase(&self) -> Phase {
        if let Some(outcome) = self.outcome() {
            Phase::Terminal(outcome)
        } else if !self.game_started {
            Phase::NotStarted
        } else if self.paused {
            Phase::Paused
        } else if self.scoring.level_message_timer > 0.0 {
            Phase::LevelTransition
        } else {
            Phase::Running
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            particles: self.particles.clone(),
            explosions: self.explosions.clone(),
            background: self.background.clone(),
            score: self.scoring.score,
            level_score: self.scoring.level_score,
            high_score: self.scoring.high_score,
            level: self.scoring.level,
            player_health: self.scoring.player_health,
            ammo: self.ammo.current,
            ammo_rounds: self.ammo.rounds(),
            max_ammo: self.ammo.max,
            difficulty: self.difficulty,
            speed: self.speed,
            enemy_interval: self.spawner.enemy_interval,
            level_time: self.scoring.level_time,
            game_time: self.scoring.game_time,
            game_started: self.game_started,
            game_over: self.scoring.game_over,
            is_player_dead: self.scoring.is_player_dead,
            is_level_failed: self.scoring.is_level_failed,
            player_frozen: self.player_frozen,
            paused: self.paused,
            sound_on: self.mixer.sound_on,
            power_up: self.player.power_up.active,
            extreme_power_up: self.extreme.active,
            extreme_power_up_timer: self.extreme.timer,
            lucky_fish_collisions: self.extreme.lucky_collisions,
            level_message: self.scoring.level_message.clone(),
            outcome: self.outcome(),
            phase: self.phase(),
            held_keys: self.keys.clone(),
        }
    }
}

fn center_of(enemy: &Enemy) -> (f64, f64) {
    enemy.rect().center()
}
