//! Tuning constants and difficulty tables.
//!
//! Distances are world units (the play field is `WORLD_WIDTH` × `WORLD_HEIGHT`),
//! times are milliseconds, and per-frame speeds are applied once per `update`.

use crate::entities::Difficulty;

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 1200.0;
pub const WORLD_HEIGHT: f64 = 500.0;

// ── Ammo ──────────────────────────────────────────────────────────────────────

pub const MAX_AMMO: f64 = 50.0;
/// +1 ammo every this many ms while the player is not frozen.
pub const AMMO_INTERVAL: f64 = 350.0;
/// Extra ammo per frame while the player power-up is active.
pub const POWER_UP_AMMO_PER_FRAME: f64 = 0.1;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f64 = 120.0;
pub const PLAYER_HEIGHT: f64 = 190.0;
pub const PLAYER_START_X: f64 = 20.0;
pub const PLAYER_START_Y: f64 = 100.0;
pub const PLAYER_MAX_SPEED: f64 = 3.0;
/// Minimum time between two held-fire shots.
pub const SHOOT_INTERVAL: f64 = 100.0;
pub const POWER_UP_LIMIT: f64 = 10_000.0;

/// Cannon muzzle offsets relative to the player's top-left corner.
pub const TOP_CANNON: (f64, f64) = (80.0, 30.0);
pub const BOTTOM_CANNON: (f64, f64) = (80.0, 175.0);

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_WIDTH: f64 = 10.0;
pub const PROJECTILE_HEIGHT: f64 = 3.0;
pub const PROJECTILE_SPEED: f64 = 3.0;
/// Standard projectiles expire past this fraction of the world width.
pub const PROJECTILE_RANGE: f64 = 0.8;

pub const EXTREME_PROJECTILE_SIZE: f64 = 8.0;
pub const EXTREME_PROJECTILE_SPEED: f64 = 6.0;
pub const EXTREME_WAVE_AMPLITUDE: f64 = 6.0;
pub const EXTREME_WAVE_FREQUENCY: f64 = 0.2;
pub const EXTREME_FAN_SIZE: usize = 12;
pub const EXTREME_FIRE_INTERVAL: f64 = 50.0;
pub const EXTREME_POWER_UP_LIMIT: f64 = 5_000.0;

pub const SINE_WAVE_SECTIONS: usize = 6;
pub const SINE_WAVE_AMPLITUDE: f64 = 20.0;
pub const SINE_WAVE_FREQUENCY: f64 = 0.1;
pub const SINE_WAVE_AMMO_COST: f64 = 2.0;
pub const SINE_WAVE_RANGE: f64 = 0.9;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ANGLER1_SIZE: (f64, f64) = (228.0, 169.0);
pub const ANGLER1_LIVES: i32 = 5;
pub const ANGLER2_SIZE: (f64, f64) = (213.0, 165.0);
pub const ANGLER2_LIVES: i32 = 6;
pub const LUCKY_FISH_SIZE: (f64, f64) = (99.0, 95.0);
pub const LUCKY_FISH_LIVES: i32 = 5;
pub const LUCKY_FISH_SCORE: u32 = 10;
pub const HIVE_WHALE_SIZE: (f64, f64) = (400.0, 227.0);
pub const HIVE_WHALE_LIVES: i32 = 20;
pub const DRONE_SIZE: (f64, f64) = (115.0, 95.0);
pub const DRONE_LIVES: i32 = 3;
pub const SUICIDE_BOMBER_SIZE: (f64, f64) = (110.0, 60.0);
pub const SUICIDE_BOMBER_LIVES: i32 = 3;
pub const SUICIDE_BOMBER_SCORE: u32 = 5;
/// Vertical homing speed of the suicide bomber, per frame.
pub const SUICIDE_BOMBER_HOMING: f64 = 1.5;

/// Drones released when a hive whale is destroyed.
pub const HIVE_DRONE_COUNT: usize = 5;
pub const ESCORT_DRONE_CHANCE: f64 = 0.3;
/// Fixed bomber cadence in difficult mode, measured on the game clock.
pub const BOMBER_INTERVAL: f64 = 15_000.0;

// ── Effects ───────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: f64 = 200.0;
pub const EXPLOSION_FPS: f64 = 30.0;
pub const EXPLOSION_MAX_FRAME: u32 = 8;

pub const PARTICLE_SPRITE_SIZE: f64 = 50.0;
pub const PARTICLE_GRAVITY: f64 = 0.5;
pub const PARTICLE_MAX_BOUNCES: u32 = 2;

pub const LAYER_WIDTH: f64 = 1768.0;
pub const LAYER_SPEED_MODIFIERS: [f64; 4] = [0.2, 0.4, 1.0, 1.5];

// ── Scoring & levels ──────────────────────────────────────────────────────────

pub const LEVEL_TIME_LIMIT: f64 = 30_000.0;
pub const LEVEL_PASS_SCORE: u32 = 80;
pub const MAX_LEVEL: u32 = 50;
pub const WINNING_SCORE: u32 = 35_000;
pub const MAX_HEALTH: f64 = 100.0;
pub const HEALTH_REWARD: f64 = 3.0;
pub const LEVEL_MESSAGE_DURATION: f64 = 2_000.0;

pub const BASE_ENEMY_INTERVAL: f64 = 1_500.0;
/// Level-up scaling is capped at this many levels.
pub const LEVEL_SCALING_CAP: u32 = 5;
pub const NORMAL_SPEED_STEP: f64 = 0.2;
pub const NORMAL_INTERVAL_FACTOR: f64 = 0.95;
pub const DIFFICULT_SPEED_STEP: f64 = 0.3;
pub const DIFFICULT_INTERVAL_FACTOR: f64 = 0.9;

// ── Difficulty tables ─────────────────────────────────────────────────────────

/// LuckyFish contacts needed to arm the extreme power-up.
pub fn required_lucky_collisions(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Normal => 3,
        Difficulty::Difficult => 4,
    }
}

/// Game speed after clearing `completed_level` in normal mode.
pub fn normal_level_speed(completed_level: u32) -> f64 {
    1.0 + completed_level.min(LEVEL_SCALING_CAP) as f64 * NORMAL_SPEED_STEP
}

/// Enemy spawn interval after clearing `completed_level` in normal mode.
pub fn normal_enemy_interval(completed_level: u32) -> f64 {
    BASE_ENEMY_INTERVAL * NORMAL_INTERVAL_FACTOR.powi(completed_level.min(LEVEL_SCALING_CAP) as i32)
}
