//! Enemy spawning.
//!
//! A timer accumulates frame deltas; once it passes the current interval an
//! enemy kind is drawn from fixed cumulative weights and, independently, an
//! escort drone may join it.  Difficult mode adds a suicide bomber on a fixed
//! cadence measured on the game clock.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_ENEMY_INTERVAL, BOMBER_INTERVAL, ESCORT_DRONE_CHANCE};
use crate::entities::{Enemy, EnemyKind, SimContext};

/// Map a roll in `[0, 1)` to an enemy kind.
pub fn pick_enemy_kind(roll: f64) -> EnemyKind {
    if roll < 0.3 {
        EnemyKind::Angler1
    } else if roll < 0.6 {
        EnemyKind::Angler2
    } else if roll < 0.7 {
        EnemyKind::HiveWhale
    } else {
        EnemyKind::LuckyFish
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    pub enemy_timer: f64,
    pub enemy_interval: f64,
    /// Game-clock time of the last bomber.
    pub last_bomber_time: f64,
}

impl SpawnPolicy {
    pub fn new(enemy_interval: f64) -> Self {
        SpawnPolicy {
            enemy_timer: 0.0,
            enemy_interval,
            last_bomber_time: 0.0,
        }
    }

    /// Advance the enemy timer by `delta` and return whatever spawned.
    pub fn try_spawn_enemy(
        &mut self,
        delta: f64,
        ctx: &SimContext,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        if self.enemy_timer <= self.enemy_interval {
            self.enemy_timer += delta;
            return Vec::new();
        }
        self.enemy_timer = 0.0;

        let kind = pick_enemy_kind(rng.gen());
        debug!("spawning {:?}", kind);
        let mut spawned = vec![Enemy::spawn(kind, ctx, rng)];
        if rng.gen_bool(ESCORT_DRONE_CHANCE) {
            spawned.push(Enemy::spawn(EnemyKind::Drone, ctx, rng));
        }
        spawned
    }

    /// One bomber every `BOMBER_INTERVAL` of game time.
    pub fn try_spawn_bomber(
        &mut self,
        game_time: f64,
        ctx: &SimContext,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        if game_time - self.last_bomber_time < BOMBER_INTERVAL {
            return None;
        }
        self.last_bomber_time = game_time;
        debug!("spawning suicide bomber at {} ms", game_time);
        Some(Enemy::spawn(EnemyKind::suicide_bomber(), ctx, rng))
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::new(BASE_ENEMY_INTERVAL)
    }
}
