//! Time-boxed power-ups.
//!
//! `PowerUp` is the player's dual-cannon boost.  `ExtremePowerUp` is the
//! global burst-fire mode armed by a run of LuckyFish contacts.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{EXTREME_FIRE_INTERVAL, EXTREME_POWER_UP_LIMIT, POWER_UP_LIMIT};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub active: bool,
    pub timer: f64,
}

impl PowerUp {
    pub fn start(&mut self) {
        self.active = true;
        self.timer = 0.0;
    }

    /// Returns `true` on the frame the power-up runs out.
    pub fn tick(&mut self, delta: f64) -> bool {
        if !self.active {
            return false;
        }
        if self.timer > POWER_UP_LIMIT {
            self.active = false;
            self.timer = 0.0;
            true
        } else {
            self.timer += delta;
            false
        }
    }
}

/// Result of registering one LuckyFish contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LuckyOutcome {
    /// Counted towards the threshold, nothing armed yet.
    Counted(u32),
    Armed,
    /// Already active: the window restarted instead of stacking.
    Refreshed,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremePowerUp {
    pub active: bool,
    pub timer: f64,
    /// Time accumulated towards the next automatic fan.
    pub fire_timer: f64,
    pub lucky_collisions: u32,
}

impl ExtremePowerUp {
    pub fn register_lucky(&mut self, required: u32) -> LuckyOutcome {
        if self.active {
            self.timer = 0.0;
            debug!("extreme power-up refreshed");
            return LuckyOutcome::Refreshed;
        }
        self.lucky_collisions += 1;
        if self.lucky_collisions >= required {
            self.lucky_collisions = 0;
            self.active = true;
            self.timer = 0.0;
            self.fire_timer = EXTREME_FIRE_INTERVAL;
            debug!("extreme power-up armed");
            LuckyOutcome::Armed
        } else {
            LuckyOutcome::Counted(self.lucky_collisions)
        }
    }

    /// A contact with anything but a LuckyFish breaks the streak.
    pub fn break_streak(&mut self) {
        self.lucky_collisions = 0;
    }

    /// Advance the window; returns `true` on the frame it expires.
    pub fn tick(&mut self, delta: f64) -> bool {
        if !self.active {
            return false;
        }
        self.timer += delta;
        if self.timer >= EXTREME_POWER_UP_LIMIT {
            self.active = false;
            self.timer = 0.0;
            self.fire_timer = 0.0;
            debug!("extreme power-up expired");
            return true;
        }
        false
    }

    /// Advance the auto-fire clock; returns `true` when a fan is due.
    pub fn fire_due(&mut self, delta: f64) -> bool {
        if !self.active {
            return false;
        }
        self.fire_timer += delta;
        if self.fire_timer >= EXTREME_FIRE_INTERVAL {
            self.fire_timer = 0.0;
            true
        } else {
            false
        }
    }
}
