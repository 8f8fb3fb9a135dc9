use serde::{Deserialize, Serialize};

use crate::constants::{AMMO_INTERVAL, MAX_AMMO};

/// The player's ammunition.
///
/// `current` is fractional because the power-up trickles in a tenth of a
/// round per frame.  It never leaves `0.0..=max`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ammo {
    pub current: f64,
    pub max: f64,
    /// Set once the single shot allowed on an empty pool has been spent.
    pub zero_shot_used: bool,
    pub regen_timer: f64,
}

impl Ammo {
    pub fn new(max: f64) -> Self {
        Ammo {
            current: max,
            max,
            zero_shot_used: false,
            regen_timer: 0.0,
        }
    }

    /// Advance the regeneration clock: one round every `AMMO_INTERVAL` ms.
    pub fn tick(&mut self, delta: f64) {
        if self.regen_timer > AMMO_INTERVAL {
            self.add(1.0);
            self.regen_timer = 0.0;
        } else {
            self.regen_timer += delta;
        }
    }

    pub fn add(&mut self, amount: f64) {
        self.current = (self.current + amount).clamp(0.0, self.max);
        if self.current >= 1.0 {
            self.zero_shot_used = false;
        }
    }

    pub fn refill(&mut self) {
        self.current = self.max;
        self.zero_shot_used = false;
    }

    /// Take `cost` rounds for one shot.
    ///
    /// With too little ammo one last shot is still granted and the pool
    /// bottoms out at zero; after that every request is refused until the
    /// pool holds at least one round again.
    pub fn try_spend(&mut self, cost: f64) -> bool {
        if self.current >= cost {
            self.current -= cost;
            true
        } else if !self.zero_shot_used {
            self.zero_shot_used = true;
            self.current = 0.0;
            true
        } else {
            false
        }
    }

    /// Whole rounds, for display.
    pub fn rounds(&self) -> u32 {
        self.current.floor() as u32
    }
}

impl Default for Ammo {
    fn default() -> Self {
        Ammo::new(MAX_AMMO)
    }
}
