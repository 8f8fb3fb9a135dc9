//! Fire-and-forget sound notifications.

use std::io;

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Shoot,
    PowerUp,
    LevelUp,
    CollectPoints,
    PlayerExplosion,
    DroneAttack,
    LevelFailed,
    ExtremePower,
    WhaleSound,
}

impl Sound {
    /// Asset identifier used by hosts.
    pub fn name(&self) -> &'static str {
        match self {
            Sound::Shoot => "shoot",
            Sound::PowerUp => "powerUp",
            Sound::LevelUp => "levelUp",
            Sound::CollectPoints => "collectpoints",
            Sound::PlayerExplosion => "playerexplosion",
            Sound::DroneAttack => "droneattack",
            Sound::LevelFailed => "levelfailed",
            Sound::ExtremePower => "extremepower",
            Sound::WhaleSound => "whalesound",
        }
    }
}

/// Host-side playback.  Errors are reported but never reach the simulation.
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound) -> io::Result<()>;
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _sound: Sound) -> io::Result<()> {
        Ok(())
    }
}

/// Wraps a `SoundPlayer` with the global mute switch.
pub struct Mixer {
    player: Box<dyn SoundPlayer>,
    pub sound_on: bool,
}

impl Mixer {
    pub fn new(player: Box<dyn SoundPlayer>, sound_on: bool) -> Self {
        Mixer { player, sound_on }
    }

    pub fn play(&mut self, sound: Sound) {
        if !self.sound_on {
            return;
        }
        if let Err(e) = self.player.play(sound) {
            warn!("Failed to play sound {}: {}", sound.name(), e);
        }
    }
}
