//! The set of logical keys currently held down.
//!
//! Hosts translate key presses, touches and releases into `press` and
//! `release`; the player reads the set once per frame.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Up,
    Down,
    Fire,
    /// Sine-wave volley.
    Special,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeldKeys {
    keys: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        HeldKeys::default()
    }

    /// Returns `false` if the key was already held.
    pub fn press(&mut self, key: Key) -> bool {
        self.keys.insert(key)
    }

    pub fn release(&mut self, key: Key) -> bool {
        self.keys.remove(&key)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        HeldKeys {
            keys: iter.into_iter().collect(),
        }
    }
}
