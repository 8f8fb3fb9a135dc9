//! Score, level progression and the terminal outcome.
//!
//! This is the bookkeeping half of the game state machine.  It decides what
//! happens (advance, fail, win, death); `GameState` carries out the side
//! effects on entities, speed and sound.

use log::info;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::entities::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    PlayerDead,
    LevelFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    /// A new level has just begun and its banner is still showing.
    LevelTransition,
    Terminal(Outcome),
}

/// What the level clock says once a normal-mode level runs out of time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelVerdict {
    Advance,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    pub score: u32,
    pub level_score: u32,
    pub high_score: u32,
    pub level: u32,
    /// Elapsed time in the current level.
    pub level_time: f64,
    /// Elapsed time in the whole run.
    pub game_time: f64,
    /// Only meaningful in difficult mode; stays full otherwise.
    pub player_health: f64,
    pub game_over: bool,
    pub won: bool,
    pub is_player_dead: bool,
    pub is_level_failed: bool,
    pub level_message: Option<String>,
    pub level_message_timer: f64,
}

impl Scoring {
    pub fn new(high_score: u32) -> Self {
        Scoring {
            score: 0,
            level_score: 0,
            high_score,
            level: 1,
            level_time: 0.0,
            game_time: 0.0,
            player_health: MAX_HEALTH,
            game_over: false,
            won: false,
            is_player_dead: false,
            is_level_failed: false,
            level_message: None,
            level_message_timer: 0.0,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.won {
            Some(Outcome::Won)
        } else if self.is_player_dead {
            Some(Outcome::PlayerDead)
        } else if self.is_level_failed {
            Some(Outcome::LevelFailed)
        } else {
            None
        }
    }

    /// Detect a newly reached terminal state.  The winning score overrides
    /// everything else; returns `None` when already over or still playing.
    pub fn check_terminal(&mut self) -> Option<Outcome> {
        if self.game_over {
            return None;
        }
        if self.score >= WINNING_SCORE {
            self.declare_win();
            return Some(Outcome::Won);
        }
        if self.player_health <= 0.0 {
            self.player_health = 0.0;
            self.is_player_dead = true;
            self.game_over = true;
            self.show_message("Game over!".to_string());
            info!("player died at level {} with score {}", self.level, self.score);
            return Some(Outcome::PlayerDead);
        }
        None
    }

    fn declare_win(&mut self) {
        self.won = true;
        self.game_over = true;
        self.show_message("You win!".to_string());
        info!("run won at level {} with score {}", self.level, self.score);
    }

    pub fn advance_clocks(&mut self, delta: f64, difficulty: Option<Difficulty>) {
        if self.game_over {
            return;
        }
        self.game_time += delta;
        if difficulty == Some(Difficulty::Normal) && !self.is_level_failed {
            self.level_time += delta;
        }
    }

    pub fn tick_message(&mut self, delta: f64) {
        if self.level_message_timer <= 0.0 {
            return;
        }
        self.level_message_timer -= delta;
        if self.level_message_timer <= 0.0 {
            self.level_message_timer = 0.0;
            self.level_message = None;
        }
    }

    pub fn show_message(&mut self, message: String) {
        self.level_message = Some(message);
        self.level_message_timer = LEVEL_MESSAGE_DURATION;
    }

    /// Normal mode only: has the level run out of time, and did it pass?
    pub fn level_verdict(&self) -> Option<LevelVerdict> {
        if self.game_over || self.level_time < LEVEL_TIME_LIMIT {
            return None;
        }
        if self.level_score >= LEVEL_PASS_SCORE {
            Some(LevelVerdict::Advance)
        } else {
            Some(LevelVerdict::Fail)
        }
    }

    /// Move to the next level.  Returns `true` if that ends the run in a win.
    pub fn advance_level(&mut self) -> bool {
        self.level += 1;
        self.level_score = 0;
        self.level_time = 0.0;
        if self.level > MAX_LEVEL {
            self.declare_win();
            return true;
        }
        self.show_message(format!("Level {}!", self.level));
        info!("advanced to level {}", self.level);
        false
    }

    pub fn fail_level(&mut self) {
        self.is_level_failed = true;
        self.game_over = true;
        self.show_message(format!(
            "Level failed! {}/{} points",
            self.level_score, LEVEL_PASS_SCORE
        ));
        info!("level {} failed with {} points", self.level, self.level_score);
    }

    pub fn add_kill(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.level_score = self.level_score.saturating_add(points);
    }

    /// The player ran into an enemy: difficult mode loses health equal to
    /// the enemy's remaining lives, normal mode loses a point.
    pub fn penalize_contact(&mut self, enemy_lives: i32, difficulty: Option<Difficulty>) {
        match difficulty {
            Some(Difficulty::Difficult) => {
                let damage = enemy_lives.max(0) as f64;
                self.player_health = (self.player_health - damage).clamp(0.0, MAX_HEALTH);
            }
            _ => {
                self.score = self.score.saturating_sub(1);
                self.level_score = self.level_score.saturating_sub(1);
            }
        }
    }

    pub fn heal(&mut self) {
        self.player_health = (self.player_health + HEALTH_REWARD).clamp(0.0, MAX_HEALTH);
    }

    /// Returns the new record when the score beats it.
    pub fn update_high_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.score)
        } else {
            None
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring::new(0)
    }
}
