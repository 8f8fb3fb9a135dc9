//! Entity types and their per-kind motion.
//!
//! Every entity is plain data plus an `update` that takes a [`SimContext`]
//! instead of reaching back into the game.  Kinds are tagged enums and the
//! shared behaviour is dispatched with a `match`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::input::{HeldKeys, Key};
use crate::ammo::Ammo;
use crate::power_up::PowerUp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Normal,
    Difficult,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Anything with an axis-aligned bounding box.
pub trait Body {
    fn rect(&self) -> Rect;
}

// ── Shared frame context ──────────────────────────────────────────────────────

/// The slice of game state an entity may read while it moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimContext {
    pub world_width: f64,
    pub world_height: f64,
    /// Global scroll / enemy speed multiplier.
    pub speed: f64,
    pub paused: bool,
    pub frozen: bool,
    pub difficulty: Option<Difficulty>,
    /// Vertical centre of the player, used by homing enemies.
    pub player_center_y: f64,
}

impl Default for SimContext {
    fn default() -> Self {
        SimContext {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            speed: 1.0,
            paused: false,
            frozen: false,
            difficulty: None,
            player_center_y: WORLD_HEIGHT * 0.5,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight shot from a cannon.
    Standard,
    /// Fan shot fired during the extreme power-up: travels along `angle`
    /// from its origin with a sinusoidal sideways wobble.
    Extreme {
        angle: f64,
        origin_x: f64,
        origin_y: f64,
        distance: f64,
        phase: f64,
    },
    /// One section of a sine-wave volley.
    SineWave { base_y: f64, phase: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub damage: i32,
    pub kind: ProjectileKind,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn standard(x: f64, y: f64) -> Self {
        Projectile {
            x,
            y,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            damage: 1,
            kind: ProjectileKind::Standard,
            marked_for_deletion: false,
        }
    }

    pub fn extreme(origin_x: f64, origin_y: f64, angle: f64) -> Self {
        Projectile {
            x: origin_x,
            y: origin_y,
            width: EXTREME_PROJECTILE_SIZE,
            height: EXTREME_PROJECTILE_SIZE,
            damage: 2,
            kind: ProjectileKind::Extreme {
                angle,
                origin_x,
                origin_y,
                distance: 0.0,
                phase: 0.0,
            },
            marked_for_deletion: false,
        }
    }

    pub fn sine_wave(x: f64, y: f64, phase: f64) -> Self {
        Projectile {
            x,
            y,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            damage: 1,
            kind: ProjectileKind::SineWave { base_y: y, phase },
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self, ctx: &SimContext) {
        match &mut self.kind {
            ProjectileKind::Standard => {
                self.x += PROJECTILE_SPEED;
                if self.x > ctx.world_width * PROJECTILE_RANGE {
                    self.marked_for_deletion = true;
                }
            }
            ProjectileKind::Extreme {
                angle,
                origin_x,
                origin_y,
                distance,
                phase,
            } => {
                *distance += EXTREME_PROJECTILE_SPEED;
                *phase += EXTREME_WAVE_FREQUENCY;
                let wobble = phase.sin() * EXTREME_WAVE_AMPLITUDE;
                // Wobble is perpendicular to the direction of travel.
                self.x = *origin_x + angle.cos() * *distance - angle.sin() * wobble;
                self.y = *origin_y + angle.sin() * *distance + angle.cos() * wobble;
                if self.x > ctx.world_width
                    || self.x + self.width < 0.0
                    || self.y > ctx.world_height
                    || self.y + self.height < 0.0
                {
                    self.marked_for_deletion = true;
                }
            }
            ProjectileKind::SineWave { base_y, phase } => {
                self.x += PROJECTILE_SPEED;
                *phase += SINE_WAVE_FREQUENCY;
                self.y = *base_y + phase.sin() * SINE_WAVE_AMPLITUDE;
                if self.x > ctx.world_width * SINE_WAVE_RANGE {
                    self.marked_for_deletion = true;
                }
            }
        }
    }
}

impl Body for Projectile {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_y: f64,
    pub max_speed: f64,
    /// Time accumulated towards the next held-fire shot.
    pub shoot_timer: f64,
    pub power_up: PowerUp,
    pub projectiles: Vec<Projectile>,
}

/// What the player did during one `Player::update`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerActions {
    pub shots_fired: u32,
    pub power_up_expired: bool,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed_y: 0.0,
            max_speed: PLAYER_MAX_SPEED,
            shoot_timer: SHOOT_INTERVAL,
            power_up: PowerUp::default(),
            projectiles: Vec::new(),
        }
    }

    /// Move, run the power-up clock and fire whatever the held keys ask for.
    ///
    /// Projectiles are advanced here but not removed; the game sweeps them
    /// after collisions have been resolved.
    pub fn update(
        &mut self,
        delta: f64,
        ctx: &SimContext,
        keys: &HeldKeys,
        ammo: &mut Ammo,
    ) -> PlayerActions {
        let mut actions = PlayerActions::default();

        if ctx.frozen {
            self.speed_y = 0.0;
        } else if keys.contains(Key::Up) {
            self.speed_y = -self.max_speed;
        } else if keys.contains(Key::Down) {
            self.speed_y = self.max_speed;
        } else {
            self.speed_y = 0.0;
        }
        self.y += self.speed_y;

        let lowest = ctx.world_height - self.height * 0.5;
        let highest = -self.height * 0.5;
        self.y = self.y.clamp(highest, lowest);

        for projectile in &mut self.projectiles {
            projectile.update(ctx);
        }

        if self.power_up.active {
            if self.power_up.tick(delta) {
                actions.power_up_expired = true;
            } else {
                ammo.add(POWER_UP_AMMO_PER_FRAME);
            }
        }

        self.shoot_timer = (self.shoot_timer + delta).min(SHOOT_INTERVAL);
        if !ctx.frozen && self.shoot_timer >= SHOOT_INTERVAL {
            let fired = if keys.contains(Key::Fire) {
                self.shoot_top(ammo)
            } else if keys.contains(Key::Special) {
                self.fire_sine_wave(ammo)
            } else {
                false
            };
            if fired {
                self.shoot_timer = 0.0;
                actions.shots_fired += 1;
            }
        }

        actions
    }

    /// Fire the top cannon, plus the bottom cannon while powered up.
    /// Returns `false` when the ammo pool refused the shot.
    pub fn shoot_top(&mut self, ammo: &mut Ammo) -> bool {
        if !ammo.try_spend(1.0) {
            return false;
        }
        self.projectiles.push(Projectile::standard(
            self.x + TOP_CANNON.0,
            self.y + TOP_CANNON.1,
        ));
        if self.power_up.active {
            self.shoot_bottom();
        }
        true
    }

    fn shoot_bottom(&mut self) {
        self.projectiles.push(Projectile::standard(
            self.x + BOTTOM_CANNON.0,
            self.y + BOTTOM_CANNON.1,
        ));
    }

    /// Fire a volley of sine-wave shots spread down the player's height.
    pub fn fire_sine_wave(&mut self, ammo: &mut Ammo) -> bool {
        if !ammo.try_spend(SINE_WAVE_AMMO_COST) {
            return false;
        }
        let step = self.height / SINE_WAVE_SECTIONS as f64;
        for i in 0..SINE_WAVE_SECTIONS {
            self.projectiles.push(Projectile::sine_wave(
                self.x + TOP_CANNON.0,
                self.y + step * i as f64,
                i as f64,
            ));
        }
        true
    }

    /// Fire the extreme fan: `EXTREME_FAN_SIZE` shots evenly spanning
    /// −π/2..=π/2 from the top cannon.  Costs no ammo.
    pub fn fire_extreme_fan(&mut self) {
        let origin_x = self.x + TOP_CANNON.0;
        let origin_y = self.y + self.height * 0.5;
        let step = std::f64::consts::PI / (EXTREME_FAN_SIZE - 1) as f64;
        for i in 0..EXTREME_FAN_SIZE {
            let angle = -std::f64::consts::FRAC_PI_2 + step * i as f64;
            self.projectiles
                .push(Projectile::extreme(origin_x, origin_y, angle));
        }
    }

    pub fn enter_power_up(&mut self) {
        self.power_up.start();
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Body for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Angler1,
    Angler2,
    LuckyFish,
    HiveWhale,
    Drone,
    /// Overrides the default motion: it also steers towards the player.
    SuicideBomber { homing_speed: f64 },
}

impl EnemyKind {
    pub fn suicide_bomber() -> Self {
        EnemyKind::SuicideBomber {
            homing_speed: SUICIDE_BOMBER_HOMING,
        }
    }

    fn size(&self) -> (f64, f64) {
        match self {
            EnemyKind::Angler1 => ANGLER1_SIZE,
            EnemyKind::Angler2 => ANGLER2_SIZE,
            EnemyKind::LuckyFish => LUCKY_FISH_SIZE,
            EnemyKind::HiveWhale => HIVE_WHALE_SIZE,
            EnemyKind::Drone => DRONE_SIZE,
            EnemyKind::SuicideBomber { .. } => SUICIDE_BOMBER_SIZE,
        }
    }

    fn lives(&self) -> i32 {
        match self {
            EnemyKind::Angler1 => ANGLER1_LIVES,
            EnemyKind::Angler2 => ANGLER2_LIVES,
            EnemyKind::LuckyFish => LUCKY_FISH_LIVES,
            EnemyKind::HiveWhale => HIVE_WHALE_LIVES,
            EnemyKind::Drone => DRONE_LIVES,
            EnemyKind::SuicideBomber { .. } => SUICIDE_BOMBER_LIVES,
        }
    }

    /// Points for a kill: starting lives, except the two fixed-value kinds.
    fn score(&self) -> u32 {
        match self {
            EnemyKind::LuckyFish => LUCKY_FISH_SCORE,
            EnemyKind::SuicideBomber { .. } => SUICIDE_BOMBER_SCORE,
            other => other.lives() as u32,
        }
    }

    fn random_speed_x(&self, rng: &mut impl Rng) -> f64 {
        let roll: f64 = rng.gen();
        match self {
            EnemyKind::HiveWhale => roll * -1.2 - 0.2,
            EnemyKind::Drone => roll * -4.2 - 0.5,
            EnemyKind::SuicideBomber { .. } => roll * -1.0 - 2.5,
            _ => roll * -1.5 - 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed_x: f64,
    pub lives: i32,
    pub score: u32,
    pub kind: EnemyKind,
    pub marked_for_deletion: bool,
}

impl Enemy {
    /// Create an enemy of `kind` at an explicit position.
    pub fn at(kind: EnemyKind, x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let (width, height) = kind.size();
        Enemy {
            x,
            y,
            width,
            height,
            speed_x: kind.random_speed_x(rng),
            lives: kind.lives(),
            score: kind.score(),
            kind,
            marked_for_deletion: false,
        }
    }

    /// Create an enemy at the right edge of the world, at a random height.
    pub fn spawn(kind: EnemyKind, ctx: &SimContext, rng: &mut impl Rng) -> Self {
        let (_, height) = kind.size();
        let span = (ctx.world_height * 0.95 - height).max(0.0);
        let y = rng.gen::<f64>() * span;
        Enemy::at(kind, ctx.world_width, y, rng)
    }

    pub fn is_lucky(&self) -> bool {
        self.kind == EnemyKind::LuckyFish
    }

    pub fn update(&mut self, ctx: &SimContext) {
        match self.kind {
            EnemyKind::SuicideBomber { homing_speed } => {
                self.advance(ctx);
                let center = self.y + self.height * 0.5;
                let gap = ctx.player_center_y - center;
                self.y += gap.clamp(-homing_speed, homing_speed);
            }
            _ => self.advance(ctx),
        }
    }

    fn advance(&mut self, ctx: &SimContext) {
        self.x += self.speed_x - ctx.speed;
        if self.x + self.width < 0.0 {
            self.marked_for_deletion = true;
        }
    }
}

impl Body for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

/// Cosmetic debris thrown out by hits and kills.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub angle: f64,
    pub va: f64,
    pub bounced: u32,
    pub bottom_bounce_boundary: f64,
    pub marked_for_deletion: bool,
}

impl Particle {
    pub fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let size_modifier = rng.gen::<f64>() * 0.5 + 0.5;
        Particle {
            x,
            y,
            size: PARTICLE_SPRITE_SIZE * size_modifier,
            speed_x: rng.gen::<f64>() * 6.0 - 3.0,
            speed_y: rng.gen::<f64>() * -15.0,
            angle: 0.0,
            va: rng.gen::<f64>() * 0.2 - 0.1,
            bounced: 0,
            bottom_bounce_boundary: rng.gen::<f64>() * 80.0 + 60.0,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self, ctx: &SimContext) {
        self.angle += self.va;
        self.speed_y += PARTICLE_GRAVITY;
        self.x -= self.speed_x + ctx.speed;
        self.y += self.speed_y;
        if self.y > ctx.world_height + self.size || self.x < -self.size {
            self.marked_for_deletion = true;
        }
        if self.y > ctx.world_height - self.bottom_bounce_boundary
            && self.bounced < PARTICLE_MAX_BOUNCES
        {
            self.bounced += 1;
            self.speed_y *= -0.5;
        }
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Smoke,
    Fire,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub frame_x: u32,
    pub timer: f64,
    pub interval: f64,
    pub marked_for_deletion: bool,
}

impl Explosion {
    /// Centre a new explosion on (`cx`, `cy`).
    pub fn new(kind: ExplosionKind, cx: f64, cy: f64) -> Self {
        Explosion {
            kind,
            x: cx - EXPLOSION_SIZE * 0.5,
            y: cy - EXPLOSION_SIZE * 0.5,
            width: EXPLOSION_SIZE,
            height: EXPLOSION_SIZE,
            frame_x: 0,
            timer: 0.0,
            interval: 1000.0 / EXPLOSION_FPS,
            marked_for_deletion: false,
        }
    }

    pub fn update(&mut self, delta: f64, ctx: &SimContext) {
        self.x -= ctx.speed;
        if self.timer > self.interval {
            self.frame_x += 1;
            self.timer = 0.0;
        } else {
            self.timer += delta;
        }
        if self.frame_x > EXPLOSION_MAX_FRAME {
            self.marked_for_deletion = true;
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub x: f64,
    pub width: f64,
    pub speed_modifier: f64,
}

impl Layer {
    pub fn new(speed_modifier: f64) -> Self {
        Layer {
            x: 0.0,
            width: LAYER_WIDTH,
            speed_modifier,
        }
    }

    pub fn update(&mut self, ctx: &SimContext) {
        if self.x <= -self.width {
            self.x = 0.0;
        }
        self.x -= ctx.speed * self.speed_modifier;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub layers: Vec<Layer>,
}

impl Background {
    pub fn new() -> Self {
        Background {
            layers: LAYER_SPEED_MODIFIERS.iter().map(|&m| Layer::new(m)).collect(),
        }
    }

    pub fn update(&mut self, ctx: &SimContext) {
        for layer in &mut self.layers {
            layer.update(ctx);
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::new()
    }
}
