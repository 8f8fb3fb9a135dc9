use extreme_fishes::ammo::Ammo;
use extreme_fishes::constants::*;
use extreme_fishes::entities::{Difficulty, EnemyKind, SimContext};
use extreme_fishes::power_up::{ExtremePowerUp, LuckyOutcome, PowerUp};
use extreme_fishes::scoring::{LevelVerdict, Outcome, Scoring};
use extreme_fishes::spawn::{pick_enemy_kind, SpawnPolicy};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Ammo ──────────────────────────────────────────────────────────────────────

#[test]
fn ammo_starts_full() {
    let ammo = Ammo::default();
    assert_eq!(ammo.current, MAX_AMMO);
    assert_eq!(ammo.rounds(), 50);
}

#[test]
fn ammo_regenerates_one_round_per_interval() {
    let mut ammo = Ammo::new(50.0);
    ammo.current = 0.0;
    // The timer has to exceed the interval before the round is granted.
    for _ in 0..4 {
        ammo.tick(100.0);
    }
    assert_eq!(ammo.current, 0.0);
    ammo.tick(100.0);
    assert_eq!(ammo.current, 1.0);
    assert_eq!(ammo.regen_timer, 0.0);
}

#[test]
fn ammo_never_exceeds_max() {
    let mut ammo = Ammo::new(5.0);
    ammo.add(3.0);
    assert_eq!(ammo.current, 5.0);
    for _ in 0..100 {
        ammo.tick(400.0);
    }
    assert_eq!(ammo.current, 5.0);
}

#[test]
fn empty_pool_grants_one_last_shot() {
    let mut ammo = Ammo::new(50.0);
    ammo.current = 0.5;
    assert!(ammo.try_spend(1.0));
    assert_eq!(ammo.current, 0.0);
    assert!(!ammo.try_spend(1.0));

    // Fractional regeneration is not enough to lift the block.
    ammo.add(0.5);
    assert!(!ammo.try_spend(1.0));

    ammo.add(0.5);
    assert!(ammo.try_spend(1.0));
    assert_eq!(ammo.current, 0.0);
    // The pool emptied by a full-priced shot: the spare shot is available again.
    assert!(ammo.try_spend(1.0));
    assert!(!ammo.try_spend(1.0));
}

#[test]
fn refill_restores_pool_and_spare_shot() {
    let mut ammo = Ammo::new(50.0);
    ammo.current = 0.0;
    ammo.try_spend(1.0);
    ammo.refill();
    assert_eq!(ammo.current, 50.0);
    assert!(!ammo.zero_shot_used);
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn power_up_lasts_ten_seconds() {
    let mut power = PowerUp::default();
    power.start();
    assert!(!power.tick(10_001.0));
    assert!(power.active);
    assert!(power.tick(16.0));
    assert!(!power.active);
    assert!(!power.tick(16.0));
}

#[test]
fn lucky_streak_arms_extreme() {
    let mut extreme = ExtremePowerUp::default();
    assert_eq!(extreme.register_lucky(3), LuckyOutcome::Counted(1));
    assert_eq!(extreme.register_lucky(3), LuckyOutcome::Counted(2));
    assert_eq!(extreme.register_lucky(3), LuckyOutcome::Armed);
    assert!(extreme.active);
    assert_eq!(extreme.lucky_collisions, 0);
}

#[test]
fn lucky_contact_while_active_refreshes() {
    let mut extreme = ExtremePowerUp::default();
    for _ in 0..3 {
        extreme.register_lucky(3);
    }
    extreme.tick(4_000.0);
    assert_eq!(extreme.register_lucky(3), LuckyOutcome::Refreshed);
    assert_eq!(extreme.timer, 0.0);
    assert_eq!(extreme.lucky_collisions, 0);

    // The refreshed window runs a full five seconds again.
    assert!(!extreme.tick(4_999.0));
    assert!(extreme.tick(1.0));
    assert!(!extreme.active);
}

#[test]
fn broken_streak_starts_over() {
    let mut extreme = ExtremePowerUp::default();
    extreme.register_lucky(4);
    extreme.register_lucky(4);
    extreme.break_streak();
    assert_eq!(extreme.register_lucky(4), LuckyOutcome::Counted(1));
}

#[test]
fn extreme_fires_every_fifty_ms() {
    let mut extreme = ExtremePowerUp::default();
    assert!(!extreme.fire_due(100.0));
    for _ in 0..3 {
        extreme.register_lucky(3);
    }
    // Armed with a fan ready to go.
    assert!(extreme.fire_due(0.0));
    assert!(!extreme.fire_due(30.0));
    assert!(extreme.fire_due(20.0));
}

#[test]
fn required_lucky_contacts_depend_on_difficulty() {
    assert_eq!(required_lucky_collisions(Difficulty::Normal), 3);
    assert_eq!(required_lucky_collisions(Difficulty::Difficult), 4);
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[test]
fn new_scoring_starts_at_level_one() {
    let scoring = Scoring::new(250);
    assert_eq!(scoring.level, 1);
    assert_eq!(scoring.high_score, 250);
    assert_eq!(scoring.player_health, MAX_HEALTH);
    assert_eq!(scoring.outcome(), None);
}

#[test]
fn level_verdict_waits_for_time_limit() {
    let mut scoring = Scoring::default();
    scoring.level_score = 100;
    scoring.level_time = 29_999.0;
    assert_eq!(scoring.level_verdict(), None);
    scoring.level_time = 30_000.0;
    assert_eq!(scoring.level_verdict(), Some(LevelVerdict::Advance));
    scoring.level_score = 79;
    assert_eq!(scoring.level_verdict(), Some(LevelVerdict::Fail));
}

#[test]
fn level_clock_runs_only_in_normal_mode() {
    let mut scoring = Scoring::default();
    scoring.advance_clocks(100.0, Some(Difficulty::Difficult));
    assert_eq!(scoring.level_time, 0.0);
    assert_eq!(scoring.game_time, 100.0);

    scoring.advance_clocks(100.0, Some(Difficulty::Normal));
    assert_eq!(scoring.level_time, 100.0);

    scoring.game_over = true;
    scoring.advance_clocks(100.0, Some(Difficulty::Normal));
    assert_eq!(scoring.game_time, 200.0);
}

#[test]
fn failing_a_level_sets_one_loss_flag() {
    let mut scoring = Scoring::default();
    scoring.level_score = 40;
    scoring.fail_level();
    assert!(scoring.is_level_failed);
    assert!(scoring.game_over);
    assert!(!scoring.is_player_dead);
    assert_eq!(scoring.outcome(), Some(Outcome::LevelFailed));
    assert_eq!(scoring.check_terminal(), None);
}

#[test]
fn advance_level_resets_level_counters() {
    let mut scoring = Scoring::default();
    scoring.level_score = 90;
    scoring.level_time = 30_000.0;
    assert!(!scoring.advance_level());
    assert_eq!(scoring.level, 2);
    assert_eq!(scoring.level_score, 0);
    assert_eq!(scoring.level_time, 0.0);
    assert_eq!(scoring.level_message.as_deref(), Some("Level 2!"));
    assert_eq!(scoring.level_message_timer, LEVEL_MESSAGE_DURATION);
}

#[test]
fn winning_score_beats_dead_player() {
    let mut scoring = Scoring::default();
    scoring.score = WINNING_SCORE;
    scoring.player_health = 0.0;
    assert_eq!(scoring.check_terminal(), Some(Outcome::Won));
    assert!(scoring.won);
    assert!(!scoring.is_player_dead);
    // Only reported once.
    assert_eq!(scoring.check_terminal(), None);
}

#[test]
fn contact_penalty_by_mode() {
    let mut scoring = Scoring::default();
    scoring.penalize_contact(4, Some(Difficulty::Difficult));
    assert_eq!(scoring.player_health, 96.0);

    scoring.penalize_contact(500, Some(Difficulty::Difficult));
    assert_eq!(scoring.player_health, 0.0);

    let mut scoring = Scoring::default();
    scoring.penalize_contact(4, Some(Difficulty::Normal));
    assert_eq!(scoring.score, 0);
    scoring.add_kill(5);
    scoring.penalize_contact(4, Some(Difficulty::Normal));
    assert_eq!((scoring.score, scoring.level_score), (4, 4));
}

#[test]
fn heal_caps_at_max_health() {
    let mut scoring = Scoring::default();
    scoring.player_health = 98.5;
    scoring.heal();
    assert_eq!(scoring.player_health, MAX_HEALTH);
}

#[test]
fn high_score_only_rises() {
    let mut scoring = Scoring::new(100);
    scoring.score = 80;
    assert_eq!(scoring.update_high_score(), None);
    scoring.score = 101;
    assert_eq!(scoring.update_high_score(), Some(101));
    assert_eq!(scoring.update_high_score(), None);
}

#[test]
fn level_message_expires() {
    let mut scoring = Scoring::default();
    scoring.show_message("Level 3!".to_string());
    scoring.tick_message(1_999.0);
    assert!(scoring.level_message.is_some());
    scoring.tick_message(1.0);
    assert!(scoring.level_message.is_none());
}

#[test]
fn normal_pacing_uses_completed_level() {
    assert!((normal_level_speed(1) - 1.2).abs() < 1e-9);
    assert!((normal_level_speed(20) - 2.0).abs() < 1e-9);
    assert!((normal_enemy_interval(1) - 1_425.0).abs() < 1e-9);
    assert_eq!(normal_enemy_interval(7), normal_enemy_interval(5));
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn enemy_kind_weights() {
    assert_eq!(pick_enemy_kind(0.0), EnemyKind::Angler1);
    assert_eq!(pick_enemy_kind(0.29), EnemyKind::Angler1);
    assert_eq!(pick_enemy_kind(0.3), EnemyKind::Angler2);
    assert_eq!(pick_enemy_kind(0.65), EnemyKind::HiveWhale);
    assert_eq!(pick_enemy_kind(0.7), EnemyKind::LuckyFish);
    assert_eq!(pick_enemy_kind(0.99), EnemyKind::LuckyFish);
}

#[test]
fn spawn_waits_for_interval() {
    let ctx = SimContext::default();
    let mut rng = seeded_rng();
    let mut spawner = SpawnPolicy::default();

    assert!(spawner.try_spawn_enemy(1_000.0, &ctx, &mut rng).is_empty());
    assert!(spawner.try_spawn_enemy(600.0, &ctx, &mut rng).is_empty());
    assert_eq!(spawner.enemy_timer, 1_600.0);

    let spawned = spawner.try_spawn_enemy(16.0, &ctx, &mut rng);
    assert!(!spawned.is_empty() && spawned.len() <= 2);
    assert_eq!(spawned[0].x, ctx.world_width);
    assert!(spawned.iter().skip(1).all(|e| e.kind == EnemyKind::Drone));
    assert_eq!(spawner.enemy_timer, 0.0);
}

#[test]
fn escorts_join_some_spawns() {
    let ctx = SimContext::default();
    let mut rng = seeded_rng();
    let mut spawner = SpawnPolicy::new(0.0);
    let mut escorted = 0;
    let mut total = 0;
    for _ in 0..2_000 {
        let spawned = spawner.try_spawn_enemy(1.0, &ctx, &mut rng);
        if !spawned.is_empty() {
            total += 1;
            if spawned.len() == 2 {
                escorted += 1;
            }
        }
    }
    assert_eq!(total, 1_000);
    assert!(escorted > 200 && escorted < 400);
}

#[test]
fn bomber_every_fifteen_seconds() {
    let ctx = SimContext::default();
    let mut rng = seeded_rng();
    let mut spawner = SpawnPolicy::default();
    assert!(spawner.try_spawn_bomber(14_999.0, &ctx, &mut rng).is_none());

    let bomber = spawner.try_spawn_bomber(15_000.0, &ctx, &mut rng);
    assert!(matches!(
        bomber.map(|b| b.kind),
        Some(EnemyKind::SuicideBomber { .. })
    ));
    assert!(spawner.try_spawn_bomber(20_000.0, &ctx, &mut rng).is_none());
    assert!(spawner.try_spawn_bomber(30_000.0, &ctx, &mut rng).is_some());
}
