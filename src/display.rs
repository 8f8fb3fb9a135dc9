//! Terminal rendering of a `Snapshot`.
//!
//! World coordinates are scaled onto the bordered play area.  Nothing here
//! touches the simulation.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use extreme_fishes::compute::Snapshot;
use extreme_fishes::constants::{LEVEL_TIME_LIMIT, WORLD_HEIGHT, WORLD_WIDTH};
use extreme_fishes::entities::{Difficulty, Enemy, EnemyKind, ExplosionKind, ProjectileKind};
use extreme_fishes::scoring::{Outcome, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_AMMO: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_POWERED: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_PROJECTILE_EXTREME: Color = Color::Magenta;
const C_PARTICLE: Color = Color::DarkYellow;
const C_SMOKE: Color = Color::Grey;
const C_FIRE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_MESSAGE: Color = Color::Green;

/// Maps world units onto terminal cells inside the border.
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let cols = self.width.saturating_sub(2) as f64;
        let rows = self.height.saturating_sub(4) as f64;
        let cx = (x / WORLD_WIDTH * cols).floor();
        let cy = (y / WORLD_HEIGHT * rows).floor();
        if cx < 0.0 || cy < 0.0 || cx >= cols || cy >= rows {
            return None;
        }
        Some((cx as u16 + 1, cy as u16 + 2))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot, width: u16, height: u16) -> std::io::Result<()> {
    let view = Viewport { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, snap, width)?;

    for enemy in &snap.enemies {
        draw_enemy(out, &view, enemy)?;
    }
    draw_effects(out, &view, snap)?;
    draw_player(out, &view, snap)?;
    draw_controls_hint(out, height)?;

    if let Some(message) = &snap.level_message {
        draw_centered(out, width, (height / 2).saturating_sub(3), message, C_MESSAGE)?;
    }
    if snap.phase == Phase::Paused {
        draw_centered(out, width, height / 2, "PAUSED", Color::White)?;
    }
    if let Some(outcome) = snap.outcome {
        draw_game_over(out, snap, outcome, width, height)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}  Lv:{:>2}",
        snap.score, snap.high_score, snap.level
    )))?;

    let status = match snap.difficulty {
        Some(Difficulty::Difficult) => {
            out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
            format!("  HP:{:>3}", snap.player_health.round() as i32)
        }
        _ => {
            let left = ((LEVEL_TIME_LIMIT - snap.level_time) / 1000.0).max(0.0).ceil() as u32;
            format!("  Lvl pts:{:>3}  Time:{:>2}s", snap.level_score, left)
        }
    };
    out.queue(Print(&status))?;

    let mut right = format!("Ammo:{:>2}", snap.ammo_rounds);
    if snap.extreme_power_up {
        right = format!("[EXTREME] {}", right);
    } else if snap.power_up {
        right = format!("[POWER] {}", right);
    }
    let rx = width.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, snap: &Snapshot) -> std::io::Result<()> {
    let p = &snap.player;
    let color = if snap.power_up { C_PLAYER_POWERED } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;
    if let Some((x, y)) = view.cell(p.x + p.width * 0.5, p.y + p.height * 0.5) {
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print("<S>"))?;
    }

    for projectile in &p.projectiles {
        if let Some((x, y)) = view.cell(projectile.x, projectile.y) {
            out.queue(cursor::MoveTo(x, y))?;
            match projectile.kind {
                ProjectileKind::Extreme { .. } => {
                    out.queue(style::SetForegroundColor(C_PROJECTILE_EXTREME))?;
                    out.queue(Print("*"))?;
                }
                ProjectileKind::SineWave { .. } => {
                    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
                    out.queue(Print("~"))?;
                }
                ProjectileKind::Standard => {
                    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
                    out.queue(Print("-"))?;
                }
            }
        }
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (sprite, color) = match enemy.kind {
        EnemyKind::Angler1 => ("<°))><", Color::Green),
        EnemyKind::Angler2 => ("<°)))><", Color::DarkGreen),
        EnemyKind::LuckyFish => ("<$><", Color::Yellow),
        EnemyKind::HiveWhale => ("<(((((°>", Color::Blue),
        EnemyKind::Drone => ("<o>", Color::Magenta),
        EnemyKind::SuicideBomber { .. } => ("<!!>", Color::Red),
    };
    if let Some((x, y)) = view.cell(enemy.x, enemy.y + enemy.height * 0.5) {
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(sprite))?;
    }
    Ok(())
}

fn draw_effects<W: Write>(out: &mut W, view: &Viewport, snap: &Snapshot) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PARTICLE))?;
    for particle in &snap.particles {
        if let Some((x, y)) = view.cell(particle.x, particle.y) {
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(Print("."))?;
        }
    }
    for explosion in &snap.explosions {
        let cx = explosion.x + explosion.width * 0.5;
        let cy = explosion.y + explosion.height * 0.5;
        if let Some((x, y)) = view.cell(cx, cy) {
            let (glyph, color) = match explosion.kind {
                ExplosionKind::Smoke => ("░", C_SMOKE),
                ExplosionKind::Fire => ("✹", C_FIRE),
            };
            out.queue(cursor::MoveTo(x, y))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑ ↓ / W S : Move   SPACE : Shoot   X : Wave   P : Pause   M : Sound   R : Reset   Q : Quit",
    ))?;
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    outcome: Outcome,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let (banner, color) = match outcome {
        Outcome::Won => ("║      YOU  WIN      ║", Color::Green),
        Outcome::PlayerDead => ("║    GAME  OVER      ║", Color::Red),
        Outcome::LevelFailed => ("║   LEVEL  FAILED    ║", Color::Red),
    };
    let start = (height / 2).saturating_sub(2);
    draw_centered(out, width, start, "╔════════════════════╗", color)?;
    draw_centered(out, width, start + 1, banner, color)?;
    draw_centered(out, width, start + 2, "╚════════════════════╝", color)?;

    let score_line = format!("Final Score: {:>6}", snap.score);
    draw_centered(out, width, start + 3, &score_line, Color::Yellow)?;

    let best_line = if snap.score >= snap.high_score && snap.score > 0 {
        format!("★ NEW BEST: {:>6} ★", snap.score)
    } else {
        format!("Best Score:  {:>6}", snap.high_score)
    };
    draw_centered(out, width, start + 4, &best_line, Color::DarkGrey)?;
    draw_centered(out, width, start + 5, "R - Play Again  Q - Quit", Color::White)?;
    Ok(())
}
