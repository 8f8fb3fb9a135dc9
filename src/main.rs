mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{error, info};
use rand::thread_rng;

use extreme_fishes::audio::{Sound, SoundPlayer};
use extreme_fishes::compute::{GameConfig, GameState};
use extreme_fishes::entities::Difficulty;
use extreme_fishes::input::Key;
use extreme_fishes::storage::FileStore;

const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Frames a key stays held after its last press or repeat, for terminals
/// that never report releases.
const HOLD_WINDOW: u64 = 4;

fn is_held(last_seen: &HashMap<KeyCode, u64>, code: &KeyCode, frame: u64) -> bool {
    last_seen
        .get(code)
        .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
}

/// Terminal keys mirrored into each logical key.
const BINDINGS: [(Key, &[KeyCode]); 4] = [
    (Key::Up, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
    (Key::Down, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
    (Key::Fire, &[KeyCode::Char(' ')]),
    (Key::Special, &[KeyCode::Char('x'), KeyCode::Char('X')]),
];

fn any_held(last_seen: &HashMap<KeyCode, u64>, codes: &[KeyCode], frame: u64) -> bool {
    codes.iter().any(|code| is_held(last_seen, code, frame))
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal has no mixer; sounds go to the log.
struct LogSound;

impl SoundPlayer for LogSound {
    fn play(&mut self, sound: Sound) -> std::io::Result<()> {
        info!("sound: {}", sound.name());
        Ok(())
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let mid_col = width / 2;
    let mid_row = height / 2;
    let left = mid_col.saturating_sub(10);
    let centred = |text: &str| mid_col.saturating_sub(text.chars().count() as u16 / 2);

    let title = "><((°>  EXTREME  FISHES  <°))><";
    put(out, centred(title), mid_row.saturating_sub(6), Color::Cyan, title)?;
    if high_score > 0 {
        let best = format!("Best Score: {}", high_score);
        put(out, centred(&best), mid_row.saturating_sub(5), Color::Yellow, &best)?;
    }
    put(out, left, mid_row.saturating_sub(3), Color::White, "Select difficulty:")?;

    let modes = [
        ('1', "Normal", Color::Green, "Score 80 per level in 30s"),
        ('2', "Difficult", Color::Red, "Survive on 100 HP, bombers incoming"),
    ];
    for (row, (key, label, color, blurb)) in (mid_row.saturating_sub(1)..).zip(modes) {
        put(out, left, row, Color::DarkGrey, &format!("[{}] ", key))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<10}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" - {}", blurb)))?;
    }

    put(
        out,
        left,
        mid_row + 2,
        Color::DarkGrey,
        "Ram a lucky fish <$>< for power; three in a row goes EXTREME.",
    )?;
    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Normal)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Difficult)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Plays one run.  `Ok(true)` quits the program, `Ok(false)` returns to the menu.
///
/// Keys are tracked by the frame they were last seen; each frame the fresh
/// ones are mirrored into the game's held-key set, so fire and movement can
/// be held together.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut last_seen: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    last_seen.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            state.full_reset();
                            return Ok(false);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => state.toggle_pause(),
                        KeyCode::Char('m') | KeyCode::Char('M') => state.toggle_sound(),
                        KeyCode::Char('n') | KeyCode::Char('N') => {
                            state.next_level();
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    last_seen.insert(code, frame);
                }
                KeyEventKind::Release => {
                    last_seen.remove(&code);
                }
            }
        }

        for (key, codes) in BINDINGS {
            if any_held(&last_seen, codes, frame) {
                state.press_key(key);
            } else {
                state.release_key(key);
            }
        }

        let now = started.elapsed().as_secs_f64() * 1000.0;
        state.frame(now, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &state.snapshot(), width, height)?;

        let elapsed = frame_start.elapsed();
        if let Some(rest) = FRAME_BUDGET.checked_sub(elapsed) {
            thread::sleep(rest);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    if let Err(e) = simple_logging::log_to_file("extreme-fishes.log", log::LevelFilter::Info) {
        eprintln!("Failed to open log file: {}", e);
    }
    info!("Starting extreme fishes.");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without support fall back to
    // the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("Exiting.");
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let store = FileStore::in_home();
    info!("High score file: {}", store.path().display());
    let mut state = GameState::new(GameConfig::default(), Box::new(store), Box::new(LogSound));

    loop {
        match show_menu(out, rx, state.scoring.high_score)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                match difficulty {
                    Difficulty::Normal => state.set_difficulty_normal(),
                    Difficulty::Difficult => state.set_difficulty_difficult(),
                };
                let quit = game_loop(out, &mut state, rx)?;
                state.full_reset();
                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
