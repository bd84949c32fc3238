use std::collections::VecDeque;
use std::convert::Infallible;

use space_shooter::clock::{Clock, TickClock};
use space_shooter::config::GameConfig;
use space_shooter::entities::{Outcome, Screen, Vector2};
use space_shooter::input::{InputSnapshot, MenuKey};
use space_shooter::scene::{DrawDirective, Sprite};
use space_shooter::{run, GameController, InputSource, Renderer};

fn seeded_config() -> GameConfig {
    GameConfig {
        seed: Some(42),
        ..GameConfig::default()
    }
}

fn controller() -> GameController {
    GameController::new(seeded_config())
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn center(b: space_shooter::entities::BoundingBox) -> InputSnapshot {
    let c = b.center();
    InputSnapshot::click_at(c.x, c.y)
}

fn start_game(c: &mut GameController) {
    let click = center(c.buttons().start);
    c.step(&click, 0);
    assert_eq!(c.screen(), Screen::Playing);
    // Quiet enemy triggers so tests decide when shots happen
    for unit in &mut c.session_mut().unwrap().formation.units {
        unit.last_shot_ms = 1_000_000;
    }
}

fn texts(frame: &[DrawDirective]) -> Vec<String> {
    frame
        .iter()
        .filter_map(|d| match d {
            DrawDirective::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn buttons(frame: &[DrawDirective]) -> Vec<(&'static str, bool)> {
    frame
        .iter()
        .filter_map(|d| match d {
            DrawDirective::Button {
                label, highlighted, ..
            } => Some((*label, *highlighted)),
            _ => None,
        })
        .collect()
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[test]
fn button_layout_for_800x600() {
    let c = controller();
    let b = c.buttons();
    assert_eq!((b.start.x, b.start.y), (300.0, 300.0));
    assert_eq!((b.tutorial.x, b.tutorial.y), (300.0, 370.0));
    assert_eq!((b.play_again.x, b.play_again.y), (300.0, 370.0));
    assert_eq!((b.home.x, b.home.y), (300.0, 440.0));
    assert_eq!((b.start.width, b.start.height), (200.0, 50.0));
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn starts_on_start_screen_without_session() {
    let c = controller();
    assert_eq!(c.screen(), Screen::Start);
    assert!(c.session().is_none());
    assert!(c.outcome().is_none());
}

#[test]
fn start_button_creates_session() {
    let mut c = controller();
    start_game(&mut c);
    let session = c.session().unwrap();
    assert_eq!(session.formation.units.len(), 32);
    assert_eq!(session.score, 0);
}

#[test]
fn click_outside_buttons_does_nothing() {
    let mut c = controller();
    c.step(&InputSnapshot::click_at(10.0, 10.0), 0);
    assert_eq!(c.screen(), Screen::Start);
    // Right/bottom edges are outside the button
    c.step(&InputSnapshot::click_at(500.0, 325.0), 0);
    assert_eq!(c.screen(), Screen::Start);
}

#[test]
fn tutorial_round_trip() {
    let mut c = controller();
    let click = center(c.buttons().tutorial);
    c.step(&click, 0);
    assert_eq!(c.screen(), Screen::Tutorial);

    // Any click dismisses, wherever it lands
    c.step(&InputSnapshot::click_at(1.0, 599.0), 16);
    assert_eq!(c.screen(), Screen::Start);
    assert!(c.session().is_none());
}

#[test]
fn menu_keys_drive_start_screen() {
    let mut c = controller();
    c.step(
        &InputSnapshot {
            menu: Some(MenuKey::Secondary),
            ..idle()
        },
        0,
    );
    assert_eq!(c.screen(), Screen::Tutorial);
    c.step(
        &InputSnapshot {
            menu: Some(MenuKey::Primary),
            ..idle()
        },
        0,
    );
    assert_eq!(c.screen(), Screen::Start);
    c.step(
        &InputSnapshot {
            menu: Some(MenuKey::Primary),
            ..idle()
        },
        0,
    );
    assert_eq!(c.screen(), Screen::Playing);
}

#[test]
fn fire_outside_playing_is_ignored() {
    let mut c = controller();
    let fire = InputSnapshot {
        fire: true,
        move_left: true,
        ..idle()
    };
    c.step(&fire, 0);
    assert_eq!(c.screen(), Screen::Start);
    assert!(c.session().is_none());
}

#[test]
fn cleared_formation_finishes_with_victory() {
    let mut c = controller();
    start_game(&mut c);
    c.session_mut().unwrap().formation.units.clear();
    c.step(&idle(), 16);
    assert_eq!(c.screen(), Screen::Finished);
    assert_eq!(c.outcome(), Some(Outcome::Victory));
}

#[test]
fn depleted_health_finishes_with_game_over() {
    let mut c = controller();
    start_game(&mut c);
    c.session_mut().unwrap().player.health = 0;
    c.step(&idle(), 16);
    assert_eq!(c.screen(), Screen::Finished);
    assert_eq!(c.outcome(), Some(Outcome::GameOver));
}

#[test]
fn both_end_conditions_show_victory() {
    let mut c = controller();
    start_game(&mut c);
    {
        let session = c.session_mut().unwrap();
        session.player.health = 0;
        session.formation.units.clear();
    }
    c.step(&idle(), 16);
    assert_eq!(c.outcome(), Some(Outcome::Victory));
}

#[test]
fn finished_screen_freezes_session() {
    let mut c = controller();
    start_game(&mut c);
    c.session_mut().unwrap().player.health = 0;
    c.step(&idle(), 16);
    let tick = c.session().unwrap().tick;

    let fire = InputSnapshot {
        fire: true,
        move_right: true,
        ..idle()
    };
    c.step(&fire, 5_000);
    let session = c.session().unwrap();
    assert_eq!(session.tick, tick);
    assert!(session.player.projectiles.is_empty());
}

#[test]
fn play_again_starts_fresh_session() {
    let mut c = controller();
    start_game(&mut c);
    {
        let session = c.session_mut().unwrap();
        session.score = 12;
        session.player.health = 0;
    }
    c.step(&idle(), 16);
    let click = center(c.buttons().play_again);
    c.step(&click, 32);
    assert_eq!(c.screen(), Screen::Playing);
    let session = c.session().unwrap();
    assert_eq!(session.score, 0);
    assert_eq!(session.player.health, 150);
    assert_eq!(session.formation.units.len(), 32);
}

#[test]
fn home_discards_session() {
    let mut c = controller();
    start_game(&mut c);
    c.session_mut().unwrap().formation.units.clear();
    c.step(&idle(), 16);
    let click = center(c.buttons().home);
    c.step(&click, 32);
    assert_eq!(c.screen(), Screen::Start);
    assert!(c.session().is_none());
}

#[test]
fn same_seed_same_formation_timers() {
    let mut a = controller();
    let mut b = controller();
    let click = center(a.buttons().start);
    a.step(&click, 0);
    b.step(&click, 0);
    let timers = |c: &GameController| -> Vec<i64> {
        c.session()
            .unwrap()
            .formation
            .units
            .iter()
            .map(|u| u.last_shot_ms)
            .collect()
    };
    assert_eq!(timers(&a), timers(&b));
}

// ── Frame composition ─────────────────────────────────────────────────────────

#[test]
fn start_frame_has_title_and_buttons() {
    let c = controller();
    let frame = c.draw();
    assert_eq!(frame[0], DrawDirective::Background);
    assert_eq!(texts(&frame), vec!["SPACE SHOOTER".to_string()]);
    assert_eq!(buttons(&frame), vec![("Start", false), ("Tutorial", false)]);
}

#[test]
fn hover_highlights_button() {
    let mut c = controller();
    let hover = InputSnapshot {
        pointer: Some(Vector2::new(400.0, 395.0)),
        ..idle()
    };
    c.step(&hover, 0);
    assert_eq!(buttons(&c.draw()), vec![("Start", false), ("Tutorial", true)]);

    // Pointer is remembered across ticks without new movement
    c.step(&idle(), 16);
    assert_eq!(buttons(&c.draw()), vec![("Start", false), ("Tutorial", true)]);
}

#[test]
fn tutorial_frame_lists_instructions() {
    let mut c = controller();
    c.step(
        &InputSnapshot {
            menu: Some(MenuKey::Secondary),
            ..idle()
        },
        0,
    );
    let lines = texts(&c.draw());
    assert_eq!(lines.first().map(String::as_str), Some("Welcome to Space Shooter!"));
    assert_eq!(lines.last().map(String::as_str), Some("Click anywhere to return"));
    assert!(lines.iter().all(|l| !l.is_empty()));
}

#[test]
fn playing_frame_shows_entities_and_hud() {
    let mut c = controller();
    start_game(&mut c);
    let frame = c.draw();

    let count = |sprite: Sprite| {
        frame
            .iter()
            .filter(|d| matches!(d, DrawDirective::Entity { sprite: s, .. } if *s == sprite))
            .count()
    };
    assert_eq!(count(Sprite::Player), 1);
    assert_eq!(count(Sprite::Enemy), 32);
    assert!(texts(&frame).contains(&"Score: 0".to_string()));

    let fill = frame.iter().find_map(|d| match d {
        DrawDirective::HealthBar { fill, .. } => Some(*fill),
        _ => None,
    });
    assert_eq!(fill, Some(1.0));
}

#[test]
fn health_bar_tracks_damage() {
    let mut c = controller();
    start_game(&mut c);
    c.session_mut().unwrap().player.health = 75;
    let fill = c.draw().iter().find_map(|d| match d {
        DrawDirective::HealthBar { fill, .. } => Some(*fill),
        _ => None,
    });
    assert_eq!(fill, Some(0.5));
}

#[test]
fn finished_frame_shows_result_and_score() {
    let mut c = controller();
    start_game(&mut c);
    {
        let session = c.session_mut().unwrap();
        session.score = 7;
        session.player.health = 0;
    }
    c.step(&idle(), 16);
    let frame = c.draw();
    assert!(frame.contains(&DrawDirective::Overlay { alpha: 128 }));
    let lines = texts(&frame);
    assert!(lines.contains(&"GAME OVER".to_string()));
    assert!(lines.contains(&"Final Score: 7".to_string()));
    assert_eq!(buttons(&frame), vec![("Play Again", false), ("Home", false)]);
}

// ── Loop ──────────────────────────────────────────────────────────────────────

struct ScriptedInput {
    script: VecDeque<InputSnapshot>,
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.script.pop_front().unwrap_or(InputSnapshot {
            quit: true,
            ..InputSnapshot::default()
        })
    }
}

#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    last: Vec<DrawDirective>,
}

impl Renderer for RecordingRenderer {
    type Error = Infallible;

    fn render(&mut self, frame: &[DrawDirective]) -> Result<(), Infallible> {
        self.frames += 1;
        self.last = frame.to_vec();
        Ok(())
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    type Error = String;

    fn render(&mut self, _frame: &[DrawDirective]) -> Result<(), String> {
        Err("display gone".to_string())
    }
}

#[test]
fn run_loop_ticks_until_quit() {
    let mut c = controller();
    let start = center(c.buttons().start);
    let mut script = VecDeque::from(vec![start]);
    script.extend(std::iter::repeat(idle()).take(9));

    let mut input = ScriptedInput { script };
    let mut renderer = RecordingRenderer::default();
    let mut clock = TickClock::new(60);

    let ticks = run(&mut c, &mut input, &mut renderer, &mut clock).unwrap();

    // 10 scripted ticks plus the quitting one, which is still simulated and drawn
    assert_eq!(ticks, 11);
    assert_eq!(renderer.frames, 11);
    assert_eq!(clock.ticks(), 10);
    assert_eq!(c.screen(), Screen::Playing);
    assert_eq!(c.session().unwrap().tick, 11);
    assert!(!renderer.last.is_empty());
}

#[test]
fn run_loop_stops_on_immediate_quit() {
    let mut c = controller();
    let mut input = ScriptedInput {
        script: VecDeque::new(),
    };
    let mut renderer = RecordingRenderer::default();
    let mut clock = TickClock::new(60);
    assert_eq!(run(&mut c, &mut input, &mut renderer, &mut clock).unwrap(), 1);
    assert_eq!(clock.now_ms(), 0);
}

#[test]
fn run_loop_propagates_render_errors() {
    let mut c = controller();
    let mut input = ScriptedInput {
        script: VecDeque::from(vec![idle(); 5]),
    };
    let mut clock = TickClock::new(60);
    let err = run(&mut c, &mut input, &mut FailingRenderer, &mut clock).unwrap_err();
    assert_eq!(err, "display gone");
    assert_eq!(clock.ticks(), 0);
}
