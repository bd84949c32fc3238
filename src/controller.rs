//! Screen state machine and the fixed-rate loop.
//!
//! The controller owns the live session (if any), routes each input snapshot
//! to the active screen, runs the Playing tick, and describes every frame as a
//! list of [`DrawDirective`]s for whatever renderer sits outside the crate.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::compute::{new_session, tick_session};
use crate::config::GameConfig;
use crate::entities::{BoundingBox, GameSession, Outcome, Screen, Vector2};
use crate::input::{InputSnapshot, MenuKey};
use crate::scene::{Anchor, DrawDirective, Sprite, TextColor, TextSize};

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
/// Vertical distance between stacked buttons.
const BUTTON_STEP: f32 = 70.0;

const HEALTH_BAR: BoundingBox = BoundingBox::new(10.0, 10.0, 200.0, 20.0);
const HEALTH_BAR_BORDER: f32 = 2.0;
/// Offset of the score label from the right edge.
const SCORE_INSET: f32 = 150.0;
const OVERLAY_ALPHA: u8 = 128;

const TUTORIAL_TOP: f32 = 100.0;
const TUTORIAL_LINE_STEP: f32 = 40.0;
const TUTORIAL_DISMISS: &str = "Click anywhere to return";
const TUTORIAL_LINES: &[&str] = &[
    "Welcome to Space Shooter!",
    "",
    "Controls:",
    "- Use LEFT/RIGHT arrows to move",
    "- Press SPACE to shoot",
    "",
    "Objective:",
    "- Destroy all enemy ships",
    "- Avoid enemy bullets",
    "",
    TUTORIAL_DISMISS,
];

// ── Buttons ───────────────────────────────────────────────────────────────────

/// Menu button rectangles, derived once from the screen size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonLayout {
    pub start: BoundingBox,
    pub tutorial: BoundingBox,
    pub play_again: BoundingBox,
    pub home: BoundingBox,
}

impl ButtonLayout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let x = (screen_width / 2.0).floor() - BUTTON_WIDTH / 2.0;
        let mid = (screen_height / 2.0).floor();
        let button = |y: f32| BoundingBox::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT);
        Self {
            start: button(mid),
            tutorial: button(mid + BUTTON_STEP),
            play_again: button(mid + BUTTON_STEP),
            home: button(mid + 2.0 * BUTTON_STEP),
        }
    }
}

fn clicked(input: &InputSnapshot, button: &BoundingBox) -> bool {
    input.click.is_some_and(|p| button.contains(p))
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct GameController {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    buttons: ButtonLayout,
    pointer: Option<Vector2>,
    rng: StdRng,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Seeding RNG with {seed}");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self {
            buttons: ButtonLayout::new(config.screen_width, config.screen_height),
            config,
            screen: Screen::Start,
            session: None,
            pointer: None,
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn buttons(&self) -> &ButtonLayout {
        &self.buttons
    }

    /// Result of the finished session, while the finish screen is shown.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.screen {
            Screen::Finished => self.session.as_ref().map(GameSession::outcome),
            _ => None,
        }
    }

    /// Advance one tick: menu input first, then the Playing simulation.
    /// Input that means nothing on the current screen is ignored.
    pub fn step(&mut self, input: &InputSnapshot, now_ms: u64) {
        if input.pointer.is_some() {
            self.pointer = input.pointer;
        }
        self.handle_menu(input, now_ms);

        if self.screen != Screen::Playing {
            return;
        }
        let ended = match self.session.as_mut() {
            Some(session) => tick_session(session, input, now_ms, &self.config),
            None => false,
        };
        if ended {
            self.finish();
        }
    }

    fn handle_menu(&mut self, input: &InputSnapshot, now_ms: u64) {
        match self.screen {
            Screen::Start => {
                if clicked(input, &self.buttons.start) || input.menu == Some(MenuKey::Primary) {
                    self.start_session(now_ms);
                } else if clicked(input, &self.buttons.tutorial)
                    || input.menu == Some(MenuKey::Secondary)
                {
                    self.transition(Screen::Tutorial);
                }
            }
            Screen::Tutorial => {
                if input.click.is_some() || input.menu.is_some() {
                    self.transition(Screen::Start);
                }
            }
            Screen::Playing => {}
            Screen::Finished => {
                if clicked(input, &self.buttons.play_again)
                    || input.menu == Some(MenuKey::Primary)
                {
                    self.start_session(now_ms);
                } else if clicked(input, &self.buttons.home)
                    || input.menu == Some(MenuKey::Secondary)
                {
                    self.session = None;
                    self.transition(Screen::Start);
                }
            }
        }
    }

    fn start_session(&mut self, now_ms: u64) {
        self.session = Some(new_session(&self.config, now_ms, &mut self.rng));
        self.transition(Screen::Playing);
    }

    fn finish(&mut self) {
        self.transition(Screen::Finished);
        if let Some(session) = &self.session {
            log::info!(
                "Game finished: {:?}, score {}",
                session.outcome(),
                session.score
            );
        }
    }

    fn transition(&mut self, to: Screen) {
        log::info!("Screen {:?} -> {:?}", self.screen, to);
        self.screen = to;
    }

    fn hovered(&self, button: &BoundingBox) -> bool {
        self.pointer.is_some_and(|p| button.contains(p))
    }

    fn button(&self, label: &'static str, bounds: BoundingBox) -> DrawDirective {
        DrawDirective::Button {
            label,
            bounds,
            highlighted: self.hovered(&bounds),
        }
    }

    // ── Frame composition ─────────────────────────────────────────────────────

    /// Describe the current frame, back to front.
    pub fn draw(&self) -> Vec<DrawDirective> {
        let w = self.config.screen_width;
        let h = self.config.screen_height;
        let mut frame = vec![DrawDirective::Background];

        match self.screen {
            Screen::Start => {
                frame.push(text(
                    "SPACE SHOOTER",
                    Vector2::new(w / 2.0, h / 3.0),
                    Anchor::Center,
                    TextSize::Title,
                    TextColor::Primary,
                ));
                frame.push(self.button("Start", self.buttons.start));
                frame.push(self.button("Tutorial", self.buttons.tutorial));
            }
            Screen::Tutorial => {
                for (i, line) in TUTORIAL_LINES.iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let color = if *line == TUTORIAL_DISMISS {
                        TextColor::Accent
                    } else {
                        TextColor::Primary
                    };
                    frame.push(text(
                        line,
                        Vector2::new(w / 2.0, TUTORIAL_TOP + i as f32 * TUTORIAL_LINE_STEP),
                        Anchor::Center,
                        TextSize::Body,
                        color,
                    ));
                }
            }
            Screen::Playing => {
                if let Some(session) = &self.session {
                    draw_session(session, &mut frame);
                }
            }
            Screen::Finished => {
                frame.push(DrawDirective::Overlay {
                    alpha: OVERLAY_ALPHA,
                });
                if let Some(session) = &self.session {
                    let title = match session.outcome() {
                        Outcome::Victory => "VICTORY!",
                        Outcome::GameOver => "GAME OVER",
                    };
                    frame.push(text(
                        title,
                        Vector2::new(w / 2.0, h / 2.0 - 50.0),
                        Anchor::Center,
                        TextSize::Title,
                        TextColor::Primary,
                    ));
                    frame.push(text(
                        &format!("Final Score: {}", session.score),
                        Vector2::new(w / 2.0, h / 2.0),
                        Anchor::Center,
                        TextSize::Body,
                        TextColor::Primary,
                    ));
                }
                frame.push(self.button("Play Again", self.buttons.play_again));
                frame.push(self.button("Home", self.buttons.home));
            }
        }
        frame
    }
}

fn text(
    text: &str,
    position: Vector2,
    anchor: Anchor,
    size: TextSize,
    color: TextColor,
) -> DrawDirective {
    DrawDirective::Text {
        text: text.to_string(),
        position,
        anchor,
        size,
        color,
    }
}

fn draw_session(session: &GameSession, frame: &mut Vec<DrawDirective>) {
    let player = &session.player;
    frame.push(DrawDirective::Entity {
        sprite: Sprite::Player,
        bounds: player.entity.bounds(),
    });
    for projectile in &player.projectiles {
        frame.push(DrawDirective::Entity {
            sprite: Sprite::PlayerProjectile,
            bounds: projectile.entity.bounds(),
        });
    }
    for unit in &session.formation.units {
        frame.push(DrawDirective::Entity {
            sprite: Sprite::Enemy,
            bounds: unit.entity.bounds(),
        });
    }
    for projectile in &session.enemy_projectiles {
        frame.push(DrawDirective::Entity {
            sprite: Sprite::EnemyProjectile,
            bounds: projectile.entity.bounds(),
        });
    }

    frame.push(text(
        &format!("Score: {}", session.score),
        Vector2::new(session.screen_width - SCORE_INSET, 10.0),
        Anchor::TopLeft,
        TextSize::Body,
        TextColor::Primary,
    ));
    frame.push(DrawDirective::HealthBar {
        bounds: HEALTH_BAR,
        border: HEALTH_BAR_BORDER,
        fill: player.health as f32 / player.max_health as f32,
    });
}

// ── Loop ──────────────────────────────────────────────────────────────────────

/// Supplies one input snapshot per tick.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Turns a frame's directives into output.
pub trait Renderer {
    type Error;

    fn render(&mut self, frame: &[DrawDirective]) -> Result<(), Self::Error>;
}

/// Run the fixed-rate loop until an input snapshot asks to quit.
///
/// Each iteration polls input, steps the controller at the clock's current
/// time, renders, and then paces to the next frame. A quit request ends the
/// loop after its tick has been simulated and drawn. Returns the number of
/// ticks run.
pub fn run<I, R, C>(
    controller: &mut GameController,
    input: &mut I,
    renderer: &mut R,
    clock: &mut C,
) -> Result<u64, R::Error>
where
    I: InputSource,
    R: Renderer,
    C: Clock,
{
    let mut ticks = 0;
    loop {
        let snapshot = input.poll();
        controller.step(&snapshot, clock.now_ms());
        renderer.render(&controller.draw())?;
        ticks += 1;

        if snapshot.quit {
            log::info!("Quit requested after {ticks} ticks");
            return Ok(ticks);
        }
        clock.pace();
    }
}
