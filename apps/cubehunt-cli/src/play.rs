//! Headless play: a simulated frame clock driving one session.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cubehunt_common::{ControllerId, Transform};
use cubehunt_input::{InputEvent, InputMapper};
use cubehunt_kernel::{GameConfig, GameSession, ImmersiveSupport, PlayMode};
use cubehunt_persist::HighScoreKeeper;
use cubehunt_render::{
    BackdropError, DebugTextRenderer, Presenter, RecordingScene, Renderer, Scene, TextHud,
    resolve_backdrop, resolve_environment,
};
use cubehunt_tools::{SessionInspector, SessionSummary};
use glam::{Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Where the simulated player stands in immersive mode.
const HEAD_POSITION: Vec3 = Vec3::new(0.0, 1.6, 0.0);

/// One scripted input, fired once the simulated clock reaches `at`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub at: f64,
    pub event: InputEvent,
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let mut steps: Vec<ScriptStep> = serde_json::from_str(&text)
        .with_context(|| format!("parsing script {}", path.display()))?;
    steps.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(steps)
}

/// Simulated player that shoots at alive targets on a reaction timer.
pub struct AutoAim {
    rng: StdRng,
    accuracy: f64,
    reaction_secs: f64,
    next_shot: f64,
}

impl AutoAim {
    pub fn new(seed: u64, accuracy: f64, reaction_secs: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            accuracy: accuracy.clamp(0.0, 1.0),
            reaction_secs: reaction_secs.max(0.0),
            next_shot: reaction_secs,
        }
    }

    fn events(&mut self, session: &GameSession, mapper: &InputMapper, now: f64) -> Vec<InputEvent> {
        if now < self.next_shot || !session.game_started() {
            return Vec::new();
        }
        // Nothing to shoot at between rounds.
        let Some(target) = session
            .registry()
            .iter()
            .find(|t| t.is_alive())
            .map(|t| t.position)
        else {
            return Vec::new();
        };
        self.next_shot = now + self.reaction_secs * self.rng.random_range(0.5..1.5);
        let aim_point = Some(target).filter(|_| self.rng.random_bool(self.accuracy));

        match session.mode() {
            PlayMode::Flat => {
                let viewport = mapper.viewport();
                let pixel = match aim_point {
                    Some(point) => viewport.to_pixels(mapper.camera().project(point)),
                    // Bottom edge looks at the floor, well below the target band.
                    None => Vec2::new(
                        self.rng.random_range(0.0..viewport.width.max(1.0)),
                        viewport.height - 1.0,
                    ),
                };
                let event = if self.rng.random_bool(0.5) {
                    InputEvent::Touch {
                        x: pixel.x,
                        y: pixel.y,
                    }
                } else {
                    InputEvent::Pointer {
                        x: pixel.x,
                        y: pixel.y,
                    }
                };
                vec![event]
            }
            PlayMode::Immersive => {
                let direction = aim_point
                    .map(|p| (p - HEAD_POSITION).normalize_or_zero())
                    .filter(|d| *d != Vec3::ZERO)
                    .unwrap_or(Vec3::Y);
                let controller = ControllerId(0);
                vec![
                    InputEvent::ControllerSelectStart {
                        controller,
                        transform: Transform {
                            position: HEAD_POSITION,
                            rotation: Quat::from_rotation_arc(Vec3::NEG_Z, direction),
                        },
                    },
                    InputEvent::ControllerSelectEnd { controller },
                ]
            }
        }
    }
}

/// Source of input for a run.
pub enum Driver {
    Script(VecDeque<ScriptStep>),
    Auto(AutoAim),
}

impl Driver {
    pub fn script(steps: Vec<ScriptStep>) -> Self {
        Self::Script(steps.into())
    }

    fn events_until(&mut self, session: &GameSession, mapper: &InputMapper, now: f64) -> Vec<InputEvent> {
        match self {
            Self::Script(steps) => {
                let mut due = Vec::new();
                while steps.front().is_some_and(|s| s.at <= now) {
                    if let Some(step) = steps.pop_front() {
                        due.push(step.event);
                    }
                }
                due
            }
            Self::Auto(bot) => bot.events(session, mapper, now),
        }
    }
}

pub struct PlayOptions {
    pub duration_secs: f64,
    pub fps: u32,
    pub immersive: ImmersiveSupport,
    pub backdrop: PathBuf,
    pub environment: PathBuf,
}

/// Everything the session talks to, wired together.
pub struct Host {
    session: GameSession,
    keeper: HighScoreKeeper,
    mapper: InputMapper,
    presenter: Presenter,
    scene: RecordingScene,
    hud: TextHud,
}

impl Host {
    pub fn new(config: GameConfig, keeper: HighScoreKeeper, advisory: Option<String>) -> Self {
        let mut session = GameSession::new(config, keeper.high_score());
        if let Some(note) = advisory {
            session.advise(note);
        }
        let presenter = Presenter::for_session(&session);
        Self {
            session,
            keeper,
            mapper: InputMapper::default(),
            presenter,
            scene: RecordingScene::new(),
            hud: TextHud::new(),
        }
    }

    fn input(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::SessionStart => {
                let supported = self
                    .session
                    .immersive_support()
                    .is_some_and(ImmersiveSupport::is_immersive);
                if supported {
                    self.session.enter_immersive();
                } else {
                    self.session
                        .immersive_request_failed("immersive sessions are not supported here");
                }
            }
            InputEvent::SessionEnd => self.session.exit_immersive(),
            _ => {}
        }
        // The mapper drops held controllers on session start and end.
        if let Some(aim) = self.mapper.map(event) {
            let outcome = self.session.handle_aim(aim, now);
            tracing::debug!(?outcome, now, "shot resolved");
        }
    }

    /// Push pending session events to the store, the scene and the HUD.
    fn flush(&mut self, now: f64) -> Vec<String> {
        let events = self.session.drain_events();
        for note in self.keeper.apply(&events) {
            self.session.advise(note);
        }
        self.presenter.present(&events, &mut self.scene, &mut self.hud);
        self.presenter.sync_frame(&self.session, now, &mut self.scene);
        self.hud
            .drain_lines()
            .into_iter()
            .map(|line| format!("[{now:7.2}s] {line}"))
            .collect()
    }
}

/// Result of one run.
pub struct PlayReport {
    pub log: Vec<String>,
    pub summary: SessionSummary,
    pub status: String,
    pub frame: String,
    pub high_score: u32,
    pub persisted: bool,
}

fn load_asset(path: &Path) -> Result<String, BackdropError> {
    if path.is_file() {
        Ok(path.display().to_string())
    } else {
        Err(BackdropError::NotFound(path.display().to_string()))
    }
}

/// Play until the game ends and the menu is back, or time runs out.
pub fn run(host: &mut Host, driver: &mut Driver, opts: &PlayOptions) -> PlayReport {
    host.scene
        .set_background(resolve_backdrop(load_asset(&opts.backdrop)));
    host.scene
        .set_environment(resolve_environment(load_asset(&opts.environment)));
    host.session.report_immersive_support(opts.immersive.clone());
    if opts.immersive.is_immersive() {
        host.input(InputEvent::SessionStart, 0.0);
    }
    host.session.start_game(0.0);
    let mut log = host.flush(0.0);

    let frame = 1.0 / f64::from(opts.fps.max(1));
    let frames = (opts.duration_secs.max(0.0) / frame).ceil() as u64;
    let mut now = 0.0;
    for i in 1..=frames {
        now = i as f64 * frame;
        for event in driver.events_until(&host.session, &host.mapper, now) {
            host.input(event, now);
        }
        host.session.update(now);
        log.extend(host.flush(now));
        if !host.session.game_started() && host.session.menu_visible() {
            tracing::info!(now, "back at the menu, stopping");
            break;
        }
    }
    // Advisories raised by the last flush.
    log.extend(host.flush(now));

    PlayReport {
        log,
        summary: SessionInspector::summary(&host.session),
        status: host.hud.status_line(),
        frame: DebugTextRenderer::new().render(&host.session, now),
        high_score: host.keeper.high_score(),
        persisted: !host.keeper.is_degraded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubehunt_render::{Background, SKY_BLUE};

    fn select_upward(at: f64) -> ScriptStep {
        ScriptStep {
            at,
            event: InputEvent::ControllerSelectStart {
                controller: ControllerId(0),
                transform: Transform {
                    position: HEAD_POSITION,
                    rotation: Quat::from_rotation_arc(Vec3::NEG_Z, Vec3::Y),
                },
            },
        }
    }

    fn options(duration_secs: f64, immersive: ImmersiveSupport) -> PlayOptions {
        PlayOptions {
            duration_secs,
            fps: 60,
            immersive,
            backdrop: PathBuf::from("does/not/exist.jpg"),
            environment: PathBuf::from("does/not/exist.glb"),
        }
    }

    fn host(dir: &Path) -> Host {
        let (keeper, advisory) = HighScoreKeeper::open_dir(dir);
        Host::new(GameConfig::default().with_seed(4), keeper, advisory)
    }

    #[test]
    fn perfect_aim_clears_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        let mut driver = Driver::Auto(AutoAim::new(1, 1.0, 0.5));
        let report = run(&mut host, &mut driver, &options(20.0, ImmersiveSupport::InlineOnly));

        assert!(report.summary.round > 1);
        assert_eq!(report.summary.lives, 3);
        assert!(report.summary.game_started);
        assert!(report.log.iter().any(|l| l.contains("Round 2")));
        assert_eq!(
            host.scene.background(),
            Some(&Background::Color(SKY_BLUE))
        );
        assert_eq!(host.scene.environment(), None);
    }

    #[test]
    fn present_assets_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let sky = dir.path().join("sky.jpg");
        let room = dir.path().join("room.glb");
        std::fs::write(&sky, b"jpg").unwrap();
        std::fs::write(&room, b"glb").unwrap();
        let opts = PlayOptions {
            backdrop: sky.clone(),
            environment: room.clone(),
            ..options(0.1, ImmersiveSupport::InlineOnly)
        };

        let mut host = host(dir.path());
        run(&mut host, &mut Driver::script(Vec::new()), &opts);
        assert_eq!(
            host.scene.background(),
            Some(&Background::Texture(sky.display().to_string()))
        );
        assert_eq!(host.scene.environment(), Some(room.display().to_string().as_str()));
    }

    #[test]
    fn hopeless_aim_ends_game_and_saves_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        let mut driver = Driver::Auto(AutoAim::new(2, 0.0, 0.3));
        let report = run(&mut host, &mut driver, &options(30.0, ImmersiveSupport::Unavailable));

        assert_eq!(report.summary.lives, 0);
        assert!(!report.summary.game_started);
        assert!(host.session.menu_visible());
        assert!(report.log.iter().any(|l| l.contains("Game Over!")));
        assert!(report.log.iter().any(|l| l.contains("WebXR not available")));
        assert!(report.persisted);
    }

    #[test]
    fn immersive_run_uses_controller() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        let mut driver = Driver::Auto(AutoAim::new(3, 1.0, 0.5));
        let report = run(&mut host, &mut driver, &options(5.0, ImmersiveSupport::ImmersiveVr));

        assert_eq!(report.summary.mode, PlayMode::Immersive);
        assert!(report.summary.score > 0);
        assert_eq!(report.summary.lives, 3);
    }

    #[test]
    fn controller_held_across_session_end_fires_in_next_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        // Select-end never arrives for the first press.
        let mut driver = Driver::script(vec![
            select_upward(0.2),
            ScriptStep {
                at: 0.5,
                event: InputEvent::SessionEnd,
            },
            ScriptStep {
                at: 1.0,
                event: InputEvent::SessionStart,
            },
            select_upward(1.5),
        ]);
        let report = run(&mut host, &mut driver, &options(2.0, ImmersiveSupport::ImmersiveVr));

        assert_eq!(report.summary.mode, PlayMode::Immersive);
        assert_eq!(report.summary.lives, 1);
    }

    #[test]
    fn session_end_drops_back_to_flat() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        let mut driver = Driver::script(vec![ScriptStep {
            at: 0.5,
            event: InputEvent::SessionEnd,
        }]);
        let report = run(&mut host, &mut driver, &options(1.0, ImmersiveSupport::ImmersiveVr));

        assert_eq!(report.summary.mode, PlayMode::Flat);
        assert_eq!(report.summary.alive_targets, 3);
        assert!(host.session.source_enabled(cubehunt_common::InputSource::Pointer));
    }

    #[test]
    fn session_start_without_support_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = host(dir.path());
        let mut driver = Driver::script(vec![ScriptStep {
            at: 0.2,
            event: InputEvent::SessionStart,
        }]);
        let report = run(&mut host, &mut driver, &options(0.5, ImmersiveSupport::InlineOnly));

        assert_eq!(report.summary.mode, PlayMode::Flat);
        assert!(report.log.iter().any(|l| l.contains("Could not start VR")));
    }

    #[test]
    fn script_drives_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(
            &path,
            r#"[
                { "at": 0.5, "event": { "type": "pointer", "x": 640, "y": 719 } },
                { "at": 0.2, "event": { "type": "resize", "width": 1280, "height": 720 } }
            ]"#,
        )
        .unwrap();
        let steps = load_script(&path).unwrap();
        assert_eq!(steps[0].at, 0.2);

        let mut host = host(dir.path());
        let mut driver = Driver::script(steps);
        let report = run(&mut host, &mut driver, &options(1.0, ImmersiveSupport::InlineOnly));
        assert_eq!(report.summary.lives, 2);
    }
}
