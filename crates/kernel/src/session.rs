use cubehunt_common::{InputSource, SessionId};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::event::{GameEvent, HudState};
use crate::immersive::ImmersiveSupport;
use crate::placement::PlayMode;
use crate::round::RoundController;
use crate::schedule::{Scheduler, TaskKind};
use crate::scoring::Scoreboard;
use crate::target::TargetRegistry;

/// One player's game: the single source of truth for rounds, targets, score
/// and lives.
///
/// Every operation takes the host's current time in seconds (`now`) and
/// appends what changed to the event log. Nothing here fails: calls that make
/// no sense in the current state are ignored.
#[derive(Debug)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) id: SessionId,
    pub(crate) mode: PlayMode,
    pub(crate) game_started: bool,
    pub(crate) menu_visible: bool,
    pub(crate) announcement_visible: bool,
    pub(crate) support: Option<ImmersiveSupport>,
    pub(crate) rounds: RoundController,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) registry: TargetRegistry,
    pub(crate) scheduler: Scheduler,
    pub(crate) rng: StdRng,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Idle session showing the menu. `high_score` is whatever the store had.
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            id: SessionId::new(),
            mode: PlayMode::Flat,
            game_started: false,
            menu_visible: true,
            announcement_visible: false,
            support: None,
            rounds: RoundController::new(config.cubes_per_round),
            scoreboard: Scoreboard::new(
                config.scoring,
                config.max_lives,
                config.miss_penalty,
                high_score,
            ),
            registry: TargetRegistry::new(config.placement, config.target_size, config.fade_secs),
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
            config,
        }
    }

    /// The tunables this session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Identity tagging this session's delayed tasks. Changes on every reset.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current aiming mode.
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Whether an immersive session is active.
    pub fn in_vr_mode(&self) -> bool {
        self.mode == PlayMode::Immersive
    }

    /// Whether a game is in progress and shots count.
    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Whether the start menu is showing.
    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    /// Whether the "Round N" overlay is showing.
    pub fn announcement_visible(&self) -> bool {
        self.announcement_visible
    }

    /// Capability reported by the host, if it has reported one yet.
    pub fn immersive_support(&self) -> Option<&ImmersiveSupport> {
        self.support.as_ref()
    }

    /// Current round number, starting at 1.
    pub fn current_round(&self) -> u32 {
        self.rounds.current_round()
    }

    /// Host time the current round spawned, `None` before the first round.
    pub fn round_started_at(&self) -> Option<f64> {
        self.rounds.round_started_at()
    }

    /// Targets spawned each round.
    pub fn cubes_per_round(&self) -> u32 {
        self.rounds.cubes_per_round()
    }

    /// Targets hit so far this round.
    pub fn cubes_shot(&self) -> u32 {
        self.rounds.cubes_shot()
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    /// Lives left.
    pub fn lives(&self) -> u32 {
        self.scoreboard.lives()
    }

    /// Best score seen, including the stored record.
    pub fn high_score(&self) -> u32 {
        self.scoreboard.high_score()
    }

    /// Read-only access to the targets.
    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Number of delayed tasks still waiting to fire.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Snapshot of the numbers the HUD shows.
    pub fn hud(&self) -> HudState {
        HudState {
            round: self.rounds.current_round(),
            score: self.scoreboard.score(),
            lives: self.scoreboard.lives(),
            high_score: self.scoreboard.high_score(),
        }
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The "start" action: hide the menu, reset and spawn round 1.
    pub fn start_game(&mut self, now: f64) {
        if self.menu_visible {
            self.menu_visible = false;
            self.events.push(GameEvent::MenuHidden);
        }
        self.game_started = true;
        self.reset_session();
        self.start_round(now);
        tracing::info!(session = ?self.id.0, "game started");
    }

    /// Back to round 1 with a fresh score and full lives, under a new session
    /// id. Pending delayed work from before the reset is cancelled.
    pub fn reset_session(&mut self) {
        self.id = SessionId::new();
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled tasks from previous session");
        }
        if self.announcement_visible {
            self.announcement_visible = false;
            self.events.push(GameEvent::AnnouncementDismissed);
        }
        self.rounds.reset();
        self.clear_targets();
        self.scoreboard.reset();
        self.push_hud();
    }

    /// Spawn the current round's targets.
    pub fn start_round(&mut self, now: f64) {
        let round = self.rounds.current_round();
        self.begin_round(round, now);
    }

    /// Record the immersive-capability result. Anything short of immersive
    /// support keeps flat mode and tells the player why.
    pub fn report_immersive_support(&mut self, support: ImmersiveSupport) {
        if let Some(note) = support.advisory() {
            tracing::warn!(?support, "immersive mode unavailable, staying flat");
            self.advise(note);
        } else {
            tracing::info!(?support, "immersive mode supported");
        }
        self.support = Some(support);
    }

    /// Immersive session started. Alive targets are re-placed for the ring layout.
    pub fn enter_immersive(&mut self) {
        self.switch_mode(PlayMode::Immersive);
    }

    /// Immersive session ended. Alive targets go back to the flat band.
    pub fn exit_immersive(&mut self) {
        self.switch_mode(PlayMode::Flat);
    }

    /// The host's immersive session request was rejected.
    pub fn immersive_request_failed(&mut self, reason: &str) {
        tracing::warn!(reason, "immersive session request failed");
        self.advise(format!("Could not start VR: {reason}"));
    }

    /// Surface a user-facing advisory for a degraded boundary (store, assets, capabilities).
    pub fn advise(&mut self, message: impl Into<String>) {
        self.events.push(GameEvent::Advisory(message.into()));
    }

    fn switch_mode(&mut self, mode: PlayMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        tracing::info!(?mode, "play mode changed");
        if self.game_started {
            self.registry.relocate_alive(mode, &mut self.rng);
        }
        self.events.push(GameEvent::ModeChanged { mode });
    }

    pub(crate) fn begin_round(&mut self, round: u32, now: f64) {
        self.clear_targets();
        self.rounds.begin(round, now);
        let count = self.rounds.cubes_per_round();
        for index in 0..count {
            let target = self.registry.spawn(index, count, self.mode, &mut self.rng, now);
            self.events.push(GameEvent::TargetSpawned {
                id: target.id,
                position: target.position,
            });
        }
        tracing::info!(round, targets = count, mode = ?self.mode, "round started");
        self.push_hud();
    }

    /// Count a credited hit against the round and, when the round is done,
    /// schedule the next one and announce it.
    pub(crate) fn on_target_hit(&mut self, now: f64) {
        if !self.rounds.record_hit() {
            return;
        }
        let next = self.rounds.current_round() + 1;
        self.scheduler.schedule(
            self.id,
            now + self.config.round_delay_secs,
            TaskKind::StartRound { round: next },
        );
        self.announce(next, now);
        tracing::info!(round = self.rounds.current_round(), next, "round complete");
    }

    /// Settle the game when lives have run out: high score, stop play,
    /// clear targets and bring the menu back later.
    pub(crate) fn check_game_over(&mut self, now: f64) {
        let Some(outcome) = self.scoreboard.check_game_over() else {
            return;
        };
        self.game_started = false;
        self.scheduler.cancel_kind(TaskKind::StartRound {
            round: self.rounds.current_round() + 1,
        });
        self.clear_targets();
        tracing::info!(
            score = outcome.score,
            high_score = outcome.high_score,
            new_record = outcome.new_record,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: outcome.score,
            high_score: outcome.high_score,
            new_record: outcome.new_record,
        });
        if outcome.new_record {
            self.events.push(GameEvent::HighScoreBeaten {
                high_score: outcome.high_score,
            });
        }
        self.push_hud();
        self.scheduler.schedule(
            self.id,
            now + self.config.menu_return_secs,
            TaskKind::ReturnToMenu,
        );
    }

    /// Whether shots from `source` count in the current mode.
    pub fn source_enabled(&self, source: InputSource) -> bool {
        match self.mode {
            PlayMode::Flat => !source.is_immersive(),
            PlayMode::Immersive => source.is_immersive(),
        }
    }

    fn announce(&mut self, round: u32, now: f64) {
        self.scheduler.cancel_kind(TaskKind::DismissAnnouncement);
        self.announcement_visible = true;
        self.events.push(GameEvent::RoundAnnounced { round });
        self.scheduler.schedule(
            self.id,
            now + self.config.announcement_secs,
            TaskKind::DismissAnnouncement,
        );
    }

    fn clear_targets(&mut self) {
        for id in self.registry.clear() {
            self.events.push(GameEvent::TargetRemoved { id });
        }
    }

    pub(crate) fn push_hud(&mut self) {
        let hud = self.hud();
        self.events.push(GameEvent::HudChanged(hud));
    }
}
