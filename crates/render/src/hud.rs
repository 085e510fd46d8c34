use cubehunt_kernel::HudState;

/// Push-only display sink: text fields, the round overlay, menu and alerts.
pub trait Hud {
    fn set_state(&mut self, state: HudState);
    fn show_announcement(&mut self, text: &str);
    fn hide_announcement(&mut self);
    fn show_menu(&mut self);
    fn hide_menu(&mut self);
    fn show_game_over(&mut self, score: u32, high_score: u32, new_record: bool);
    fn show_advisory(&mut self, text: &str);
}

/// HUD that keeps current state and a line log of everything shown.
#[derive(Debug, Default)]
pub struct TextHud {
    pub state: HudState,
    pub announcement: Option<String>,
    pub menu_visible: bool,
    lines: Vec<String>,
}

impl TextHud {
    pub fn new() -> Self {
        Self {
            menu_visible: true,
            ..Self::default()
        }
    }

    /// The status line in the layout the game shows it.
    pub fn status_line(&self) -> String {
        format!(
            "Round: {} | Score: {} | Lives: {} | High Score: {}",
            self.state.round, self.state.score, self.state.lives, self.state.high_score
        )
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Hud for TextHud {
    fn set_state(&mut self, state: HudState) {
        self.state = state;
    }

    fn show_announcement(&mut self, text: &str) {
        self.announcement = Some(text.to_string());
        self.lines.push(text.to_string());
    }

    fn hide_announcement(&mut self) {
        self.announcement = None;
    }

    fn show_menu(&mut self) {
        self.menu_visible = true;
        self.lines.push("[menu]".into());
    }

    fn hide_menu(&mut self) {
        self.menu_visible = false;
    }

    fn show_game_over(&mut self, score: u32, high_score: u32, new_record: bool) {
        let mut line = format!("Game Over! Score: {score} | High Score: {high_score}");
        if new_record {
            line.push_str(" (new record)");
        }
        self.lines.push(line);
    }

    fn show_advisory(&mut self, text: &str) {
        self.lines.push(format!("! {text}"));
    }
}
