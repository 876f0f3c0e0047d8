//! Application state

use crate::simulation::AutoplayReport;
use chrono::NaiveDate;
use plush_core::engine::ToolView;
use plush_core::{
    EngineError, EngineEvent, FileSaveStore, GameSession, QuestStatus, SaveStore, Snapshot,
    ToolId,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// How long a toast stays on screen
const TOAST_MS: u64 = 2_500;
/// Log lines kept in memory
const LOG_LIMIT: usize = 200;
/// Visible log rows used for auto-scroll
const LOG_VIEW: usize = 15;
/// Length of an autoplay run started with `s`
const AUTOPLAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Battle,
    Shop,
    Progress,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Battle, Tab::Shop, Tab::Progress, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Battle => "Battle",
            Tab::Shop => "Shop",
            Tab::Progress => "Progress",
            Tab::Help => "Help",
        }
    }
}

pub struct App<S: SaveStore = FileSaveStore> {
    pub current_tab: Tab,
    pub session: GameSession<S>,
    pub snapshot: Snapshot,
    pub selected_tool: usize,
    pub selected_shop: usize,
    pub selected_quest: usize,
    pub log: Vec<String>,
    pub log_scroll: usize,
    pub toast: Option<(String, u64)>,
    pub started_at: u64,
    pub now: u64,
    pub today: NaiveDate,
    pub show_help: bool,
    pub confirm_reset: bool,
    pub last_autoplay: Option<AutoplayReport>,
}

impl<S: SaveStore> App<S> {
    pub fn new(session: GameSession<S>, now: u64, today: NaiveDate) -> Self {
        let snapshot = session.snapshot(now);
        let mut app = App {
            current_tab: Tab::Battle,
            session,
            snapshot,
            selected_tool: 0,
            selected_shop: 0,
            selected_quest: 0,
            log: Vec::new(),
            log_scroll: 0,
            toast: None,
            started_at: now,
            now,
            today,
            show_help: false,
            confirm_reset: false,
            last_autoplay: None,
        };
        app.push_log(format!(
            "Boss {} with {}/{} hp. Good luck!",
            app.snapshot.boss_kills + 1,
            app.snapshot.hp,
            app.snapshot.max_hp
        ));
        app
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Battle => self.selected_tool = self.selected_tool.saturating_sub(1),
            Tab::Shop => self.selected_shop = self.selected_shop.saturating_sub(1),
            Tab::Progress => self.selected_quest = self.selected_quest.saturating_sub(1),
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Battle => {
                if self.selected_tool + 1 < self.battle_tools().len() {
                    self.selected_tool += 1;
                }
            }
            Tab::Shop => {
                if self.selected_shop + 1 < self.shop_tools().len() {
                    self.selected_shop += 1;
                }
            }
            Tab::Progress => {
                if self.selected_quest + 1 < self.snapshot.quests.len() {
                    self.selected_quest += 1;
                }
            }
            Tab::Help => {}
        }
    }

    pub fn on_left(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    pub fn on_right(&mut self) {
        if self.log_scroll + 1 < self.log.len() {
            self.log_scroll += 1;
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Battle => self.use_selected_tool(),
            Tab::Shop => self.buy_selected_tool(),
            Tab::Progress => self.claim_selected_quest(),
            Tab::Help => {}
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.current_tab = Tab::Help;
        }
    }

    // === Lists ===

    /// Tools shown on the battle tab: everything the player owns
    pub fn battle_tools(&self) -> Vec<&ToolView> {
        self.snapshot.owned_tools().collect()
    }

    /// Tools that can be bought, owned or not
    pub fn shop_tools(&self) -> Vec<&ToolView> {
        self.snapshot
            .tools
            .iter()
            .filter(|t| t.price.is_some())
            .collect()
    }

    fn selected_id(tools: &[&ToolView], index: usize) -> Option<ToolId> {
        tools.get(index).map(|t| t.id.clone())
    }

    // === Intents ===

    pub fn use_selected_tool(&mut self) {
        if let Some(id) = Self::selected_id(&self.battle_tools(), self.selected_tool) {
            let result = self.session.activate_tool(&id, self.now);
            self.handle_result(result);
        }
    }

    pub fn buy_selected_tool(&mut self) {
        if let Some(id) = Self::selected_id(&self.shop_tools(), self.selected_shop) {
            let result = self.session.purchase_tool(&id, self.now);
            self.handle_result(result);
        }
    }

    pub fn claim_selected_quest(&mut self) {
        let Some(quest) = self.snapshot.quests.get(self.selected_quest) else {
            return;
        };
        let id = quest.id.clone();
        let result = self.session.claim_quest(&id, self.now);
        self.handle_result(result);
    }

    /// Claim the first quest that is ready, whichever is selected
    pub fn claim_ready_quest(&mut self) {
        let ready = self
            .snapshot
            .quests
            .iter()
            .find(|q| q.status == QuestStatus::Ready)
            .map(|q| q.id.clone());
        match ready {
            Some(id) => {
                let result = self.session.claim_quest(&id, self.now);
                self.handle_result(result);
            }
            None => self.claim_selected_quest(),
        }
    }

    pub fn claim_daily(&mut self) {
        let result = self.session.claim_daily_bonus(self.today, self.now);
        self.handle_result(result);
    }

    pub fn toggle_mute(&mut self) {
        let events = self.session.toggle_mute(self.now);
        self.handle_result(Ok(events));
    }

    /// First press arms the reset, the second one wipes the save
    pub fn request_reset(&mut self) {
        if !self.confirm_reset {
            self.confirm_reset = true;
            self.show_toast("Press R again to erase all progress".to_string());
            return;
        }

        self.confirm_reset = false;
        self.log.clear();
        self.log_scroll = 0;
        self.last_autoplay = None;
        let events = self.session.reset_progress();
        self.handle_result(Ok(events));
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    /// Play a minute headlessly from the current state; the real game is untouched
    pub fn run_autoplay(&mut self) {
        let engine = self.session.engine();
        let report = AutoplayReport::run(
            engine.state(),
            engine.catalog(),
            engine.progression(),
            engine.constants(),
            AUTOPLAY_MS,
            ChaCha8Rng::from_entropy(),
        );
        tracing::info!("{}", report.summary());
        self.push_log(report.summary());
        self.last_autoplay = Some(report);
    }

    // === Clock ===

    pub fn tick(&mut self, now: u64, today: NaiveDate) {
        self.now = now;
        self.today = today;

        let report = self.session.update(now);
        for event in &report.events {
            self.log_event(event);
        }
        if self.toast.as_ref().is_some_and(|(_, expires)| now >= *expires) {
            self.toast = None;
        }
        self.refresh();
    }

    pub fn toast_text(&self) -> Option<&str> {
        self.toast.as_ref().map(|(text, _)| text.as_str())
    }

    /// Seconds since the app started, for log stamps
    pub fn elapsed_secs(&self) -> f64 {
        self.now.saturating_sub(self.started_at) as f64 / 1000.0
    }

    fn handle_result(&mut self, result: Result<Vec<EngineEvent>, EngineError>) {
        match result {
            Ok(events) => {
                for event in &events {
                    self.log_event(event);
                }
                if let Some(last) = events.last() {
                    self.show_toast(last.describe());
                }
            }
            Err(err) if err.is_silent() => {
                tracing::debug!("ignored: {}", err);
            }
            Err(err) => self.show_toast(err.to_string()),
        }
        self.refresh();
    }

    fn log_event(&mut self, event: &EngineEvent) {
        let line = format!("[{:.1}s] {}", self.elapsed_secs(), event.describe());
        self.push_log(line);
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > LOG_LIMIT {
            let excess = self.log.len() - LOG_LIMIT;
            self.log.drain(..excess);
        }
        // Auto-scroll to bottom
        self.log_scroll = self.log.len().saturating_sub(LOG_VIEW);
    }

    fn show_toast(&mut self, text: String) {
        self.toast = Some((text, self.now + TOAST_MS));
    }

    fn refresh(&mut self) {
        self.snapshot = self.session.snapshot(self.now);

        let tools = self.battle_tools().len();
        self.selected_tool = self.selected_tool.min(tools.saturating_sub(1));
        let shop = self.shop_tools().len();
        self.selected_shop = self.selected_shop.min(shop.saturating_sub(1));
        let quests = self.snapshot.quests.len();
        self.selected_quest = self.selected_quest.min(quests.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plush_core::MemorySaveStore;

    fn app() -> App<MemorySaveStore> {
        let session = GameSession::with_seed(MemorySaveStore::new(), 7);
        App::new(session, 0, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    }

    fn select(app: &mut App<MemorySaveStore>, id: &str) {
        app.selected_tool = app
            .battle_tools()
            .iter()
            .position(|t| t.id.as_str() == id)
            .unwrap();
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        assert_eq!(app.current_tab, Tab::Battle);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Shop);
        app.prev_tab();
        app.prev_tab();
        assert_eq!(app.current_tab, Tab::Help);
        app.set_tab(2);
        assert_eq!(app.current_tab, Tab::Progress);
        app.set_tab(9);
        assert_eq!(app.current_tab, Tab::Progress);
    }

    #[test]
    fn test_use_tool_logs_hit() {
        let mut app = app();
        select(&mut app, "hammer");
        app.use_selected_tool();
        assert_eq!(app.snapshot.hits, 1);
        assert!(app.snapshot.hp < 100);
        assert!(app.log.iter().any(|l| l.contains("hp")));
        assert!(app.toast_text().is_some());
    }

    #[test]
    fn test_cooldown_spam_is_silent() {
        let mut app = app();
        select(&mut app, "hammer");
        app.use_selected_tool();
        app.toast = None;
        app.use_selected_tool();
        assert_eq!(app.snapshot.hits, 1);
        assert!(app.toast_text().is_none());
    }

    #[test]
    fn test_buy_without_coins_shows_toast() {
        let mut app = app();
        app.current_tab = Tab::Shop;
        app.on_enter();
        let toast = app.toast_text().unwrap();
        assert!(toast.contains("Not enough coins"), "{toast}");
    }

    #[test]
    fn test_daily_claim_once_per_day() {
        let mut app = app();
        app.claim_daily();
        let coins = app.snapshot.coins;
        assert!(coins >= 50);
        app.claim_daily();
        assert_eq!(app.snapshot.coins, coins);

        app.tick(1_000, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        app.claim_daily();
        assert!(app.snapshot.coins > coins);
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut app = app();
        select(&mut app, "hammer");
        app.use_selected_tool();

        app.request_reset();
        assert!(app.confirm_reset);
        assert_eq!(app.snapshot.hits, 1);

        app.cancel_reset();
        app.request_reset();
        app.request_reset();
        assert!(!app.confirm_reset);
        assert_eq!(app.snapshot.hits, 0);
        assert_eq!(app.snapshot.coins, 0);
    }

    #[test]
    fn test_tick_expires_toast() {
        let mut app = app();
        app.toggle_mute();
        assert!(app.snapshot.muted);
        assert!(app.toast_text().is_some());

        app.tick(TOAST_MS + 1, app.today);
        assert!(app.toast_text().is_none());
    }

    #[test]
    fn test_autoplay_keeps_game_state() {
        let mut app = app();
        let hits = app.snapshot.hits;
        app.run_autoplay();
        assert!(app.last_autoplay.is_some());
        assert_eq!(app.snapshot.hits, hits);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        for _ in 0..50 {
            app.on_down();
        }
        assert_eq!(app.selected_tool, app.battle_tools().len() - 1);
        app.current_tab = Tab::Progress;
        for _ in 0..50 {
            app.on_down();
        }
        assert_eq!(app.selected_quest, app.snapshot.quests.len() - 1);
    }
}
