//! The TaskQuest plugin itself: lifecycle wiring between the host contract
//! and the gamification engine.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::config::Config;
use crate::gamify::catalog::Catalog;
use crate::gamify::resolver::{resolve_completion, reward_for, ProgressionRules};
use crate::gamify::store::{LocalSledStore, LocalStore, MemoryLocalStore, StatsRepository};
use crate::gamify::types::FamilyData;
use crate::gamify::widgets::{format_leaderboard, format_reward_badge, JournalTab, JournalView};
use crate::logutil::escape_log;
use crate::plugin::host::{HostApi, Plugin, Task};
use crate::plugin::theme::{adventure_theme, STYLE_ID};

/// Name the plugin registers with the host.
pub const PLUGIN_NAME: &str = "TaskQuest Adventure";

/// Everything mutable lives behind one mutex, so a completion's
/// load-mutate-save is a single atomic read-modify-write even when a host
/// shares the plugin across threads.
struct PluginState {
    data: FamilyData,
    repo: Option<StatsRepository>,
    journal: JournalView,
    theme_applied: bool,
}

pub struct TaskQuestPlugin {
    default_enabled: bool,
    current_user: String,
    rules: ProgressionRules,
    catalog: Catalog,
    local_db_path: Option<PathBuf>,
    state: Mutex<PluginState>,
}

impl TaskQuestPlugin {
    pub fn new(
        current_user: impl Into<String>,
        rules: ProgressionRules,
        catalog: Catalog,
        local_db_path: Option<PathBuf>,
    ) -> Self {
        Self {
            default_enabled: false,
            current_user: current_user.into(),
            rules,
            catalog,
            local_db_path,
            state: Mutex::new(PluginState {
                data: FamilyData::default(),
                repo: None,
                journal: JournalView::new(),
                theme_applied: false,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut plugin = Self::new(
            config.plugin.current_user.clone(),
            config.progression.rules(),
            Catalog::builtin(),
            Some(config.storage.local_db_path()),
        );
        plugin.default_enabled = config.plugin.default_enabled;
        plugin
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Switch the journal widget's tab.
    pub fn select_journal_tab(&self, tab: JournalTab) {
        self.lock_state().journal.select_tab(tab);
    }

    /// Forward a chapter selection to the journal widget. Returns whether the
    /// chapter is expanded afterwards.
    pub fn select_chapter(&self, chapter_id: u32) -> bool {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        let Some(user) = state.data.users.get(&self.current_user) else {
            return false;
        };
        state.journal.select_chapter(chapter_id, user)
    }

    /// Snapshot of the in-memory stats, mainly for hosts that render their
    /// own views.
    pub fn stats_snapshot(&self) -> FamilyData {
        self.lock_state().data.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, PluginState> {
        // A panicked render elsewhere must not brick the completion path.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_local_store(&self) -> Box<dyn LocalStore + Send> {
        match &self.local_db_path {
            Some(path) => match LocalSledStore::open(path) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    warn!(
                        "local stats store at {} unavailable, keeping backup in memory: {e}",
                        path.display()
                    );
                    Box::new(MemoryLocalStore::default())
                }
            },
            None => Box::new(MemoryLocalStore::default()),
        }
    }
}

impl Plugin for TaskQuestPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn default_enabled(&self) -> bool {
        self.default_enabled
    }

    fn on_init(&self, host: &mut dyn HostApi) {
        let repo = StatsRepository::new(self.open_local_store());
        let data = repo.load(host.shared_store());
        info!(
            "loaded stats for {} adventurer(s), current user {}",
            data.users.len(),
            self.current_user
        );

        let mut state = self.lock_state();
        state.data = data;
        state.repo = Some(repo);
    }

    fn on_enable(&self, host: &mut dyn HostApi) {
        let mut state = self.lock_state();
        if state.theme_applied {
            return;
        }
        host.apply_theme(&adventure_theme());
        state.theme_applied = true;
    }

    fn on_disable(&self, host: &mut dyn HostApi) {
        let mut state = self.lock_state();
        if !state.theme_applied {
            return;
        }
        host.remove_theme(STYLE_ID);
        state.theme_applied = false;
    }

    fn on_task_complete(&self, task: &Task, host: &mut dyn HostApi) {
        let events = {
            let mut guard = self.lock_state();
            let state = &mut *guard;

            let user = state.data.user_mut(&self.current_user);
            let events = resolve_completion(
                user,
                &task.text,
                &self.rules,
                &self.catalog,
                &mut rand::thread_rng(),
            );
            info!(
                "{} completed '{}': {} gold, rank {}",
                self.current_user,
                escape_log(&task.text),
                user.currency,
                user.level
            );

            match state.repo.as_mut() {
                Some(repo) => repo.save(host.shared_store(), &state.data),
                None => warn!("completion before on_init, stats not persisted"),
            }
            events
        };

        // Lock released before handing events back: the host may re-enter the
        // plugin from its notification surface.
        for event in events {
            host.notify(event);
        }
    }

    fn on_task_render(&self, task: &Task) -> Option<String> {
        Some(format_reward_badge(reward_for(&self.rules, &task.text)))
    }

    fn render_dashboard(&self) -> Option<String> {
        let state = self.lock_state();
        let mut panel = format_leaderboard(&state.data);
        panel.push('\n');
        panel.push_str(&state.journal.render(&state.data, &self.current_user, &self.catalog));
        Some(panel)
    }
}
