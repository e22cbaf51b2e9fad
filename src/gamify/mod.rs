//! Game data model, progression rules, persistence, and widgets.
//! The plugin shim in [`crate::plugin`] wires these pieces to a host; nothing
//! in this module talks to a host directly.

pub mod catalog;
pub mod errors;
pub mod resolver;
pub mod store;
pub mod types;
pub mod widgets;

pub use catalog::{Catalog, OPENING_CHAPTER_ID};
pub use errors::GamifyError;
pub use resolver::{
    resolve_completion, reward_for, ProgressionRules, BASE_REWARD, EASY_MARKER, EASY_REWARD,
    HARD_MARKER, HARD_REWARD, LEVEL_THRESHOLD, LOOT_DROP_RATE,
};
pub use store::{
    LocalSledStore, LocalStore, MemoryLocalStore, SharedConfigFile, SharedStore, StatsRepository,
    STATS_KEY,
};
pub use types::{FamilyData, LootItem, ProgressionEvent, Rarity, StoryChapter, UserStats};
pub use widgets::{
    format_leaderboard, format_notification, format_reward_badge, render_inventory, JournalTab,
    JournalView,
};
