//! Progression resolution for a single task completion.
//!
//! This is the one rule-bearing piece of the plugin and it is deliberately
//! pure: no storage, no host calls, and the only randomness (the loot roll)
//! comes from an injected [`Rng`] so tests can seed it. The caller owns
//! persistence and notification delivery.

use rand::Rng;

use crate::gamify::catalog::Catalog;
use crate::gamify::types::{ProgressionEvent, UserStats};

/// Gold for a task with no difficulty marker.
pub const BASE_REWARD: u64 = 5;
/// Gold for a task carrying the hard marker.
pub const HARD_REWARD: u64 = 25;
/// Gold for a task carrying the easy marker.
pub const EASY_REWARD: u64 = 2;
/// Rank N is reached at N × this much gold.
pub const LEVEL_THRESHOLD: u64 = 100;
/// Chance of a loot drop per completion.
pub const LOOT_DROP_RATE: f64 = 0.10;

pub const HARD_MARKER: &str = "#hard";
pub const EASY_MARKER: &str = "#easy";

/// Tunable progression rules. Defaults match the built-in game balance; the
/// config file can override any of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionRules {
    pub base_reward: u64,
    pub hard_reward: u64,
    pub easy_reward: u64,
    pub hard_marker: String,
    pub easy_marker: String,
    pub level_threshold: u64,
    pub loot_drop_rate: f64,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            base_reward: BASE_REWARD,
            hard_reward: HARD_REWARD,
            easy_reward: EASY_REWARD,
            hard_marker: HARD_MARKER.to_string(),
            easy_marker: EASY_MARKER.to_string(),
            level_threshold: LEVEL_THRESHOLD,
            loot_drop_rate: LOOT_DROP_RATE,
        }
    }
}

/// Reward tier for a task's text. Hard beats easy when both markers are
/// present. Malformed or unmarked text falls through to the base reward;
/// there is no error path.
pub fn reward_for(rules: &ProgressionRules, task_text: &str) -> u64 {
    if task_text.contains(&rules.hard_marker) {
        rules.hard_reward
    } else if task_text.contains(&rules.easy_marker) {
        rules.easy_reward
    } else {
        rules.base_reward
    }
}

/// Apply one completed task to `user`, returning the notifications it earned
/// in emission order: level-up, then chapter unlock, then loot drop.
///
/// The rank threshold is checked once per call. A single oversized reward can
/// leave gold past the next threshold without granting a second rank; the
/// next completion picks that up.
pub fn resolve_completion(
    user: &mut UserStats,
    task_text: &str,
    rules: &ProgressionRules,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Vec<ProgressionEvent> {
    let mut events = Vec::new();

    user.currency += reward_for(rules, task_text);

    if user.currency >= u64::from(user.level) * rules.level_threshold {
        user.level += 1;
        events.push(ProgressionEvent::LevelUp { level: user.level });

        if let Some(chapter) = catalog.chapter_for_level(user.level) {
            if !user.has_unlocked(chapter.id) {
                user.unlocked_chapter_ids.insert(chapter.id);
                events.push(ProgressionEvent::ChapterUnlock {
                    chapter: chapter.clone(),
                });
            }
        }
    }

    if rng.gen::<f64>() < rules.loot_drop_rate && !catalog.loot().is_empty() {
        let item = &catalog.loot()[rng.gen_range(0..catalog.loot().len())];
        user.inventory.push(item.id.clone());
        events.push(ProgressionEvent::LootDrop { item: item.clone() });
    }

    events
}
