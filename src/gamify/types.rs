use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A single adventurer's progression record. Created lazily the first time a
/// user completes a task; never deleted. Gold and rank only ever go up:
/// there are no spend or refund operations anywhere in the plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub name: String,
    /// Gold earned from completed tasks.
    pub currency: u64,
    /// Rank, starting at 1.
    pub level: u32,
    /// Story chapters this user has unlocked.
    #[serde(default)]
    pub unlocked_chapter_ids: BTreeSet<u32>,
    /// Loot item ids in pickup order. Duplicates allowed; the journal renders
    /// one tile per entry.
    #[serde(default)]
    pub inventory: Vec<String>,
}

impl UserStats {
    /// New adventurer with the opening chapter already unlocked.
    pub fn new(name: &str) -> Self {
        let mut unlocked = BTreeSet::new();
        unlocked.insert(super::catalog::OPENING_CHAPTER_ID);
        Self {
            name: name.to_string(),
            currency: 0,
            level: 1,
            unlocked_chapter_ids: unlocked,
            inventory: Vec::new(),
        }
    }

    pub fn has_unlocked(&self, chapter_id: u32) -> bool {
        self.unlocked_chapter_ids.contains(&chapter_id)
    }
}

/// The whole household's stats, keyed by user name. This is the unit of
/// persistence: one JSON object written identically to the shared and local
/// stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyData {
    #[serde(default)]
    pub users: HashMap<String, UserStats>,
}

impl FamilyData {
    /// Fetch-or-create the record for `name`.
    pub fn user_mut(&mut self, name: &str) -> &mut UserStats {
        self.users
            .entry(name.to_string())
            .or_insert_with(|| UserStats::new(name))
    }
}

/// Immutable story catalog entry. Unlocked when a user's rank reaches
/// `required_level` exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryChapter {
    pub id: u32,
    pub title: String,
    pub narrative: String,
    pub required_level: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEGENDARY",
        }
    }
}

/// Immutable loot catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LootItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    /// Single glyph shown on the inventory tile.
    pub icon: String,
}

/// Notification produced by resolving one task completion. The host (or its
/// toast component) consumes these asynchronously; nothing in the plugin
/// blocks on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionEvent {
    LevelUp { level: u32 },
    ChapterUnlock { chapter: StoryChapter },
    LootDrop { item: LootItem },
}
