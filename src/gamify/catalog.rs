//! Built-in story and loot catalogs. Read-only reference data: the resolver
//! and widgets borrow from a [`Catalog`], nothing ever writes to one.

use crate::gamify::types::{LootItem, Rarity, StoryChapter};

/// Chapter every new adventurer starts with.
pub const OPENING_CHAPTER_ID: u32 = 1;

/// Immutable reward reference data: the story chapters gated by rank and the
/// loot table the drop roll selects from.
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<StoryChapter>,
    loot: Vec<LootItem>,
}

fn chapter(id: u32, title: &str, narrative: &str, required_level: u32) -> StoryChapter {
    StoryChapter {
        id,
        title: title.to_string(),
        narrative: narrative.to_string(),
        required_level,
    }
}

fn item(id: &str, name: &str, description: &str, rarity: Rarity, icon: &str) -> LootItem {
    LootItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rarity,
        icon: icon.to_string(),
    }
}

impl Catalog {
    /// The built-in campaign shipped with the plugin.
    pub fn builtin() -> Self {
        use Rarity::*;

        let chapters = vec![
            chapter(
                1,
                "The Awakening",
                "You wake in a fog-bound scriptorium, surrounded by unfinished lists. \
                 A voice from the rafters whispers that every task struck through \
                 thins the fog a little. A rusty quill lies within reach. You take it.",
                1,
            ),
            chapter(
                2,
                "The Idle Golem",
                "The fog parts around a stone golem slumped across the road, moss on \
                 its shoulders, SOMEDAY chiselled into its brow. It stirs only when \
                 you stop moving. Keep striking tasks and it cannot rise.",
                2,
            ),
            chapter(
                3,
                "The Village of Done",
                "Past the crumbled golem sits a village of finishers. They cheer a \
                 traveler who actually closes what they open, and the Elder presses \
                 a map into your hands: the road to the Castle of Goals.",
                3,
            ),
            chapter(
                4,
                "The Castle of Goals",
                "The castle gates are barred by a ledger taller than a horse. Each \
                 page is a promise someone abandoned. The gatekeeper flips to a \
                 blank page, hands you the quill, and waits.",
                4,
            ),
            chapter(
                5,
                "The Endless List",
                "From the highest tower you finally see it: the list has no end, and \
                 that was never the point. The horizon scrolls on, and you, rank \
                 upon rank, keep walking it down.",
                5,
            ),
        ];

        let loot = vec![
            item(
                "potion_focus",
                "Potion of Focus",
                "Smells suspiciously of dark roast.",
                Common,
                "☕",
            ),
            item(
                "scroll_haste",
                "Scroll of Haste",
                "Reading it somehow shortens the afternoon.",
                Common,
                "📜",
            ),
            item(
                "candle_midnight",
                "Midnight Candle",
                "Burns for exactly one more task.",
                Common,
                "🕯️",
            ),
            item(
                "sword_truth",
                "Sword of Truth",
                "Cuts through excuses, one per swing.",
                Rare,
                "🗡️",
            ),
            item(
                "shield_deadline",
                "Shield of Deadlines",
                "Absorbs panic on impact.",
                Rare,
                "🛡️",
            ),
            item(
                "crown_finisher",
                "Crown of the Finisher",
                "Glows with the light of a thousand closed tasks.",
                Legendary,
                "👑",
            ),
        ];

        Self { chapters, loot }
    }

    pub fn chapters(&self) -> &[StoryChapter] {
        &self.chapters
    }

    pub fn loot(&self) -> &[LootItem] {
        &self.loot
    }

    /// Chapter unlocked when a user reaches `level` exactly. Rank 7 does not
    /// retroactively unlock the rank-5 chapter; that only happens on the
    /// completion that lands on rank 5.
    pub fn chapter_for_level(&self, level: u32) -> Option<&StoryChapter> {
        self.chapters.iter().find(|c| c.required_level == level)
    }

    pub fn chapter(&self, id: u32) -> Option<&StoryChapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn loot_item(&self, id: &str) -> Option<&LootItem> {
        self.loot.iter().find(|i| i.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn chapter_ids_and_levels_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<u32> = catalog.chapters().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), catalog.chapters().len());
        let levels: HashSet<u32> = catalog
            .chapters()
            .iter()
            .map(|c| c.required_level)
            .collect();
        assert_eq!(levels.len(), catalog.chapters().len());
    }

    #[test]
    fn loot_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<&str> = catalog.loot().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.loot().len());
    }

    #[test]
    fn chapter_for_level_is_exact_match() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.chapter_for_level(2).map(|c| c.id), Some(2));
        assert_eq!(catalog.chapter_for_level(99), None);
    }

    #[test]
    fn opening_chapter_exists_at_rank_one() {
        let catalog = Catalog::builtin();
        let opening = catalog.chapter(OPENING_CHAPTER_ID).expect("opening chapter");
        assert_eq!(opening.required_level, 1);
    }
}
