//! Dashboard widgets: guild roster, story journal, and inventory.
//!
//! Everything here is state-in/markup-out. The host is a markdown todo
//! application, so widgets render markdown strings and hold no references to
//! live state; re-rendering after a completion is the host's job.

use crate::gamify::catalog::Catalog;
use crate::gamify::types::{FamilyData, ProgressionEvent, UserStats};

/// Leaderboard of every adventurer in the family, richest first. Ties break
/// by name so a render is deterministic.
pub fn format_leaderboard(data: &FamilyData) -> String {
    let mut users: Vec<&UserStats> = data.users.values().collect();
    users.sort_by(|a, b| b.currency.cmp(&a.currency).then_with(|| a.name.cmp(&b.name)));

    let mut out = String::from("### ⚔️ Guild Roster\n\n");
    if users.is_empty() {
        out.push_str("*No adventurers yet. Complete a task to join the roster.*\n");
        return out;
    }

    for (idx, user) in users.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** — Rank {} Adventurer · 💰 {}\n",
            idx + 1,
            user.name,
            user.level,
            user.currency
        ));
    }
    out.push_str("\n*Complete quests to earn gold!*\n");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalTab {
    Story,
    Inventory,
}

/// View state for the tabbed journal/inventory widget. At most one chapter is
/// expanded at a time; locked chapters never expand.
#[derive(Debug, Clone)]
pub struct JournalView {
    tab: JournalTab,
    expanded_chapter: Option<u32>,
}

impl Default for JournalView {
    fn default() -> Self {
        Self {
            tab: JournalTab::Story,
            expanded_chapter: None,
        }
    }
}

impl JournalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> JournalTab {
        self.tab
    }

    pub fn expanded_chapter(&self) -> Option<u32> {
        self.expanded_chapter
    }

    pub fn select_tab(&mut self, tab: JournalTab) {
        self.tab = tab;
    }

    /// Toggle a chapter: selecting the expanded chapter collapses it,
    /// selecting a different unlocked chapter makes it the single expanded
    /// one. Selecting a locked chapter is a no-op. Returns whether the
    /// chapter is expanded afterwards.
    pub fn select_chapter(&mut self, chapter_id: u32, user: &UserStats) -> bool {
        if !user.has_unlocked(chapter_id) {
            return false;
        }
        if self.expanded_chapter == Some(chapter_id) {
            self.expanded_chapter = None;
            false
        } else {
            self.expanded_chapter = Some(chapter_id);
            true
        }
    }

    /// Render the journal for `current_user`. A user with no record yet gets
    /// an invitation instead of an empty frame.
    pub fn render(&self, data: &FamilyData, current_user: &str, catalog: &Catalog) -> String {
        let Some(user) = data.users.get(current_user) else {
            return "*Complete your first task to open the journal.*\n".to_string();
        };

        match self.tab {
            JournalTab::Story => self.render_story(user, catalog),
            JournalTab::Inventory => render_inventory(user, catalog),
        }
    }

    fn render_story(&self, user: &UserStats, catalog: &Catalog) -> String {
        let mut out = String::from("### 📖 Journal\n\n");
        for chapter in catalog.chapters() {
            if user.has_unlocked(chapter.id) {
                let expanded = self.expanded_chapter == Some(chapter.id);
                let marker = if expanded { "▼" } else { "▶" };
                out.push_str(&format!(
                    "{} **Chapter {}: {}**\n",
                    marker, chapter.id, chapter.title
                ));
                if expanded {
                    out.push_str(&format!("\n> {}\n\n", chapter.narrative));
                }
            } else {
                out.push_str(&format!(
                    "🔒 Chapter {}: Locked — *requires Rank {}*\n",
                    chapter.id, chapter.required_level
                ));
            }
        }
        out
    }
}

/// One tile per inventory entry, duplicates and all. The tooltip text (name,
/// description, rarity) rides along on each tile's line.
pub fn render_inventory(user: &UserStats, catalog: &Catalog) -> String {
    let mut out = format!("### 🎒 Inventory ({})\n\n", user.inventory.len());
    if user.inventory.is_empty() {
        out.push_str("*Your bag is empty.*\n");
        return out;
    }
    for id in &user.inventory {
        match catalog.loot_item(id) {
            Some(item) => out.push_str(&format!(
                "{} **{}** — {} *({})*\n",
                item.icon,
                item.name,
                item.description,
                item.rarity.label()
            )),
            // An id the catalog no longer knows still occupies a tile.
            None => out.push_str(&format!("❔ Unknown relic (`{}`)\n", id)),
        }
    }
    out
}

/// Toast text for a progression notification. The host decides how and when
/// to show it; nothing blocks.
pub fn format_notification(event: &ProgressionEvent) -> String {
    match event {
        ProgressionEvent::LevelUp { level } => {
            format!("📜 HEAR YE! You have reached Rank {}!", level)
        }
        ProgressionEvent::ChapterUnlock { chapter } => {
            format!("📖 New chapter unlocked: {}", chapter.title)
        }
        ProgressionEvent::LootDrop { item } => {
            format!("🎁 Loot drop! You found: {} {}", item.name, item.icon)
        }
    }
}

/// The small gold badge rendered next to a task.
pub fn format_reward_badge(amount: u64) -> String {
    format!("💰 {}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamify::types::{ProgressionEvent, UserStats};

    fn family_of_three() -> FamilyData {
        let mut family = FamilyData::default();
        family.user_mut("Hero").currency = 45;
        family.user_mut("Scribe").currency = 120;
        family.user_mut("Bard").currency = 45;
        family
    }

    #[test]
    fn leaderboard_sorts_by_gold_then_name() {
        let roster = format_leaderboard(&family_of_three());
        let scribe = roster.find("Scribe").unwrap();
        let bard = roster.find("Bard").unwrap();
        let hero = roster.find("Hero").unwrap();
        assert!(scribe < bard, "richest first");
        assert!(bard < hero, "ties break by name");
        assert!(roster.starts_with("### ⚔️ Guild Roster"));
    }

    #[test]
    fn empty_roster_renders_invitation() {
        let roster = format_leaderboard(&FamilyData::default());
        assert!(roster.contains("No adventurers yet"));
    }

    #[test]
    fn selecting_expanded_chapter_collapses_it() {
        let user = UserStats::new("Hero");
        let mut view = JournalView::new();
        assert!(view.select_chapter(1, &user));
        assert_eq!(view.expanded_chapter(), Some(1));
        assert!(!view.select_chapter(1, &user));
        assert_eq!(view.expanded_chapter(), None);
    }

    #[test]
    fn selecting_another_chapter_switches_the_single_expansion() {
        let mut user = UserStats::new("Hero");
        user.unlocked_chapter_ids.insert(2);
        let mut view = JournalView::new();
        view.select_chapter(1, &user);
        assert!(view.select_chapter(2, &user));
        assert_eq!(view.expanded_chapter(), Some(2));
    }

    #[test]
    fn locked_chapter_never_expands() {
        let user = UserStats::new("Hero");
        let mut view = JournalView::new();
        assert!(!view.select_chapter(3, &user));
        assert_eq!(view.expanded_chapter(), None);
    }

    #[test]
    fn story_tab_shows_placeholder_and_required_rank_for_locked() {
        let catalog = Catalog::builtin();
        let mut family = FamilyData::default();
        family.user_mut("Hero");
        let view = JournalView::new();
        let journal = view.render(&family, "Hero", &catalog);
        assert!(journal.contains("Chapter 1: The Awakening"));
        assert!(journal.contains("Chapter 2: Locked"));
        assert!(journal.contains("requires Rank 2"));
        // Nothing expanded yet: no narrative text.
        assert!(!journal.contains("fog-bound scriptorium"));
    }

    #[test]
    fn expanded_chapter_shows_narrative() {
        let catalog = Catalog::builtin();
        let mut family = FamilyData::default();
        family.user_mut("Hero");
        let mut view = JournalView::new();
        view.select_chapter(1, family.users.get("Hero").unwrap());
        let journal = view.render(&family, "Hero", &catalog);
        assert!(journal.contains("fog-bound scriptorium"));
    }

    #[test]
    fn inventory_renders_one_tile_per_entry_without_stacking() {
        let catalog = Catalog::builtin();
        let mut user = UserStats::new("Hero");
        user.inventory.push("potion_focus".to_string());
        user.inventory.push("potion_focus".to_string());
        user.inventory.push("sword_truth".to_string());
        let rendered = render_inventory(&user, &catalog);
        assert!(rendered.contains("Inventory (3)"));
        assert_eq!(rendered.matches("Potion of Focus").count(), 2);
        assert!(rendered.contains("Sword of Truth"));
        assert!(rendered.contains("RARE"));
    }

    #[test]
    fn unknown_user_gets_invitation() {
        let catalog = Catalog::builtin();
        let view = JournalView::new();
        let rendered = view.render(&FamilyData::default(), "Nobody", &catalog);
        assert!(rendered.contains("first task"));
    }

    #[test]
    fn notification_text_per_event() {
        let catalog = Catalog::builtin();
        assert!(format_notification(&ProgressionEvent::LevelUp { level: 3 }).contains("Rank 3"));
        let chapter = catalog.chapter(2).unwrap().clone();
        assert!(format_notification(&ProgressionEvent::ChapterUnlock { chapter })
            .contains("The Idle Golem"));
        let item = catalog.loot_item("crown_finisher").unwrap().clone();
        assert!(format_notification(&ProgressionEvent::LootDrop { item }).contains("Crown"));
    }

    #[test]
    fn reward_badge_carries_amount() {
        assert_eq!(format_reward_badge(25), "💰 25");
    }
}
