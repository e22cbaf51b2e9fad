//! # TaskQuest - Adventure Gamification for Markdown Todo Apps
//!
//! TaskQuest turns a markdown todo list into a lightweight adventure:
//! completing tasks earns gold, gold earns ranks, ranks unlock story
//! chapters, and every completion has a small chance of dropping loot. The
//! crate plugs into a cooperative host application through a small lifecycle
//! contract and renders its dashboard as markdown.
//!
//! ## Features
//!
//! - **Reward tiers**: `#hard` and `#easy` markers in the task text select
//!   the payout; hard wins when both are present.
//! - **Ranks and story**: gold thresholds grant single-step rank-ups that
//!   can unlock catalog chapters; notifications are events, never modals.
//! - **Loot**: a 10% per-completion roll over a rarity-tagged loot table.
//! - **Dual persistence**: the host's shared config store plus a local sled
//!   backup, one JSON payload written identically to both.
//! - **Themed dashboard**: leaderboard and journal/inventory widgets, plus a
//!   parchment theme delivered as a pure style descriptor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taskquest::config::Config;
//! use taskquest::plugin::{Plugin, TaskQuestPlugin};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let plugin = TaskQuestPlugin::from_config(&config);
//!     // Hand `plugin` to the host's plugin manager; it drives the
//!     // lifecycle hooks from here.
//!     println!("{}", plugin.name());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`gamify`] - Data model, progression resolver, persistence, widgets
//! - [`plugin`] - Host contract, theme descriptor, and the plugin shim
//! - [`config`] - Configuration management and validation
//! - [`logutil`] - Log sanitizing for user-controlled task text

pub mod config;
pub mod gamify;
pub mod logutil;
pub mod plugin;
