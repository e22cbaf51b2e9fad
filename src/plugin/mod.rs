//! Host-facing plugin surface: the lifecycle contract, the theme
//! descriptor, and the TaskQuest plugin shim that ties the contract to the
//! gamification engine in [`crate::gamify`].

pub mod host;
pub mod shim;
pub mod theme;

pub use host::{HostApi, Plugin, Task};
pub use shim::{TaskQuestPlugin, PLUGIN_NAME};
pub use theme::{adventure_theme, ThemeDescriptor, ROOT_CLASS, STYLE_ID};
