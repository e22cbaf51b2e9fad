//! The contract between the todo application and its plugins.
//!
//! The host drives plugins synchronously, one user-interface event at a
//! time: lifecycle transitions, task completions, and render requests. A
//! plugin never reaches into the host on its own; everything it may touch is
//! behind [`HostApi`], handed in per call.

use crate::gamify::store::SharedStore;
use crate::gamify::types::ProgressionEvent;
use crate::plugin::theme::ThemeDescriptor;

/// A task as the host exposes it to plugins. The markdown parser guarantees
/// at least the raw text line; plugins must not assume anything else about
/// its shape.
#[derive(Debug, Clone)]
pub struct Task {
    pub text: String,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Surface the host lends a plugin during a hook call.
pub trait HostApi {
    /// The host's synchronized plugin-config store.
    fn shared_store(&mut self) -> &mut dyn SharedStore;

    /// Hand a theme descriptor to the host's render layer. The host owns the
    /// actual style mutation; plugins only describe what they want.
    fn apply_theme(&mut self, theme: &ThemeDescriptor);

    /// Revert a previously applied theme by its style id.
    fn remove_theme(&mut self, style_id: &str);

    /// Queue a progression notification. Consumed asynchronously by the
    /// host's toast surface; must never block the completion path.
    fn notify(&mut self, event: ProgressionEvent);
}

/// Plugin lifecycle hooks, called by the host.
///
/// Hooks take `&self`: a host is free to share one plugin instance across
/// threads, so implementations guard their own mutable state.
/// [`TaskQuestPlugin`](crate::plugin::TaskQuestPlugin) keeps everything
/// behind a single mutex, making each completion an atomic
/// read-modify-write over the family stats.
pub trait Plugin {
    /// Registered plugin name, shown in the host's plugin manager.
    fn name(&self) -> &str;

    /// Whether the host should enable this plugin on first install.
    fn default_enabled(&self) -> bool {
        false
    }

    /// Called once when the host loads the plugin. State restoration
    /// happens here.
    fn on_init(&self, host: &mut dyn HostApi);

    /// Called when the user switches the plugin on.
    fn on_enable(&self, host: &mut dyn HostApi);

    /// Called when the user switches the plugin off.
    fn on_disable(&self, host: &mut dyn HostApi);

    /// Called after the user checks off a task.
    fn on_task_complete(&self, task: &Task, host: &mut dyn HostApi);

    /// Decoration rendered next to a task row, if any. Must not mutate
    /// plugin state.
    fn on_task_render(&self, task: &Task) -> Option<String>;

    /// The plugin's dashboard panel, if any.
    fn render_dashboard(&self) -> Option<String>;
}
