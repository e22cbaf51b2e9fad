//! The medieval parchment theme, expressed as data.
//!
//! The plugin never touches the document itself. It hands the host one
//! [`ThemeDescriptor`] and the host's render layer injects or removes the
//! style resource; two plugins fighting over a shared UI root stops being
//! this plugin's problem.

/// Id of the injected style resource. Applying a theme with the same id
/// twice must not duplicate it; removal by this id fully reverts it.
pub const STYLE_ID: &str = "taskquest-adventure-styles";

/// Marker class the host toggles on its UI root while the theme is active.
pub const ROOT_CLASS: &str = "taskquest-adventure-active";

/// A globally scoped style resource plus the root marker class that scopes
/// its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    pub style_id: String,
    pub root_class: String,
    pub css: String,
}

/// The parchment-and-ink adventure theme. Pure: same descriptor every call.
pub fn adventure_theme() -> ThemeDescriptor {
    let css = format!(
        r#"
.{root} {{
  font-family: 'MedievalSharp', cursive;
  background-color: #2c241b;
  color: #e0c097;
}}

.{root} .navbar {{
  background-color: #1a1510;
  border-bottom: 2px solid #8b5e3c;
  color: #d4a373;
}}

.{root} aside {{
  background-color: #261f16;
  border-right: 4px solid #1a1510;
  color: #a89f91;
}}

.{root} .task-row {{
  background: #f4e4bc;
  border: 2px solid #8b5e3c;
  box-shadow: 4px 4px 0px #1a1510;
  color: #4a3b2a;
}}

.{root} .task-row:hover {{
  background: #ebdcb0;
  transform: translateY(-2px);
}}

.{root} ::-webkit-scrollbar {{
  width: 12px;
  background: #1a1510;
}}

.{root} ::-webkit-scrollbar-thumb {{
  background: #8b5e3c;
  border: 2px solid #1a1510;
}}
"#,
        root = ROOT_CLASS
    );

    ThemeDescriptor {
        style_id: STYLE_ID.to_string(),
        root_class: ROOT_CLASS.to_string(),
        css,
    }
}
