//! Settings loading. Every option carries a default; unknown keys are
//! rejected so typos in a settings file surface instead of silently doing
//! nothing.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::complete::{DirPriority, Mode, Options};
use crate::error::Result;
use crate::prompt::ActionKind;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Menu-style or shell-style completion narrowing.
    pub autocomplete_mode: Mode,

    /// Where directories sort relative to files in menu listings.
    pub folders_first: DirPriority,

    /// Ask the host to suppress its own word completions while a path
    /// prompt is open, so buffer words don't compete with path candidates.
    pub inhibit_word_completions: bool,

    /// Name offered for buffers that were never saved.
    pub untitled_file_name: String,

    /// Whether unsaved buffers get `untitled_file_name` preloaded into the
    /// prompt at all.
    pub use_untitled_files: bool,

    /// Default answers for the yes/no prompts; an empty reply falls back to
    /// these.
    pub overwrite_by_default: String,
    pub delete_by_default: String,
    pub discard_by_default: String,

    /// Trash straight away instead of asking first.
    pub delete_without_prompt: bool,

    /// Close the view after its file was trashed.
    pub close_on_deletion: bool,

    pub allow_history: bool,

    /// Actions whose prompts may navigate history.
    pub allow_history_in: Vec<ActionKind>,

    /// One shared history list instead of one per action.
    pub use_global_history: bool,

    /// Wrap around at either end when navigating history.
    pub cycle_history: bool,

    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            autocomplete_mode: Mode::Menu,
            folders_first: DirPriority::None,
            inhibit_word_completions: true,
            untitled_file_name: "untitled".to_string(),
            use_untitled_files: true,
            overwrite_by_default: "n".to_string(),
            delete_by_default: "n".to_string(),
            discard_by_default: "n".to_string(),
            delete_without_prompt: false,
            close_on_deletion: true,
            allow_history: true,
            allow_history_in: vec![
                ActionKind::Save,
                ActionKind::Copy,
                ActionKind::Move,
                ActionKind::Open,
            ],
            use_global_history: false,
            cycle_history: true,
            history_limit: 100,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Settings> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)?;
        Settings::from_toml_str(&text)
    }

    /// Loads settings, treating a missing file as "all defaults" and a
    /// malformed one as defaults-with-a-warning.
    pub fn load_or_default(path: &Path) -> Settings {
        if !path.exists() {
            return Settings::default();
        }
        match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("ignoring settings at {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    /// Completion options for a path prompt under these settings.
    pub fn completion_options(&self) -> Options {
        Options {
            mode: self.autocomplete_mode,
            dir_priority: self.folders_first,
            allow_directories: true,
        }
    }

    /// Whether prompts for `kind` may navigate history.
    pub fn history_allowed(&self, kind: ActionKind) -> bool {
        self.allow_history && self.allow_history_in.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_menu_mode_without_folder_priority() {
        let settings = Settings::default();
        assert_eq!(settings.autocomplete_mode, Mode::Menu);
        assert_eq!(settings.folders_first, DirPriority::None);
        assert!(settings.inhibit_word_completions);
        assert!(settings.history_allowed(ActionKind::Save));
        assert!(!settings.history_allowed(ActionKind::Delete));
    }

    #[test]
    fn parses_overrides() {
        let settings = Settings::from_toml_str(
            r#"
            autocomplete_mode = "shell"
            folders_first = "first"
            inhibit_word_completions = false
            untitled_file_name = "scratch.txt"
            use_global_history = true
            history_limit = 5
            allow_history_in = ["open"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.autocomplete_mode, Mode::Shell);
        assert_eq!(settings.folders_first, DirPriority::First);
        assert!(!settings.inhibit_word_completions);
        assert_eq!(settings.untitled_file_name, "scratch.txt");
        assert!(settings.use_global_history);
        assert_eq!(settings.history_limit, 5);
        assert!(settings.history_allowed(ActionKind::Open));
        assert!(!settings.history_allowed(ActionKind::Save));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Settings::from_toml_str("no_such_option = true").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("absent.toml"));
        assert_eq!(settings.untitled_file_name, "untitled");
    }

    #[test]
    fn completion_options_reflect_settings() {
        let mut settings = Settings::default();
        settings.autocomplete_mode = Mode::Shell;
        settings.folders_first = DirPriority::Last;

        let options = settings.completion_options();
        assert_eq!(options.mode, Mode::Shell);
        assert_eq!(options.dir_priority, DirPriority::Last);
        assert!(options.allow_directories);
    }
}
