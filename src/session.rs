//! Shim-owned mutable state: the running action, its history lists, and
//! the completion session of the currently open prompt. The completion
//! engine itself stays stateless; everything mutable lives here.

use std::path::Path;

use crate::complete::{rank, CompletionSession, Options};
use crate::config::Settings;
use crate::fsops::DirLister;
use crate::history::{Histories, HistoryCursor};
use crate::path::{expand_homedir, PathFragment};
use crate::prompt::ActionKind;

pub struct EditorSessionState {
    pub settings: Settings,
    histories: Histories,
    history_cursor: HistoryCursor,
    running: Option<ActionKind>,
    completion: Option<CompletionSession>,
}

impl EditorSessionState {
    pub fn new(settings: Settings) -> EditorSessionState {
        let histories = Histories::new(settings.history_limit, settings.use_global_history);
        EditorSessionState {
            settings,
            histories,
            history_cursor: HistoryCursor::new(),
            running: None,
            completion: None,
        }
    }

    /// Marks `kind` as the running action and resets per-prompt state.
    pub fn begin(&mut self, kind: ActionKind) {
        self.running = Some(kind);
        self.prompt_opened();
    }

    /// Called whenever a fresh prompt widget opens: history navigation
    /// starts over and any completion session dies with the old prompt.
    pub fn prompt_opened(&mut self) {
        self.history_cursor.reset();
        self.completion = None;
    }

    /// Clears the running action once its flow finishes or cancels.
    pub fn end(&mut self) {
        self.running = None;
        self.prompt_opened();
    }

    pub fn running(&self) -> Option<ActionKind> {
        self.running
    }

    /// Records a finished action's path into its history list.
    pub fn record_history(&mut self, entry: &str) {
        let Some(kind) = self.running else {
            log::warn!("history updated while no action is running");
            return;
        };
        let Some(history_kind) = kind.history_kind() else {
            log::warn!("{kind:?} keeps no history");
            return;
        };
        self.histories.push(history_kind, entry);
    }

    /// Previous history entry for the open prompt, stashing `live_text` on
    /// the first step away from it.
    pub fn history_previous(&mut self, live_text: &str) -> Option<String> {
        let kind = self.running?;
        if !self.settings.history_allowed(kind) {
            return None;
        }
        let history_kind = kind.history_kind()?;
        self.history_cursor.previous(
            self.histories.list(history_kind),
            live_text,
            self.settings.cycle_history,
        )
    }

    /// Next history entry, walking back toward the stashed live edit.
    pub fn history_next(&mut self) -> Option<String> {
        let kind = self.running?;
        if !self.settings.history_allowed(kind) {
            return None;
        }
        let history_kind = kind.history_kind()?;
        self.history_cursor
            .next(self.histories.list(history_kind), self.settings.cycle_history)
    }

    pub fn histories(&self) -> &Histories {
        &self.histories
    }

    /// Completion trigger for the open prompt.
    ///
    /// When the prompt text is exactly what the live session last produced,
    /// the user is still cycling and the cursor advances. Any divergence, a
    /// typed character or a deletion, invalidates the session and recomputes
    /// from a fresh directory listing. Returns the replacement text, or
    /// `None` when there is nothing to offer.
    pub fn trigger_completion(&mut self, input: &str, lister: &dyn DirLister) -> Option<String> {
        if let Some(session) = self.completion.as_mut() {
            if session.is_current(input) {
                return Some(session.cycle().to_string());
            }
            self.completion = None;
        }

        let candidates = complete_path(input, lister, &self.settings.completion_options());
        let session = CompletionSession::new(candidates)?;
        let first = session.current().to_string();
        // A single candidate leaves nothing to cycle through.
        if session.len() > 1 {
            self.completion = Some(session);
        }
        Some(first)
    }
}

/// Ranks the listing of the fragment's directory against its basename and
/// joins each surviving candidate back on, producing full replacement
/// texts for the prompt.
pub fn complete_path(input: &str, lister: &dyn DirLister, options: &Options) -> Vec<String> {
    let fragment = PathFragment::split(input);
    let dir = expand_homedir(&fragment.directory);
    let entries = lister.list(Path::new(&dir));
    rank(&fragment.basename, &entries, options)
        .into_iter()
        .map(|candidate| fragment.join(&candidate))
        .collect()
}
