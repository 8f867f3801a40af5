//! Prompt flows for the file actions.
//!
//! Each action is a kind carrying a label and a history slot, and the flows
//! are pure functions returning outcome values: the host shim owns the
//! input widgets and the threads, this module only decides what they show
//! and what happens on confirm.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::Settings;
use crate::history::HistoryKind;
use crate::path::{abbr_homedir, ensure_trailing_sep, expand_homedir, trailing_sep_if_dir};
use crate::worker::FileOp;

/// The prompt-driven file actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Save,
    Copy,
    Move,
    Open,
    Delete,
    Close,
}

impl ActionKind {
    /// Label shown beside the input widget.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Save => "Save:",
            ActionKind::Copy => "Save copy as:",
            ActionKind::Move => "Move to:",
            ActionKind::Open => "Open:",
            ActionKind::Delete => "Delete?",
            ActionKind::Close => "Discard?",
        }
    }

    /// History list this action records into, if it records at all.
    pub fn history_kind(&self) -> Option<HistoryKind> {
        match self {
            ActionKind::Save => Some(HistoryKind::Save),
            ActionKind::Copy => Some(HistoryKind::Copy),
            ActionKind::Move => Some(HistoryKind::Move),
            ActionKind::Open => Some(HistoryKind::Open),
            ActionKind::Delete | ActionKind::Close => None,
        }
    }

    /// Whether the document reopens at the written path once the file
    /// operation completes. The write must finish first.
    pub fn reopens_after_write(&self) -> bool {
        matches!(self, ActionKind::Save | ActionKind::Move)
    }
}

/// What the host knows about the document behind the prompt.
#[derive(Clone, Debug, Default)]
pub struct DocumentState {
    /// Path of the backing file, if the document was ever saved.
    pub file_path: Option<PathBuf>,

    /// Host-assigned name for an unsaved document.
    pub name: Option<String>,

    /// Folders open in the window; the first one wins as the default
    /// directory for fresh prompts.
    pub folders: Vec<PathBuf>,

    /// Unsaved modifications.
    pub is_dirty: bool,
}

/// Initial contents of a prompt: the text plus the byte range the host
/// should preselect so the user can overwrite it by typing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptSeed {
    pub kind: ActionKind,
    pub text: String,
    pub selection: Option<Range<usize>>,
}

/// Computes what a freshly opened prompt shows for `kind`.
pub fn initial_prompt(kind: ActionKind, doc: &DocumentState, settings: &Settings) -> PromptSeed {
    match (kind, &doc.file_path) {
        (ActionKind::Copy | ActionKind::Move, Some(path)) => seed_for_resave_target(kind, path),
        (ActionKind::Open, Some(path)) => seed_for_open(path),
        (ActionKind::Delete | ActionKind::Close, _) => PromptSeed {
            kind,
            text: String::new(),
            selection: None,
        },
        _ => seed_for_fresh(kind, doc, settings),
    }
}

/// Never-saved document: default directory joined with the view's name (or
/// the configured untitled name), basename preselected.
fn seed_for_fresh(kind: ActionKind, doc: &DocumentState, settings: &Settings) -> PromptSeed {
    let dirname = match doc.folders.first() {
        Some(folder) => folder.display().to_string(),
        None => dirs::home_dir().unwrap_or_default().display().to_string(),
    };
    let dirname = abbr_homedir(&ensure_trailing_sep(&dirname));

    let basename = doc
        .name
        .clone()
        .or_else(|| {
            settings
                .use_untitled_files
                .then(|| settings.untitled_file_name.clone())
        })
        .unwrap_or_default();

    let text = format!("{dirname}{basename}");
    let selection = (!basename.is_empty()).then(|| text.len() - basename.len()..text.len());
    PromptSeed {
        kind,
        text,
        selection,
    }
}

/// Open prompt over a saved document: its own directory and name.
fn seed_for_open(path: &Path) -> PromptSeed {
    let dirname = path
        .parent()
        .map(|parent| abbr_homedir(&ensure_trailing_sep(&parent.display().to_string())))
        .unwrap_or_default();
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = format!("{dirname}{basename}");
    let selection = (!basename.is_empty()).then(|| text.len() - basename.len()..text.len());
    PromptSeed {
        kind: ActionKind::Open,
        text,
        selection,
    }
}

/// Copy/move of a saved document: the full current path with the
/// basename-without-extension region preselected for overwrite.
fn seed_for_resave_target(kind: ActionKind, path: &Path) -> PromptSeed {
    let text = abbr_homedir(&path.display().to_string());
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    // The dot belongs to the preserved suffix.
    let ext_len = path
        .extension()
        .map(|ext| ext.to_string_lossy().len() + 1)
        .unwrap_or(0);

    let selection =
        (!basename.is_empty()).then(|| text.len() - basename.len()..text.len() - ext_len);
    PromptSeed {
        kind,
        text,
        selection,
    }
}

/// Resolution of a confirmed save-like prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The typed path is an existing directory: re-prompt descended into
    /// it, untitled name preselected.
    Descend { seed: PromptSeed },

    /// The target exists; overwriting needs a confirmation, and the old
    /// file goes to the trash first.
    NeedsOverwrite { path: PathBuf },

    /// Clear to run the file operation.
    Proceed { path: PathBuf },
}

/// Resolves the path typed into a save-like prompt, after home expansion
/// and directory normalization.
pub fn resolve_save_path(kind: ActionKind, typed: &str, settings: &Settings) -> ConfirmOutcome {
    let expanded = trailing_sep_if_dir(&expand_homedir(typed));
    let path = PathBuf::from(&expanded);

    if path.is_dir() {
        let text = format!(
            "{}{}",
            abbr_homedir(&expanded),
            settings.untitled_file_name
        );
        let selection =
            (!settings.untitled_file_name.is_empty()).then(|| {
                text.len() - settings.untitled_file_name.len()..text.len()
            });
        ConfirmOutcome::Descend {
            seed: PromptSeed {
                kind,
                text,
                selection,
            },
        }
    } else if path.exists() {
        ConfirmOutcome::NeedsOverwrite { path }
    } else {
        ConfirmOutcome::Proceed { path }
    }
}

/// Resolution of a confirmed open prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Directories are added to the project's folders.
    AddFolder { path: PathBuf },
    OpenFile { path: PathBuf },
}

pub fn resolve_open_path(typed: &str) -> OpenOutcome {
    let expanded = trailing_sep_if_dir(&expand_homedir(typed));
    let path = PathBuf::from(&expanded);
    if path.is_dir() {
        OpenOutcome::AddFolder { path }
    } else {
        OpenOutcome::OpenFile { path }
    }
}

/// Builds the file operation a confirmed save-like prompt performs.
/// `overwrite` means the user approved replacing an existing target.
pub fn build_file_op(
    kind: ActionKind,
    doc: &DocumentState,
    path: PathBuf,
    contents: String,
    overwrite: bool,
) -> Option<FileOp> {
    let mut trash_first = Vec::new();
    if overwrite {
        trash_first.push(path.clone());
    }
    if kind == ActionKind::Move {
        if let Some(old) = &doc.file_path {
            if *old != path {
                trash_first.push(old.clone());
            }
        }
    }

    match kind {
        ActionKind::Save | ActionKind::Copy | ActionKind::Move => Some(FileOp::Write {
            path,
            contents,
            trash_first,
        }),
        _ => None,
    }
}

/// Interprets a yes/no reply. An empty reply falls back to `default`, and
/// anything whose first character is not `n`/`N` confirms.
pub fn answer_is_yes(answer: &str, default: &str) -> bool {
    let effective = if answer.trim().is_empty() {
        default
    } else {
        answer.trim()
    };
    match effective.chars().next() {
        Some('n') | Some('N') | None => false,
        Some(_) => true,
    }
}

/// What the delete action should do given the document state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteFlow {
    /// Nothing on disk to delete; degrade to the close flow.
    FallBackToClose,
    Confirm { path: PathBuf },
    TrashNow { path: PathBuf },
}

pub fn delete_flow(doc: &DocumentState, settings: &Settings) -> DeleteFlow {
    match &doc.file_path {
        Some(path) if path.exists() => {
            if settings.delete_without_prompt {
                DeleteFlow::TrashNow { path: path.clone() }
            } else {
                DeleteFlow::Confirm { path: path.clone() }
            }
        }
        _ => DeleteFlow::FallBackToClose,
    }
}

///// Whether closing the document would discard anything worth asking about:
/// unsaved edits, or a backing file that vanished from under it.
pub fn closing_discards(doc: &DocumentState) -> bool {
    if doc.is_dirty {
        return true;
    }
    match &doc.file_path {
        Some(path) => !path.exists(),
        None => false,
    }
}

/// Views whose closing would discard something, in window order. The
/// close-window and exit flows walk these one confirmation at a time; a
/// single decline aborts the whole close, clean views fall through
/// silently.
pub fn pending_discards(docs: &[DocumentState]) -> Vec<usize> {
    docs.iter()
        .enumerate()
        .filter(|(_, doc)| closing_discards(doc))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::MAIN_SEPARATOR;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn labels_and_history_slots() {
        assert_eq!(ActionKind::Copy.label(), "Save copy as:");
        assert_eq!(ActionKind::Save.history_kind(), Some(HistoryKind::Save));
        assert_eq!(ActionKind::Delete.history_kind(), None);
        assert!(ActionKind::Move.reopens_after_write());
        assert!(!ActionKind::Copy.reopens_after_write());
    }

    #[test]
    fn fresh_save_prompt_joins_folder_and_untitled_name() {
        let doc = DocumentState {
            folders: vec![PathBuf::from("project")],
            ..DocumentState::default()
        };
        let seed = initial_prompt(ActionKind::Save, &doc, &settings());

        let expected = format!("project{}untitled", MAIN_SEPARATOR);
        assert_eq!(seed.text, expected);
        let selection = seed.selection.unwrap();
        assert_eq!(&seed.text[selection], "untitled");
    }

    #[test]
    fn fresh_prompt_prefers_the_view_name() {
        let doc = DocumentState {
            name: Some("draft.md".to_string()),
            folders: vec![PathBuf::from("project")],
            ..DocumentState::default()
        };
        let seed = initial_prompt(ActionKind::Save, &doc, &settings());
        assert!(seed.text.ends_with("draft.md"));
    }

    #[test]
    fn untitled_name_is_withheld_when_disabled() {
        let mut s = settings();
        s.use_untitled_files = false;
        let doc = DocumentState {
            folders: vec![PathBuf::from("project")],
            ..DocumentState::default()
        };
        let seed = initial_prompt(ActionKind::Save, &doc, &s);
        assert_eq!(seed.text, format!("project{}", MAIN_SEPARATOR));
        assert_eq!(seed.selection, None);
    }

    #[test]
    fn copy_prompt_preselects_the_stem() {
        let path: PathBuf = ["notes", "report.txt"].iter().collect();
        let doc = DocumentState {
            file_path: Some(path),
            ..DocumentState::default()
        };
        let seed = initial_prompt(ActionKind::Copy, &doc, &settings());

        let selection = seed.selection.unwrap();
        assert_eq!(&seed.text[selection], "report");
        assert!(seed.text.ends_with(".txt"));
    }

    #[test]
    fn open_prompt_preselects_the_full_name() {
        let path: PathBuf = ["notes", "report.txt"].iter().collect();
        let doc = DocumentState {
            file_path: Some(path),
            ..DocumentState::default()
        };
        let seed = initial_prompt(ActionKind::Open, &doc, &settings());

        let selection = seed.selection.unwrap();
        assert_eq!(&seed.text[selection], "report.txt");
    }

    #[test]
    fn resolving_a_directory_descends_into_it() {
        let dir = tempfile::tempdir().unwrap();
        let typed = dir.path().display().to_string();

        match resolve_save_path(ActionKind::Save, &typed, &settings()) {
            ConfirmOutcome::Descend { seed } => {
                assert!(seed.text.ends_with("untitled"));
                let selection = seed.selection.unwrap();
                assert_eq!(&seed.text[selection], "untitled");
            }
            other => panic!("expected Descend, got {other:?}"),
        }
    }

    #[test]
    fn resolving_an_existing_file_requires_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken.txt");
        fs::write(&target, "occupied").unwrap();

        let typed = target.display().to_string();
        assert_eq!(
            resolve_save_path(ActionKind::Save, &typed, &settings()),
            ConfirmOutcome::NeedsOverwrite { path: target }
        );
    }

    #[test]
    fn resolving_a_fresh_path_proceeds() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("new.txt");
        let typed = target.display().to_string();
        assert_eq!(
            resolve_save_path(ActionKind::Save, &typed, &settings()),
            ConfirmOutcome::Proceed { path: target }
        );
    }

    #[test]
    fn open_resolution_distinguishes_folders_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let typed_dir = dir.path().display().to_string();
        assert!(matches!(
            resolve_open_path(&typed_dir),
            OpenOutcome::AddFolder { .. }
        ));

        let typed_file = dir.path().join("anything.txt").display().to_string();
        assert!(matches!(
            resolve_open_path(&typed_file),
            OpenOutcome::OpenFile { .. }
        ));
    }

    #[test]
    fn move_op_trashes_both_target_and_old_copy() {
        let doc = DocumentState {
            file_path: Some(PathBuf::from("old.txt")),
            ..DocumentState::default()
        };
        let op = build_file_op(
            ActionKind::Move,
            &doc,
            PathBuf::from("new.txt"),
            "body".to_string(),
            true,
        )
        .unwrap();

        match op {
            FileOp::Write { trash_first, .. } => {
                assert_eq!(
                    trash_first,
                    vec![PathBuf::from("new.txt"), PathBuf::from("old.txt")]
                );
            }
            other => panic!("expected Write, got {other:?}"),
        }
    }

    #[test]
    fn moving_onto_the_same_path_trashes_it_once() {
        let doc = DocumentState {
            file_path: Some(PathBuf::from("same.txt")),
            ..DocumentState::default()
        };
        let op = build_file_op(
            ActionKind::Move,
            &doc,
            PathBuf::from("same.txt"),
            "body".to_string(),
            true,
        )
        .unwrap();
        match op {
            FileOp::Write { trash_first, .. } => {
                assert_eq!(trash_first, vec![PathBuf::from("same.txt")]);
            }
            other => panic!("expected Write, got {other:?}"),
        }
    }

    #[test]
    fn non_save_actions_build_no_op() {
        let doc = DocumentState::default();
        assert!(build_file_op(
            ActionKind::Open,
            &doc,
            PathBuf::from("x"),
            String::new(),
            false
        )
        .is_none());
    }

    #[test]
    fn yes_no_answers_follow_the_default() {
        assert!(answer_is_yes("", "y"));
        assert!(!answer_is_yes("", "n"));
        assert!(!answer_is_yes("", ""));
        assert!(answer_is_yes("yes", "n"));
        assert!(answer_is_yes("whatever", "n"));
        assert!(!answer_is_yes("no", "y"));
        assert!(!answer_is_yes("N", "y"));
    }

    #[test]
    fn delete_degrades_to_close_without_a_file() {
        let doc = DocumentState::default();
        assert_eq!(delete_flow(&doc, &settings()), DeleteFlow::FallBackToClose);

        let gone = DocumentState {
            file_path: Some(PathBuf::from("does-not-exist-anywhere.txt")),
            ..DocumentState::default()
        };
        assert_eq!(delete_flow(&gone, &settings()), DeleteFlow::FallBackToClose);
    }

    #[test]
    fn delete_prompts_unless_configured_not_to() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("victim.txt");
        fs::write(&target, "bye").unwrap();
        let doc = DocumentState {
            file_path: Some(target.clone()),
            ..DocumentState::default()
        };

        assert_eq!(
            delete_flow(&doc, &settings()),
            DeleteFlow::Confirm {
                path: target.clone()
            }
        );

        let mut s = settings();
        s.delete_without_prompt = true;
        assert_eq!(delete_flow(&doc, &s), DeleteFlow::TrashNow { path: target });
    }

    #[test]
    fn closing_asks_about_dirty_or_vanished_documents() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("kept.txt");
        fs::write(&present, "kept").unwrap();

        let clean = DocumentState {
            file_path: Some(present.clone()),
            ..DocumentState::default()
        };
        assert!(!closing_discards(&clean));

        let dirty = DocumentState {
            file_path: Some(present),
            is_dirty: true,
            ..DocumentState::default()
        };
        assert!(closing_discards(&dirty));

        let vanished = DocumentState {
            file_path: Some(dir.path().join("gone.txt")),
            ..DocumentState::default()
        };
        assert!(closing_discards(&vanished));
    }

    #[test]
    fn window_close_collects_only_the_discarding_views() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("kept.txt");
        fs::write(&present, "kept").unwrap();

        let docs = vec![
            DocumentState {
                file_path: Some(present.clone()),
                ..DocumentState::default()
            },
            DocumentState {
                file_path: Some(present.clone()),
                is_dirty: true,
                ..DocumentState::default()
            },
            DocumentState {
                file_path: Some(dir.path().join("gone.txt")),
                ..DocumentState::default()
            },
            DocumentState::default(),
        ];

        assert_eq!(pending_discards(&docs), vec![1, 2]);
    }

    #[test]
    fn window_of_clean_views_needs_no_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("kept.txt");
        fs::write(&present, "kept").unwrap();

        let docs = vec![
            DocumentState {
                file_path: Some(present),
                ..DocumentState::default()
            },
            DocumentState::default(),
        ];
        assert!(pending_discards(&docs).is_empty());
    }
}
