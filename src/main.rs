//! Demo driver: runs one prompt-driven file action against the real
//! filesystem, with the completion engine mounted behind rustyline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::bail;
use rustyline::completion::Candidate;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{
    Completer, CompletionType, Config, Context, DefaultEditor, Editor, Helper, Highlighter,
    Hinter, Validator,
};

use nodialogs::complete::Options;
use nodialogs::fsops::OsLister;
use nodialogs::path::abbr_homedir;
use nodialogs::prompt::{
    self, ActionKind, ConfirmOutcome, DeleteFlow, DocumentState, OpenOutcome, PromptSeed,
};
use nodialogs::session::complete_path;
use nodialogs::worker::{self, FileOp};
use nodialogs::{EditorSessionState, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let action = args.next().unwrap_or_default();
    let files: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let settings = Settings::load_or_default(Path::new("nodialogs.toml"));
    let mut state = EditorSessionState::new(settings);

    // Closing a whole window walks every view, not just one document.
    if action == "close-window" {
        return run_close_window(&mut state, files);
    }

    let kind = match action.as_str() {
        "save" => ActionKind::Save,
        "copy" => ActionKind::Copy,
        "move" => ActionKind::Move,
        "open" => ActionKind::Open,
        "delete" => ActionKind::Delete,
        "close" => ActionKind::Close,
        _ => bail!("usage: nodialogs <save|copy|move|open|delete|close|close-window> [file...]"),
    };

    run_action(&mut state, kind, files.into_iter().next())
}

/// The scratch "view" the demo operates on: a file from argv, or an empty
/// never-saved buffer.
struct Document {
    meta: DocumentState,
    contents: String,
}

fn document_for(file: &Option<PathBuf>) -> anyhow::Result<Document> {
    let folders = vec![std::env::current_dir()?];
    match file {
        Some(path) => Ok(Document {
            meta: DocumentState {
                file_path: Some(path.clone()),
                name: None,
                folders,
                is_dirty: false,
            },
            contents: fs::read_to_string(path).unwrap_or_default(),
        }),
        None => Ok(Document {
            meta: DocumentState {
                file_path: None,
                name: None,
                folders,
                is_dirty: true,
            },
            contents: String::new(),
        }),
    }
}

fn run_action(
    state: &mut EditorSessionState,
    kind: ActionKind,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let doc = document_for(&file)?;
    // One line editor answers every yes/no question of this action.
    let mut answers = DefaultEditor::new()?;
    state.begin(kind);

    let outcome = match kind {
        ActionKind::Save | ActionKind::Copy | ActionKind::Move => {
            run_save_like(state, kind, &doc, &mut answers)
        }
        ActionKind::Open => run_open(state, &doc.meta),
        ActionKind::Delete => run_delete(state, &doc.meta, &mut answers),
        ActionKind::Close => run_close(state, &doc.meta, &mut answers),
    };
    state.end();
    outcome
}

/// Aggregate close over every view in the window: each discarding view
/// gets its own confirmation, any decline keeps the window open.
fn run_close_window(state: &mut EditorSessionState, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let docs: Vec<DocumentState> = files
        .iter()
        .map(|path| DocumentState {
            file_path: Some(path.clone()),
            name: None,
            folders: Vec::new(),
            is_dirty: false,
        })
        .collect();

    let mut answers = DefaultEditor::new()?;
    state.begin(ActionKind::Close);
    let outcome = confirm_window_close(state, &docs, &mut answers);
    state.end();
    outcome
}

fn confirm_window_close(
    state: &EditorSessionState,
    docs: &[DocumentState],
    answers: &mut DefaultEditor,
) -> anyhow::Result<()> {
    for index in prompt::pending_discards(docs) {
        let Some(path) = &docs[index].file_path else {
            continue;
        };
        let question = format!(
            "Discard {}? (defaults to {}) ",
            path.display(),
            state.settings.discard_by_default
        );
        let Some(answer) = read_answer(answers, &question)? else {
            return Ok(());
        };
        if !prompt::answer_is_yes(&answer, &state.settings.discard_by_default) {
            return Ok(());
        }
    }
    println!("Closed window");
    Ok(())
}

fn run_save_like(
    state: &mut EditorSessionState,
    kind: ActionKind,
    doc: &Document,
    answers: &mut DefaultEditor,
) -> anyhow::Result<()> {
    // A plain save of an already-saved document skips the prompt entirely.
    if kind == ActionKind::Save {
        if let Some(path) = &doc.meta.file_path {
            let op = FileOp::Write {
                path: path.clone(),
                contents: doc.contents.clone(),
                trash_first: Vec::new(),
            };
            return finish(state, kind, op, path.clone());
        }
    }

    let mut seed = prompt::initial_prompt(kind, &doc.meta, &state.settings);
    loop {
        let Some(typed) = read_path_prompt(state, &seed)? else {
            return Ok(());
        };

        match prompt::resolve_save_path(kind, &typed, &state.settings) {
            ConfirmOutcome::Descend { seed: next } => {
                state.prompt_opened();
                seed = next;
            }
            ConfirmOutcome::NeedsOverwrite { path } => {
                let question = format!(
                    "File exists. Overwrite? (defaults to {}) ",
                    state.settings.overwrite_by_default
                );
                let Some(answer) = read_answer(answers, &question)? else {
                    return Ok(());
                };
                if !prompt::answer_is_yes(&answer, &state.settings.overwrite_by_default) {
                    return Ok(());
                }
                let Some(op) =
                    prompt::build_file_op(kind, &doc.meta, path.clone(), doc.contents.clone(), true)
                else {
                    return Ok(());
                };
                return finish(state, kind, op, path);
            }
            ConfirmOutcome::Proceed { path } => {
                let Some(op) = prompt::build_file_op(
                    kind,
                    &doc.meta,
                    path.clone(),
                    doc.contents.clone(),
                    false,
                ) else {
                    return Ok(());
                };
                return finish(state, kind, op, path);
            }
        }
    }
}

/// Records history, runs the operation off-thread, and waits for its status
/// before the dependent reopen.
fn finish(
    state: &mut EditorSessionState,
    kind: ActionKind,
    op: FileOp,
    path: PathBuf,
) -> anyhow::Result<()> {
    state.record_history(&abbr_homedir(&path.display().to_string()));

    let status = worker::spawn(op).recv()??;
    println!("{status}");

    if kind.reopens_after_write() {
        println!("Reopened: {}", path.display());
    }
    Ok(())
}

fn run_open(state: &mut EditorSessionState, doc: &DocumentState) -> anyhow::Result<()> {
    let seed = prompt::initial_prompt(ActionKind::Open, doc, &state.settings);
    let Some(typed) = read_path_prompt(state, &seed)? else {
        return Ok(());
    };

    match prompt::resolve_open_path(&typed) {
        OpenOutcome::AddFolder { path } => {
            state.record_history(&abbr_homedir(&path.display().to_string()));
            println!("Added folder to project: {}", path.display());
        }
        OpenOutcome::OpenFile { path } => {
            state.record_history(&abbr_homedir(&path.display().to_string()));
            let contents = fs::read_to_string(&path)?;
            println!("Opened: {}", path.display());
            print!("{contents}");
        }
    }
    Ok(())
}

fn run_delete(
    state: &mut EditorSessionState,
    doc: &DocumentState,
    answers: &mut DefaultEditor,
) -> anyhow::Result<()> {
    match prompt::delete_flow(doc, &state.settings) {
        DeleteFlow::FallBackToClose => run_close(state, doc, answers),
        DeleteFlow::Confirm { path } => {
            let question = format!(
                "Delete? (defaults to {}) ",
                state.settings.delete_by_default
            );
            let Some(answer) = read_answer(answers, &question)? else {
                return Ok(());
            };
            if !prompt::answer_is_yes(&answer, &state.settings.delete_by_default) {
                return Ok(());
            }
            trash_and_close(state, path)
        }
        DeleteFlow::TrashNow { path } => trash_and_close(state, path),
    }
}

fn trash_and_close(state: &EditorSessionState, path: PathBuf) -> anyhow::Result<()> {
    let status = worker::spawn(FileOp::Trash { path }).recv()??;
    println!("{status}");
    if state.settings.close_on_deletion {
        println!("Closed view");
    }
    Ok(())
}

fn run_close(
    state: &mut EditorSessionState,
    doc: &DocumentState,
    answers: &mut DefaultEditor,
) -> anyhow::Result<()> {
    if !prompt::closing_discards(doc) {
        println!("Closed view");
        return Ok(());
    }

    let question = format!(
        "Discard? (defaults to {}) ",
        state.settings.discard_by_default
    );
    let Some(answer) = read_answer(answers, &question)? else {
        return Ok(());
    };
    if prompt::answer_is_yes(&answer, &state.settings.discard_by_default) {
        println!("Closed view, changes discarded");
    }
    Ok(())
}

/// Shows a path prompt seeded for the action, with the completion engine
/// mounted as the line editor's completer. `None` means cancelled.
fn read_path_prompt(
    state: &EditorSessionState,
    seed: &PromptSeed,
) -> anyhow::Result<Option<String>> {
    let helper = PathPromptHelper::new(state.settings.completion_options());
    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut editor: Editor<PathPromptHelper, FileHistory> = Editor::with_config(config)?;
    editor.set_helper(Some(helper));

    if state.settings.history_allowed(seed.kind) {
        preload_history(&mut editor, state, seed.kind);
    }

    // Emulate the host's preselected region: the caret lands where the
    // selection starts, so typing replaces what follows.
    let caret = seed
        .selection
        .as_ref()
        .map(|range| range.start)
        .unwrap_or(seed.text.len());
    let (left, right) = seed.text.split_at(caret);
    let label = format!("{} ", seed.kind.label());

    match editor.readline_with_initial(&label, (left, right)) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Feeds this action's history into the line editor, oldest entry first, so
/// the up arrow walks from most recent backwards.
fn preload_history(
    editor: &mut Editor<PathPromptHelper, FileHistory>,
    state: &EditorSessionState,
    kind: ActionKind,
) {
    let Some(history_kind) = kind.history_kind() else {
        return;
    };
    let list = state.histories().list(history_kind);
    for index in (0..list.len()).rev() {
        if let Some(entry) = list.get(index) {
            let _ = editor.add_history_entry(entry);
        }
    }
}

fn read_answer(editor: &mut DefaultEditor, question: &str) -> anyhow::Result<Option<String>> {
    match editor.readline(question) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct PathPromptHelper {
    #[rustyline(Completer)]
    completer: PathPromptCompleter,
}

impl PathPromptHelper {
    fn new(options: Options) -> PathPromptHelper {
        PathPromptHelper {
            completer: PathPromptCompleter { options },
        }
    }
}

struct PathPromptCompleter {
    options: Options,
}

impl rustyline::completion::Completer for PathPromptCompleter {
    type Candidate = PathCandidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<PathCandidate>)> {
        // Candidates come back as full replacement texts, so they replace
        // the line from its start.
        let candidates = complete_path(&line[..pos], &OsLister, &self.options)
            .into_iter()
            .map(PathCandidate::new)
            .collect();
        Ok((0, candidates))
    }
}

struct PathCandidate {
    text: String,
}

impl PathCandidate {
    fn new(text: String) -> PathCandidate {
        PathCandidate { text }
    }
}

impl Candidate for PathCandidate {
    fn display(&self) -> &str {
        &self.text
    }

    fn replacement(&self) -> &str {
        &self.text
    }
}
