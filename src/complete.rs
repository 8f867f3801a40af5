//! Path completion: ranking directory entries against a typed fragment and
//! cycling through the tied candidates on repeated triggers.

use std::path::MAIN_SEPARATOR;

use serde::Deserialize;

/// One filesystem entry in the directory being completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Bare entry name, no path separator.
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    /// Creates a file entry.
    pub fn file(name: impl Into<String>) -> Entry {
        Entry {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Creates a directory entry.
    pub fn dir(name: impl Into<String>) -> Entry {
        Entry {
            name: name.into(),
            is_dir: true,
        }
    }

    /// The name as offered in a completion list: directories carry a
    /// trailing separator.
    fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}{}", self.name, MAIN_SEPARATOR)
        } else {
            self.name.clone()
        }
    }
}

/// How the tied candidate set is narrowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Present every tied candidate for the user to pick from.
    Menu,

    /// Collapse ties to their longest common prefix, like a command shell.
    Shell,
}

/// Where directories sort relative to files. Only consulted in menu mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirPriority {
    First,
    Last,
    None,
}

/// Options for a single `rank` call.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub mode: Mode,
    pub dir_priority: DirPriority,

    /// When false, directory entries are dropped from the candidate pool
    /// before ranking.
    pub allow_directories: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            mode: Mode::Menu,
            dir_priority: DirPriority::None,
            allow_directories: true,
        }
    }
}

/// Ranks `entries` against the typed `basename` and returns the narrowed
/// candidate list.
///
/// An exact name match returns just `basename`, letting the user confirm a
/// full name without a separator being appended. Otherwise every entry is
/// scored by shared-prefix length; only the top-scoring tied set survives.
/// Shell mode collapses the tied set to its longest common prefix, menu
/// mode returns it whole with directories decorated.
///
/// Never fails: an unlistable directory shows up here as an empty `entries`
/// slice and yields an empty result.
pub fn rank(basename: &str, entries: &[Entry], options: &Options) -> Vec<String> {
    let pool: Vec<&Entry> = entries
        .iter()
        .filter(|entry| options.allow_directories || !entry.is_dir)
        .collect();

    if pool.is_empty() {
        return Vec::new();
    }

    if !basename.is_empty() && pool.iter().any(|entry| entry.name == basename) {
        return vec![basename.to_string()];
    }

    let mut ranked: Vec<(usize, &Entry)> = pool
        .into_iter()
        .map(|entry| (common_prefix_len(&entry.name, basename), entry))
        .collect();

    // Stable sort passes, least significant first: the pass applied last
    // dominates. Directory priority is a menu-only bucket between the name
    // tiebreak and the rank order.
    ranked.sort_by(|a, b| a.1.name.cmp(&b.1.name));
    if options.mode == Mode::Menu {
        match options.dir_priority {
            DirPriority::First => ranked.sort_by_key(|(_, entry)| !entry.is_dir),
            DirPriority::Last => ranked.sort_by_key(|(_, entry)| entry.is_dir),
            DirPriority::None => {}
        }
    }
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let max_rank = ranked[0].0;
    if max_rank == 0 && !basename.is_empty() {
        // Nothing shares even a first character with the input; offering
        // the whole directory as "completions" would be noise.
        return Vec::new();
    }

    let tied: Vec<String> = ranked
        .iter()
        .take_while(|(rank, _)| *rank == max_rank)
        .map(|(_, entry)| entry.display_name())
        .collect();

    match options.mode {
        Mode::Shell => {
            let prefix = common_prefix_of(&tied);
            if prefix.is_empty() {
                vec![basename.to_string()]
            } else {
                vec![prefix]
            }
        }
        Mode::Menu => tied,
    }
}

/// Length in characters of the shared prefix of `a` and `b`, case-sensitive.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Longest common prefix across all names.
fn common_prefix_of(names: &[String]) -> String {
    let Some(first) = names.first() else {
        return String::new();
    };

    let mut len = first.chars().count();
    for name in &names[1..] {
        len = len.min(common_prefix_len(first, name));
    }
    first.chars().take(len).collect()
}

/// Cursor state for cycling through a computed candidate set while the
/// prompt text stays untouched. One session belongs to one open prompt.
#[derive(Clone, Debug)]
pub struct CompletionSession {
    candidates: Vec<String>,
    cursor: usize,
    last_snapshot: String,
}

impl CompletionSession {
    /// Starts a session over a non-empty candidate list. The first
    /// candidate is taken to be already applied to the prompt, so the
    /// snapshot starts there and the first `cycle` moves to index 1.
    pub fn new(candidates: Vec<String>) -> Option<CompletionSession> {
        let first = candidates.first()?.clone();
        Some(CompletionSession {
            candidates,
            cursor: 0,
            last_snapshot: first,
        })
    }

    /// The candidate under the cursor.
    pub fn current(&self) -> &str {
        &self.candidates[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the observed prompt text is exactly the text this session
    /// last produced. Anything else means the user has typed since, and the
    /// session must be replaced by a fresh `rank` call.
    pub fn is_current(&self, observed: &str) -> bool {
        observed == self.last_snapshot
    }

    /// Advances to the next candidate, wrapping past the end, and records
    /// the produced text so staleness can be detected on the next trigger.
    pub fn cycle(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.candidates.len();
        self.last_snapshot = self.candidates[self.cursor].clone();
        &self.candidates[self.cursor]
    }
}
