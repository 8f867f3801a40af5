//! Bounded input history with a stash-aware navigation cursor.

/// A bounded, most-recent-first list of submitted prompt inputs.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> History {
        History {
            entries: Vec::new(),
            limit,
        }
    }

    /// Records an entry at the front, dropping the oldest past the limit.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.insert(0, entry.into());
        self.entries.truncate(self.limit);
    }

    /// Entry at `index`, where 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Position within a history list while the user navigates a prompt.
///
/// `index = None` is the live, unsubmitted edit; stepping away from it
/// stashes the current text so stepping back can restore it. Opening a new
/// prompt resets the cursor.
#[derive(Clone, Debug, Default)]
pub struct HistoryCursor {
    index: Option<usize>,
    stash: Option<String>,
}

impl HistoryCursor {
    pub fn new() -> HistoryCursor {
        HistoryCursor::default()
    }

    /// Forgets the position and the stashed edit.
    pub fn reset(&mut self) {
        self.index = None;
        self.stash = None;
    }

    /// Steps from the live edit toward older entries. Returns the text the
    /// prompt should now show, or `None` when the history is empty.
    pub fn previous(&mut self, history: &History, live_text: &str, cycle: bool) -> Option<String> {
        if history.is_empty() {
            return None;
        }

        match self.index {
            None => {
                self.stash = Some(live_text.to_string());
                self.index = Some(0);
                history.get(0).map(str::to_string)
            }
            Some(i) if i + 1 >= history.len() => {
                if cycle {
                    self.index = None;
                    Some(self.stash.clone().unwrap_or_default())
                } else {
                    // Pinned at the oldest entry.
                    history.get(i).map(str::to_string)
                }
            }
            Some(i) => {
                self.index = Some(i + 1);
                history.get(i + 1).map(str::to_string)
            }
        }
    }

    /// Steps back toward the live edit, restoring the stashed text when the
    /// cursor arrives there.
    pub fn next(&mut self, history: &History, cycle: bool) -> Option<String> {
        if history.is_empty() {
            return None;
        }

        match self.index {
            None => {
                if cycle {
                    let last = history.len() - 1;
                    self.index = Some(last);
                    history.get(last).map(str::to_string)
                } else {
                    self.stash.clone()
                }
            }
            Some(0) => {
                self.index = None;
                Some(self.stash.clone().unwrap_or_default())
            }
            Some(i) => {
                self.index = Some(i - 1);
                history.get(i - 1).map(str::to_string)
            }
        }
    }
}

/// Which list a submitted path is recorded under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryKind {
    Save,
    Copy,
    Move,
    Open,
}

/// The per-action history lists, or one shared list, per configuration.
#[derive(Clone, Debug)]
pub struct Histories {
    use_global: bool,
    global: History,
    save: History,
    copy: History,
    mv: History,
    open: History,
}

impl Histories {
    pub fn new(limit: usize, use_global: bool) -> Histories {
        Histories {
            use_global,
            global: History::new(limit),
            save: History::new(limit),
            copy: History::new(limit),
            mv: History::new(limit),
            open: History::new(limit),
        }
    }

    /// The list reads and writes for `kind` resolve to.
    pub fn list(&self, kind: HistoryKind) -> &History {
        if self.use_global {
            return &self.global;
        }
        match kind {
            HistoryKind::Save => &self.save,
            HistoryKind::Copy => &self.copy,
            HistoryKind::Move => &self.mv,
            HistoryKind::Open => &self.open,
        }
    }

    pub fn push(&mut self, kind: HistoryKind, entry: impl Into<String>) {
        let list = if self.use_global {
            &mut self.global
        } else {
            match kind {
                HistoryKind::Save => &mut self.save,
                HistoryKind::Copy => &mut self.copy,
                HistoryKind::Move => &mut self.mv,
                HistoryKind::Open => &mut self.open,
            }
        };
        list.push(entry);
    }
}
