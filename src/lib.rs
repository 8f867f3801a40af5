//! Prompt-driven file operations without native dialogs.
//!
//! The core is a path completion engine: given a typed fragment and the
//! listing of its directory, rank candidates by shared-prefix length and
//! narrow to a menu of ties or a single shell-style prefix, cycling through
//! ties on repeated triggers. Around it sit the collaborators a host editor
//! needs to run save/copy/move/open/delete/close through input prompts:
//! per-action input history, prompt seeding and confirm resolution, thin
//! filesystem wrappers, and background execution of the mutations.

pub mod complete;
pub mod config;
pub mod error;
pub mod fsops;
pub mod history;
pub mod path;
pub mod prompt;
pub mod session;
pub mod worker;

pub use complete::{rank, CompletionSession, DirPriority, Entry, Mode, Options};
pub use config::Settings;
pub use error::{Error, Result};
pub use session::{complete_path, EditorSessionState};
