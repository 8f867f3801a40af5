//! Background execution of file operations.
//!
//! Mutations never run on the thread that must stay responsive to input: a
//! `FileOp` value is shipped to a worker thread and its status comes back
//! over a channel. Receiving that status is the ordering point: callers
//! wait for it before any dependent step, such as reopening a moved file at
//! its new path.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::error::Result;
use crate::fsops;

/// A filesystem mutation to run off the interactive thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOp {
    /// Write `contents` to `path`, trashing `trash_first` beforehand: the
    /// approved overwrite target, the old copy of a moved file, or both.
    Write {
        path: PathBuf,
        contents: String,
        trash_first: Vec<PathBuf>,
    },

    /// Move `path` to the trash.
    Trash { path: PathBuf },
}

impl FileOp {
    /// Runs the operation, returning the status line to display.
    pub fn run(self) -> Result<String> {
        match self {
            FileOp::Write {
                path,
                contents,
                trash_first,
            } => {
                for victim in trash_first {
                    fsops::move_to_trash(&victim)?;
                }
                fsops::write_file(&path, &contents)
            }
            FileOp::Trash { path } => {
                fsops::move_to_trash(&path)?;
                Ok(format!("Trashed: {}", path.display()))
            }
        }
    }
}

/// Runs `op` on a worker thread. The returned receiver delivers the result
/// exactly once.
pub fn spawn(op: FileOp) -> mpsc::Receiver<Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // A dropped receiver means the prompt was abandoned.
        let _ = tx.send(op.run());
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn write_completes_before_the_receiver_returns() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("moved").join("into.txt");

        let rx = spawn(FileOp::Write {
            path: target.clone(),
            contents: "payload".to_string(),
            trash_first: Vec::new(),
        });

        let status = rx.recv().unwrap().unwrap();
        // The ordering invariant: once the status is in hand, the file is
        // on disk and safe to reopen.
        assert_eq!(fs::read_to_string(&target).unwrap(), "payload");
        assert!(status.contains("into.txt"));
    }

    #[test]
    fn run_reports_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A directory is already occupying the target path.
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();

        let result = FileOp::Write {
            path: target,
            contents: "x".to_string(),
            trash_first: Vec::new(),
        }
        .run();
        assert!(result.is_err());
    }
}
