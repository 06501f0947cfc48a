//! Local persistence for survey submissions.
//!
//! Submissions are appended to a single JSONL file under the storage root:
//!
//! ```text
//! <root>/
//!   submissions.jsonl   # One submission per line, append-only
//! ```

use std::{fs, io, path::PathBuf};

// Traits must be in scope for `.lines()` on BufReader and `.write_all()` on File.
use io::{BufRead, Write};

use tracing::info;
use uuid::Uuid;

use crate::model::Submission;

const SUBMISSIONS_FILE: &str = "submissions.jsonl";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no submission matching '{0}'")]
    NotFound(String),

    #[error("'{reference}' is ambiguous: matches {} submissions: {}", .matches.len(), .matches.join(", "))]
    Ambiguous {
        reference: String,
        matches: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local file-based storage for submissions.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Appends a submission as one line of JSON.
    pub fn append(&self, submission: &Submission) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.submissions_path())?;
        let mut line = serde_json::to_string(submission)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        info!(id = %submission.id, "submission stored");
        Ok(())
    }

    /// Loads every stored submission, oldest first.
    pub fn list(&self) -> Result<Vec<Submission>> {
        let file = match fs::File::open(self.submissions_path()) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let reader = io::BufReader::new(file);
        let mut submissions: Vec<Submission> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                submissions.push(serde_json::from_str(&line)?);
            }
        }
        submissions.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(submissions)
    }

    /// Resolve a submission by full UUID or unambiguous id prefix.
    pub fn resolve(&self, reference: &str) -> Result<Submission> {
        let submissions = self.list()?;

        if let Ok(id) = reference.parse::<Uuid>() {
            return submissions
                .into_iter()
                .find(|s| s.id == id)
                .ok_or_else(|| StorageError::NotFound(reference.to_string()));
        }

        let mut matches: Vec<Submission> = submissions
            .into_iter()
            .filter(|s| s.id.to_string().starts_with(reference))
            .collect();

        match matches.len() {
            0 => Err(StorageError::NotFound(reference.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(StorageError::Ambiguous {
                reference: reference.to_string(),
                matches: matches.iter().map(Submission::short_id).collect(),
            }),
        }
    }

    fn submissions_path(&self) -> PathBuf {
        self.root.join(SUBMISSIONS_FILE)
    }
}
