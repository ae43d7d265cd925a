use std::sync::Mutex;

use crate::error::Result;
use crate::git::{CommitLog, History};

/// Mock history for testing without a real repository.
///
/// Serves a fixed [CommitLog] and records push invocations.
#[derive(Default)]
pub struct MockHistory {
    log: CommitLog,
    pushes: Mutex<Vec<(String, String)>>,
}

impl MockHistory {
    pub fn new(log: CommitLog) -> Self {
        MockHistory {
            log,
            pushes: Mutex::new(Vec::new()),
        }
    }

    /// `(remote, branch)` pairs recorded by `push_tags`, in call order
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().unwrap().clone()
    }
}

impl History for MockHistory {
    fn log(&self) -> Result<CommitLog> {
        Ok(self.log.clone())
    }

    fn push_tags(&self, remote: &str, branch: &str) -> Result<()> {
        self.pushes
            .lock()
            .unwrap()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }
}
