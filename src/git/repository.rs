use std::collections::HashMap;

use git2::{Oid, Repository};

use crate::error::Result;
use crate::git::{CommitLog, History};

/// Real [History] implementation backed by the `git2` crate.
///
/// Discovers the repository from the current directory or its parents and
/// walks the full linear history from HEAD, newest first.
pub struct Git2History {
    repo: Repository,
}

impl Git2History {
    /// Discover the repository in the current directory or parent directories.
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".")?;
        Ok(Git2History { repo })
    }

    pub fn open(path: &std::path::Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2History { repo })
    }

    /// Map each tagged commit OID to its decoration text (`tag: <name>`),
    /// peeling annotated tags to the commit they point at.
    fn tag_decorations(&self) -> Result<HashMap<Oid, String>> {
        let mut decorations: HashMap<Oid, String> = HashMap::new();

        self.repo.tag_foreach(|oid, name_bytes| {
            let name = String::from_utf8_lossy(name_bytes);
            let short = name.trim_start_matches("refs/tags/").to_string();

            // Annotated tags point at a tag object; peel it to the commit.
            let target = match self.repo.find_tag(oid) {
                Ok(tag) => tag.target_id(),
                Err(_) => oid,
            };

            let entry = decorations.entry(target).or_default();
            if entry.is_empty() {
                entry.push_str(&format!("tag: {}", short));
            } else {
                entry.push_str(&format!(", tag: {}", short));
            }
            true
        })?;

        Ok(decorations)
    }
}

impl History for Git2History {
    fn log(&self) -> Result<CommitLog> {
        // Unborn branch (no commits yet) is an empty log, not an error.
        if self.repo.head().is_err() {
            return CommitLog::new(Vec::new(), Vec::new(), Vec::new());
        }

        let decorations = self.tag_decorations()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        let mut messages = Vec::new();
        let mut short_hashes = Vec::new();
        let mut ref_annotations = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;

            messages.push(commit.summary().unwrap_or("").to_string());

            let short = commit.as_object().short_id()?;
            short_hashes.push(short.as_str().unwrap_or("").to_string());

            ref_annotations.push(decorations.get(&oid).cloned().unwrap_or_default());
        }

        CommitLog::new(messages, short_hashes, ref_annotations)
    }

    fn push_tags(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            if let Some(username) = username_from_url {
                git2::Cred::ssh_key(
                    username,
                    None,
                    std::path::Path::new(&format!(
                        "{}/.ssh/id_rsa",
                        std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
                    )),
                    None,
                )
            } else {
                git2::Cred::default()
            }
        });
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "push failed for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        // Follow-tags: the trunk branch ref plus every tag ref.
        let mut refspecs = vec![format!("refs/heads/{}", branch)];
        for tag in self.repo.tag_names(None)?.iter().flatten() {
            refspecs.push(format!("refs/tags/{}", tag));
        }
        let refspecs: Vec<&str> = refspecs.iter().map(String::as_str).collect();

        remote.push(&refspecs, Some(&mut push_options))?;
        Ok(())
    }
}
