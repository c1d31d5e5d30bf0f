mod git;
mod groups;
mod remote;

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

pub use git::{GitRemoteReader, RemoteReader};
pub use groups::extract_groups;
pub use remote::{parse, ParsedRemote};

/// A local checkout resolved to its GitLab project.
///
/// Only carries what is needed to look up CI/CD variables: where the remote
/// points and which groups the project lives under.
#[derive(Debug, Clone)]
pub struct Repo {
    pub local_path: PathBuf,
    pub remote_name: String,
    /// URL exactly as configured for the remote
    pub remote_url: String,
    pub remote: ParsedRemote,
    /// Parent groups, nearest first
    pub groups: Vec<String>,
}

impl Repo {
    /// Reads `remote_name` from the repository at `local_path` and derives the
    /// project path and parent groups from its URL.
    ///
    /// # Errors
    ///
    /// Propagates reader failures unchanged and returns
    /// [`GlenError::InvalidRemoteUrl`](crate::GlenError::InvalidRemoteUrl) when
    /// the remote is not an SSH or HTTP GitLab remote.
    pub fn open(
        reader: &impl RemoteReader,
        local_path: impl AsRef<Path>,
        remote_name: &str,
    ) -> Result<Self> {
        let local_path = local_path.as_ref();
        let remote_url = reader.remote_url(local_path, remote_name)?;
        let remote = parse(&remote_url)?;
        let groups = extract_groups(&remote.path);

        info!(
            "Remote {remote_name} points to project {} on {} ({} parent groups)",
            remote.path,
            remote.base_url,
            groups.len()
        );

        Ok(Self {
            local_path: local_path.to_path_buf(),
            remote_name: remote_name.to_owned(),
            remote_url,
            remote,
            groups,
        })
    }
}
