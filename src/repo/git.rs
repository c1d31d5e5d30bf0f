use std::path::Path;

use git2::Repository;
use log::debug;

use crate::error::{GlenError, Result};

/// Reads the raw URL of a named remote from a local repository.
pub trait RemoteReader {
    /// # Errors
    ///
    /// Fails when `local_path` is not inside a repository, when the remote does
    /// not exist, or when the remote has no URL.
    fn remote_url(&self, local_path: &Path, remote_name: &str) -> Result<String>;
}

/// [`RemoteReader`] backed by libgit2.
///
/// Walks up from `local_path` to the repository root, so running from a
/// subdirectory of a checkout works like the git CLI does.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRemoteReader;

impl RemoteReader for GitRemoteReader {
    fn remote_url(&self, local_path: &Path, remote_name: &str) -> Result<String> {
        let repo = Repository::discover(local_path).map_err(|source| GlenError::RepositoryOpen {
            path: local_path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {}", repo.path().display());

        let remote = repo
            .find_remote(remote_name)
            .map_err(|source| GlenError::RemoteNotFound {
                name: remote_name.to_owned(),
                source,
            })?;

        remote
            .url()
            .map(ToOwned::to_owned)
            .ok_or_else(|| GlenError::RemoteWithoutUrl(remote_name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_with_remote(name: &str, url: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.remote(name, url).unwrap();
        dir
    }

    #[test]
    fn test_reads_origin_url() {
        let dir = init_with_remote("origin", "git@gitlab.com:testgroup/testproject.git");

        let url = GitRemoteReader.remote_url(dir.path(), "origin").unwrap();
        assert_eq!(url, "git@gitlab.com:testgroup/testproject.git");
    }

    #[test]
    fn test_reads_custom_remote_name() {
        let dir = init_with_remote("upstream", "https://gitlab.example.com/org/repo.git");

        let url = GitRemoteReader.remote_url(dir.path(), "upstream").unwrap();
        assert_eq!(url, "https://gitlab.example.com/org/repo.git");
    }

    #[test]
    fn test_reads_from_subdirectory() {
        let dir = init_with_remote("origin", "git@gitlab.com:group/project.git");
        let sub_dir = dir.path().join("src").join("pkg");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let url = GitRemoteReader.remote_url(&sub_dir, "origin").unwrap();
        assert_eq!(url, "git@gitlab.com:group/project.git");
    }

    #[test]
    fn test_missing_remote() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let err = GitRemoteReader
            .remote_url(dir.path(), "nonexistent")
            .unwrap_err();
        assert!(matches!(err, GlenError::RemoteNotFound { ref name, .. } if name == "nonexistent"));
        assert!(err.to_string().contains("unable to find selected remote"));
    }

    #[test]
    fn test_nonexistent_path() {
        let err = GitRemoteReader
            .remote_url(Path::new("/nonexistent/path/to/repo"), "origin")
            .unwrap_err();
        assert!(err.to_string().contains("unable to open git repository"));
    }
}
