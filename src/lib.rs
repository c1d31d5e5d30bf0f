//! Glen reads the GitLab remote of a local git checkout and collects the
//! CI/CD variables of that project, optionally merged with the variables of
//! every parent group.
//!
//! The pieces compose leaves first:
//!
//! 1. [`parse`] turns a remote URL into a host and project path.
//! 2. [`extract_groups`] derives the parent group chain from the project path.
//! 3. [`VariableCollector`] fetches every scope from a [`VariableSource`] and
//!    merges them, project over nearest group over root group.
//!
//! [`Repo::open`] runs steps 1 and 2 against a real repository, and
//! [`collect`] runs step 3 against the GitLab API.

pub mod auth;
pub mod config;
pub mod error;
pub mod output;
pub mod providers;
pub mod repo;
pub mod variables;

pub use auth::Token;
pub use error::{GlenError, Result};
pub use providers::GitLabClient;
pub use repo::{extract_groups, parse, GitRemoteReader, ParsedRemote, RemoteReader, Repo};
pub use variables::{
    ScopeKind, Variable, VariableCollector, VariableMap, VariablePage, VariableSource,
};

/// Collects the variables of `project_path` on the GitLab host `base_url`.
///
/// `base_url` is the host from [`ParsedRemote::base_url`]; the API is reached
/// over HTTPS. Group variables from `groups` are merged in when `recurse` is
/// set. The API key is used as given and never read from the environment.
///
/// # Errors
///
/// Returns [`GlenError::SourceUnavailable`] when the project variables cannot
/// be fetched, or [`GlenError::Config`] when `base_url` is not a valid host.
pub async fn collect(
    base_url: &str,
    project_path: &str,
    groups: &[String],
    recurse: bool,
    api_key: Option<Token>,
) -> Result<VariableMap> {
    let client = GitLabClient::for_host(base_url, api_key)?;

    VariableCollector::new(client)
        .recurse(recurse)
        .collect(project_path, groups)
        .await
}
