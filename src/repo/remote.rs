use crate::error::{GlenError, Result};

/// The parts of a git remote URL needed to talk to the GitLab API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRemote {
    /// Host, including a port when the remote has one (e.g. `gitlab.com:8443`)
    pub base_url: String,
    /// Project path without scheme, credentials or `.git` (e.g. `group/project`)
    pub path: String,
    /// `base_url` and `path` joined with a slash
    pub http_url: String,
}

impl ParsedRemote {
    fn new(base_url: &str, path: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            path: path.to_owned(),
            http_url: format!("{base_url}/{path}"),
        }
    }
}

/// Parses a git remote URL into host and project path.
///
/// Accepts scheme-based remotes (`https://`, `http://`, `ssh://git@`) and
/// SCP-like remotes (`git@host:group/project.git`). Surrounding whitespace and
/// a trailing `.git` are ignored. A remote without a project path is an error.
///
/// # Errors
///
/// Returns [`GlenError::InvalidRemoteUrl`] when the input is blank, has neither
/// a `://` nor an `@` marker, or has an empty host or path.
pub fn parse(raw: &str) -> Result<ParsedRemote> {
    let remote = raw.trim();
    let invalid = || GlenError::InvalidRemoteUrl(raw.to_owned());

    if remote.is_empty() {
        return Err(invalid());
    }

    let (base_url, path) = if let Some((_, rest)) = remote.split_once("://") {
        let rest = strip_user(rest, '/');
        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        rest.split_once('/').ok_or_else(invalid)?
    } else if let Some((_, rest)) = remote.split_once('@') {
        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        rest.split_once(':').ok_or_else(invalid)?
    } else {
        return Err(invalid());
    };

    if base_url.is_empty() || path.is_empty() {
        return Err(invalid());
    }

    Ok(ParsedRemote::new(base_url, path))
}

/// Drops `user@` (or `user:password@`) from the authority, which ends at `end`.
fn strip_user(rest: &str, end: char) -> &str {
    let authority = rest.split(end).next().unwrap_or(rest);
    match authority.rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    }
}
