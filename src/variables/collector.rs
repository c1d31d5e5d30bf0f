use log::{debug, info, warn};

use crate::error::{GlenError, Result};

use super::{ScopeKind, Variable, VariableMap, VariableSource};

/// Largest page size the GitLab API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Collects the variables of a project and, optionally, of its parent groups.
///
/// Variables are merged following GitLab's precedence: project variables win
/// over group variables, and a nearer group wins over a farther one. See
/// <https://docs.gitlab.com/ee/ci/variables/#cicd-variable-precedence>.
///
/// Every scope is drained page by page before it is merged. Fetches run one
/// after another so the merge order never depends on response timing.
pub struct VariableCollector<S> {
    source: S,
    recurse: bool,
    group_only: bool,
    page_size: u32,
}

impl<S: VariableSource> VariableCollector<S> {
    /// Creates a collector that only reads project variables.
    pub fn new(source: S) -> Self {
        Self {
            source,
            recurse: false,
            group_only: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Also merge in the variables of every parent group.
    #[must_use]
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Only collect parent group variables and skip the project itself.
    #[must_use]
    pub fn group_only(mut self, group_only: bool) -> Self {
        self.group_only = group_only;
        self
    }

    /// Number of variables requested per page, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Collects and merges the variables for `project_path`.
    ///
    /// `groups` is the parent group chain, nearest group first, as returned by
    /// [`extract_groups`](crate::extract_groups). Groups are only consulted
    /// when recursing or in group-only mode.
    ///
    /// # Errors
    ///
    /// Returns [`GlenError::SourceUnavailable`] when the project variables
    /// cannot be fetched. A group that cannot be fetched is logged and left
    /// out of the result.
    pub async fn collect(&self, project_path: &str, groups: &[String]) -> Result<VariableMap> {
        let project_vars = if self.group_only {
            None
        } else {
            let vars = self
                .fetch_all(ScopeKind::Project, project_path)
                .await
                .map_err(|source| GlenError::SourceUnavailable {
                    project: project_path.to_owned(),
                    source: Box::new(source),
                })?;
            Some(vars)
        };

        let mut env = VariableMap::new();

        if self.recurse || self.group_only {
            // Root group first so nearer groups overwrite it.
            for group in groups.iter().rev() {
                match self.fetch_all(ScopeKind::Group, group).await {
                    Ok(vars) => merge(&mut env, vars),
                    Err(e) => warn!("Skipping variables of group {group}: {e}"),
                }
            }
        }

        if let Some(vars) = project_vars {
            merge(&mut env, vars);
        }

        info!("Collected {} variables for {project_path}", env.len());

        Ok(env)
    }

    /// Requests pages until the source reports the last one.
    ///
    /// The cursor must move strictly forward from the page that was requested,
    /// and the source must answer with the page it was asked for. Anything else
    /// is [`GlenError::IncompletePagination`].
    async fn fetch_all(&self, scope: ScopeKind, path: &str) -> Result<Vec<Variable>> {
        let mut items = Vec::new();
        let mut page = 1;

        let incomplete = |page: u32, total_pages: u32| GlenError::IncompletePagination {
            scope: scope.to_string(),
            path: path.to_owned(),
            page,
            total_pages,
        };

        loop {
            let batch = self
                .source
                .list_variables(scope, path, page, self.page_size)
                .await?;

            debug!(
                "Fetched page {}/{} of {scope} {path} ({} variables)",
                batch.current_page,
                batch.total_pages,
                batch.items.len()
            );

            if batch.current_page != page {
                return Err(incomplete(page, batch.total_pages));
            }

            items.extend(batch.items);

            if page >= batch.total_pages {
                return Ok(items);
            }

            match batch.next_page {
                Some(next) if next > page => page = next,
                _ => return Err(incomplete(page, batch.total_pages)),
            }
        }
    }
}

fn merge(env: &mut VariableMap, vars: Vec<Variable>) {
    env.extend(vars.into_iter().map(|v| (v.key, v.value)));
}
