use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use crate::auth::Token;
use crate::error::{GlenError, Result};
use crate::variables::{ScopeKind, VariablePage, VariableSource};

use super::types::GitLabVariable;

/// Thin client for the GitLab REST v4 variables endpoints.
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

impl GitLabClient {
    /// Creates a client for the GitLab instance at `base_url`
    /// (e.g. `https://gitlab.com` or `https://example.com/gitlab`).
    ///
    /// # Errors
    ///
    /// Returns [`GlenError::Config`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("glen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GlenError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut base = base_url.trim_end_matches('/').to_owned();
        base.push('/');

        let api_url = Url::parse(&base)
            .map_err(|e| GlenError::Config(format!("Invalid base URL {base_url:?}: {e}")))?
            .join("api/v4/")
            .map_err(|e| GlenError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    /// Creates a client for a host taken from a git remote, over HTTPS.
    ///
    /// # Errors
    ///
    /// Same as [`GitLabClient::new`].
    pub fn for_host(host: &str, token: Option<Token>) -> Result<Self> {
        Self::new(&format!("https://{host}"), token)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// `…/api/v4/{projects|groups}/{url-encoded path}/variables`
    fn variables_url(&self, scope: ScopeKind, scope_path: &str) -> Result<Url> {
        self.api_url
            .join(&format!(
                "{}/{}/variables",
                scope.api_collection(),
                urlencoding::encode(scope_path)
            ))
            .map_err(|e| GlenError::Config(format!("Invalid {scope} URL: {e}")))
    }
}

impl VariableSource for GitLabClient {
    async fn list_variables(
        &self,
        scope: ScopeKind,
        scope_path: &str,
        page: u32,
        page_size: u32,
    ) -> Result<VariablePage> {
        let mut url = self.variables_url(scope, scope_path)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &page_size.to_string());

        debug!("GET {url}");
        let response = self.auth_request(self.client.get(url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(GlenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let (current_page, total_pages, next_page) = pagination(response.headers(), page);
        let variables: Vec<GitLabVariable> = response.json().await?;

        for variable in &variables {
            if let Some(env_scope) = variable.environment_scope.as_deref().filter(|s| *s != "*") {
                debug!(
                    "{scope} {scope_path}: {} is scoped to environment {env_scope}",
                    variable.key
                );
            }
        }

        Ok(VariablePage {
            items: variables.into_iter().map(Into::into).collect(),
            current_page,
            total_pages,
            next_page,
        })
    }
}

/// Reads `X-Page`, `X-Total-Pages` and `X-Next-Page`.
///
/// GitLab leaves out `X-Total-Pages` for very large collections, in which case
/// the total is inferred from whether a next page exists.
fn pagination(headers: &HeaderMap, requested_page: u32) -> (u32, u32, Option<u32>) {
    let header = |name: &str| -> Option<u32> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
    };

    let current_page = header("x-page").unwrap_or(requested_page);
    let next_page = header("x-next-page");
    let total_pages = header("x-total-pages").unwrap_or(match next_page {
        Some(_) => current_page.saturating_add(1),
        None => current_page,
    });

    (current_page, total_pages, next_page)
}
