mod collector;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

pub use collector::{VariableCollector, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Final variables, keyed by name. Sorted so output is stable between runs.
pub type VariableMap = BTreeMap<String, String>;

/// What a set of variables belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Project,
    Group,
}

impl ScopeKind {
    /// Collection name used in REST API paths.
    pub fn api_collection(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Group => "groups",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// A single CI/CD variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One page of variables as returned by a [`VariableSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePage {
    pub items: Vec<Variable>,
    /// 1-based index of this page
    pub current_page: u32,
    pub total_pages: u32,
    /// Page to request next, `None` on the last page
    pub next_page: Option<u32>,
}

/// Somewhere CI/CD variables can be listed from, one page at a time.
#[allow(async_fn_in_trait)]
pub trait VariableSource {
    /// Lists page `page` (1-based) of the variables defined on `scope_path`.
    ///
    /// # Errors
    ///
    /// Fails on network, authentication or decoding errors.
    async fn list_variables(
        &self,
        scope: ScopeKind,
        scope_path: &str,
        page: u32,
        page_size: u32,
    ) -> Result<VariablePage>;
}
