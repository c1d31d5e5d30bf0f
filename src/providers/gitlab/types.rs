use serde::Deserialize;

use crate::variables::Variable;

/// A CI/CD variable as returned by the GitLab REST API.
///
/// Only `key` and `value` end up in the final output. `environment_scope` is
/// read for debug logging; other fields in the response are ignored.
#[derive(Debug, Deserialize)]
pub struct GitLabVariable {
    pub key: String,
    pub value: String,
    /// Environment the variable is limited to, `*` for all
    #[serde(default)]
    pub environment_scope: Option<String>,
}

impl From<GitLabVariable> for Variable {
    fn from(variable: GitLabVariable) -> Self {
        Variable::new(variable.key, variable.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_variable() {
        let json = r#"{
            "variable_type": "env_var",
            "key": "DEPLOY_TOKEN",
            "value": "s3cr3t",
            "protected": true,
            "masked": true,
            "raw": false,
            "environment_scope": "production",
            "description": null
        }"#;

        let variable: GitLabVariable = serde_json::from_str(json).unwrap();
        assert_eq!(variable.key, "DEPLOY_TOKEN");
        assert_eq!(variable.environment_scope.as_deref(), Some("production"));
        assert_eq!(Variable::from(variable), Variable::new("DEPLOY_TOKEN", "s3cr3t"));
    }

    #[test]
    fn test_deserialize_minimal_variable() {
        let variable: GitLabVariable =
            serde_json::from_str(r#"{"key": "A", "value": ""}"#).unwrap();
        assert_eq!(variable.value, "");
        assert!(variable.environment_scope.is_none());
    }
}
