use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;

/// YAML file holding named template variables and optional request defaults
///
/// ```yaml
/// base_url: https://api.example.com/v1
/// headers:
///   Accept: application/json
/// variables:
///   user: MyName
///   albumId: 12345
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct VariablesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub variables: HashMap<String, Value>,
}

impl VariablesFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read variables file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid variables file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Variables as strings. Numbers and booleans are written as YAML prints them;
    /// sequences, mappings and nulls are rejected.
    pub fn string_variables(&self) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::with_capacity(self.variables.len());
        for (name, value) in &self.variables {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => bail!("Variable '{}' must be a string, number or boolean", name),
            };
            vars.insert(name.clone(), value);
        }
        Ok(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let file = VariablesFile::parse(
            "variables:\n  user: MyName\n  albumId: 12345\n  public: true\n",
        )
        .unwrap();
        let vars = file.string_variables().unwrap();

        assert_eq!(vars["user"], "MyName");
        assert_eq!(vars["albumId"], "12345");
        assert_eq!(vars["public"], "true");
        assert!(file.base_url.is_none());
        assert!(file.headers.is_empty());
    }

    #[test]
    fn test_parse_request_defaults() {
        let file = VariablesFile::parse(
            "base_url: https://api.example.com\nheaders:\n  Accept: application/json\n",
        )
        .unwrap();

        assert_eq!(file.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(file.headers["Accept"], "application/json");
        assert!(file.variables.is_empty());
    }

    #[test]
    fn test_nested_value_rejected() {
        let file = VariablesFile::parse("variables:\n  tags: [a, b]\n").unwrap();
        let err = file.string_variables().unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn test_skip_empty_fields_in_yaml() {
        let yml = serde_yaml::to_string(&VariablesFile::default()).unwrap();

        assert!(!yml.contains("base_url:"));
        assert!(!yml.contains("headers:"));
        assert!(yml.contains("variables:"));
    }

    #[test]
    fn test_load_reports_path() {
        let err = VariablesFile::load(Path::new("/nonexistent/vars.yml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/vars.yml"));
    }
}
