use std::path::Path;

use crate::error::SchemaError;
use crate::form::FormConfig;

/// Text format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Guess the format from a file name or URL path: `.yaml`/`.yml` is YAML,
    /// anything else is JSON.
    pub fn from_path(path: &str) -> Self {
        // Ignore query strings and fragments on URLs
        let trimmed = path.split(['?', '#']).next().unwrap_or(path);
        match Path::new(trimmed).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                SourceFormat::Yaml
            }
            _ => SourceFormat::Json,
        }
    }
}

/// Parse a configuration document into a FormConfig.
///
/// This function handles the conversion from text to structured data only.
/// Cross-field checks (unique ids, condition references, bounds) are handled
/// separately by the validation module.
pub fn parse_form_config(input: &str, format: SourceFormat) -> Result<FormConfig, SchemaError> {
    let config = match format {
        SourceFormat::Json => serde_json::from_str(input)?,
        SourceFormat::Yaml => serde_yaml::from_str(input)?,
    };
    Ok(config)
}

/// Build a FormConfig from an already-decoded JSON value
pub fn parse_form_config_value(value: serde_json::Value) -> Result<FormConfig, SchemaError> {
    Ok(serde_json::from_value(value)?)
}
