use dynaform_schema::validation::{collect_errors, error_codes};
use dynaform_schema::{parse_form_config, FormConfig, SchemaError, SourceFormat};
use tracing::{debug, error, info, warn};

use crate::application::controller::FormController;
use crate::config::EngineConfig;
use crate::error::LoadError;

/// Fetches form configurations from URLs or the local filesystem.
///
/// `http://` and `https://` sources are fetched with a timeout; anything else
/// (optionally prefixed with `file://`) is read as a path. YAML is chosen by a
/// `.yaml`/`.yml` extension, JSON otherwise.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    client: reqwest::Client,
    config: EngineConfig,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ConfigLoader {
    /// Create a loader with the given engine configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a loader configured from the environment
    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    /// The engine configuration in use
    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch, parse and check a form configuration
    pub async fn load(&self, source: &str) -> Result<FormConfig, LoadError> {
        let result = self.load_inner(source).await;
        match &result {
            Ok(config) => info!(
                source,
                form = %config.id,
                fields = config.fields.len(),
                "Loaded form configuration"
            ),
            Err(e) => error!(source, error = %e, "Failed to load form configuration"),
        }
        result
    }

    /// Load a configuration and wrap it in a controller
    pub async fn load_controller(&self, source: &str) -> Result<FormController, LoadError> {
        Ok(FormController::new(self.load(source).await?))
    }

    async fn load_inner(&self, source: &str) -> Result<FormConfig, LoadError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(LoadError::InvalidSource("empty source".to_string()));
        }

        let text = if is_http(source) {
            self.fetch(source).await?
        } else if let Some(path) = local_path(source) {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|error| LoadError::Io {
                    path: path.to_string(),
                    error,
                })?
        } else {
            return Err(LoadError::InvalidSource(format!("unsupported scheme in '{}'", source)));
        };

        self.parse(&text, SourceFormat::from_path(source), source)
    }

    async fn fetch(&self, url: &str) -> Result<String, LoadError> {
        debug!(url, timeout_secs = self.config.fetch_timeout_secs, "Fetching form configuration");
        let response = self
            .client
            .get(url)
            .timeout(self.config.fetch_timeout())
            .send()
            .await
            .map_err(|e| LoadError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| LoadError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a document and apply the configured load-time checks
    pub fn parse(
        &self,
        text: &str,
        format: SourceFormat,
        location: &str,
    ) -> Result<FormConfig, LoadError> {
        let schema_error = |error: SchemaError| LoadError::Schema {
            location: location.to_string(),
            error,
        };

        let config = parse_form_config(text, format).map_err(schema_error)?;
        if !self.config.validate_on_load {
            return Ok(config);
        }

        let mut errors = collect_errors(&config);
        if !self.config.strict_references {
            errors.retain(|e| {
                if e.code == error_codes::INVALID_REFERENCE {
                    warn!(location, problem = %e, "Ignoring unresolved condition reference");
                    false
                } else {
                    true
                }
            });
        }

        if errors.is_empty() {
            Ok(config)
        } else {
            Err(schema_error(SchemaError::from_validation_errors(errors)))
        }
    }
}

fn is_http(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// Plain paths and file:// URLs; None for any other scheme
fn local_path(source: &str) -> Option<&str> {
    if let Some(path) = source.strip_prefix("file://") {
        return Some(path);
    }
    match source.find("://") {
        Some(_) => None,
        None => Some(source),
    }
}
