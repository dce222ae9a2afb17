//! Page wiring configuration passed by the host page.
//!
//! Every field has a default matching the route editor template, so hosts
//! usually pass nothing. Overrides arrive as a JSON object.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    DEFAULT_CONTAINER_ID, DEFAULT_CSRF_HEADER, DEFAULT_CSRF_META_NAME, DEFAULT_FEED_ID, DEFAULT_IMAGE_ID,
    DEFAULT_MARKER_CLASS,
};

/// Error returned by [`MarkerConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid marker config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A required name is empty after overrides.
    #[error("marker config field `{0}` must not be empty")]
    Empty(&'static str),
    /// The meta name cannot sit inside a quoted CSS attribute selector.
    #[error("csrf_meta_name {0:?} contains a quote, backslash or control character")]
    UnquotableMetaName(String),
}

/// Element ids, token wiring and save endpoint for one page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Id of the reference image element.
    pub image_id: String,
    /// Id of the element holding the embedded point feed.
    pub feed_id: String,
    /// Id of the positioned container receiving markers.
    pub container_id: String,
    /// `name` of the `<meta>` element carrying the anti-forgery token.
    pub csrf_meta_name: String,
    /// Header the token is sent under.
    pub csrf_header: String,
    /// CSS class applied to marker elements.
    pub marker_class: String,
    /// Save endpoint. `None` posts to the current page URL.
    pub endpoint: Option<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            image_id: DEFAULT_IMAGE_ID.to_owned(),
            feed_id: DEFAULT_FEED_ID.to_owned(),
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            csrf_meta_name: DEFAULT_CSRF_META_NAME.to_owned(),
            csrf_header: DEFAULT_CSRF_HEADER.to_owned(),
            marker_class: DEFAULT_MARKER_CLASS.to_owned(),
            endpoint: None,
        }
    }
}

impl MarkerConfig {
    /// Build config from optional JSON overrides.
    ///
    /// `None` or blank input yields [`MarkerConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed, names an unknown
    /// field, blanks out a required name, or gives a meta name that cannot be
    /// used in a selector.
    pub fn from_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("image_id", &self.image_id),
            ("feed_id", &self.feed_id),
            ("container_id", &self.container_id),
            ("csrf_meta_name", &self.csrf_meta_name),
            ("csrf_header", &self.csrf_header),
            ("marker_class", &self.marker_class),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Empty(*name));
        }
        if self.csrf_meta_name.chars().any(|c| matches!(c, '"' | '\\') || c.is_control()) {
            return Err(ConfigError::UnquotableMetaName(self.csrf_meta_name.clone()));
        }
        Ok(())
    }

    /// Resolve the save endpoint, falling back to `page_url`.
    #[must_use]
    pub fn endpoint_or(&self, page_url: &str) -> String {
        match self.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => endpoint.to_owned(),
            _ => page_url.to_owned(),
        }
    }
}
