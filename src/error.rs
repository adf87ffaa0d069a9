//! Error types for view access and rendering

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which key-value store an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Content,
    Config,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Content => write!(f, "content"),
            StoreKind::Config => write!(f, "config"),
        }
    }
}

/// Errors raised by the view context itself
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    /// Strict getter asked for a key that was never set
    #[error("{store} item not found: {key}")]
    KeyNotFound { store: StoreKind, key: String },

    /// `end_capture` called without a matching open capture
    #[error("end_capture({}) without an open capture", display_id(.id))]
    UnbalancedCapture { id: Option<String> },
}

impl ViewError {
    /// Create a missing-key error
    pub fn key_not_found(store: StoreKind, key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            store,
            key: key.into(),
        }
    }

    /// Create an unbalanced-capture error
    pub fn unbalanced(id: Option<&str>) -> Self {
        Self::UnbalancedCapture {
            id: id.map(str::to_string),
        }
    }
}

fn display_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!("\"{}\"", id),
        None => "<none>".to_string(),
    }
}

/// Errors that can occur while rendering a view
#[derive(Debug, Error)]
pub enum RenderError {
    /// The executor could not read the resolved view file
    #[error("error reading view {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output sink failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// The template misused the view context
    #[error(transparent)]
    View(#[from] ViewError),

    /// Executor-defined failure while running a template
    #[error("template {path} failed: {message}")]
    Template { path: PathBuf, message: String },
}

impl RenderError {
    /// Create an executor-defined template failure
    pub fn template(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Template {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_display() {
        let err = ViewError::key_not_found(StoreKind::Content, "title");
        assert_eq!(err.to_string(), "content item not found: title");
    }

    #[test]
    fn test_unbalanced_capture_display() {
        assert!(ViewError::unbalanced(Some("nav"))
            .to_string()
            .contains("\"nav\""));
        assert!(ViewError::unbalanced(None).to_string().contains("<none>"));
    }

    #[test]
    fn test_render_error_wraps_view_error() {
        let err: RenderError = ViewError::key_not_found(StoreKind::Config, "views_path").into();
        assert_eq!(err.to_string(), "config item not found: views_path");
    }
}
