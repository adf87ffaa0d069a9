//! View Context - a small view/template data container
//!
//! This library holds named content and configuration items, captures output
//! into content slots, and renders template files through a pluggable
//! executor.
//!
//! # Example
//!
//! ```rust
//! use view_context::{Bindings, FnExecutor, Scope, ViewContext};
//! use serde_json::json;
//!
//! let executor = FnExecutor::new(|scope: &mut Scope<'_>| {
//!     let name = scope.var("name").and_then(|v| v.as_str()).unwrap_or("nobody");
//!     let greeting = format!("Hello, {}!", name);
//!     scope.write(&greeting)
//! });
//!
//! let mut view = ViewContext::new().with_executor(executor);
//! let data = Bindings::from([("name".to_string(), json!("Ada"))]);
//!
//! let html = view.render_to_string(&["greeting.tpl"], data).unwrap();
//! assert_eq!(html, "Hello, Ada!");
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod output;
pub mod store;
pub mod view;

pub use config::{load_bindings, load_config, parse_bindings, parse_config, ConfigError};
pub use error::{RenderError, StoreKind, ViewError};
pub use executor::{FnExecutor, InterpolatingExecutor, TemplateExecutor};
pub use store::{Bindings, Store};
pub use view::{CaptureOutcome, ContentFallback, FileProbe, FsProbe, Scope, ViewContext};

// Re-export the value type used by every store and binding
pub use serde_json::Value;
