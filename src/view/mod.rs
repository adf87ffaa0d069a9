//! View context: content and config stores, output capture, and rendering
//!
//! A [`ViewContext`] holds named content items and configuration items,
//! captures output into content slots, and renders template files through a
//! [`TemplateExecutor`](crate::executor::TemplateExecutor).
//!
//! # Example
//!
//! ```rust
//! use view_context::ViewContext;
//! use serde_json::json;
//!
//! let mut view = ViewContext::new().with_sink(std::io::sink());
//!
//! view.start_capture(Some("title"));
//! view.write("Dashboard").unwrap();
//! view.end_capture(Some("title")).unwrap();
//!
//! assert_eq!(view.content("title", &json!(null)), &json!("Dashboard"));
//! ```

mod capture;
mod context;
mod fallback;
mod resolver;
mod scope;

pub use capture::{reconcile, CaptureOutcome};
pub use context::ViewContext;
pub use fallback::{ContentFallback, EmptyFallback, NullFallback};
pub use resolver::{find_view, resolve_candidate, FileProbe, FsProbe};
pub use scope::Scope;
