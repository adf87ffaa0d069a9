//! The view context object

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{SELF_ALIAS, VIEWS_PATH};
use crate::error::{RenderError, StoreKind, ViewError};
use crate::executor::{InterpolatingExecutor, TemplateExecutor};
use crate::output::{FrameLabel, OutputStack};
use crate::store::{Bindings, Store};

use super::capture::{reconcile, CaptureOutcome};
use super::fallback::{ContentFallback, NullFallback};
use super::resolver::{find_view, FileProbe, FsProbe};
use super::scope::Scope;

/// Content items, configuration items and an output capture stack.
///
/// A context is not shared between threads while in use; every operation
/// takes `&mut self` or `&self` and runs to completion.
pub struct ViewContext {
    content: Store,
    config: Store,
    output: OutputStack,
    executor: Arc<dyn TemplateExecutor>,
    probe: Arc<dyn FileProbe>,
    fallback: Box<dyn ContentFallback>,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            content: Store::new(StoreKind::Content),
            config: Store::new(StoreKind::Config),
            output: OutputStack::default(),
            executor: Arc::new(InterpolatingExecutor),
            probe: Arc::new(FsProbe),
            fallback: Box::new(NullFallback),
        }
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("content", &self.content)
            .field("config", &self.config)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl ViewContext {
    /// Create a context with empty stores, writing to stdout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with initial configuration items
    pub fn with_config(config: Bindings) -> Self {
        let mut view = Self::default();
        view.config.set_many(config);
        view
    }

    /// Set the base directory for relative view paths.
    ///
    /// Config items hold strings, so a path that is not valid UTF-8 is stored
    /// lossily: invalid sequences become U+FFFD and a warning is logged.
    pub fn with_views_path(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.to_str().is_none() {
            warn!(path = %path.display(), "views path is not valid UTF-8, storing it lossily");
        }
        self.config
            .set(VIEWS_PATH, path.to_string_lossy().into_owned());
        self
    }

    /// Expose the view to templates under `alias`
    pub fn with_self_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.set(SELF_ALIAS, alias.into());
        self
    }

    /// Set the template executor
    pub fn with_executor(mut self, executor: impl TemplateExecutor + 'static) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Set the readability check used by view resolution
    pub fn with_probe(mut self, probe: impl FileProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Send unbuffered output to `sink` instead of stdout
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.output.set_sink(Box::new(sink));
        self
    }

    /// Replace the policy used by [`content`](Self::content)
    pub fn with_fallback(mut self, fallback: impl ContentFallback + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    // Content items

    pub fn get_content_item(&self, id: &str) -> Result<&Value, ViewError> {
        self.content.get(id)
    }

    /// Get a content item, or `default` when the fallback policy rejects it
    pub fn content<'a>(&'a self, id: &str, default: &'a Value) -> &'a Value {
        self.fallback.resolve(self.content.lookup(id), default)
    }

    /// Get several content items. An empty id list returns all of them.
    pub fn get_content_items<K: AsRef<str>>(&self, ids: &[K]) -> Result<Bindings, ViewError> {
        self.content.get_many(ids)
    }

    pub fn set_content_item(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.content.set(id, value);
    }

    pub fn set_content_items(&mut self, items: Bindings) {
        self.content.set_many(items);
    }

    pub fn unset_content_item(&mut self, id: &str) {
        self.content.unset(id);
    }

    pub fn unset_content_items<K: AsRef<str>>(&mut self, ids: &[K]) {
        self.content.unset_many(ids);
    }

    /// True if the content item exists, even when null
    pub fn has_content_item(&self, id: &str) -> bool {
        self.content.has(id)
    }

    // Config items

    pub fn get_config_item(&self, id: &str) -> Result<&Value, ViewError> {
        self.config.get(id)
    }

    /// Get several config items. An empty id list returns all of them.
    pub fn get_config_items<K: AsRef<str>>(&self, ids: &[K]) -> Result<Bindings, ViewError> {
        self.config.get_many(ids)
    }

    pub fn set_config_item(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.config.set(id, value);
    }

    pub fn set_config_items(&mut self, items: Bindings) {
        self.config.set_many(items);
    }

    pub fn unset_config_item(&mut self, id: &str) {
        self.config.unset(id);
    }

    pub fn unset_config_items<K: AsRef<str>>(&mut self, ids: &[K]) {
        self.config.unset_many(ids);
    }

    /// True if the config item exists, even when null
    pub fn has_config_item(&self, id: &str) -> bool {
        self.config.has(id)
    }

    /// Configured base directory for relative view paths
    pub fn views_path(&self) -> Option<PathBuf> {
        self.config_str(VIEWS_PATH).map(PathBuf::from)
    }

    /// Configured self alias
    pub fn self_alias(&self) -> Option<&str> {
        self.config_str(SELF_ALIAS)
    }

    /// A non-empty string config item. Other types are ignored.
    fn config_str(&self, key: &str) -> Option<&str> {
        let value = self.config.lookup(key)?;
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Null => None,
            other => {
                debug!(key, value = %other, "config item is not a string, ignoring");
                None
            }
        }
    }

    // Output

    /// Write text to the current output: the innermost open capture, or the sink
    pub fn write(&mut self, text: &str) -> Result<(), RenderError> {
        Ok(self.output.write(text)?)
    }

    /// Flush unbuffered output
    pub fn flush(&mut self) -> Result<(), RenderError> {
        Ok(self.output.flush()?)
    }

    /// Number of captures started and not yet ended
    pub fn capture_depth(&self) -> usize {
        self.output.capture_depth()
    }

    /// Start capturing output, optionally naming the content item it fills
    pub fn start_capture(&mut self, id: Option<&str>) {
        self.output
            .push(FrameLabel::Capture(id.map(str::to_string)));
    }

    /// Stop the innermost capture and store its text if an id can be decided.
    ///
    /// The capture is always closed, whether the text is committed or not.
    pub fn end_capture(&mut self, id: Option<&str>) -> Result<CaptureOutcome, ViewError> {
        let start_id = match self.output.top() {
            Some(FrameLabel::Capture(start_id)) => start_id.clone(),
            _ => return Err(ViewError::unbalanced(id)),
        };
        let text = self.output.pop().map(|frame| frame.text).unwrap_or_default();

        match reconcile(start_id.as_deref(), id) {
            Some(content_id) => {
                debug!(id = content_id, bytes = text.len(), "capture committed");
                self.content.set(content_id, text);
                Ok(CaptureOutcome::Committed {
                    id: content_id.to_string(),
                })
            }
            None => {
                warn!(start_id = ?start_id, end_id = ?id, "capture discarded");
                Ok(CaptureOutcome::Discarded {
                    start_id,
                    end_id: id.map(str::to_string),
                })
            }
        }
    }

    // Rendering

    /// Resolve the view to render among `candidates`
    pub fn find_view<S: AsRef<str>>(&self, candidates: &[S]) -> Option<PathBuf> {
        find_view(candidates, self.views_path().as_deref(), self.probe.as_ref())
    }

    /// Render a view to the current output.
    ///
    /// Does nothing when no candidate resolves.
    pub fn render_to_output<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
        mut data: Bindings,
    ) -> Result<(), RenderError> {
        let Some(path) = self.find_view(candidates) else {
            debug!(
                candidates = ?candidates.iter().map(|c| c.as_ref()).collect::<Vec<&str>>(),
                "no view resolved, skipping render"
            );
            return Ok(());
        };

        let self_alias = self.self_alias().map(str::to_string);
        if let Some(alias) = &self_alias {
            if data.remove(alias).is_some() {
                debug!(alias = %alias, "dropped data entry shadowing the self alias");
            }
        }

        debug!(path = %path.display(), "rendering view");
        let executor = Arc::clone(&self.executor);
        let mut scope = Scope::new(self, path, data, self_alias);
        executor.execute(&mut scope)
    }

    /// Render a view and return its output instead of emitting it.
    ///
    /// Returns an empty string when no candidate resolves. Captures the
    /// template left open are discarded.
    pub fn render_to_string<S: AsRef<str>>(
        &mut self,
        candidates: &[S],
        data: Bindings,
    ) -> Result<String, RenderError> {
        let depth = self.output.depth();
        self.output.push(FrameLabel::Render);

        let result = self.render_to_output(candidates, data);

        let mut frames = self.output.unwind_to(depth);
        let text = frames.pop().map(|frame| frame.text).unwrap_or_default();
        for frame in frames {
            if let FrameLabel::Capture(id) = frame.label {
                warn!(id = ?id, "capture left open by template, discarding");
            }
        }

        result.map(|()| text)
    }
}
