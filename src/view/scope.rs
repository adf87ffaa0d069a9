//! Variable scope handed to a template executor

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::RenderError;
use crate::store::Bindings;

use super::context::ViewContext;

/// Everything a template can see while it runs.
///
/// Data passed to the render is bound as named variables. The view itself is
/// reachable only through the configured self alias.
pub struct Scope<'a> {
    view: &'a mut ViewContext,
    path: PathBuf,
    variables: Bindings,
    self_alias: Option<String>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        view: &'a mut ViewContext,
        path: PathBuf,
        variables: Bindings,
        self_alias: Option<String>,
    ) -> Self {
        Self {
            view,
            path,
            variables,
            self_alias,
        }
    }

    /// Resolved path of the view being rendered
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a bound variable
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// All bound variables
    pub fn variables(&self) -> &Bindings {
        &self.variables
    }

    /// Name the view is exposed under, if any
    pub fn self_alias(&self) -> Option<&str> {
        self.self_alias.as_deref()
    }

    /// The view, when `name` is its configured alias
    pub fn this(&self, name: &str) -> Option<&ViewContext> {
        if self.self_alias.as_deref() == Some(name) {
            Some(&*self.view)
        } else {
            None
        }
    }

    /// Mutable access to the view, when `name` is its configured alias
    pub fn this_mut(&mut self, name: &str) -> Option<&mut ViewContext> {
        if self.self_alias.as_deref() == Some(name) {
            Some(&mut *self.view)
        } else {
            None
        }
    }

    /// Emit template output
    pub fn write(&mut self, text: &str) -> Result<(), RenderError> {
        self.view.write(text)
    }

    /// Render a partial into the same output
    pub fn render<S: AsRef<str>>(&mut self, candidates: &[S], data: Bindings) -> Result<(), RenderError> {
        self.view.render_to_output(candidates, data)
    }
}
