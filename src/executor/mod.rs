//! Template executors
//!
//! The view context does not define a template language. It resolves a view,
//! assembles a [`Scope`], and hands both to a [`TemplateExecutor`].

mod interpolate;

pub use interpolate::{lex, InterpolatingExecutor, Piece};

use std::fmt;

use crate::error::RenderError;
use crate::view::Scope;

/// Runs a resolved template with a variable scope
pub trait TemplateExecutor: Send + Sync {
    /// Execute the template at `scope.path()`, writing output through the scope
    fn execute(&self, scope: &mut Scope<'_>) -> Result<(), RenderError>;
}

/// Executor backed by a closure
pub struct FnExecutor<F> {
    f: F,
}

impl<F> FnExecutor<F>
where
    F: Fn(&mut Scope<'_>) -> Result<(), RenderError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> TemplateExecutor for FnExecutor<F>
where
    F: Fn(&mut Scope<'_>) -> Result<(), RenderError> + Send + Sync,
{
    fn execute(&self, scope: &mut Scope<'_>) -> Result<(), RenderError> {
        (self.f)(scope)
    }
}

impl<F> fmt::Debug for FnExecutor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExecutor").finish_non_exhaustive()
    }
}
