//! Placeholder substitution executor
//!
//! Copies the view file to the output, replacing `{{ name }}` with the bound
//! variable `name`. Dotted names walk into objects (`{{ user.name }}`). When
//! the first segment is the view's self alias, the rest names a content item
//! (`{{ view.sidebar }}`). Anything else is copied through untouched.

use logos::Logos;
use serde_json::Value;
use tracing::warn;

use crate::error::RenderError;
use crate::view::Scope;

use super::TemplateExecutor;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Piece {
    #[regex(r"\{\{[ \t]*[A-Za-z_][A-Za-z0-9_.\-]*[ \t]*\}\}", |lex| {
        let s = lex.slice();
        s[2..s.len()-2].trim().to_string()
    })]
    Placeholder(String),

    #[regex(r"[^{]+", |lex| lex.slice().to_string())]
    Text(String),

    #[token("{")]
    Brace,
}

/// Split template source into text and placeholders
pub fn lex(input: &str) -> impl Iterator<Item = (Piece, Span)> + '_ {
    Piece::lexer(input).spanned().map(|(piece, span)| match piece {
        Ok(piece) => (piece, span),
        Err(()) => (Piece::Text(input[span.clone()].to_string()), span),
    })
}

/// Executor that substitutes `{{ name }}` placeholders
#[derive(Debug, Default, Clone, Copy)]
pub struct InterpolatingExecutor;

impl TemplateExecutor for InterpolatingExecutor {
    fn execute(&self, scope: &mut Scope<'_>) -> Result<(), RenderError> {
        let path = scope.path().to_path_buf();
        let source = std::fs::read_to_string(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;

        let mut rendered = String::with_capacity(source.len());
        for (piece, _) in lex(&source) {
            match piece {
                Piece::Text(text) => rendered.push_str(&text),
                Piece::Brace => rendered.push('{'),
                Piece::Placeholder(name) => match lookup(scope, &name) {
                    Some(value) => rendered.push_str(&value),
                    None => {
                        warn!(name = %name, path = %path.display(), "undefined placeholder");
                    }
                },
            }
        }

        scope.write(&rendered)
    }
}

/// Resolve a placeholder name to display text
fn lookup(scope: &Scope<'_>, name: &str) -> Option<String> {
    if let Some(value) = scope.var(name) {
        return Some(display(value));
    }

    let (head, rest) = name.split_once('.')?;
    if let Some(view) = scope.this(head) {
        return Some(display(view.content(rest, &Value::Null)));
    }

    let mut value = scope.var(head)?;
    for segment in rest.split('.') {
        value = match value {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            other => other.get(segment)?,
        };
    }
    Some(display(value))
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
