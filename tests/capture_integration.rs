//! Integration tests for the capture protocol and content accessors

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use view_context::{Bindings, CaptureOutcome, FnExecutor, Scope, ViewContext, ViewError};

#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedSink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn test_set_get_has_unset() {
    let mut view = ViewContext::new();
    for (key, value) in [("a", json!(1)), ("b", json!("two")), ("c", Value::Null)] {
        view.set_content_item(key, value.clone());
        assert_eq!(view.get_content_item(key), Ok(&value));
        assert!(view.has_content_item(key));
    }

    view.unset_content_items(&["a", "c"]);
    assert!(!view.has_content_item("a"));
    assert!(!view.has_content_item("c"));
    assert!(view.has_content_item("b"));
}

#[test]
fn test_null_versus_absent() {
    let mut view = ViewContext::new();
    view.set_content_item("nothing", Value::Null);
    assert!(view.has_content_item("nothing"));
    assert!(!view.has_content_item("never"));
    assert_eq!(view.get_content_item("nothing"), Ok(&Value::Null));
    assert!(matches!(
        view.get_content_item("never"),
        Err(ViewError::KeyNotFound { .. })
    ));
}

#[test]
fn test_content_default_only_for_null_or_absent() {
    let mut view = ViewContext::new();
    let default = json!("default");
    view.set_content_items(Bindings::from([
        ("null".to_string(), Value::Null),
        ("zero".to_string(), json!(0)),
        ("false".to_string(), json!(false)),
    ]));

    assert_eq!(view.content("null", &default), &default);
    assert_eq!(view.content("absent", &default), &default);
    assert_eq!(view.content("zero", &default), &json!(0));
    assert_eq!(view.content("false", &default), &json!(false));
}

#[test]
fn test_capture_round_trip() {
    let sink = SharedSink::default();
    let mut view = ViewContext::new().with_sink(sink.clone());

    view.start_capture(Some("a"));
    view.write("X").unwrap();
    assert_eq!(
        view.end_capture(Some("a")),
        Ok(CaptureOutcome::Committed { id: "a".to_string() })
    );

    assert_eq!(view.get_content_item("a"), Ok(&json!("X")));
    assert_eq!(sink.contents(), "");
}

#[test]
fn test_mismatched_capture_discards_and_releases() {
    let sink = SharedSink::default();
    let mut view = ViewContext::new().with_sink(sink.clone());

    view.start_capture(Some("a"));
    view.write("X").unwrap();
    assert_eq!(
        view.end_capture(Some("b")),
        Ok(CaptureOutcome::Discarded {
            start_id: Some("a".to_string()),
            end_id: Some("b".to_string()),
        })
    );
    assert!(!view.has_content_item("a"));
    assert_eq!(view.capture_depth(), 0);

    view.write("after").unwrap();
    assert_eq!(sink.contents(), "after");
}

#[test]
fn test_mismatch_pops_only_one_frame() {
    let mut view = ViewContext::new().with_sink(io::sink());

    view.start_capture(Some("outer"));
    view.write("o").unwrap();
    view.start_capture(Some("inner"));
    view.write("i").unwrap();

    view.end_capture(Some("outer")).unwrap();
    assert_eq!(view.capture_depth(), 1);

    view.end_capture(Some("outer")).unwrap();
    assert_eq!(view.capture_depth(), 0);
    assert_eq!(view.get_content_item("outer"), Ok(&json!("o")));
    assert!(!view.has_content_item("inner"));
}

#[test]
fn test_unbalanced_end_capture() {
    let mut view = ViewContext::new().with_sink(io::sink());
    view.start_capture(Some("a"));
    view.end_capture(None).unwrap();

    assert_eq!(
        view.end_capture(None),
        Err(ViewError::UnbalancedCapture { id: None })
    );
}

#[test]
fn test_template_captures_through_alias() {
    let executor = FnExecutor::new(|scope: &mut Scope<'_>| {
        let name = scope.var("name").and_then(Value::as_str).unwrap_or("").to_string();
        let Some(view) = scope.this_mut("self") else {
            return Ok(());
        };
        view.start_capture(Some("greeting"));
        view.write(&format!("Hi {}", name))?;
        view.end_capture(None)?;
        scope.write("done")
    });
    let mut view = ViewContext::new()
        .with_sink(io::sink())
        .with_self_alias("self")
        .with_executor(executor);

    let data = Bindings::from([("name".to_string(), json!("Grace"))]);
    let out = view.render_to_string(&["page.tpl"], data).unwrap();

    assert_eq!(out, "done");
    assert_eq!(view.get_content_item("greeting"), Ok(&json!("Hi Grace")));
}

#[test]
fn test_nested_render_through_scope() {
    let executor = FnExecutor::new(|scope: &mut Scope<'_>| {
        if scope.path().ends_with("outer.tpl") {
            scope.write("[")?;
            scope.render(&["inner.tpl"], Bindings::new())?;
            scope.write("]")
        } else {
            scope.write("inner")
        }
    });
    let mut view = ViewContext::new()
        .with_sink(io::sink())
        .with_executor(executor);

    let out = view.render_to_string(&["outer.tpl"], Bindings::new()).unwrap();
    assert_eq!(out, "[inner]");
}
