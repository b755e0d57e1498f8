#![allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tensa_diagnostic::Diagnostics;
use tensa_ir::Token;
use tensa_runtime::RuntimeEnvironment;
use tensa_value::{CallContext, InvokeError, Tensor, Value};

use crate::{Composition, Interpretation, Interpreter};

fn scalar(n: f64) -> Value {
    Value::tensor(Tensor::scalar(n))
}

fn runtime() -> Arc<RuntimeEnvironment> {
    Arc::new(
        RuntimeEnvironment::builder()
            .with_standard()
            .function("Fail", "Always fails.", |_| Err(InvokeError::custom("boom")))
            .build(),
    )
}

fn run(program: Vec<Token>) -> Interpretation {
    Interpreter::new(runtime()).interpret(&Token::program(program))
}

fn field(out: &Interpretation, key: &str) -> Value {
    out.result.as_record().and_then(|r| r.get(key)).cloned().unwrap()
}

#[test]
fn test_closure_binds_parameter() {
    let out = run(vec![
        Token::assignment(
            "sq",
            Token::function("v", Token::binary("*", Token::reference("v"), Token::reference("v"))),
        ),
        Token::assignment("r", Token::application("sq", Token::scalar(4.0))),
    ]);
    assert_eq!(field(&out, "r"), scalar(16.0));
    assert!(out.issues.is_empty());
}

#[test]
fn test_closure_sees_later_assignments() {
    let out = run(vec![
        Token::assignment("f", Token::function("v", Token::reference("late"))),
        Token::assignment("late", Token::scalar(5.0)),
        Token::assignment("r", Token::application("f", Token::scalar(0.0))),
    ]);
    assert_eq!(field(&out, "r"), scalar(5.0));
}

#[test]
fn test_runtime_shadows_closure_parameter() {
    // `PI` is a runtime constant, so it wins over the parameter.
    let out = run(vec![
        Token::assignment("f", Token::function("PI", Token::reference("PI"))),
        Token::assignment("r", Token::application("f", Token::scalar(7.0))),
    ]);
    assert_eq!(field(&out, "r"), scalar(std::f64::consts::PI));
}

#[test]
fn test_closure_assignments_stay_local() {
    let out = run(vec![
        Token::assignment(
            "f",
            Token::function("v", Token::assignment("inner", Token::reference("v"))),
        ),
        Token::assignment("r", Token::application("f", Token::scalar(1.0))),
    ]);
    assert_eq!(out.state.get("inner"), None);
    assert_eq!(out.state.len(), 2);
}

#[test]
fn test_failure_inside_closure_reports_once() {
    let out = run(vec![
        Token::assignment(
            "f",
            Token::function("v", Token::application("Fail", Token::reference("v"))),
        ),
        Token::assignment("r", Token::application("f", Token::scalar(1.0))),
    ]);
    assert_eq!(field(&out, "r"), Value::Error);
    assert_eq!(out.issues.len(), 1);
}

#[test]
fn test_recursion_limit_is_one_issue() {
    let program = Token::program(vec![
        Token::assignment(
            "loop",
            Token::function("v", Token::application("loop", Token::reference("v"))),
        ),
        Token::assignment("r", Token::application("loop", Token::scalar(1.0))),
    ]);
    let out = Interpreter::builder(runtime())
        .max_call_depth(Some(5))
        .build()
        .interpret(&program);

    let r = out.result.as_record().and_then(|r| r.get("r")).cloned();
    assert_eq!(r, Some(Value::Error));
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].message, "maximum call depth of 5 exceeded");
}

#[test]
fn test_composition_with_closures_and_capabilities() {
    let out = run(vec![
        Token::assignment(
            "inc",
            Token::function("v", Token::binary("+", Token::reference("v"), Token::scalar(1.0))),
        ),
        Token::assignment("f", Token::composition(&["Negative", "inc"])),
        Token::assignment("r", Token::application("f", Token::scalar(2.0))),
    ]);
    assert_eq!(field(&out, "r"), scalar(-3.0));
}

#[test]
fn test_empty_composition_is_identity() {
    let out = run(vec![
        Token::assignment("f", Token::composition(&[])),
        Token::assignment("r", Token::application("f", Token::scalar(9.0))),
    ]);
    assert_eq!(field(&out, "r"), scalar(9.0));
}

#[test]
fn test_composition_stage_failure_is_one_issue() {
    let out = run(vec![
        Token::assignment("f", Token::composition(&["Negative", "Fail", "Abs"])),
        Token::assignment("r", Token::application("f", Token::scalar(2.0))),
    ]);
    assert_eq!(field(&out, "r"), Value::Error);
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].message, "boom");
}

#[test]
fn test_composition_is_not_invoked_when_built() {
    let out = run(vec![Token::assignment("f", Token::composition(&["Fail"]))]);
    assert!(matches!(field(&out, "f"), Value::Function(_)));
    assert!(out.issues.is_empty());
}

#[test]
fn test_composition_rejects_non_callable_stage() {
    let composition = Composition::new(vec![scalar(1.0)]);
    let mut diagnostics = Diagnostics::new();
    let mut cx = CallContext::new(&mut diagnostics, None);
    assert_eq!(
        tensa_value::Callable::call(&composition, scalar(0.0), &mut cx),
        Err(InvokeError::NotCallable { type_name: "tensor" })
    );
}

#[test]
fn test_closure_outlives_its_run() {
    let out = run(vec![Token::assignment(
        "add2",
        Token::function("v", Token::binary("+", Token::reference("v"), Token::scalar(2.0))),
    )]);
    let Value::Function(add2) = field(&out, "add2") else {
        panic!("expected a function");
    };
    let mut diagnostics = Diagnostics::new();
    let mut cx = CallContext::new(&mut diagnostics, None);
    assert_eq!(add2.call(scalar(1.0), &mut cx), Ok(scalar(3.0)));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_dropping_state_frees_self_referencing_scope() {
    let out = run(vec![Token::assignment("f", Token::function("v", Token::reference("v")))]);
    let global = out.state.scope().downgrade();
    drop(out);
    assert!(global.upgrade().is_none());
}

#[test]
fn test_dropping_state_frees_call_frames() {
    // `mk` binds `g` inside its own call frame, and `g` captures that frame.
    let out = run(vec![
        Token::assignment("t", Token::scalar(2.0)),
        Token::assignment(
            "mk",
            Token::function(
                "x",
                Token::assignment("g", Token::function("y", Token::reference("x"))),
            ),
        ),
        Token::assignment("r", Token::application("mk", Token::reference("t"))),
    ]);
    let Some(Value::Tensor(t)) = out.state.get("t") else {
        panic!("expected a tensor");
    };
    let tensor = std::rc::Rc::downgrade(&t);
    drop(t);
    assert_eq!(out.state.frames().live(), 1);
    drop(out);
    assert!(tensor.upgrade().is_none());
}

#[test]
fn test_closure_kept_past_its_state_sees_no_bindings() {
    let out = run(vec![
        Token::assignment("f", Token::function("v", Token::reference("late"))),
        Token::assignment("late", Token::scalar(5.0)),
    ]);
    let Value::Function(f) = field(&out, "f") else {
        panic!("expected a function");
    };
    drop(out);
    let mut diagnostics = Diagnostics::new();
    let mut cx = CallContext::new(&mut diagnostics, None);
    assert_eq!(f.call(scalar(0.0), &mut cx), Ok(Value::Absent));
}
