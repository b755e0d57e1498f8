use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_define_and_lookup() {
    let env = Environment::new();
    assert!(env.is_empty());
    env.define("x", Value::Number(1.0));
    assert_eq!(env.get("x"), Some(Value::Number(1.0)));
    assert_eq!(env.get("y"), None);
}

#[test]
fn test_rebinding_overwrites() {
    let env = Environment::new();
    env.define("x", Value::Number(1.0));
    env.define("x", Value::Number(2.0));
    assert_eq!(env.len(), 1);
    assert_eq!(env.get("x"), Some(Value::Number(2.0)));
}

#[test]
fn test_child_scope_shadows_and_falls_back() {
    let env = Environment::new();
    env.define("x", Value::Number(1.0));
    env.define("y", Value::Number(2.0));

    let child = LocalScope::new(Scope::with_parent(env.scope()));
    child.borrow_mut().define("x", Value::Number(10.0));

    assert_eq!(child.borrow().lookup("x"), Some(Value::Number(10.0)));
    assert_eq!(child.borrow().lookup("y"), Some(Value::Number(2.0)));
    // The child never writes through to its parent.
    assert_eq!(env.get("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_child_sees_later_parent_writes() {
    let env = Environment::new();
    let child = LocalScope::new(Scope::with_parent(env.scope()));
    assert_eq!(child.borrow().lookup("late"), None);
    env.define("late", Value::Number(3.0));
    assert_eq!(child.borrow().lookup("late"), Some(Value::Number(3.0)));
}

#[test]
fn test_to_record_is_sorted() {
    let env = Environment::new();
    env.define("b", Value::Number(2.0));
    env.define("a", Value::Number(1.0));
    let record = env.to_record();
    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_scope_handles_share() {
    let env = Environment::new();
    assert!(env.scope().ptr_eq(&env.scope()));
    assert!(!env.scope().ptr_eq(&Environment::new().scope()));
}

#[test]
fn test_drop_empties_live_frames() {
    let env = Environment::new();
    let frame = env.frames().push(&env.scope());
    frame.borrow_mut().define("x", Value::Number(1.0));
    assert_eq!(env.frames().live(), 1);
    drop(env);
    assert_eq!(frame.borrow().lookup("x"), None);
}
