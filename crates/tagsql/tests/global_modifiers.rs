//! Process-wide modifier registry, as seen by an application crate.

use tagsql::{AttrModifier, Method, OpInfo, Value, load_modifier, register_modifier};

fn trimmed() -> AttrModifier {
    AttrModifier::new().with_value(|_, v| match v {
        Value::Text(s) => Ok(Value::Text(s.trim().to_string())),
        other => Ok(other),
    })
}

tagsql::inventory::submit! {
    tagsql::ModifierRegistration::new("app/trimmed", trimmed)
}

#[test]
fn link_time_registration_is_visible() {
    let m = load_modifier("app/trimmed").unwrap();
    let op = OpInfo::new("mysql", Method::Insert);
    assert_eq!(
        m.apply_value(&op, Value::from("  hi  ")).unwrap(),
        Some(Value::from("hi"))
    );
}

#[test]
fn startup_registration_then_lookup() {
    register_modifier("app/audit", AttrModifier::new().skip_on_update()).unwrap();
    assert!(load_modifier("app/audit").unwrap().skip_on_update);

    let err = register_modifier("app/audit", AttrModifier::new()).unwrap_err();
    assert!(err.is_collision());
    let err = register_modifier("app/trimmed", AttrModifier::new()).unwrap_err();
    assert!(err.is_collision());
}

#[test]
fn unknown_key_is_recoverable() {
    let err = load_modifier("app/unknown").unwrap_err();
    assert!(err.is_not_found());
}
