mod common;

use common::{create_instance, new_console, run_line};
use stayx_core::AttrValue;
use tempfile::TempDir;

// ===== PAIR FORM =====

#[test]
fn test_update_sets_string_with_quotes_stripped() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    let lines = run_line(&mut console, &format!("update User {id} name \"Betty\""));

    assert!(lines.is_empty(), "update prints nothing on success");
    let entity = console.store().get(&format!("User.{id}")).unwrap();
    assert_eq!(
        entity.attrs.get("name"),
        Some(&AttrValue::Str("Betty".to_string()))
    );
}

#[test]
fn test_update_coerces_digits_to_int() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    run_line(&mut console, &format!("update User {id} age 23"));

    let entity = console.store().get(&format!("User.{id}")).unwrap();
    assert_eq!(entity.attrs.get("age"), Some(&AttrValue::Int(23)));
}

#[test]
fn test_update_coerces_numeric_to_float() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "Place");

    run_line(&mut console, &format!("update Place {id} latitude 37.77"));

    let entity = console.store().get(&format!("Place.{id}")).unwrap();
    assert_eq!(entity.attrs.get("latitude"), Some(&AttrValue::Float(37.77)));
}

#[test]
fn test_update_advances_updated_at() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");
    let key = format!("User.{id}");
    let before = console.store().get(&key).unwrap().updated_at;

    std::thread::sleep(std::time::Duration::from_millis(10));
    run_line(&mut console, &format!("update User {id} name \"Betty\""));

    let entity = console.store().get(&key).unwrap();
    assert!(entity.updated_at > before);
    assert_eq!(entity.created_at, before);
}

#[test]
fn test_update_value_with_spaces_inside_quotes() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    run_line(
        &mut console,
        &format!("update User {id} name \"John Smith\""),
    );

    let entity = console.store().get(&format!("User.{id}")).unwrap();
    assert_eq!(
        entity.attrs.get("name"),
        Some(&AttrValue::Str("John Smith".to_string()))
    );
}

// ===== VALIDATION ORDER =====

#[test]
fn test_update_validation_order() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    assert_eq!(
        run_line(&mut console, "update"),
        vec!["** class name missing **"]
    );
    assert_eq!(
        run_line(&mut console, "update Bogus"),
        vec!["** class doesn't exist **"]
    );
    assert_eq!(
        run_line(&mut console, "update User"),
        vec!["** instance id missing **"]
    );
    assert_eq!(
        run_line(&mut console, &format!("update User {id}")),
        vec!["** attribute name missing **"]
    );
    assert_eq!(
        run_line(&mut console, &format!("update User {id} name")),
        vec!["** value missing **"]
    );
}

#[test]
fn test_update_missing_instance_wins_over_payload() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);

    // the instance lookup happens before the payload is even parsed
    assert_eq!(
        run_line(&mut console, "update User nope {broken"),
        vec!["** no instance found **"]
    );
    assert_eq!(
        run_line(&mut console, "update User nope"),
        vec!["** no instance found **"]
    );
}

// ===== DICT FORM =====

#[test]
fn test_update_dict_applies_every_pair() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    let lines = run_line(
        &mut console,
        &format!("update User {id} {{'first_name': 'John', 'age': 89, 'height': 1.8}}"),
    );

    assert!(lines.is_empty());
    let entity = console.store().get(&format!("User.{id}")).unwrap();
    assert_eq!(
        entity.attrs.get("first_name"),
        Some(&AttrValue::Str("John".to_string()))
    );
    assert_eq!(entity.attrs.get("age"), Some(&AttrValue::Int(89)));
    assert_eq!(entity.attrs.get("height"), Some(&AttrValue::Float(1.8)));
}

#[test]
fn test_update_malformed_dict_is_silent_noop() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");
    let key = format!("User.{id}");
    let before = console.store().get(&key).unwrap().clone();

    let lines = run_line(
        &mut console,
        &format!("update User {id} {{bad: identifier}}"),
    );

    assert!(lines.is_empty(), "malformed dicts print nothing");
    assert_eq!(console.store().get(&key), Some(&before));
}

#[test]
fn test_update_ignores_reserved_fields() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");
    let key = format!("User.{id}");

    run_line(&mut console, &format!("update User {id} id hijacked"));

    // the entity keeps its identity and stays under its original key
    let entity = console.store().get(&key).unwrap();
    assert_eq!(entity.id, id);
    assert!(entity.attrs.is_empty());
}

#[test]
fn test_update_trailing_paren_tolerated() {
    let dir = TempDir::new().unwrap();
    let mut console = new_console(&dir);
    let id = create_instance(&mut console, "User");

    run_line(&mut console, &format!("update User {id} age 23)"));

    let entity = console.store().get(&format!("User.{id}")).unwrap();
    assert_eq!(entity.attrs.get("age"), Some(&AttrValue::Int(23)));
}
