use stayx_console::Console;
use stayx_store::FileStore;
use tempfile::TempDir;

/// Console backed by a scratch registry file
#[allow(dead_code)]
pub fn new_console(dir: &TempDir) -> Console {
    Console::new(FileStore::new(dir.path().join("objects.json")))
}

/// Run one line and return its printed output
///
/// Asserts the shell stays in the prompting state.
#[allow(dead_code)]
pub fn run_line(console: &mut Console, line: &str) -> Vec<String> {
    let outcome = console.handle_line(line).expect("storage failure");
    assert!(!outcome.quit, "line should not quit: {line}");
    outcome.lines
}

/// Create an instance and return its printed id
#[allow(dead_code)]
pub fn create_instance(console: &mut Console, class: &str) -> String {
    let lines = run_line(console, &format!("create {class}"));
    assert_eq!(lines.len(), 1, "create should print exactly the id");
    lines[0].clone()
}
