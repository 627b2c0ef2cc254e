//! Command execution against the entity registry

use stayx_core::errors::StayXError;
use stayx_core::{ClassName, Entity};
use stayx_store::{FileStore, Result};

use crate::command::{Command, UpdatePayload};
use crate::{dotted, parse};

/// Result of dispatching one input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Lines to print, in order
    pub lines: Vec<String>,
    /// True when the shell should leave the read-loop
    pub quit: bool,
}

impl Outcome {
    /// Outcome with output lines, staying in the prompting state
    fn with_lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    /// Terminal outcome
    fn terminal() -> Self {
        Self {
            lines: Vec::new(),
            quit: true,
        }
    }

    /// A single diagnostic line for a rejected command
    fn diagnostic(err: &StayXError) -> Self {
        Self::with_lines(vec![err.diagnostic()])
    }
}

/// The command dispatcher
///
/// Owns the store and executes one line at a time. Command validation errors
/// become diagnostic lines in the [`Outcome`]; only storage failures surface
/// as `Err`, and those are fatal to the session.
#[derive(Debug)]
pub struct Console {
    store: FileStore,
}

impl Console {
    /// Create a dispatcher over the given store
    ///
    /// The store is injected rather than global so independent sessions and
    /// tests hold independent registries.
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut FileStore {
        &mut self.store
    }

    /// Dispatch one line of input
    ///
    /// Empty lines do nothing. A line that is not a canonical command is
    /// retried as a dotted call, whose rewrite re-enters the same canonical
    /// path; if neither grammar matches, the outcome is a single
    /// `*** Unknown syntax` diagnostic echoing the line.
    ///
    /// # Errors
    ///
    /// Only storage failures (persisting the registry file) are returned.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::default());
        }

        match parse::parse_line(line) {
            Ok(cmd) => self.execute(cmd),
            Err(StayXError::UnknownSyntax { .. }) => match dotted::rewrite(line) {
                Ok(canonical) => {
                    tracing::debug!(%line, %canonical, "rewrote dotted call");
                    match parse::parse_line(&canonical) {
                        Ok(cmd) => self.execute(cmd),
                        Err(err) => Ok(Outcome::diagnostic(&err)),
                    }
                }
                Err(err) => Ok(Outcome::diagnostic(&err)),
            },
            Err(err) => Ok(Outcome::diagnostic(&err)),
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Outcome> {
        match cmd {
            Command::Quit => Ok(Outcome::terminal()),

            Command::Create { class } => {
                let entity = Entity::new(class);
                let id = entity.id.clone();
                self.store.insert(entity);
                self.store.save()?;
                tracing::debug!(%class, %id, "created entity");
                Ok(Outcome::with_lines(vec![id]))
            }

            Command::Show { class, id } => {
                let key = Entity::key_for(class, &id);
                match self.store.get(&key) {
                    Some(entity) => Ok(Outcome::with_lines(vec![entity.to_string()])),
                    None => Ok(Outcome::diagnostic(&StayXError::InstanceNotFound { key })),
                }
            }

            Command::Destroy { class, id } => {
                let key = Entity::key_for(class, &id);
                if self.store.remove(&key).is_none() {
                    return Ok(Outcome::diagnostic(&StayXError::InstanceNotFound { key }));
                }
                self.store.save()?;
                tracing::debug!(%key, "destroyed entity");
                Ok(Outcome::with_lines(Vec::new()))
            }

            Command::All { class } => {
                let lines = self
                    .store
                    .all()
                    .values()
                    .filter(|e| class.map_or(true, |c| e.class_name == c))
                    .map(ToString::to_string)
                    .collect();
                Ok(Outcome::with_lines(lines))
            }

            Command::Count { class } => {
                let count = class.map_or(0, |c| self.store.count_class(c));
                Ok(Outcome::with_lines(vec![count.to_string()]))
            }

            Command::Update { class, id, payload } => self.execute_update(class, id, &payload),

            Command::Help { topic } => Ok(Outcome::with_lines(vec![help_text(topic.as_deref())])),
        }
    }

    /// Apply an update once the target instance is known to exist
    ///
    /// The instance lookup comes first: a bad id wins over a bad payload.
    /// A malformed dict payload deliberately has no effect and prints
    /// nothing.
    fn execute_update(&mut self, class: ClassName, id: String, payload: &str) -> Result<Outcome> {
        let key = Entity::key_for(class, &id);
        if !self.store.contains(&key) {
            return Ok(Outcome::diagnostic(&StayXError::InstanceNotFound { key }));
        }

        let parsed = match parse::parse_update_payload(payload) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => return Ok(Outcome::with_lines(Vec::new())),
            Err(err) => return Ok(Outcome::diagnostic(&err)),
        };

        let Some(entity) = self.store.get_mut(&key) else {
            return Ok(Outcome::diagnostic(&StayXError::InstanceNotFound { key }));
        };
        match parsed {
            UpdatePayload::Pair { attr, value } => {
                entity.set_attr(&attr, value);
            }
            UpdatePayload::Dict(pairs) => {
                for (attr, value) in pairs {
                    entity.set_attr(&attr, value);
                }
            }
        }
        entity.touch();
        self.store.save()?;
        tracing::debug!(%key, "updated entity");
        Ok(Outcome::with_lines(Vec::new()))
    }
}

/// Fixed usage text per command, or the command list
fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => "Documented commands: all count create destroy help quit show update EOF".to_string(),
        Some("create") => "Usage: create <class>\n        Create a new instance of <class> and print its id.".to_string(),
        Some("show") => "Usage: show <class> <id> or <Class>.show(<id>)\n        Display the string form of an instance.".to_string(),
        Some("destroy") => "Usage: destroy <class> <id> or <Class>.destroy(<id>)\n        Delete an instance.".to_string(),
        Some("all") => "Usage: all or all <class> or <Class>.all()\n        Display all instances, optionally filtered by class.".to_string(),
        Some("count") => "Usage: count <class> or <Class>.count()\n        Print the number of instances of <class>.".to_string(),
        Some("update") => "Usage: update <class> <id> <attribute> <value> or\n       <Class>.update(<id>, <attribute>, <value>) or\n       <Class>.update(<id>, {<dictionary>})\n        Add or change an attribute on an instance.".to_string(),
        Some("help") => "Usage: help or help <command>\n        Show usage for a command.".to_string(),
        Some("quit") => "Quit command to exit the program.".to_string(),
        Some("EOF") => "EOF signal to exit the program.".to_string(),
        Some(other) => format!("*** No help on {}", other),
    }
}
