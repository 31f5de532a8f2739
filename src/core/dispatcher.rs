// Runs commands against the store and renders their output lines
//
// The dispatcher is the single owner of the store. It never prints; callers
// write the returned lines wherever they like.

use crate::core::command::Command;
use crate::error::{CommandError, CommandResult};
use crate::store::MultiValueStore;
use tracing::{debug, warn};

const EMPTY_SET: &str = "(empty set)";

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print these lines, then read the next command
    Lines(Vec<String>),
    /// End the session
    Exit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Reply::Lines(vec![text.into()])
    }
}

pub struct Dispatcher {
    store: MultiValueStore,
}

impl Dispatcher {
    pub fn new(store: MultiValueStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MultiValueStore {
        &self.store
    }

    /// Decode and run one raw input line
    ///
    /// Bytes that are not valid UTF-8 are rejected with an error line; the
    /// store is left untouched and the session carries on.
    pub fn handle_bytes(&mut self, raw: &[u8]) -> Option<Reply> {
        match std::str::from_utf8(raw) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                warn!(error = %e, "input line is not valid UTF-8");
                Some(Reply::line(CommandError::InvalidEncoding.user_message()))
            }
        }
    }

    /// Parse and run one input line. Blank lines yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        match Command::parse(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => {
                debug!(line, error = %e, "rejected input");
                Some(Reply::line(e.user_message()))
            }
        }
    }

    /// Run a parsed command
    pub fn execute(&mut self, command: Command) -> Reply {
        debug!(command = command.name(), "dispatching");

        match command {
            Command::Add { key, member } => {
                status(self.store.add_member(&key, &member), ") Added")
            }
            Command::Remove { key, member } => {
                status(self.store.remove_member(&key, &member), ") Removed")
            }
            Command::RemoveAll { key } => {
                status(self.store.remove_all_for_key(&key), ") Removed")
            }
            Command::Clear => {
                self.store.clear();
                Reply::line(") Cleared")
            }
            Command::Keys => enumerated(self.store.list_keys()),
            Command::Members { key } => match self.store.list_members(&key) {
                Ok(members) => enumerated(members),
                // MEMBERS keeps its trailing period; REMOVE/REMOVEALL don't
                Err(CommandError::KeyNotFound) => {
                    Reply::line(") ERROR, key does not exist.")
                }
                Err(e) => Reply::line(e.user_message()),
            },
            Command::KeyExists { key } => boolean(self.store.key_exists(&key)),
            Command::MemberExists { key, member } => {
                boolean(self.store.member_exists(&key, &member))
            }
            Command::AllMembers => enumerated(self.store.list_all_members()),
            Command::Items => {
                let items = self.store.list_items();
                if items.is_empty() {
                    Reply::line(EMPTY_SET)
                } else {
                    Reply::Lines(items.iter().map(ToString::to_string).collect())
                }
            }
            Command::Exit => Reply::Exit,
        }
    }
}

fn status(result: CommandResult<()>, success: &str) -> Reply {
    match result {
        Ok(()) => Reply::line(success),
        Err(e) => Reply::line(e.user_message()),
    }
}

fn boolean(value: bool) -> Reply {
    Reply::line(format!(") {}", value))
}

// 1-based "N) value" lines, or the empty-set marker
fn enumerated(values: Vec<String>) -> Reply {
    if values.is_empty() {
        return Reply::line(EMPTY_SET);
    }

    Reply::Lines(
        values
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{}) {}", i + 1, value))
            .collect(),
    )
}
