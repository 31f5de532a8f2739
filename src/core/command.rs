// Turns one input line into a Command
//
// Action lookup goes through a static table that carries each action's arity
// and constructor; arity is checked before the constructor runs, so
// constructors never see the wrong number of arguments.

use crate::error::{CommandError, CommandResult};

/// How many arguments an action takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Arguments are accepted and ignored
    Any,
}

/// One row of the command table
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Uppercase action name
    pub name: &'static str,
    pub arity: Arity,
    /// Builds the command from arguments already checked against `arity`
    pub build: fn(&[&str]) -> Command,
}

/// Action name → arity and constructor. Lookups normalize to uppercase first.
pub const COMMAND_TABLE: &[CommandSpec] = &[
    CommandSpec { name: "ADD", arity: Arity::Exact(2), build: build_add },
    CommandSpec { name: "REMOVE", arity: Arity::Exact(2), build: build_remove },
    CommandSpec { name: "REMOVEALL", arity: Arity::Exact(1), build: build_remove_all },
    CommandSpec { name: "CLEAR", arity: Arity::Exact(0), build: build_clear },
    CommandSpec { name: "KEYS", arity: Arity::Exact(0), build: build_keys },
    CommandSpec { name: "MEMBERS", arity: Arity::Exact(1), build: build_members },
    CommandSpec { name: "KEYEXISTS", arity: Arity::Exact(1), build: build_key_exists },
    CommandSpec { name: "MEMBEREXISTS", arity: Arity::Exact(2), build: build_member_exists },
    CommandSpec { name: "ALLMEMBERS", arity: Arity::Exact(0), build: build_all_members },
    CommandSpec { name: "ITEMS", arity: Arity::Exact(0), build: build_items },
    CommandSpec { name: "EXIT", arity: Arity::Any, build: build_exit },
];

/// A parsed, arity-checked command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { key: String, member: String },
    Remove { key: String, member: String },
    RemoveAll { key: String },
    Clear,
    Keys,
    Members { key: String },
    KeyExists { key: String },
    MemberExists { key: String, member: String },
    AllMembers,
    Items,
    Exit,
}

impl Command {
    /// Parse a raw input line
    ///
    /// # Returns
    /// * `Ok(None)` - Blank line, nothing to do
    /// * `Ok(Some(Command))` - Recognized action with the right argument count
    /// * `Err(UnknownCommand)` / `Err(IncorrectArgumentCount)` - Rejected line
    pub fn parse(line: &str) -> CommandResult<Option<Command>> {
        let mut tokens = line.split_whitespace();

        let Some(action) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let action = action.to_uppercase();
        let spec = lookup(&action).ok_or_else(|| CommandError::UnknownCommand(action.clone()))?;

        if let Arity::Exact(expected) = spec.arity {
            if args.len() != expected {
                return Err(CommandError::IncorrectArgumentCount {
                    command: spec.name,
                    expected,
                    got: args.len(),
                });
            }
        }

        Ok(Some((spec.build)(&args)))
    }

    /// Uppercase action name, as it appears in the table
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add { .. } => "ADD",
            Command::Remove { .. } => "REMOVE",
            Command::RemoveAll { .. } => "REMOVEALL",
            Command::Clear => "CLEAR",
            Command::Keys => "KEYS",
            Command::Members { .. } => "MEMBERS",
            Command::KeyExists { .. } => "KEYEXISTS",
            Command::MemberExists { .. } => "MEMBEREXISTS",
            Command::AllMembers => "ALLMEMBERS",
            Command::Items => "ITEMS",
            Command::Exit => "EXIT",
        }
    }
}

fn lookup(action: &str) -> Option<&'static CommandSpec> {
    COMMAND_TABLE.iter().find(|spec| spec.name == action)
}

fn build_add(args: &[&str]) -> Command {
    Command::Add {
        key: args[0].to_string(),
        member: args[1].to_string(),
    }
}

fn build_remove(args: &[&str]) -> Command {
    Command::Remove {
        key: args[0].to_string(),
        member: args[1].to_string(),
    }
}

fn build_remove_all(args: &[&str]) -> Command {
    Command::RemoveAll { key: args[0].to_string() }
}

fn build_clear(_: &[&str]) -> Command {
    Command::Clear
}

fn build_keys(_: &[&str]) -> Command {
    Command::Keys
}

fn build_members(args: &[&str]) -> Command {
    Command::Members { key: args[0].to_string() }
}

fn build_key_exists(args: &[&str]) -> Command {
    Command::KeyExists { key: args[0].to_string() }
}

fn build_member_exists(args: &[&str]) -> Command {
    Command::MemberExists {
        key: args[0].to_string(),
        member: args[1].to_string(),
    }
}

fn build_all_members(_: &[&str]) -> Command {
    Command::AllMembers
}

fn build_items(_: &[&str]) -> Command {
    Command::Items
}

fn build_exit(_: &[&str]) -> Command {
    Command::Exit
}
