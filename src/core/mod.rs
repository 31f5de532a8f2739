/// Command interpreter
///
/// Parsing, dispatching and the interactive loop that sit in front of the store.

pub mod command;
pub mod dispatcher;
pub mod session;

pub use command::{Arity, Command, CommandSpec, COMMAND_TABLE};
pub use dispatcher::{Dispatcher, Reply};
pub use session::{Session, SessionEnd};
