// Interactive read → dispatch → print loop
//
// Generic over reader and writer so tests can drive it with in-memory buffers.

use crate::config::ReplConfig;
use crate::core::dispatcher::{Dispatcher, Reply};
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::info;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// EXIT command
    Exit,
    /// Input ran out
    EndOfInput,
}

pub struct Session {
    dispatcher: Dispatcher,
    config: ReplConfig,
}

impl Session {
    pub fn new(dispatcher: Dispatcher, config: ReplConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run until EXIT or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionEnd> {
        info!("session started");
        let mut line = Vec::new();

        let end = loop {
            if self.config.show_prompt {
                write!(output, "{}", self.config.prompt)?;
                output.flush()?;
            }

            line.clear();
            // Raw bytes, so one undecodable line can't end the session
            if input.read_until(b'\n', &mut line)? == 0 {
                break SessionEnd::EndOfInput;
            }

            match self.dispatcher.handle_bytes(&line) {
                Some(Reply::Lines(lines)) => {
                    for text in lines {
                        writeln!(output, "{}", text)?;
                    }
                }
                Some(Reply::Exit) => break SessionEnd::Exit,
                None => {}
            }
        };

        output.flush()?;
        info!(reason = ?end, stats = ?self.dispatcher.store().stats(), "session ended");
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MultiValueStore;
    use std::io::Cursor;

    fn run_script(script: &str, config: ReplConfig) -> (SessionEnd, String, Session) {
        let mut session = Session::new(Dispatcher::new(MultiValueStore::new()), config);
        let mut output = Vec::new();

        let end = session.run(Cursor::new(script), &mut output).unwrap();

        (end, String::from_utf8(output).unwrap(), session)
    }

    fn quiet() -> ReplConfig {
        ReplConfig::default().with_show_prompt(false)
    }

    #[test]
    fn test_full_script() {
        let script = "\
add key1 value1
ADD key1 value1
ADD key1 value2

members key1
REMOVE key1 value3
keys
bogus
KEYS too many
items
EXIT
ADD never run
";
        let (end, out, session) = run_script(script, quiet());

        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(
            out,
            "\
) Added
) ERROR, member already exists for key
) Added
1) value1
2) value2
) ERROR, member does not exist
1) key1
) ERROR, unknown command
) ERROR, incorrect number of arguments
key1: value1
key1: value2
"
        );
        assert!(!session.dispatcher().store().key_exists("never"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (end, out, _) = run_script("ADD k v\n", quiet());

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(out, ") Added\n");
    }

    #[test]
    fn test_last_line_without_newline() {
        let (_, out, _) = run_script("ADD k v\nKEYEXISTS k", quiet());
        assert_eq!(out, ") Added\n) true\n");
    }

    #[test]
    fn test_prompt_written_before_each_read() {
        let (_, out, _) = run_script("KEYS\nEXIT\n", ReplConfig::default());
        assert_eq!(out, "> (empty set)\n> ");
    }

    #[test]
    fn test_custom_prompt() {
        let config = ReplConfig::default().with_prompt("mv> ");
        let (end, out, _) = run_script("", config);

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(out, "mv> ");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let mut session = Session::new(Dispatcher::new(MultiValueStore::new()), quiet());
        let mut output = Vec::new();
        let input: &[u8] = b"ADD k v\nADD \xff\xfe x\nKEYS\n";

        let end = session.run(input, &mut output).unwrap();

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            ") Added\n) ERROR, input is not valid UTF-8\n1) k\n"
        );
        assert_eq!(session.dispatcher().store().len(), 1);
    }

    #[test]
    fn test_state_survives_across_lines() {
        let (_, out, session) = run_script("ADD a 1\nADD b 2\nREMOVEALL a\nALLMEMBERS\n", quiet());

        assert!(out.ends_with("1) 2\n"));
        assert_eq!(session.dispatcher().store().len(), 1);
    }
}
