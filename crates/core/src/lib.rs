pub mod book;
pub mod history;
pub mod query;

pub mod command {
    use thiserror::Error;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct CommandResult {
        pub feedback: String,
        pub exit: bool,
    }

    impl CommandResult {
        pub fn message<S: Into<String>>(s: S) -> Self {
            Self {
                feedback: s.into(),
                exit: false,
            }
        }
        pub fn exit<S: Into<String>>(s: S) -> Self {
            Self {
                feedback: s.into(),
                exit: true,
            }
        }
    }

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum CommandError {
        #[error("invalid command format\n{usage}")] InvalidFormat { usage: &'static str },
        #[error("unknown command: {0}")] UnknownCommand(String),
        #[error("missing field: {0}")] MissingField(&'static str),
        #[error("invalid {field}: {reason}")] InvalidValue { field: &'static str, reason: String },
        #[error("index {0} is out of range")] IndexOutOfRange(usize),
        #[error("duplicate contact: {0}")] Duplicate(String),
    }

    /// Anything that can run a submitted command line.
    pub trait CommandExecutor {
        fn execute(&mut self, text: &str) -> Result<CommandResult, CommandError>;
    }
}
