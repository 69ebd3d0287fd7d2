//! A command tree argument parser.
//!
//! A program declares a tree of [`Command`]s, each with typed [`Opt`]ions and
//! child commands. [`Command::run`] tokenizes the arguments level by level,
//! binds option values into a parent-linked [`Context`], and invokes the action
//! of the deepest selected command.
//!
//! ```
//! use argtree::{Command, Opt};
//!
//! let app = Command::new("prog")
//!     .option(Opt::bool("verbose").description("talk more"))
//!     .command(
//!         Command::new("greet")
//!             .alias("g")
//!             .option(Opt::string("name").short('n').description("who to greet"))
//!             .action(|ctx| {
//!                 let name = ctx.string_or("name", "world")?;
//!                 assert_eq!(name, "Ann");
//!                 assert!(ctx.bool("verbose")?);
//!                 Ok(())
//!             }),
//!     );
//!
//! app.run(["prog", "--verbose", "g", "-n", "Ann"], None).unwrap();
//! ```
use std::{fmt, io};

mod command;
mod context;
mod help;
mod opt;
mod prompt;
mod token;
mod value;

pub use crate::{
    command::{show_help, Action, Command},
    context::Context,
    opt::{Opt, OptKind},
    prompt::{read_input, read_password, Prompt, Terminal},
    token::{tokenize, Keyword, Keywords, Token},
    value::{FromValue, InvalidBool, Kind, Value, Values},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown option: `{0}`")]
    UnknownKeyword(String),

    #[error("missing required value: `{0}`")]
    MissingValue(String),

    #[error("option `{0}` does not take a value")]
    UnexpectedValue(String),

    #[error("can't parse `{name}`, {source}")]
    InvalidValue {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid arguments: `{arg}` before command `{command}`")]
    MisplacedPositional { arg: String, command: String },

    #[error("`{name}` holds {found}, expected {expected}")]
    TypeMismatch { name: String, expected: Kind, found: Kind },

    #[error("stdin is not a terminal")]
    NoTerminal,

    #[error("unexpected end of input")]
    EndOfInput,

    /// Returned by [`show_help`] after the help block was written.
    #[error("invalid arguments")]
    InvalidArguments,

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Failure reported by a command action.
    #[error(transparent)]
    Custom(BoxError),
}

impl Error {
    pub fn custom(err: impl Into<BoxError>) -> Error {
        Error::Custom(err.into())
    }

    pub(crate) fn invalid_value(name: impl fmt::Display, source: impl Into<BoxError>) -> Error {
        Error::InvalidValue { name: name.to_string(), source: source.into() }
    }
}
