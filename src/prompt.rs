//! Interactive fallback for values missing from the command line.
use std::io::{self, IsTerminal, Read, Write};

use crate::{value::FromValue, Error, Result};

/// Source of values the user types in when asked.
pub trait Prompt {
    /// Shows `prompt` and reads one line.
    fn read_value(&self, prompt: &str) -> Result<String>;

    /// Like [`Prompt::read_value`], without echoing the input.
    fn read_secret(&self, prompt: &str) -> Result<String>;
}

/// Asks with `message` and parses the answer as a `T`.
///
/// ```no_run
/// let port: i32 = argtree::read_input(&argtree::Terminal, "port: ")?;
/// # Ok::<(), argtree::Error>(())
/// ```
pub fn read_input<T: FromValue>(prompt: &(impl Prompt + ?Sized), message: &str) -> Result<T> {
    let text = prompt.read_value(message)?;
    parse_answer(message, &text)
}

/// Like [`read_input`], without echoing the answer.
pub fn read_password<T: FromValue>(prompt: &(impl Prompt + ?Sized), message: &str) -> Result<T> {
    let text = prompt.read_secret(message)?;
    parse_answer(message, &text)
}

fn parse_answer<T: FromValue>(message: &str, text: &str) -> Result<T> {
    let name = message.trim_end().trim_end_matches(':');
    T::parse_text(text).map_err(|err| Error::invalid_value(name, err))
}

/// Prompts on stdout and reads from the terminal attached to stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Prompt for Terminal {
    fn read_value(&self, prompt: &str) -> Result<String> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Err(Error::NoTerminal);
        }
        show(prompt)?;
        let mut stdin = stdin.lock();
        read_line(&mut stdin)
    }

    fn read_secret(&self, prompt: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            return Err(Error::NoTerminal);
        }
        show(prompt)?;
        // rpassword turns echo back on however the read ends.
        let res = rpassword::read_password();
        println!();
        match res {
            Ok(secret) => Ok(secret.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(Error::EndOfInput),
            Err(err) => Err(err.into()),
        }
    }
}

fn show(prompt: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()
}

/// Reads up to the next `\n`, dropping any `\r` on the way.
///
/// End of input is only an error when nothing was read before it.
pub(crate) fn read_line(reader: &mut impl Read) -> Result<String> {
    let mut buf = Vec::new();
    let mut eof = true;
    for byte in reader.bytes() {
        match byte? {
            b'\n' => {
                eof = false;
                break;
            }
            b'\r' => (),
            byte => buf.push(byte),
        }
    }
    if eof && buf.is_empty() {
        return Err(Error::EndOfInput);
    }
    String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}
