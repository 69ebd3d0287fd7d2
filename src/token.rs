//! Splits raw arguments into tokens against the keyword table of one command
//! level.
use std::collections::{hash_map::Entry, HashMap};

use crate::{Command, Opt};

#[derive(Debug, Clone, Copy)]
pub enum Keyword<'a> {
    Opt(&'a Opt),
    Command(&'a Command),
}

/// Literal spellings (`--name`, `-n`, `greet`) of one command level.
#[derive(Debug, Default)]
pub struct Keywords<'a> {
    map: HashMap<String, Keyword<'a>>,
}

impl<'a> Keywords<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_opt(&mut self, opt: &'a Opt) {
        for spelling in opt.keywords() {
            self.insert(spelling, Keyword::Opt(opt));
        }
    }

    pub fn add_command(&mut self, command: &'a Command) {
        self.insert(command.name().to_string(), Keyword::Command(command));
        for alias in command.aliases() {
            self.insert(alias.clone(), Keyword::Command(command));
        }
    }

    /// The first declaration of a spelling wins.
    fn insert(&mut self, spelling: String, keyword: Keyword<'a>) {
        match self.map.entry(spelling) {
            Entry::Occupied(it) => {
                log::warn!("`{}` is declared twice, keeping the first", it.key())
            }
            Entry::Vacant(it) => {
                it.insert(keyword);
            }
        }
    }

    pub fn get(&self, spelling: &str) -> Option<Keyword<'a>> {
        self.map.get(spelling).copied()
    }

    pub fn opt(&self, spelling: &str) -> Option<&'a Opt> {
        match self.get(spelling)? {
            Keyword::Opt(it) => Some(it),
            Keyword::Command(_) => None,
        }
    }

    pub fn command(&self, spelling: &str) -> Option<&'a Command> {
        match self.get(spelling)? {
            Keyword::Command(it) => Some(it),
            Keyword::Opt(_) => None,
        }
    }

    fn short(&self, letter: char) -> Option<&'a Opt> {
        self.opt(&format!("-{letter}"))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Token<'a> {
    Command(&'a Command),
    Opt(&'a Opt),
    /// A literal argument. `attached` marks the right-hand side of `--name=value`,
    /// `escaped` anything after a bare `--`.
    Value { text: &'a str, attached: bool, escaped: bool },
}

impl<'a> Token<'a> {
    fn value(text: &'a str) -> Token<'a> {
        Token::Value { text, attached: false, escaped: false }
    }
}

/// Tokenizes `args` up to and including the first subcommand.
///
/// Returns the tokens together with the slice of `args` that starts at the
/// subcommand, so that the next level sees its own name first. The slice is
/// empty when no subcommand was found.
///
/// Unknown option spellings come out as plain values; reporting them is up to
/// the caller.
pub fn tokenize<'a>(keywords: &Keywords<'a>, args: &'a [String]) -> (Vec<Token<'a>>, &'a [String]) {
    let mut tokens = Vec::new();
    let mut escaped = false;
    // Set right after an option that still needs its value.
    let mut pending = false;

    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_str();
        if escaped {
            tokens.push(Token::Value { text: arg, attached: false, escaped: true });
            continue;
        }
        if arg == "--" {
            escaped = true;
            continue;
        }

        if arg.len() >= 3 && arg.starts_with("--") {
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };
            if let Some(opt) = keywords.opt(name) {
                log::trace!("option {name}");
                tokens.push(Token::Opt(opt));
                pending = opt.takes_value();
                if let Some(text) = value {
                    tokens.push(Token::Value { text, attached: true, escaped: false });
                    pending = false;
                }
                continue;
            }
        }

        if arg.len() >= 2 && arg.starts_with('-') {
            // All or nothing: `-ab` is a cluster only if both letters are options.
            let cluster = arg[1..].chars().map(|it| keywords.short(it)).collect::<Option<Vec<_>>>();
            if let Some(opts) = cluster {
                log::trace!("short options {arg}");
                pending = opts.last().map_or(false, |it| it.takes_value());
                tokens.extend(opts.into_iter().map(Token::Opt));
                continue;
            }
        }

        // In an option's value position a command name is just a value.
        if !pending {
            if let Some(command) = keywords.command(arg) {
                log::trace!("command {arg}");
                tokens.push(Token::Command(command));
                return (tokens, &args[i..]);
            }
        }

        log::trace!("value {arg:?}");
        tokens.push(Token::value(arg));
        pending = false;
    }

    (tokens, &[])
}

/// If a stray positional `text` is spelled like an option that this level does
/// not declare, returns the offending spelling.
///
/// A short cluster with at least one declared letter is a legitimate value, and
/// so are negative numbers.
pub(crate) fn unknown_option(keywords: &Keywords<'_>, text: &str) -> Option<String> {
    if text.len() >= 3 && text.starts_with("--") {
        let name = text.split_once('=').map_or(text, |(name, _)| name);
        return Some(name.to_string());
    }
    if text.len() >= 2 && text.starts_with('-') && !is_negative_number(text) {
        let mut letters = text[1..].chars();
        if letters.clone().all(|it| keywords.short(it).is_none()) {
            return letters.next().map(|it| format!("-{it}"));
        }
    }
    None
}

fn is_negative_number(text: &str) -> bool {
    let digits = &text[1..];
    digits.starts_with(|it: char| it.is_ascii_digit() || it == '.') && digits.parse::<f64>().is_ok()
}
