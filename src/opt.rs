use std::fmt;

use crate::{
    value::{Kind, Value, Values},
    Error, Result, Token,
};

/// The variant of an option, carrying its default.
#[derive(Debug, Clone, PartialEq)]
pub enum OptKind {
    Bool,
    String(Option<String>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
}

impl OptKind {
    pub fn kind(&self) -> Kind {
        match self {
            OptKind::Bool => Kind::Bool,
            OptKind::String(_) => Kind::String,
            OptKind::Int32(_) => Kind::Int32,
            OptKind::Int64(_) => Kind::Int64,
            OptKind::Float32(_) => Kind::Float32,
            OptKind::Float64(_) => Kind::Float64,
        }
    }

    /// The configured default. A zero default is the same as none.
    pub fn default_value(&self) -> Option<Value> {
        let value = match self {
            OptKind::Bool => None,
            OptKind::String(it) => it.clone().map(Value::String),
            OptKind::Int32(it) => it.map(Value::Int32),
            OptKind::Int64(it) => it.map(Value::Int64),
            OptKind::Float32(it) => it.map(Value::Float32),
            OptKind::Float64(it) => it.map(Value::Float64),
        };
        value.filter(|it| !it.is_zero())
    }

    fn placeholder(&self) -> &'static str {
        match self {
            OptKind::Bool => "",
            OptKind::String(_) => "string",
            _ => "number",
        }
    }
}

/// A typed command line option.
///
/// Options are declarations only: bound values live in the [`Values`] of the
/// context that parsed them, under [`Opt::key`].
#[derive(Debug, Clone, PartialEq)]
pub struct Opt {
    name: String,
    short: Option<char>,
    description: String,
    usage: Option<String>,
    arg_usage: Option<String>,
    kind: OptKind,
}

impl Opt {
    pub fn new(name: impl Into<String>, kind: OptKind) -> Opt {
        Opt {
            name: name.into(),
            short: None,
            description: String::new(),
            usage: None,
            arg_usage: None,
            kind,
        }
    }

    /// A flag, set to `true` by its presence alone.
    pub fn bool(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::Bool)
    }
    pub fn string(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::String(None))
    }
    pub fn int32(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::Int32(None))
    }
    pub fn int64(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::Int64(None))
    }
    pub fn float32(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::Float32(None))
    }
    pub fn float64(name: impl Into<String>) -> Opt {
        Opt::new(name, OptKind::Float64(None))
    }

    pub fn short(mut self, letter: char) -> Opt {
        self.short = Some(letter);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Opt {
        self.description = description.into();
        self
    }

    /// Replaces the whole usage column of the help row.
    pub fn usage(mut self, usage: impl Into<String>) -> Opt {
        self.usage = Some(usage.into());
        self
    }

    /// Replaces the `string`/`number` placeholder in the usage column.
    pub fn arg_usage(mut self, arg_usage: impl Into<String>) -> Opt {
        self.arg_usage = Some(arg_usage.into());
        self
    }

    /// Sets the value bound when the option is absent from the command line.
    ///
    /// # Panics
    ///
    /// If the type of `value` differs from the option's, or the option is a flag.
    pub fn default(mut self, value: impl Into<Value>) -> Opt {
        let key = self.key();
        match (&mut self.kind, value.into()) {
            (OptKind::String(it), Value::String(value)) => *it = Some(value),
            (OptKind::Int32(it), Value::Int32(value)) => *it = Some(value),
            (OptKind::Int64(it), Value::Int64(value)) => *it = Some(value),
            (OptKind::Float32(it), Value::Float32(value)) => *it = Some(value),
            (OptKind::Float64(it), Value::Float64(value)) => *it = Some(value),
            (kind, value) => {
                panic!("default for `{key}` must be a {}, got {value:?}", kind.kind())
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn short_name(&self) -> Option<char> {
        self.short
    }
    pub fn kind(&self) -> &OptKind {
        &self.kind
    }

    /// Whether the option binds the token that follows it.
    pub fn takes_value(&self) -> bool {
        self.kind != OptKind::Bool
    }

    /// Key of the bound value: the long name, or the short letter without one.
    pub fn key(&self) -> String {
        match self.short {
            Some(letter) if self.name.is_empty() => letter.to_string(),
            _ => self.name.clone(),
        }
    }

    /// The spellings that denote this option on the command line.
    pub fn keywords(&self) -> Vec<String> {
        let mut res = Vec::new();
        if let Some(letter) = self.short {
            res.push(format!("-{letter}"));
        }
        if !self.name.is_empty() {
            res.push(format!("--{}", self.name));
        }
        res
    }

    pub fn set_default(&self, values: &mut Values) {
        if let Some(value) = self.kind.default_value() {
            values.insert(self.key(), value);
        }
    }

    /// Binds the option from the tokens that follow it, returning how many of
    /// them were consumed.
    pub fn parse(&self, tokens: &[Token<'_>], values: &mut Values) -> Result<usize> {
        if !self.takes_value() {
            log::trace!("bind {} = true", self.key());
            values.insert(self.key(), Value::Bool(true));
            return Ok(0);
        }

        let text = match tokens.first() {
            Some(Token::Value { text, escaped: false, .. }) => *text,
            _ => return Err(Error::MissingValue(self.usage_column())),
        };
        let value =
            Value::parse(self.kind.kind(), text).map_err(|err| Error::invalid_value(self, err))?;
        log::trace!("bind {} = {value:?}", self.key());
        values.insert(self.key(), value);
        Ok(1)
    }

    /// The `(usage, description)` columns of this option's help row.
    pub fn help(&self) -> (String, String) {
        let mut description = self.description.clone();
        if let Some(default) = self.kind.default_value() {
            description.push_str(&format!(" (default: {default})"));
        }
        (self.usage_column(), description)
    }

    fn usage_column(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }

        let placeholder = match &self.arg_usage {
            Some(it) if self.takes_value() => it.as_str(),
            _ => self.kind.placeholder(),
        };
        let mut res = String::new();
        if let Some(letter) = self.short {
            res.push_str(&format!("-{letter}"));
        }
        if !self.name.is_empty() {
            if !res.is_empty() {
                res.push(',');
            }
            res.push_str(&format!("--{}", self.name));
            if !placeholder.is_empty() {
                res.push_str(&format!("={placeholder}"));
            }
        } else if !placeholder.is_empty() {
            res.push_str(&format!(" {placeholder}"));
        }
        res
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keywords().last() {
            Some(spelling) => f.write_str(spelling),
            None => f.write_str("<unnamed>"),
        }
    }
}
