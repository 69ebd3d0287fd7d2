use std::{io::Write, path::PathBuf};

use crate::{help, prompt, value::FromValue, Command, Error, Prompt, Result, Values};

/// Bound values and positional arguments of one activated command level.
///
/// Lookups by name start at this level and walk outwards through the parents,
/// so a flag bound on the root command is visible from every subcommand, while
/// nothing bound below is visible above.
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    command: &'a Command,
    prompt: &'a dyn Prompt,
    pub(crate) values: Values,
    pub(crate) args: Vec<String>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        parent: Option<&'a Context<'a>>,
        command: &'a Command,
        prompt: &'a dyn Prompt,
    ) -> Context<'a> {
        Context { parent, command, prompt, values: Values::new(), args: Vec::new() }
    }

    /// Positional arguments of this level only.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    /// Values bound at this level, defaults included.
    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.chain().any(|it| it.values.contains_key(name))
    }

    /// Command path from the root, e.g. `git remote add`.
    pub fn name(&self) -> String {
        self.path().join(" ")
    }

    /// Per-user configuration directory of this command, e.g. `~/.config/git.remote`.
    ///
    /// The directory is not created.
    pub fn config_dir(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|it| it.join(self.path().join(".")))
    }

    /// Per-user cache directory of this command. The directory is not created.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        dirs::cache_dir().map(|it| it.join(self.path().join(".")))
    }

    pub fn write_help(&self, out: &mut dyn Write) -> Result<()> {
        help::write_help(self, out)?;
        Ok(())
    }

    fn chain(&self) -> impl Iterator<Item = &Context<'a>> {
        std::iter::successors(Some(self), |it| it.parent)
    }

    fn path(&self) -> Vec<&'a str> {
        let mut res = self.chain().map(|it| it.command.name()).collect::<Vec<_>>();
        res.reverse();
        res
    }

    fn lookup<T: FromValue>(&self, name: &str) -> Result<Option<T>> {
        let value = match self.chain().find_map(|it| it.values.get(name)) {
            Some(it) => it,
            None => return Ok(None),
        };
        match T::from_value(value) {
            Some(it) => Ok(Some(it)),
            None => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: T::KIND,
                found: value.kind(),
            }),
        }
    }

    fn or_prompt<T: FromValue>(&self, name: &str, secret: bool) -> Result<T> {
        if let Some(it) = self.lookup(name)? {
            return Ok(it);
        }
        let message = format!("{name}: ");
        if secret {
            prompt::read_password(self.prompt, &message)
        } else {
            prompt::read_input(self.prompt, &message)
        }
    }
}

macro_rules! accessors {
    ($($ty:ty, $fallback:ty => $get:ident, $or:ident, $or_input:ident, $or_password:ident;)*) => {
        impl Context<'_> {$(
            /// The value bound here or in a parent, or the zero value.
            pub fn $get(&self, name: &str) -> Result<$ty> {
                Ok(self.lookup(name)?.unwrap_or_default())
            }

            pub fn $or(&self, name: &str, fallback: $fallback) -> Result<$ty> {
                Ok(self.lookup(name)?.unwrap_or_else(|| fallback.into()))
            }

            /// Asks the user for a value nobody bound.
            pub fn $or_input(&self, name: &str) -> Result<$ty> {
                self.or_prompt(name, false)
            }

            /// Asks the user for a value nobody bound, without echoing it.
            pub fn $or_password(&self, name: &str) -> Result<$ty> {
                self.or_prompt(name, true)
            }
        )*}
    };
}

accessors! {
    bool, bool => bool, bool_or, bool_or_input, bool_or_password;
    String, &str => string, string_or, string_or_input, string_or_password;
    i32, i32 => int32, int32_or, int32_or_input, int32_or_password;
    i64, i64 => int64, int64_or, int64_or_input, int64_or_password;
    f32, f32 => float32, float32_or, float32_or_input, float32_or_password;
    f64, f64 => float64, float64_or, float64_or_input, float64_or_password;
}
