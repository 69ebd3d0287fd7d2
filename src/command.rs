use std::{
    fmt,
    io::{self, Write},
};

use crate::{
    token::{tokenize, unknown_option, Keywords, Token},
    Context, Error, Opt, Prompt, Result, Terminal,
};

const HELP: &str = "help";
const VERSION: &str = "version";

/// What a command does once its arguments are bound.
pub type Action = dyn Fn(&Context<'_>) -> Result<()>;

/// A node of the command tree.
///
/// The tree is assembled up front and only read while running, so one tree can
/// serve any number of [`Command::run`] calls.
pub struct Command {
    name: String,
    aliases: Vec<String>,
    args_usage: String,
    description: String,
    options: Vec<Opt>,
    commands: Vec<Command>,
    action: Option<Box<Action>>,
    version: Option<String>,
    copyright: Option<String>,
    no_help: bool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            aliases: Vec::new(),
            args_usage: String::new(),
            description: String::new(),
            options: Vec::new(),
            commands: Vec::new(),
            action: None,
            version: None,
            copyright: None,
            no_help: false,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Command {
        self.aliases.push(alias.into());
        self
    }

    /// Usage hint for positional arguments, e.g. `FILE...`.
    pub fn args_usage(mut self, args_usage: impl Into<String>) -> Command {
        self.args_usage = args_usage.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Command {
        self.description = description.into();
        self
    }

    pub fn option(mut self, opt: Opt) -> Command {
        self.options.push(opt);
        self
    }

    pub fn command(mut self, command: Command) -> Command {
        self.commands.push(command);
        self
    }

    pub fn action<F>(mut self, action: F) -> Command
    where
        F: Fn(&Context<'_>) -> Result<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Enables `-v, --version`, which prints `version` and stops.
    pub fn version(mut self, version: impl Into<String>) -> Command {
        self.version = Some(version.into());
        self
    }

    pub fn copyright(mut self, copyright: impl Into<String>) -> Command {
        self.copyright = Some(copyright.into());
        self
    }

    /// Disables the automatic `-h, --help`.
    pub fn no_help(mut self) -> Command {
        self.no_help = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
    pub fn options(&self) -> &[Opt] {
        &self.options
    }
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
    pub fn get_args_usage(&self) -> &str {
        &self.args_usage
    }
    pub fn get_description(&self) -> &str {
        &self.description
    }
    pub fn get_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    pub fn get_copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Parses `args` and runs the selected command, printing to stdout and
    /// prompting on the terminal.
    ///
    /// `args[0]` is the program name. `default_action` runs for a command that
    /// has no action of its own, typically [`show_help`].
    pub fn run<I>(
        &self,
        args: I,
        default_action: Option<&dyn Fn(&Context<'_>) -> Result<()>>,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        self.run_with(&args, default_action, &mut io::stdout(), &Terminal)
    }

    pub fn run_with(
        &self,
        args: &[String],
        default_action: Option<&dyn Fn(&Context<'_>) -> Result<()>>,
        out: &mut dyn Write,
        prompt: &dyn Prompt,
    ) -> Result<()> {
        self.activate(None, args, default_action, out, prompt)
    }

    fn activate<'a>(
        &'a self,
        parent: Option<&'a Context<'a>>,
        args: &'a [String],
        default_action: Option<&dyn Fn(&Context<'_>) -> Result<()>>,
        out: &mut dyn Write,
        prompt: &'a dyn Prompt,
    ) -> Result<()> {
        let args = args.get(1..).unwrap_or_default();
        log::debug!("activating `{}` with {} argument(s)", self.name, args.len());

        let builtins = self.builtin_options();
        let options = || self.options.iter().chain(&builtins);

        let mut keywords = Keywords::new();
        for opt in options() {
            keywords.add_opt(opt);
        }
        for command in &self.commands {
            keywords.add_command(command);
        }

        let mut ctx = Context::new(parent, self, prompt);
        for opt in options() {
            opt.set_default(&mut ctx.values);
        }

        let (tokens, rest) = tokenize(&keywords, args);
        let mut subcommand = None;
        let mut i = 0;
        while let Some(&token) = tokens.get(i) {
            i += 1;
            match token {
                Token::Value { text, attached, escaped } => {
                    if !attached && !escaped {
                        if let Some(spelling) = unknown_option(&keywords, text) {
                            return Err(Error::UnknownKeyword(spelling));
                        }
                    }
                    ctx.args.push(text.to_string());
                }
                Token::Opt(opt) => {
                    i += opt.parse(&tokens[i..], &mut ctx.values)?;
                    if let Some(Token::Value { attached: true, .. }) = tokens.get(i) {
                        return Err(Error::UnexpectedValue(opt.to_string()));
                    }
                }
                Token::Command(command) => {
                    if let Some(arg) = ctx.args.first() {
                        return Err(Error::MisplacedPositional {
                            arg: arg.clone(),
                            command: command.name().to_string(),
                        });
                    }
                    subcommand = Some(command);
                    break;
                }
            }
        }

        // A declared option may have taken over the builtin's name.
        let requested = |name: &str| {
            builtins.iter().any(|it| it.name() == name) && ctx.values.contains_key(name)
        };
        if let Some(version) = &self.version {
            if requested(VERSION) {
                writeln!(out, "{version}")?;
                return Ok(());
            }
        }
        if requested(HELP) {
            return ctx.write_help(out);
        }

        if let Some(command) = subcommand {
            log::debug!("`{}` selected subcommand `{}`", self.name, command.name);
            return command.activate(Some(&ctx), rest, default_action, out, prompt);
        }

        match (&self.action, default_action) {
            (Some(action), _) => {
                log::debug!("running action of `{}`", self.name);
                action(&ctx)
            }
            (None, Some(default_action)) => {
                log::debug!("running default action for `{}`", self.name);
                default_action(&ctx)
            }
            (None, None) => {
                log::debug!("`{}` has no action", self.name);
                Ok(())
            }
        }
    }

    /// `--version` and `--help`, minus any spelling a declared option took.
    fn builtin_options(&self) -> Vec<Opt> {
        let taken = |spelling: &str| {
            self.options.iter().any(|it| it.keywords().iter().any(|kw| kw == spelling))
        };

        let mut res = Vec::new();
        let mut builtin = |enabled: bool, name: &str, short: char, description: &str| {
            if !enabled || taken(&format!("--{name}")) {
                return;
            }
            let mut opt = Opt::bool(name).description(description);
            if !taken(&format!("-{short}")) {
                opt = opt.short(short);
            }
            res.push(opt);
        };
        builtin(self.version.is_some(), VERSION, 'v', "show version");
        builtin(!self.no_help, HELP, 'h', "show help");
        res
    }

    /// Declared options followed by the automatic ones, in help order.
    pub(crate) fn all_options(&self) -> Vec<Opt> {
        let mut res = self.options.clone();
        res.extend(self.builtin_options());
        res
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("args_usage", &self.args_usage)
            .field("description", &self.description)
            .field("options", &self.options)
            .field("commands", &self.commands)
            .field("action", &self.action.is_some())
            .field("version", &self.version)
            .field("copyright", &self.copyright)
            .field("no_help", &self.no_help)
            .finish()
    }
}

/// Default action that prints help to stdout and fails with
/// [`Error::InvalidArguments`].
pub fn show_help(ctx: &Context<'_>) -> Result<()> {
    ctx.write_help(&mut io::stdout())?;
    Err(Error::InvalidArguments)
}
