use std::io::{self, Write};

use crate::Context;

/// Rows of `marker left right`, with the left column padded to a common width.
#[derive(Debug, Default)]
pub(crate) struct Table {
    rows: Vec<(String, String, String)>,
}

impl Table {
    pub(crate) fn add(&mut self, marker: &str, left: &str, right: &str) {
        self.rows.push((marker.to_string(), left.to_string(), right.to_string()))
    }

    pub(crate) fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        let width = self.rows.iter().map(|(_, left, _)| left.chars().count()).max().unwrap_or(0);
        for (marker, left, right) in &self.rows {
            let line = format!("{marker} {left:<width$}  {right}");
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

pub(crate) fn write_help(ctx: &Context<'_>, out: &mut dyn Write) -> io::Result<()> {
    let command = ctx.command();
    let path = ctx.name();
    let options = command.all_options();

    writeln!(out, "NAME:")?;
    if command.get_description().is_empty() {
        writeln!(out, "  {path}")?;
    } else {
        writeln!(out, "  {path} - {}", command.get_description())?;
    }

    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    let mut usage = path;
    if !options.is_empty() {
        usage.push_str(" [OPTIONS]");
    }
    if !command.commands().is_empty() {
        usage.push_str(" COMMAND");
    } else if !command.get_args_usage().is_empty() {
        usage.push(' ');
        usage.push_str(command.get_args_usage());
    }
    writeln!(out, "  {usage}")?;

    if !command.commands().is_empty() {
        writeln!(out)?;
        writeln!(out, "COMMANDS:")?;
        let mut table = Table::default();
        for sub in command.commands() {
            let mut names = vec![sub.name()];
            names.extend(sub.aliases().iter().map(String::as_str));
            table.add(" ", &names.join(", "), sub.get_description());
        }
        table.write(out)?;
    }

    if !options.is_empty() {
        writeln!(out)?;
        writeln!(out, "OPTIONS:")?;
        let mut table = Table::default();
        for opt in &options {
            let (usage, description) = opt.help();
            table.add(" ", &usage, &description);
        }
        table.write(out)?;
    }

    if let Some(copyright) = command.get_copyright() {
        writeln!(out)?;
        writeln!(out, "COPYRIGHT:")?;
        writeln!(out, "  {copyright}")?;
    }

    if let Some(version) = command.get_version() {
        writeln!(out)?;
        writeln!(out, "VERSION:")?;
        writeln!(out, "  {version}")?;
    }

    Ok(())
}
