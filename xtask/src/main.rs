use std::time::Instant;

use xshell::{cmd, Shell};

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;
    let _toolchain = sh.push_env("RUSTUP_TOOLCHAIN", "stable");

    let tasks: [(&str, Task); 4] =
        [("BUILD", build), ("TEST", test), ("DEMO", demo), ("PUBLISH", publish)];
    for (name, task) in tasks {
        let _group = Group::start(name);
        task(&sh)?;
    }
    Ok(())
}

type Task = fn(&Shell) -> xshell::Result<()>;

fn build(sh: &Shell) -> xshell::Result<()> {
    cmd!(sh, "rustup toolchain install stable --no-self-update").run()?;
    cmd!(sh, "rustc --version").run()?;
    cmd!(sh, "cargo test --workspace --no-run").run()
}

fn test(sh: &Shell) -> xshell::Result<()> {
    cmd!(sh, "cargo test --workspace -- --nocapture").run()
}

/// The demo must print help and exit successfully.
fn demo(sh: &Shell) -> xshell::Result<()> {
    let help = cmd!(sh, "cargo run -q --example greet -- --help").read()?;
    assert!(help.starts_with("NAME:"), "unexpected demo output:\n{help}");
    Ok(())
}

/// Tags and publishes a version that has no tag yet, from `master` only.
fn publish(sh: &Shell) -> xshell::Result<()> {
    let branch = cmd!(sh, "git branch --show-current").read()?;
    if branch != "master" {
        return Ok(());
    }

    let pkgid = cmd!(sh, "cargo pkgid -p argtree").read()?;
    // `path+file:///...#argtree@0.1.0` or `file:///...#0.1.0`
    let tag = format!("v{}", pkgid.rsplit(['#', '@']).next().unwrap_or_default());
    if cmd!(sh, "git tag --list {tag}").read()?.trim() == tag {
        return Ok(());
    }

    cmd!(sh, "git tag {tag}").run()?;
    cmd!(sh, "cargo publish -p argtree").run()?;
    cmd!(sh, "git push --tags").run()
}

/// A collapsible log group for GitHub Actions, timed on close.
struct Group {
    name: &'static str,
    start: Instant,
}

impl Group {
    fn start(name: &'static str) -> Group {
        println!("::group::{name}");
        Group { name, start: Instant::now() }
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        eprintln!("{}: {:.2?}", self.name, self.start.elapsed());
        println!("::endgroup::");
    }
}
