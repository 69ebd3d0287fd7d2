//! A small tool with nested commands.
//!
//! ```text
//! $ cargo run --example greet -- greet -n Ann -t 2
//! $ cargo run --example greet -- --help
//! $ RUST_LOG=argtree=debug cargo run --example greet -- remote add origin ./repo
//! ```
use argtree::{Command, Context, Opt, Result};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Command::new("greet-demo")
        .description("greets people and keeps a list of remotes")
        .version(env!("CARGO_PKG_VERSION"))
        .copyright("(c) the argtree developers")
        .option(Opt::bool("quiet").short('q').description("print less"))
        .command(
            Command::new("greet")
                .alias("g")
                .description("say hello")
                .option(Opt::string("name").short('n').description("who to greet"))
                .option(Opt::int32("times").short('t').default(1).description("repeat count"))
                .action(greet),
        )
        .command(
            Command::new("remote").description("manage remotes").command(
                Command::new("add")
                    .args_usage("NAME URL")
                    .description("add a remote")
                    .option(Opt::string("token").description("access token"))
                    .action(add_remote),
            ),
        );

    if let Err(err) = app.run(std::env::args(), Some(&argtree::show_help)) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn greet(ctx: &Context<'_>) -> Result<()> {
    let name = ctx.string_or_input("name")?;
    for _ in 0..ctx.int32("times")? {
        if ctx.bool("quiet")? {
            println!("{name}");
        } else {
            println!("Hello, {name}!");
        }
    }
    Ok(())
}

fn add_remote(ctx: &Context<'_>) -> Result<()> {
    let [name, url] = ctx.args() else {
        return argtree::show_help(ctx);
    };
    let token = ctx.string_or_password("token")?;
    log::info!("adding `{name}` -> {url} ({} byte token)", token.len());

    if let Some(dir) = ctx.config_dir() {
        println!("would store `{name}` under {}", dir.display());
    }
    Ok(())
}
