use argtree::{Command, Context, Opt, Result};
use expect_test::expect;

use crate::{check, trace};

fn report(ctx: &Context<'_>) -> Result<()> {
    trace(&format!("level={}", ctx.int64_or("level", -1)?));
    trace(&format!("depth={}", ctx.int32_or("depth", -1)?));
    trace(&format!("verbose={}", ctx.bool("verbose")?));
    trace(&format!("is_set(verbose)={}", ctx.is_set("verbose")));
    if let Some(parent) = ctx.parent() {
        trace(&format!("parent sees depth={}", parent.is_set("depth")));
        trace(&format!("parent args={:?}", parent.args()));
    }
    trace(&format!("args={:?}", ctx.args()));
    Ok(())
}

fn tree() -> Command {
    Command::new("prog")
        .option(Opt::bool("verbose").short('v'))
        .option(Opt::int64("level").default(0i64))
        .command(
            Command::new("child")
                .option(Opt::int32("depth").short('d').default(2))
                .command(Command::new("leaf").action(report))
                .action(report),
        )
        .action(report)
}

#[test]
fn values_flow_outward_only() {
    check(
        &tree(),
        "-v --level 3 child -d 5 leaf x",
        expect![[r#"
            level=3
            depth=5
            verbose=true
            is_set(verbose)=true
            parent sees depth=true
            parent args=[]
            args=["x"]
        "#]],
    );
    check(
        &tree(),
        "child -d 5",
        expect![[r#"
            level=-1
            depth=5
            verbose=false
            is_set(verbose)=false
            parent sees depth=false
            parent args=[]
            args=[]
        "#]],
    );
}

#[test]
fn zero_default_counts_as_unset() {
    check(
        &tree(),
        "",
        expect![[r#"
            level=-1
            depth=-1
            verbose=false
            is_set(verbose)=false
            args=[]
        "#]],
    );
    check(
        &tree(),
        "--level 0 a",
        expect![[r#"
            level=0
            depth=-1
            verbose=false
            is_set(verbose)=false
            args=["a"]
        "#]],
    );
}

#[test]
fn defaults_are_bound_per_level() {
    check(
        &tree(),
        "child",
        expect![[r#"
            level=-1
            depth=2
            verbose=false
            is_set(verbose)=false
            parent sees depth=false
            parent args=[]
            args=[]
        "#]],
    );
}

#[test]
fn type_mismatch_is_an_error() {
    let app = Command::new("prog").option(Opt::int64("n")).action(|ctx| {
        trace(&format!("{:?}", ctx.string("missing")?));
        trace(&format!("{}", ctx.int64("n")?));
        ctx.string("n")?;
        Ok(())
    });
    check(
        &app,
        "--n 4",
        expect![[r#"
            ""
            4
            error: `n` holds int64, expected string
        "#]],
    );
}

#[test]
fn short_only_option_is_keyed_by_letter() {
    let app = Command::new("prog").option(Opt::float32("").short('r')).action(|ctx| {
        trace(&format!("{}", ctx.float32("r")?));
        Ok(())
    });
    check(&app, "-r 1.5", expect![[r#"
        1.5
    "#]]);
}

#[test]
fn user_dirs_use_dotted_path() {
    let app = Command::new("prog").command(Command::new("remote").action(|ctx| {
        assert_eq!(ctx.name(), "prog remote");
        if let Some(dir) = ctx.config_dir() {
            assert!(dir.ends_with("prog.remote"));
        }
        if let Some(dir) = ctx.cache_dir() {
            assert!(dir.ends_with("prog.remote"));
        }
        trace("ok");
        Ok(())
    }));
    check(&app, "remote", expect![[r#"
        ok
    "#]]);
}

#[test]
fn or_lookups_leave_is_set_alone() {
    let app = Command::new("prog").option(Opt::int64("level")).command(
        Command::new("child").option(Opt::string("mode")).action(|ctx| {
            trace(&format!("level={} set={}", ctx.int64_or("level", 9)?, ctx.is_set("level")));
            trace(&format!("mode={} set={}", ctx.string_or("mode", "fast")?, ctx.is_set("mode")));
            trace(&format!("after: level={} mode={}", ctx.is_set("level"), ctx.is_set("mode")));
            Ok(())
        }),
    );
    check(
        &app,
        "--level 3 child",
        expect![[r#"
            level=3 set=true
            mode=fast set=false
            after: level=true mode=false
        "#]],
    );
    check(
        &app,
        "child --mode slow",
        expect![[r#"
            level=9 set=false
            mode=slow set=true
            after: level=false mode=true
        "#]],
    );
}
