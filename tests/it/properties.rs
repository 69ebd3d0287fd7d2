//! Properties of binding that must hold for any input.

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use argtree::{Command, Error, Keyword, Keywords, Opt, Value, Values};
use proptest::prelude::*;

use crate::NoTerminal;

/// What an action saw at its own level.
type Seen = Rc<RefCell<Option<(Values, Vec<String>)>>>;

/// Runs `app` on `args` and returns what the selected action saw.
fn bind(
    app: impl FnOnce(Seen) -> Command,
    args: &[&str],
) -> argtree::Result<(Values, Vec<String>)> {
    let seen = Seen::default();
    let app = app(seen.clone());
    let args =
        std::iter::once("prog").chain(args.iter().copied()).map(String::from).collect::<Vec<_>>();
    app.run_with(&args, None, &mut Vec::<u8>::new(), &NoTerminal)?;
    let res = seen.borrow_mut().take().unwrap_or_default();
    Ok(res)
}

fn typed(opt: Opt) -> impl FnOnce(Seen) -> Command {
    move |seen| {
        Command::new("prog").option(opt).action(move |ctx| {
            *seen.borrow_mut() = Some((ctx.values().clone(), ctx.args().to_vec()));
            Ok(())
        })
    }
}

fn clusters() -> impl FnOnce(Seen) -> Command {
    |seen| {
        Command::new("prog")
            .option(Opt::bool("alpha").short('a'))
            .option(Opt::bool("bravo").short('b'))
            .option(Opt::bool("charlie").short('c'))
            .action(move |ctx| {
                *seen.borrow_mut() = Some((ctx.values().clone(), ctx.args().to_vec()));
                Ok(())
            })
    }
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./ ]{0,12}"
}

proptest! {
    #[test]
    fn attached_and_separate_values_agree(value in text()) {
        let attached = bind(typed(Opt::string("name")), &[&format!("--name={value}")]).unwrap();
        let separate = bind(typed(Opt::string("name")), &["--name", &value]).unwrap();
        prop_assert_eq!(&attached, &separate);
        prop_assert_eq!(attached.0.get("name"), Some(&Value::from(value.clone())));
    }

    #[test]
    fn numbers_bind_either_way(int in any::<i32>(), float in -1e9f64..1e9) {
        let int = int.to_string();
        let a = bind(typed(Opt::int32("n")), &[&format!("--n={int}")]).unwrap();
        let b = bind(typed(Opt::int32("n")), &["--n", &int]).unwrap();
        prop_assert_eq!(a, b);

        let float = float.to_string();
        let a = bind(typed(Opt::float64("x").short('x')), &[&format!("--x={float}")]).unwrap();
        let b = bind(typed(Opt::float64("x").short('x')), &["-x", &float]).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.0["x"].to_string(), float);
    }

    #[test]
    fn clusters_are_all_or_nothing(
        letters in prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'x', 'y']), 1..6),
    ) {
        let arg = format!("-{}", letters.iter().collect::<String>());
        let declared = letters.iter().filter(|it| "abc".contains(**it)).count();
        let res = bind(clusters(), &[&arg]);

        if declared == letters.len() {
            let (values, args) = res.unwrap();
            prop_assert!(args.is_empty());
            prop_assert_eq!(values.len(), letters.iter().collect::<HashSet<_>>().len());
        } else if declared > 0 {
            let (values, args) = res.unwrap();
            prop_assert!(values.is_empty());
            prop_assert_eq!(args, vec![arg]);
        } else {
            match res {
                Err(Error::UnknownKeyword(spelling)) => {
                    prop_assert_eq!(spelling, format!("-{}", letters[0]))
                }
                other => prop_assert!(false, "expected unknown option, got {:?}", other),
            }
        }
    }

    #[test]
    fn values_are_visible_downwards_only(name in "[a-z]{1,8}", depth in 1..100i32) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let app = Command::new("prog")
            .option(Opt::string("name"))
            .command(Command::new("child").option(Opt::int32("depth")).action(move |ctx| {
                let parent = ctx.parent().map(|it| it.is_set("depth"));
                log.borrow_mut().push((ctx.string("name")?, ctx.int32("depth")?, parent));
                Ok(())
            }));
        let depth_text = depth.to_string();
        let args = ["prog", "--name", name.as_str(), "child", "--depth", depth_text.as_str()]
            .map(String::from);
        app.run_with(&args, None, &mut Vec::<u8>::new(), &NoTerminal).unwrap();
        prop_assert_eq!(seen.borrow().clone(), vec![(name, depth, Some(false))]);
    }

    #[test]
    fn named_options_have_keywords(
        name in "[a-z]{0,6}",
        short in prop::option::of(prop::char::range('a', 'z')),
    ) {
        let mut opt = Opt::int64(name.clone());
        if let Some(letter) = short {
            opt = opt.short(letter);
        }
        prop_assert_eq!(opt.keywords().is_empty(), name.is_empty() && short.is_none());
    }

    #[test]
    fn help_usage_names_every_keyword(
        name in "[a-z]{1,6}",
        short in prop::option::of(prop::char::range('a', 'z')),
    ) {
        let mut opt = Opt::string(name);
        if let Some(letter) = short {
            opt = opt.short(letter);
        }
        let mut keywords = Keywords::new();
        keywords.add_opt(&opt);

        let (usage, _) = opt.help();
        for spelling in usage.split(['=', ',']).filter(|it| it.starts_with('-')) {
            prop_assert!(matches!(keywords.get(spelling), Some(Keyword::Opt(it)) if it == &opt));
        }
        for spelling in opt.keywords() {
            prop_assert!(usage.contains(&spelling));
        }
    }
}
