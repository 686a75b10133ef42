use std::io::{Write, stdin, stdout};

use clap::{ArgAction, Parser};
use expreval::{Config, display::TreeConvert, eval, selftest};
use miette::{IntoDiagnostic, WrapErr, miette};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds an abstract syntax tree for an arithmetic expression of single
/// digits, `+ - * /` and parentheses, then evaluates it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run the built-in self-test table first
    #[arg(short, long)]
    test: bool,

    /// Print debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,

    /// Expression to evaluate; prompted for on stdin when omitted
    expression: Option<String>,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    setup_logging(args.debug);

    let config = Config::default();

    if args.test {
        println!("=================== EXECUTING TESTS ===================");
        let report = selftest::run(&config);
        println!("{report}");
        println!("===================== TESTS DONE ======================");
        println!();
        if !report.all_passed() {
            return Err(miette!(
                "{} of {} self-tests failed",
                report.failed(),
                report.outcomes.len()
            ));
        }
    }

    println!("========== EVALUATE USER ENTERED EXPRESSION ==========");
    let expression = match args.expression {
        Some(expression) => expression,
        None => match prompt("Enter mathematical expression to evaluate : ")? {
            Some(expression) => expression,
            None => return Ok(()),
        },
    };
    println!("Entered expression                        : {expression}");

    let tree = match expreval::compile(&expression, &config) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            eprintln!("Invalid expression.. please check your input");
            std::process::exit(65);
        }
    };

    println!("AST tree :");
    println!("{}", tree.to_tree_string());
    println!(
        "Evaluated expression value                : {}",
        eval::evaluate(&tree)
    );
    Ok(())
}

/// Reads one line from stdin. `None` when stdin is already closed.
fn prompt(message: &str) -> miette::Result<Option<String>> {
    let mut out = stdout();
    write!(out, "{message}").into_diagnostic()?;
    out.flush().into_diagnostic()?;

    let mut input = String::new();
    let read = stdin()
        .read_line(&mut input)
        .into_diagnostic()
        .wrap_err("reading the expression from stdin failed")?;
    if read == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!(?filter, "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from(["expreval", "-t", "-dd", "1+2"]).unwrap();
        assert!(args.test);
        assert_eq!(args.debug, 2);
        assert_eq!(args.expression.as_deref(), Some("1+2"));
    }
}
