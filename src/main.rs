use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pathmatch::{Captures, Cursor, MatchOptions, Router, RouterConfig, Template, compile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile templates and print their canonical form
    Check {
        #[arg(value_name = "TEMPLATE", required = true)]
        templates: Vec<String>,
    },
    /// Match a path against a single template
    Match {
        #[command(flatten)]
        options: OptionArgs,
        template: String,
        path: String,
    },
    /// Consume a path by applying templates one after another
    Walk {
        #[command(flatten)]
        options: OptionArgs,
        path: String,
        #[arg(value_name = "TEMPLATE", required = true)]
        templates: Vec<String>,
    },
    /// Look paths up in a route table
    Route {
        /// TOML route table
        #[arg(short, long, value_name = "FILE")]
        routes: PathBuf,
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct OptionArgs {
    /// Compare literals ignoring ASCII case
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Keep the first value of a repeated variable
    #[arg(long)]
    keep_first: bool,
}

impl From<&OptionArgs> for MatchOptions {
    fn from(args: &OptionArgs) -> Self {
        Self {
            case_insensitive: args.case_insensitive,
            keep_first_variable: args.keep_first,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pathmatch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let matched = match cli.command {
        Command::Check { templates } => check(&templates),
        Command::Match {
            options,
            template,
            path,
        } => match_one(&template, &path, (&options).into())?,
        Command::Walk {
            options,
            path,
            templates,
        } => walk(&path, &templates, (&options).into())?,
        Command::Route { routes, paths } => route(&routes, &paths)?,
    };
    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn format_captures(captures: &Captures) -> String {
    captures
        .iter()
        .sorted()
        .map(|(name, value)| format!("{name}={value}"))
        .join(" ")
}

fn parse_template(source: &str) -> Result<Template> {
    compile(source).with_context(|| format!("invalid template '{source}'"))
}

fn check(templates: &[String]) -> bool {
    let mut all_ok = true;
    for source in templates {
        match compile(source) {
            Ok(template) => println!("{source}: {template}"),
            Err(err) => {
                println!("{source}: error: {err}");
                all_ok = false;
            }
        }
    }
    all_ok
}

fn match_one(template: &str, path: &str, options: MatchOptions) -> Result<bool> {
    let template = parse_template(template)?;
    match template.match_path(path, &options)? {
        Some(captures) => {
            println!("matched {}", format_captures(&captures));
            Ok(true)
        }
        None => {
            println!("no match");
            Ok(false)
        }
    }
}

fn walk(path: &str, templates: &[String], options: MatchOptions) -> Result<bool> {
    let templates = templates
        .iter()
        .map(|source| parse_template(source))
        .collect::<Result<Vec<_>>>()?;
    let mut cursor = Cursor::with_options(path, options);
    for template in &templates {
        match cursor.step(template)? {
            Some(captures) => println!(
                "{template}: {} (remaining '{}')",
                format_captures(&captures),
                cursor.remaining()
            ),
            None => {
                println!("{template}: no match at '{}'", cursor.remaining());
                return Ok(false);
            }
        }
    }
    println!(
        "depth {}, complete {}: {}",
        cursor.depth(),
        cursor.is_complete(),
        format_captures(&cursor.variables())
    );
    Ok(true)
}

fn route(routes: &Path, paths: &[String]) -> Result<bool> {
    let config = RouterConfig::load(routes)
        .with_context(|| format!("failed to load route table {}", routes.display()))?;
    let router = Router::from_config(&config)
        .with_context(|| format!("invalid route table {}", routes.display()))?;
    let mut all_matched = true;
    for path in paths {
        match router.lookup(path)? {
            Some(m) => println!("{path}: {} {}", m.route.name, format_captures(&m.captures)),
            None => {
                println!("{path}: no route");
                all_matched = false;
            }
        }
    }
    Ok(all_matched)
}
