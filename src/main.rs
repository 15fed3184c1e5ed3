//! panelmark - comment markup sanitizer

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use panelmark::{
    AllowList, EditorConfig, Limits, TextStats, decode_text, enforce, html_to_plain_text,
    render_comment, sanitize,
};

#[derive(Parser)]
#[command(name = "panelmark")]
#[command(version, about = "Comment markup sanitizer", long_about = None)]
#[command(after_help = "EXAMPLES:
    panelmark sanitize comment.html            Sanitize with the comment vocabulary
    panelmark sanitize --variant base -        Sanitize stdin with the base vocabulary
    panelmark render comment.html              Sanitize and render spoilers
    panelmark clip --max-chars 500 draft.html  Apply editor limits")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Editor configuration (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log pipeline decisions (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Sanitize markup against the allow-list
    Sanitize(InputArgs),
    /// Sanitize markup and convert ||spoiler|| markers
    Render(InputArgs),
    /// Print the plain-text projection and its counts
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Print counts as JSON instead of the text
        #[arg(long)]
        json: bool,
    },
    /// Sanitize, then clip to character and line limits
    Clip {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_name = "N")]
        max_chars: Option<usize>,

        #[arg(long, value_name = "N")]
        max_lines: Option<usize>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file, or - for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Allow-list variant (overrides the config file)
    #[arg(long, value_enum)]
    variant: Option<Variant>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Base,
    Extended,
}

impl From<Variant> for AllowList {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Base => AllowList::Base,
            Variant::Extended => AllowList::Extended,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let default = match (quiet, verbose) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "panelmark=debug",
        (false, _) => "panelmark=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> panelmark::Result<()> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)?,
        None => EditorConfig::default(),
    };

    match &cli.command {
        Command::Sanitize(input) => {
            let html = read_input(input, &mut config)?;
            println!("{}", sanitize(&html, &config.policy()));
        }
        Command::Render(input) => {
            let html = read_input(input, &mut config)?;
            println!("{}", render_comment(&html, &config));
        }
        Command::Text { input, json } => {
            let html = read_input(input, &mut config)?;
            let text = html_to_plain_text(&sanitize(&html, &config.policy()));
            if *json {
                let stats = TextStats::of_text(&text);
                let out = serde_json::json!({ "chars": stats.chars, "lines": stats.lines });
                println!("{out}");
            } else {
                println!("{text}");
            }
        }
        Command::Clip {
            input,
            max_chars,
            max_lines,
        } => {
            let html = read_input(input, &mut config)?;
            let limits = Limits::new(
                max_chars.or(config.limits.max_chars),
                max_lines.or(config.limits.max_lines),
            );
            let enforced = enforce(&sanitize(&html, &config.policy()), &limits);
            if enforced.truncated {
                tracing::info!(
                    chars = enforced.stats.chars,
                    lines = enforced.stats.lines,
                    "content clipped"
                );
            }
            println!("{}", enforced.html);
        }
    }

    Ok(())
}

fn read_input(args: &InputArgs, config: &mut EditorConfig) -> panelmark::Result<String> {
    if let Some(variant) = args.variant {
        config.allow_list = variant.into();
    }

    let bytes = if args.input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(&args.input)?
    };
    Ok(decode_text(&bytes).into_owned())
}
