use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tiebafetch_core::{ExtractConfig, FetchConfig, OutputFormat, Tieba, render_listing, render_topic};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dump Baidu Tieba threads and thread listings as text or JSON
#[derive(Parser, Debug)]
#[command(name = "tiebafetch")]
#[command(author = "tiebafetch contributors")]
#[command(version = VERSION)]
#[command(about = "Dump Baidu Tieba threads and thread listings", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output file (default: stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,

    /// Pretty print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Root of the mobile site
    #[arg(long, global = true, hide = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a whole topic with its split posts and reply threads
    Topic {
        /// Topic id (the `kz` parameter)
        #[arg(value_name = "KZ")]
        kz: u64,

        /// Emit original image URLs instead of resized ones
        #[arg(short, long)]
        imgsrc: bool,
    },
    /// Fetch pages START..=END of a forum's thread listing
    List {
        /// Forum name
        #[arg(value_name = "FORUM")]
        forum: String,

        /// First listing page
        #[arg(value_name = "START")]
        start: u32,

        /// Last listing page (inclusive)
        #[arg(value_name = "END")]
        end: u32,

        /// Only list showcase threads
        #[arg(short, long)]
        dist: bool,
    },
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn write_output(output: &str, path: Option<&PathBuf>, quiet: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            if !quiet {
                echo::print_success(&format!(
                    "Output written to {} ({})",
                    path.display().bright_white(),
                    echo::format_size(output.len())
                ));
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let mut fetch_config = FetchConfig { timeout: args.timeout, ..Default::default() };
    if let Some(user_agent) = args.user_agent {
        fetch_config.user_agent = user_agent;
    }
    if let Some(base_url) = args.base_url {
        fetch_config.base_url = base_url;
    }

    let mut output = match args.command {
        Command::Topic { kz, imgsrc } => {
            let config = ExtractConfig { preserve_original_image_url: imgsrc };
            let tieba = Tieba::http(fetch_config, config).context("Failed to build HTTP client")?;
            let topic = tieba
                .fetch_topic(kz)
                .await
                .with_context(|| format!("Failed to fetch topic {}", kz))?;

            if !args.quiet {
                echo::print_info(&format!("{} ({} floors)", topic.title, topic.posts.len()));
            }
            render_topic(&topic, args.format, args.pretty).context("Failed to render topic")?
        }
        Command::List { forum, start, end, dist } => {
            let tieba = Tieba::http(fetch_config, ExtractConfig::default()).context("Failed to build HTTP client")?;
            let threads = tieba
                .fetch_listing(&forum, start, end, dist)
                .await
                .with_context(|| format!("Failed to fetch listing of {}", forum))?;

            if !args.quiet {
                echo::print_info(&format!("{}: {} threads", forum, threads.len()));
            }
            render_listing(&threads, args.format, args.pretty).context("Failed to render listing")?
        }
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }

    write_output(&output, args.output.as_ref(), args.quiet)
}
