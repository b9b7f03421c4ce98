mod builtin_templates;
mod config;
mod error;
mod minify;
mod pipeline;
mod render;
mod serve;
mod slides;
mod theme;
mod util;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;

use crate::error::{Error, Result};
use crate::pipeline::{BuildOptions, Pipeline};
use crate::theme::ThemeTable;

const VERSION: &str = env!("GIT_VERSION");

#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = VERSION)]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(subcommand_negates_reqs = true)]
struct Args {
    /// Slide data file (JSON)
    #[arg(required = true)]
    input: Option<PathBuf>,

    /// Output HTML file
    #[arg(required = true)]
    output: Option<PathBuf>,

    /// Theme name, e.g. "Dark Tech" (defaults to the settings file, then "Dark Tech")
    theme: Option<String>,

    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base template with {{TITLE}}, {{THEME_CLASS}} and {{SLIDES_HTML}} placeholders
    #[arg(short, long, global = true)]
    template: Option<PathBuf>,

    /// Minify the generated HTML
    #[arg(long, global = true)]
    minify: bool,

    /// Logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the presentation locally, re-rendering on every request
    Serve {
        /// Slide data file (JSON)
        input: PathBuf,

        /// Theme name
        theme: Option<String>,

        /// Port to serve on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Render, then re-render whenever the slides, settings or template change
    Watch {
        /// Slide data file (JSON)
        input: PathBuf,

        /// Output HTML file
        output: PathBuf,

        /// Theme name
        theme: Option<String>,

        /// Debounce delay in seconds
        #[arg(long, default_value = "1")]
        debounce: u64,
    },

    /// List available themes
    Themes,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        }
    }

    fn build_options(&self, theme: Option<String>) -> BuildOptions {
        BuildOptions {
            config: self.config.clone(),
            template: self.template.clone(),
            theme,
            minify: self.minify,
        }
    }
}

fn init_tracing(level: Level) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    #[cfg(distribute)]
    {
        fmt().json().with_env_filter(filter).init();
    }

    #[cfg(not(distribute))]
    {
        fmt().pretty().with_env_filter(filter).init();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.log_level());

    tracing::debug!(?args, "parsed arguments");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error generating presentation: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Built once and shared by reference for the life of the process
    let themes = ThemeTable::builtin()?;

    match &args.command {
        None => {
            let (Some(input), Some(output)) = (&args.input, &args.output) else {
                return Err(Error::Other("input and output paths are required".to_string()));
            };

            let options = args.build_options(args.theme.clone());
            let summary = pipeline::do_build(&themes, &options, input, output)?;

            tracing::info!(
                output = %summary.output.display(),
                theme = %summary.theme,
                slides = summary.slides,
                "generated presentation"
            );
        }
        Some(Command::Serve { input, theme, port }) => {
            let pipeline = Pipeline::load(&themes, &args.build_options(theme.clone()))?;
            serve::serve(&pipeline, input, *port)?;
        }
        Some(Command::Watch {
            input,
            output,
            theme,
            debounce,
        }) => {
            watch::watch(
                &themes,
                &args.build_options(theme.clone()),
                input,
                output,
                Duration::from_secs(*debounce),
            )?;
        }
        Some(Command::Themes) => {
            for (key, theme) in themes.iter() {
                println!("{:<12} {:<12} {}", key, theme.name, theme.class_name);
            }
        }
    }

    Ok(())
}
