use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repodoc::cli::CommandContext;
use repodoc::cli::commands::{self, generate::GenerateOptions};
use repodoc::cli::ui::Output;
use repodoc::docs::MarkdownView;
use repodoc::types::{RepoSource, RepoVisibility};

#[derive(Parser)]
#[command(name = "repodoc")]
#[command(
    version,
    about = "Generate documentation for repositories in a project workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the file tree an import would attach
    Tree {
        #[arg(long, help = "Repository URL or local path")]
        url: Option<String>,
        #[arg(long, default_value = "github", help = "Source: github, bitbucket, local")]
        source: RepoSource,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Create a project, import a repository and generate its documentation
    Generate {
        #[arg(long, short, help = "Project name")]
        project: String,
        #[arg(long, short, help = "Repository URL or local path")]
        url: String,
        #[arg(long, default_value = "public", help = "Visibility: public, private, local")]
        visibility: RepoVisibility,
        #[arg(long, default_value = "github", help = "Source: github, bitbucket, local")]
        source: RepoSource,
        #[arg(long, help = "File to document (default: first file in the tree)")]
        file: Option<String>,
        #[arg(long, short, help = "Directory to write the documentation to")]
        output: Option<PathBuf>,
        #[arg(long, help = "Documentation view: preview, raw")]
        view: Option<MarkdownView>,
        #[arg(long, help = "Seed for a reproducible pipeline run")]
        seed: Option<u64>,
        #[arg(long = "no-download", help = "Don't write the documentation file")]
        no_download: bool,
        #[arg(long, help = "Print only the first 500 characters")]
        excerpt: bool,
    },

    /// Render a Markdown file
    Render {
        #[arg(help = "Markdown file")]
        file: PathBuf,
        #[arg(long, default_value = "preview", help = "View: preview, raw")]
        view: MarkdownView,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mrepodoc encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<repodoc::DocError>() {
                Some(err) => Output::new().notify(err),
                None => eprintln!("\x1b[31mError:\x1b[0m {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Tree {
            url,
            source,
            format,
        } => {
            let ctx = CommandContext::load(cli.quiet)?;
            commands::tree::run(&ctx, url.as_deref(), source, &format)?;
        }
        Commands::Generate {
            project,
            url,
            visibility,
            source,
            file,
            output,
            view,
            seed,
            no_download,
            excerpt,
        } => {
            let ctx = CommandContext::load(cli.quiet)?;
            let rt = Runtime::new()?;
            rt.block_on(commands::generate::run(
                &ctx,
                GenerateOptions {
                    project,
                    url,
                    visibility,
                    source,
                    file,
                    output,
                    view,
                    seed,
                    download: !no_download,
                    excerpt,
                },
            ))?;
        }
        Commands::Render { file, view } => {
            commands::render::run(&file, view)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                let ctx = CommandContext::load(cli.quiet)?;
                commands::config::show(&ctx, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(&Output::new().quiet(cli.quiet), global, force)?;
            }
        },
    }

    Ok(())
}
