use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use nbsplit::{
    ColorMode, SplitLevel, Workflow,
    config::Config,
    discovery::discover_notebooks,
    notebook::{generate_outline, load_notebook, validate_notebook_path},
    preview::{PreviewOptions, render_preview},
    prompt,
    workflow::render_workflow_graph,
};

#[derive(Parser)]
#[command(name = "nbsplit", version)]
#[command(about = "Split Jupyter notebooks into one notebook per markdown section", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a notebook into one notebook per section
    Split(SplitArgs),
    /// Show the heading structure and where a split would cut
    Preview {
        input: PathBuf,
        /// Deepest heading level that starts a new notebook (1-6)
        #[arg(short, long)]
        level: Option<SplitLevel>,
        #[arg(long, value_enum, default_value_t)]
        color: ColorMode,
    },
    /// List notebooks under a directory
    List {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Print the split workflow graph
    Workflow,
    /// Show the configuration, or write the default config file
    Config {
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct SplitArgs {
    /// Notebook to split; picked interactively when omitted
    input: Option<PathBuf>,
    /// Deepest heading level that starts a new notebook (1-6)
    #[arg(short, long)]
    level: Option<SplitLevel>,
    /// Directory for the split notebooks
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Skip the preview and confirmation
    #[arg(short, long)]
    yes: bool,
    #[arg(long, value_enum, default_value_t)]
    color: ColorMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config: {err}");
        Config::default()
    });

    match cli.command {
        Commands::Split(args) => cmd_split(args, &config).await,
        Commands::Preview {
            input,
            level,
            color,
        } => cmd_preview(&input, level.unwrap_or_else(|| config.split_level()), color).await,
        Commands::List { dir } => cmd_list(&dir),
        Commands::Workflow => {
            print!("{}", render_workflow_graph());
            Ok(())
        }
        Commands::Config { init } => cmd_config(&config, init),
    }
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(io::stderr)
        .init();
}

/// `RUST_LOG` when it parses, otherwise the level picked by `-v`
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

async fn cmd_split(args: SplitArgs, config: &Config) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    let notebook_path = match args.input {
        Some(path) => path,
        None => {
            println!("Finding notebooks...");
            let entries = discover_notebooks(Path::new("."));
            if entries.is_empty() {
                bail!("No notebooks found.");
            }
            prompt::select_notebook(&entries, &mut input, &mut output)?
                .context("No notebook selected.")?
        }
    };
    validate_notebook_path(&notebook_path)?;

    let level = match args.level {
        Some(level) => level,
        None if interactive && !args.yes => {
            prompt::select_split_level(config.split_level(), &mut input, &mut output)?
        }
        None => config.split_level(),
    };

    if !args.yes {
        print_preview(&notebook_path, level, args.color).await?;
        let question = format!("\nProceed with {level} split?");
        if !prompt::confirm(&question, &mut input, &mut output)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let output_dir = match args.output {
        Some(dir) => dir,
        None if interactive && !args.yes => {
            prompt::output_dir(&config.output_dir, &mut input, &mut output)?
        }
        None => config.output_dir.clone(),
    };

    println!("\nStarting split...");
    println!("Input: {}", notebook_path.display());
    println!("Level: {level}");
    println!("Output: {}", output_dir.display());
    println!("{}", "-".repeat(30));

    let report = Workflow::new(&notebook_path, &output_dir, level)
        .with_options(config.materialize_options())
        .run()
        .await
        .context("Failed")?;

    println!("\nSuccess! {} notebooks:", report.count());
    for path in &report.created {
        println!("  - {}", path.display());
    }
    println!("\nSaved in: {}", report.output_dir.display());
    Ok(())
}

async fn cmd_preview(input: &Path, level: SplitLevel, color: ColorMode) -> Result<()> {
    validate_notebook_path(input)?;
    print_preview(input, level, color).await
}

async fn print_preview(input: &Path, level: SplitLevel, color: ColorMode) -> Result<()> {
    let notebook = load_notebook(input).await?;
    let outline = generate_outline(&notebook)?;
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let preview = render_preview(&name, &outline, level, &PreviewOptions::for_mode(color))?;
    print!("\n{preview}");
    Ok(())
}

fn cmd_list(dir: &Path) -> Result<()> {
    let entries = discover_notebooks(dir);
    if entries.is_empty() {
        println!("No notebooks found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.path.display());
        println!("     {} | {}", entry.size_label(), entry.modified_label());
    }
    Ok(())
}

fn cmd_config(config: &Config, init: bool) -> Result<()> {
    if init {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => bail!("No config directory available on this platform"),
        }
        return Ok(());
    }

    match Config::get_config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory available"),
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
