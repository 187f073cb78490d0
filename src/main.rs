// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sales_analytics::logging::init_logging;
use sales_analytics::pipeline::print_banner;
use sales_analytics::{
    run_pipeline, AppConfig, FilterCriteria, FilterMode, HttpCatalog, PipelineOutcome,
    ProductCatalog, StaticCatalog,
};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "sales-analytics")]
#[command(about = "Validate, analyse and enrich a pipe-delimited sales log")]
#[command(version = sales_analytics::VERSION)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline (default)
    Run(RunArgs),
    /// Run the pipeline without prompting and browse the reports
    View(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Sales log to read
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the enriched records
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML config file (default: ./sales-analytics.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep only this region (exact match)
    #[arg(long)]
    region: Option<String>,

    /// Minimum line amount
    #[arg(long)]
    min_amount: Option<f64>,

    /// Maximum line amount
    #[arg(long)]
    max_amount: Option<f64>,

    /// Do not ask for filters interactively
    #[arg(long)]
    no_prompt: bool,

    /// Skip the product catalog fetch
    #[arg(long)]
    offline: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn has_filters(&self) -> bool {
        self.region.is_some() || self.min_amount.is_some() || self.max_amount.is_some()
    }

    fn filter_mode(&self, interactive: bool) -> FilterMode {
        if interactive && !self.no_prompt && !self.has_filters() {
            FilterMode::Interactive
        } else {
            FilterMode::Fixed(FilterCriteria::new(
                self.region.clone(),
                self.min_amount,
                self.max_amount,
            ))
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn catalog(&self, config: &AppConfig) -> Box<dyn ProductCatalog> {
        if self.offline {
            Box::new(StaticCatalog::empty())
        } else {
            Box::new(HttpCatalog::new(&config.catalog_url, config.catalog_timeout()))
        }
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => run(&args),
        Some(Commands::View(args)) => run_view(&args),
        None => run(&cli.run),
    }
}

fn execute(args: &RunArgs, config: &AppConfig, interactive: bool) -> Result<PipelineOutcome> {
    let catalog = args.catalog(config);

    print_banner();
    run_pipeline(config, args.filter_mode(interactive), catalog.as_ref())
}

fn run(args: &RunArgs) -> Result<()> {
    // Bad config is a startup error; anything after that is reported, not propagated
    let config = args.load_config()?;

    match execute(args, &config, true) {
        Ok(outcome) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
            }
        }
        Err(e) => {
            error!("pipeline failed: {:#}", e);
            println!("\nERROR: {:#}", e);
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_view(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;

    let outcome = match execute(args, &config, false) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("\nERROR: {:#}", e);
            return Ok(());
        }
    };

    let mut app = ui::App::new(outcome.summary, outcome.enriched);
    ui::run_ui(&mut app)?;

    println!("\n✅ Viewer closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_view(args: &RunArgs) -> Result<()> {
    let _ = args;
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
