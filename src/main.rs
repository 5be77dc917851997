use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use overtake::{
    config::AppConfig,
    countries::CountryDirectory,
    report::{render_text, NumberLocale},
    scenario::{Contender, ScenarioLoader},
    web::{self, WebServerConfig},
    Comparator,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Population growth race: when does the smaller country catch up?")]
struct Cli {
    /// Path to a YAML application config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the number-format locale (pt-BR or en-US)
    #[arg(long, global = true)]
    locale: Option<NumberLocale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one comparison and print the outcome
    Run(RunArgs),
    /// Serve the comparison page
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Scenario YAML file; cannot be combined with the per-country flags below
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long, default_value = "br", conflicts_with = "scenario")]
    a_country: String,
    #[arg(long, default_value_t = 1000.0, conflicts_with = "scenario")]
    a_population: f64,
    /// Growth rate of A in percent per period
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        conflicts_with = "scenario"
    )]
    a_rate: f64,

    #[arg(long, default_value = "ar", conflicts_with = "scenario")]
    b_country: String,
    #[arg(long, default_value_t = 2000.0, conflicts_with = "scenario")]
    b_population: f64,
    /// Growth rate of B in percent per period
    #[arg(
        long,
        default_value_t = 2.0,
        allow_negative_numbers = true,
        conflicts_with = "scenario"
    )]
    b_rate: f64,

    /// Override the iteration cap
    #[arg(long)]
    max_periods: Option<u32>,

    /// Print the full result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.display.locale = locale;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let source = config.countries.source();
    let directory = CountryDirectory::from_source(source.as_ref())?;

    match cli.command {
        Command::Run(args) => run_once(&config, directory, args),
        Command::Serve(args) => serve(config, directory, args),
    }
}

fn run_once(config: &AppConfig, directory: CountryDirectory, args: RunArgs) -> Result<()> {
    let (contender, incumbent, scenario_periods) = match &args.scenario {
        Some(path) => {
            let scenario = ScenarioLoader::new(".").load(path)?;
            log::info!("loaded scenario '{}'", scenario.name);
            let periods = scenario.max_periods(args.max_periods);
            (scenario.contender, scenario.incumbent, Some(periods))
        }
        None => (
            Contender {
                country: args.a_country,
                population: args.a_population,
                growth_rate_percent: args.a_rate,
            },
            Contender {
                country: args.b_country,
                population: args.b_population,
                growth_rate_percent: args.b_rate,
            },
            args.max_periods,
        ),
    };
    let max_periods = scenario_periods.unwrap_or(config.simulation.max_periods);

    let comparator = Comparator::new(directory, config.display.locale, max_periods);
    let comparison = comparator
        .compare(&contender, &incumbent)
        .context("comparison rejected")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", render_text(&comparison.report));
    }
    Ok(())
}

fn serve(config: AppConfig, directory: CountryDirectory, args: ServeArgs) -> Result<()> {
    let comparator = Comparator::new(
        directory,
        config.display.locale,
        config.simulation.max_periods,
    );
    let server = WebServerConfig {
        comparator,
        host: args.host.unwrap_or(config.server.host),
        port: args.port.unwrap_or(config.server.port),
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(web::run(server))
}
