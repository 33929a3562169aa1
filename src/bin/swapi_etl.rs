use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use swapi_etl::app::{App, CollectionSummary, RunOptions};
use swapi_etl::config::{ConfigLoader, ConfigOverrides};
use swapi_etl::error::EtlError;
use swapi_etl::ids::UuidGenerator;
use swapi_etl::output::{JsonOutput, LogSink, OutputMode, print_run_text};
use swapi_etl::store::{DocumentStore, FsDocumentStore};
use swapi_etl::swapi::SwapiHttpClient;

#[derive(Parser)]
#[command(name = "swapi-etl")]
#[command(about = "Load the Star Wars API into a document store as entities and relationship edges")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Extract, transform and load every SWAPI resource, replacing the store")]
    Run(RunArgs),
    #[command(about = "Show document counts of an existing store")]
    Collections(StoreArgs),
    #[command(about = "Remove every collection from the store")]
    Clear(StoreArgs),
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    database: Option<String>,

    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct StoreArgs {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    database: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<EtlError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &EtlError) -> u8 {
    match error {
        EtlError::ConfigRead(_) | EtlError::ConfigParse(_) => 2,
        EtlError::SwapiHttp(_)
        | EtlError::SwapiStatus { .. }
        | EtlError::SwapiDecode { .. }
        | EtlError::CountMismatch { .. } => 3,
        EtlError::UnresolvedReference { .. } | EtlError::DuplicateEdge { .. } => 4,
        EtlError::PartialInsert { .. } => 5,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    match cli.command {
        Commands::Run(args) => run_etl(args, output_mode),
        Commands::Collections(args) => run_collections(args, output_mode),
        Commands::Clear(args) => run_clear(args),
    }
}

fn run_etl(args: RunArgs, output_mode: OutputMode) -> miette::Result<()> {
    let config = ConfigLoader::resolve(
        args.config.as_deref(),
        ConfigOverrides {
            base_url: args.base_url,
            database: args.database,
        },
    )?;
    tracing::info!(base_url = %config.base_url, database = %config.database, "starting run");

    let client = SwapiHttpClient::new(&config.base_url, config.timeout)?;
    let store = FsDocumentStore::new(config.database);
    let app = App::new(client, store, UuidGenerator);
    let options = RunOptions {
        dry_run: args.dry_run,
    };

    match output_mode {
        OutputMode::Json => {
            let result = app.run(options, &JsonOutput)?;
            JsonOutput::print_run(&result).into_diagnostic()?;
        }
        OutputMode::Text => {
            let result = app.run(options, &LogSink)?;
            print_run_text(&result);
        }
    }
    Ok(())
}

fn open_store(args: StoreArgs) -> miette::Result<FsDocumentStore> {
    let config = ConfigLoader::resolve(
        args.config.as_deref(),
        ConfigOverrides {
            base_url: None,
            database: args.database,
        },
    )?;
    Ok(FsDocumentStore::new(config.database))
}

fn run_collections(args: StoreArgs, output_mode: OutputMode) -> miette::Result<()> {
    let store = open_store(args)?;
    let summaries = store
        .collections()?
        .into_iter()
        .map(|name| {
            let documents = store.count(&name)?;
            Ok(CollectionSummary { name, documents })
        })
        .collect::<Result<Vec<_>, EtlError>>()?;

    match output_mode {
        OutputMode::Json => JsonOutput::print_collections(&summaries).into_diagnostic()?,
        OutputMode::Text => {
            if summaries.is_empty() {
                println!("store at {} is empty", store.root());
            }
            for summary in &summaries {
                println!("{:>5} {}", summary.documents, summary.name);
            }
        }
    }
    Ok(())
}

fn run_clear(args: StoreArgs) -> miette::Result<()> {
    let store = open_store(args)?;
    store.drop_database()?;
    println!("cleared {}", store.root());
    Ok(())
}
