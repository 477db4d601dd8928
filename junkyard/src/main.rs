use std::{env, path::PathBuf, process};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use junkyard_frontend::{error::AppError, pipeline};
use junkyard_inventory::{InventoryError, RunId};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error, Instrument};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

mod config;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("reading config {} failed: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Filter(#[from] InventoryError),
    #[error("could not resolve the {0} directory")]
    Initialization(&'static str),
    #[error("invalid log level: {0}")]
    LogLevel(#[from] tracing_subscriber::filter::ParseError),
    #[error("no log file found in {}", .0.display())]
    NoLogFile(PathBuf),
    #[error("reading log file failed: {0}")]
    ReadLog(#[from] std::io::Error),
    #[error("tracing error: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
}

#[tokio::main]
async fn main() {
    let args = cli().get_matches();

    let config_path = args
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(config::get_default_path);

    let config = config::load(config_path.as_deref());
    let level = match &config {
        Ok(config) => config.logging.level.clone(),
        Err(_) => config::DEFAULT_LOG_LEVEL.to_string(),
    };

    if let Err(err) = init_logging(&level) {
        eprintln!("junkyard: {}", err);
        process::exit(1);
    }

    let run_id = RunId::generate();
    let span = tracing::info_span!("run", run_id = %run_id);

    debug!(parent: &span, "starting application");

    let result = async {
        let config = config?;
        run(&args, config, &run_id).await
    }
    .instrument(span.clone())
    .await;

    match result {
        Ok(()) => debug!(parent: &span, "closing application"),
        Err(err) => {
            error!(parent: &span, "closing application with error: {}", err);
            eprintln!("junkyard: {}", err);
            process::exit(1);
        }
    }
}

fn cli() -> Command {
    Command::new("junkyard")
        .about("rm replacement that keeps deleted files in a junkyard until restored")
        .version(env!("CARGO_PKG_VERSION"))
        .args([
            // NOTE: arguments
            Arg::new("paths")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .num_args(0..)
                .help("files and directories to move into the junkyard"),
            // NOTE: options
            Arg::new("restore")
                .short('b')
                .long("restore")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["paths", "logs"])
                .help("choose deleted files in a tui and restore them"),
            Arg::new("logs")
                .long("logs")
                .action(ArgAction::SetTrue)
                .conflicts_with("paths")
                .help("print the most recent log file"),
            Arg::new("config")
                .long("config")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("path to an alternative config file"),
            // NOTE: accepted for rm compatibility and ignored
            Arg::new("interactive")
                .short('i')
                .action(ArgAction::SetTrue)
                .hide(true),
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .hide(true),
            Arg::new("force")
                .short('f')
                .long("force")
                .action(ArgAction::SetTrue)
                .hide(true),
            Arg::new("dir")
                .short('d')
                .long("dir")
                .action(ArgAction::SetTrue)
                .hide(true),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .hide(true),
            Arg::new("one-file-system")
                .long("one-file-system")
                .action(ArgAction::SetTrue)
                .hide(true),
        ])
}

async fn run(args: &ArgMatches, config: Config, run_id: &RunId) -> Result<(), Error> {
    if args.get_flag("logs") {
        return print_latest_log().await;
    }

    let settings = config.into_settings()?;
    if args.get_flag("restore") {
        junkyard_frontend::restore(&settings).await?;
    } else {
        let paths: Vec<PathBuf> = args
            .get_many::<PathBuf>("paths")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default();

        pipeline::put(&settings, run_id, &paths).await?;
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<(), Error> {
    let logfile = tracing_appender::rolling::daily(get_logging_path()?, "log");

    let filter = match env::var("JUNKYARD_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::try_new(level)?,
    };

    let stderr = env::var_os("DEBUG").map(|_| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(logfile),
        )
        .with(stderr)
        .try_init()?;

    Ok(())
}

fn get_logging_path() -> Result<PathBuf, Error> {
    if let Some(path) = env::var_os("LOGS_DIRECTORY") {
        return Ok(PathBuf::from(path));
    }

    match dirs::cache_dir() {
        Some(cache_dir) => Ok(cache_dir.join("junkyard").join("logs")),
        None => Err(Error::Initialization("cache")),
    }
}

async fn print_latest_log() -> Result<(), Error> {
    let directory = get_logging_path()?;

    let mut latest = None;
    let mut entries = fs::read_dir(&directory).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_name().to_string_lossy().starts_with("log") {
            continue;
        }

        let modified = entry.metadata().await?.modified()?;
        match &latest {
            Some((time, _)) if *time >= modified => {}
            _ => latest = Some((modified, entry.path())),
        }
    }

    let path = match latest {
        Some((_, path)) => path,
        None => return Err(Error::NoLogFile(directory)),
    };

    debug!("printing log file: {:?}", path);

    let content = fs::read(&path).await?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&content).await?;
    stdout.flush().await?;

    Ok(())
}
