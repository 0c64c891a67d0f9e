use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info};

use report::Format;
use store::RecordStore;
use tracker::Tracker;

mod command;
mod extractors;
mod report;
mod store;
mod subnet;
mod tracker;
mod types;

const APP_NAME: &str = "tech2table";

const EXIT_OUTPUT_FAILURE: i32 = 1;
const EXIT_INPUT_FAILURE: i32 = 3;

fn main() {
    let app = clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Extracts device, interface, CDP and module tables from Cisco show tech captures")
        .arg(
            clap::Arg::new("OUTPUT")
                .required(true)
                .help("Destination: a directory for CSV sheets or a file for YAML"),
        )
        .arg(
            clap::Arg::new("INPUT")
                .required(true)
                .num_args(1..)
                .help("Capture files, processed in the given order"),
        )
        .arg(
            clap::Arg::new("FORMAT")
                .long("format")
                .default_value("csv")
                .value_parser(Format::NAMES)
                .help("Report format"),
        )
        .arg(
            clap::Arg::new("VERBOSE")
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enables DEBUG log level"),
        );

    let matches = app.get_matches();

    setup_logger(&matches);

    let output = matches
        .get_one::<String>("OUTPUT")
        .expect("OUTPUT is required");
    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("INPUT")
        .expect("INPUT is required")
        .map(PathBuf::from)
        .collect();
    let format = matches
        .get_one::<String>("FORMAT")
        .and_then(|name| Format::from_name(name))
        .expect("--format has a default value");

    let start = Instant::now();

    let store = match extract(&inputs) {
        Ok(store) => store,
        Err(err) => {
            error!("Reading captures failed: {err:#}");
            std::process::exit(EXIT_INPUT_FAILURE)
        }
    };

    if store.is_empty() {
        info!("No device found");
    } else if let Err(err) = report::write(&store.report(), format, Path::new(output)) {
        error!("Could not write {output}: {err:#}");
        std::process::exit(EXIT_OUTPUT_FAILURE)
    } else {
        info!("Successfully wrote report to {output}");
    }

    info!("Finished in {:.3} seconds", start.elapsed().as_secs_f64());
}

fn extract(inputs: &[PathBuf]) -> Result<RecordStore, anyhow::Error> {
    let mut store = RecordStore::default();
    let mut tracker = Tracker::new();

    for path in inputs {
        info!("Processing {path:?}...");
        tracker.process_file(path, &mut store)?;
    }

    Ok(store)
}

fn setup_logger(matches: &clap::ArgMatches) {
    let verbose_arg = "VERBOSE";

    let mut log_builder = env_logger::Builder::new();
    if matches
        .try_get_one::<bool>(verbose_arg)
        .is_ok_and(|arg| arg.is_some_and(|&value| value))
    {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Info);
    }
    log_builder.init();
}
