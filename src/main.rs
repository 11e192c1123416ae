use std::{io::stdin, path::PathBuf};

use clap::Parser;
use log::{error, info};
use ui::repl;

use crate::{config::Config, controller::navigation::Route, service::data_manager::DataManager};

mod config;
mod controller;
mod logging;
mod model;
mod service;
mod ui;

/// Browse Chess.com's titled grandmasters and their profiles
#[derive(Parser, Debug)]
#[command(name = "gmwiki")]
#[command(version, about, long_about = None)]
struct Args {
    /// Route to open at startup, `/` for the list or `/profile/<username>`
    #[arg(long, default_value = "/")]
    path: String,

    /// Base URL of the Chess.com public API
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Load data from local JSON files instead of fetching from the API
    #[arg(short = 'l', long = "load-local")]
    load_local_json_files: bool,

    /// Store API responses to JSON files for debugging/testing
    #[arg(short = 's', long = "store-responses")]
    store_responses: bool,

    /// File that receives log output
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory used by --load-local and --store-responses
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Args {
    fn into_config(self, mut config: Config) -> Config {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        config.load_local = self.load_local_json_files;
        config.store_responses = self.store_responses;
        config
    }
}

fn main() {
    let args = Args::parse();
    let start = Route::parse(&args.path);
    let config = args.into_config(Config::from_env());

    if let Err(error) = logging::init(&config.log_file) {
        println!("Logging disabled: {}", error);
    }
    info!("Starting with {:?}", config);

    match (start, DataManager::new(&config)) {
        (Ok(start), Ok(manager)) => match repl::run(manager, start) {
            Ok(_) => return,
            Err(error) => println!("Error occured while running REPL:\n{}\n", error),
        },
        (Err(error), _) => {
            error!("Invalid start route: {}", error);
            println!("Error occured while initializing:\n{}\n", error);
        }
        (_, Err(error)) => {
            error!("Initialization failed: {}", error);
            println!("Error occured while initializing:\n{}\n", error);
        }
    };

    let mut s = String::new();
    println!("Press Enter to exit");
    let _ = stdin().read_line(&mut s);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from(["gmwiki", "--base-url", "http://localhost:8080/", "--timeout-secs", "5", "-l"]);
        let config = args.into_config(Config::default());
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.load_local);
        assert!(!config.store_responses);
    }

    #[test]
    fn start_path_defaults_to_list() {
        let args = Args::parse_from(["gmwiki"]);
        assert_eq!(Route::parse(&args.path), Ok(Route::List));
    }
}
