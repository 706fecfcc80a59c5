use ChemCalc::cli::cli_main::run_interactive_menu;
use ChemCalc::settings::{SettingsManager, init_logging};
use log::{error, info};
use std::env;

pub fn main() {
    // optional argument: path to a config file
    let manager = match env::args().nth(1) {
        Some(path) => SettingsManager::with_config_file(&path),
        None => SettingsManager::new(),
    };
    let manager = match manager {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = init_logging(manager.get_config()) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    info!("configuration loaded from {}", manager.config_file());

    let library = match manager.build_library() {
        Ok(library) => library,
        Err(e) => {
            error!("Failed to load compound library: {}", e);
            std::process::exit(1);
        }
    };
    info!("{} compounds available", library.len());
    run_interactive_menu(manager.get_config(), &library);
}
