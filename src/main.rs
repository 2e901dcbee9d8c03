mod checks;
mod config;
mod db;
mod errors;
mod models;
mod utils;

use std::process;

use dotenv::dotenv;
use log::info;

use crate::config::Config;
use crate::utils::report;

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Oracle Database Connectivity Test (Rust) ===\n");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            report::failure(&err);
            process::exit(1);
        }
    };
    info!("using {}@{}", config.username, config.connect_string);

    let summary = checks::run_all(&config, &checks::CHECKS);
    info!("{}", summary);

    println!("=== All Rust checks completed ===");
}
