use log::warn;

use crate::config::Config;
use crate::db::{self, queries};
use crate::errors::AppError;
use crate::utils::report;

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::open(config)?;
    report::success("Basic connection successful!");

    let conn = db::checkout(&pool)?;

    let version = queries::server_banner(&conn)?;
    println!("  Database version: {}", version);
    println!("  Connect string: {}", config.connect_string);
    println!("  Username: {}", config.username);
    match oracle::Version::client() {
        Ok(client) => println!("  Client version: {}", client),
        Err(err) => warn!("could not read Oracle client version: {}", err),
    }

    let (message, server_time) = queries::greeting(&conn)?;
    println!("  Message: {}", message);
    println!("  Server time: {}", server_time.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}
