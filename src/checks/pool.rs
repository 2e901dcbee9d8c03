use log::{debug, warn};

use crate::config::Config;
use crate::db::{self, queries};
use crate::errors::AppError;
use crate::utils::report;

pub const CHECKOUTS: u32 = 3;

pub fn run(config: &Config) -> Result<(), AppError> {
    let pool = db::create_pool(config)?;
    report::success("Connection pool created successfully!");

    for attempt in 1..=CHECKOUTS {
        let conn = db::checkout(&pool)?;
        println!("  Connection {} acquired from pool", attempt);
        println!("    {}", queries::pool_greeting(&conn, attempt)?);
        debug!("returning connection {} to pool", attempt);
    }

    let state = pool.state();
    println!("  Pool statistics:");
    println!(
        "    Active connections: {}",
        state.connections - state.idle_connections
    );
    println!("    Idle connections: {}", state.idle_connections);
    println!("    Total connections: {}", state.connections);
    if state.idle_connections > config.pool.max_idle {
        warn!(
            "{} idle connections exceed the configured maximum of {}",
            state.idle_connections, config.pool.max_idle
        );
    }
    Ok(())
}
