pub mod queries;
pub mod transaction;

use log::debug;
use oracle::Connection;
use r2d2::ManageConnection;

use crate::config::Config;
use crate::errors::AppError;

pub use transaction::{Rollback, Transaction};

pub type DbPool = r2d2::Pool<OracleConnectionManager>;
pub type DbConn = r2d2::PooledConnection<OracleConnectionManager>;

/// r2d2 manager that opens plain `oracle` sessions and validates them with a ping.
#[derive(Debug)]
pub struct OracleConnectionManager {
    username: String,
    password: String,
    connect_string: String,
    call_timeout: Option<std::time::Duration>,
}

impl OracleConnectionManager {
    pub fn new(config: &Config) -> Self {
        OracleConnectionManager {
            username: config.username.clone(),
            password: config.password.clone(),
            connect_string: config.connect_string.clone(),
            call_timeout: config.pool.call_timeout,
        }
    }
}

impl ManageConnection for OracleConnectionManager {
    type Connection = Connection;
    type Error = oracle::Error;

    fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("opening session {}@{}", self.username, self.connect_string);
        let conn = Connection::connect(&self.username, &self.password, &self.connect_string)?;
        if self.call_timeout.is_some() {
            conn.set_call_timeout(self.call_timeout)?;
        }
        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        conn.ping()
    }

    fn has_broken(&self, _conn: &mut Self::Connection) -> bool {
        false
    }
}

/// Builds the pool described by `config.pool`. Sessions open lazily on first
/// checkout; r2d2 has no idle ceiling, so `max_idle` is not applied here.
pub fn create_pool(config: &Config) -> Result<DbPool, AppError> {
    let settings = &config.pool;
    r2d2::Pool::builder()
        .max_size(settings.max_open)
        .min_idle(Some(0))
        .max_lifetime(Some(settings.max_lifetime).filter(|lifetime| !lifetime.is_zero()))
        .connection_timeout(settings.connect_timeout)
        .build(OracleConnectionManager::new(config))
        .map_err(|err| AppError::connection("Failed to open database connection", err))
}

/// Opens a pool and proves the endpoint answers before handing it out.
///
/// Reachability is one direct session outside the pool; a failed connect or
/// ping is reported once, never retried.
pub fn open(config: &Config) -> Result<DbPool, AppError> {
    let pool = create_pool(config)?;
    let manager = OracleConnectionManager::new(config);
    let mut conn = manager
        .connect()
        .map_err(|err| AppError::ping("Failed to ping database", err))?;
    manager
        .is_valid(&mut conn)
        .map_err(|err| AppError::ping("Failed to ping database", err))?;
    if let Err(err) = conn.close() {
        debug!("closing ping session failed: {}", err);
    }
    Ok(pool)
}

pub fn checkout(pool: &DbPool) -> Result<DbConn, AppError> {
    pool.get()
        .map_err(|err| AppError::connection("Failed to acquire connection from pool", err))
}
