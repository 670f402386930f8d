//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::api::SqliteApi;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Data-access view over this connection.
    pub fn api(&self) -> SqliteApi<'_> {
        SqliteApi::new(&self.conn)
    }
}
