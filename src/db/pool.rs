//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! The store is opened per invocation and is not safe for multiple
//! simultaneous writers; nothing here needs to be.

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
