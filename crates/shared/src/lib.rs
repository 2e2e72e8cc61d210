mod command;
mod date;
mod metadata;

pub use command::*;
pub use date::*;
pub use metadata::*;

pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Connection pools handed to every command.
///
/// `write_db` is expected to hold a single connection, `read_db` may be a
/// read-only pool. Tests usually pass the same pool twice.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}
