mod database;
mod server;

pub use database::{migrate, reset, seed};
pub use server::serve;
