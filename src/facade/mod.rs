mod dao;
mod database;

pub use dao::Dao;
pub use database::Database;
