pub mod query;
pub mod statements;
