pub mod adapter;
pub mod batch;
pub mod error;
