pub mod fixtures;
pub mod keys;
pub mod models;
