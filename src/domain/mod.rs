pub mod movie;
pub mod types;
