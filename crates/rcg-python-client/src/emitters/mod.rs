pub mod client;
pub mod package;
pub mod templates;
