// Crate root library declaration and module exports.
pub mod config;
pub mod export;
pub mod feed;
pub mod model;
