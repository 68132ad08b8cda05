pub mod app;
pub mod config;
pub mod error;
pub mod feed;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod shows;
pub mod sync;
