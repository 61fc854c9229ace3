//! Core library: scanning, tagging, tag-folder persistence and moving.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod organizer;
pub mod scanner;
pub mod sort;
pub mod tag_store;
pub mod tags;

pub use app::App;
pub use error::{Result, TaggerError};
