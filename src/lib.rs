pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod driver;
pub mod error;
pub mod forge;
pub mod git;
pub mod manifest;
pub mod metadata;
pub mod output;
pub mod tags;
pub mod ui;
pub mod updater;

pub use error::{Result, UpdateError};
