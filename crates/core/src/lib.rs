//! Core library for wl2board
//!
//! This crate contains the sync logic, including:
//! - Wunderlist API access (the task source)
//! - GitHub projects API access (the board target)
//! - The list-to-board sync workflow

pub mod config;
pub mod error;
pub mod github;
pub mod sync;
pub mod wunderlist;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
