//! Wunderlist API access
//!
//! The task source side of the sync: lists, tasks, notes and comments.

mod client;
mod model;

pub use client::*;
pub use model::*;
