//! GitHub projects API access
//!
//! The board target side of the sync: projects, columns and cards of the
//! classic projects feature, behind its preview accept header.

mod client;
mod link;
mod model;

pub use client::*;
pub use model::*;
