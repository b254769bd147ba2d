//! Steam Hours core: playtime aggregation over Steam library data, plus the
//! account discovery and Web API collaborators that feed it.

pub mod domain;
pub mod error;
pub mod models;
pub mod steam;
pub mod utils;

pub use error::{Error, Result};
