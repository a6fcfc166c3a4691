//! Client side of the finance tracker: REST client, state store with local
//! snapshot, and the `finance` command line front end.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod mappers;
pub mod snapshot;
pub mod store;
pub mod view;

pub use app::App;
pub use client::{Client, ClientError};
pub use error::{AppError, Result};
pub use store::{ActionResult, Store};
