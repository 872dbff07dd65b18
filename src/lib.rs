pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{iplocate::IpLocateClient, storage::LocalStorage};
pub use core::{
    export::OutputFormat,
    locator::{BatchOptions, Locator},
    BatchOutcome, LookupError, LookupResult,
};
pub use utils::error::{LocateError, Result};
