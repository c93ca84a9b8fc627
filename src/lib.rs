pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::RestCountriesClient, storage::LocalStorage};
pub use config::{CliConfig, ServiceConfig};
pub use core::lookup::CountryLookupService;
pub use domain::model::{AddedCountry, CountryRecord};
pub use utils::error::{LookupError, Result};
