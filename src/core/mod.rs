pub mod lookup;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{AddedCountry, CountryRecord, UpstreamCountry};
pub use crate::domain::ports::{ConfigProvider, CountrySource, Storage};
pub use crate::utils::error::Result;
