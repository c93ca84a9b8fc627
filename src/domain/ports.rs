use crate::domain::model::UpstreamCountry;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn api_fields(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn request_timeout_secs(&self) -> Option<u64>;
}

/// Read-only source of country metadata, keyed by an already-normalized code.
///
/// Implementations report a code the source does not know as
/// `LookupError::InvalidCountryCode` and any other failure to reach or use the
/// source as `LookupError::UpstreamUnavailable`.
#[async_trait]
pub trait CountrySource: Send + Sync {
    async fn fetch(&self, country_code: &str) -> Result<UpstreamCountry>;
}
