use crate::core::{CountryRecord, Storage};
use crate::utils::error::{LookupError, Result};

const COUNTRIES_DIR: &str = "countries";

/// Country records keyed by country code, one JSON document per code.
///
/// Codes must already be normalized; they are used verbatim as file names.
pub struct CountryRepository<S: Storage> {
    storage: S,
}

impl<S: Storage> CountryRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn record_path(country_code: &str) -> String {
        format!("{}/{}.json", COUNTRIES_DIR, country_code)
    }

    pub async fn find(&self, country_code: &str) -> Result<Option<CountryRecord>> {
        let path = Self::record_path(country_code);

        let data = match self.storage.read_file(&path).await {
            Ok(data) => data,
            Err(LookupError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let record: CountryRecord = serde_json::from_slice(&data)?;
        Ok(Some(record))
    }

    /// Writes `record` under its country code, replacing any earlier copy.
    pub async fn save(&self, record: &CountryRecord) -> Result<()> {
        let path = Self::record_path(&record.country_code);
        let json = serde_json::to_vec_pretty(record)?;

        tracing::debug!("Writing {} ({} bytes) to storage", path, json.len());
        self.storage.write_file(&path, &json).await
    }
}
