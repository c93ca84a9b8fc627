use crate::core::repository::CountryRepository;
use crate::core::{AddedCountry, CountryRecord, CountrySource, Storage, UpstreamCountry};
use crate::utils::error::{ErrorSeverity, LookupError, Result};
use crate::utils::validation::normalize_country_code;

/// Adds countries on first request and serves them from storage afterwards.
pub struct CountryLookupService<S: Storage, C: CountrySource> {
    repository: CountryRepository<S>,
    source: C,
}

impl<S: Storage, C: CountrySource> CountryLookupService<S, C> {
    pub fn new(storage: S, source: C) -> Self {
        Self {
            repository: CountryRepository::new(storage),
            source,
        }
    }

    /// Reads a previously added country. Never calls upstream.
    ///
    /// A code that is not a well-formed country code cannot have been added,
    /// so it yields `None` as well.
    pub async fn query(&self, country_code: &str) -> Result<Option<CountryRecord>> {
        let code = match normalize_country_code(country_code) {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!("Query for malformed code: {}", e);
                return Ok(None);
            }
        };

        tracing::debug!("Querying storage for country code: '{}'", code);
        self.repository.find(&code).await
    }

    /// Returns the stored country, fetching and storing it first if needed.
    ///
    /// `created` is true only when the record was fetched by this call.
    pub async fn add(&self, country_code: &str) -> Result<AddedCountry> {
        let code = normalize_country_code(country_code)?;

        if let Some(record) = self.repository.find(&code).await? {
            tracing::debug!("Country already stored: {:?}", record);
            return Ok(AddedCountry {
                record,
                created: false,
            });
        }

        tracing::debug!("Country '{}' not stored yet, fetching from upstream", code);
        let fetched = match self.source.fetch(&code).await {
            Ok(fetched) => fetched,
            Err(e) => {
                log_fetch_failure(&code, &e);
                return Err(e);
            }
        };

        let record = accept_upstream_country(&code, fetched)?;
        self.repository.save(&record).await?;

        tracing::info!(
            "Added country {} ({})",
            record.country_code,
            record.country_name
        );
        Ok(AddedCountry {
            record,
            created: true,
        })
    }
}

/// Checks an upstream payload before it may be stored under `code`.
///
/// Postal-code fields are optional since many countries have none. The name is
/// required, and the payload must not carry its own country code: that would
/// mean the upstream schema changed under us.
fn accept_upstream_country(code: &str, fetched: UpstreamCountry) -> Result<CountryRecord> {
    if fetched.country_name().map_or(true, |name| name.trim().is_empty()) {
        tracing::error!("Upstream payload for '{}' has no country name", code);
        return Err(LookupError::ValidationError {
            message: format!("upstream returned no country name for '{}'", code),
        });
    }

    if let Some(upstream_code) = &fetched.country_code {
        tracing::error!(
            "Upstream payload for '{}' unexpectedly carries country code '{}'",
            code,
            upstream_code
        );
        return Err(LookupError::ValidationError {
            message: format!("upstream payload for '{}' does not match the expected schema", code),
        });
    }

    Ok(fetched.into_record(code.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchFailure {
    /// Upstream does not know the code.
    Rejected,
    /// Upstream answered, but not in the shape we parse.
    SchemaMismatch,
    /// Upstream could not be reached or failed on its side.
    Unavailable,
}

impl FetchFailure {
    fn classify(error: &LookupError) -> Self {
        match error {
            LookupError::ValidationError { .. } => FetchFailure::SchemaMismatch,
            _ => match error.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => FetchFailure::Rejected,
                ErrorSeverity::High | ErrorSeverity::Critical => FetchFailure::Unavailable,
            },
        }
    }
}

fn log_fetch_failure(code: &str, error: &LookupError) {
    match FetchFailure::classify(error) {
        FetchFailure::Rejected => {
            tracing::warn!("Upstream rejected country code '{}': {}", code, error)
        }
        FetchFailure::SchemaMismatch => tracing::error!(
            "Upstream response for '{}' does not match the expected schema: {}",
            code,
            error
        ),
        FetchFailure::Unavailable => tracing::error!(
            "Could not fetch country '{}', the code is not the problem: {}",
            code,
            error
        ),
    }
}
