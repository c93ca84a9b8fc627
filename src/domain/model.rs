use serde::{Deserialize, Serialize};

/// Postal-code metadata for one country, as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Uppercase code the caller asked for, e.g. `NL`. Never taken from upstream.
    pub country_code: String,
    /// English common name, e.g. `Netherlands`.
    pub country_name: String,
    /// e.g. `#### @@`. Many countries have no postal codes at all.
    pub postal_code_format: Option<String>,
    /// e.g. `^(\d{4}[A-Z]{2})$`
    pub postal_code_regex: Option<String>,
}

/// Raw country payload from the upstream API.
///
/// Only the nested fields this service needs are mapped; everything else in
/// the payload is ignored. `country_code` is captured so a payload that
/// unexpectedly carries one can be rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamCountry {
    #[serde(default)]
    pub name: Option<UpstreamName>,
    #[serde(default)]
    pub postal_code: Option<UpstreamPostalCode>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamName {
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamPostalCode {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
}

/// The upstream answers lookups with either a bare object or a list of matches.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UpstreamResponse {
    // A struct would also accept a sequence, so the list form is tried first.
    Many(Vec<UpstreamCountry>),
    One(UpstreamCountry),
}

impl UpstreamResponse {
    pub fn into_first(self) -> Option<UpstreamCountry> {
        match self {
            UpstreamResponse::One(country) => Some(country),
            UpstreamResponse::Many(countries) => countries.into_iter().next(),
        }
    }
}

impl UpstreamCountry {
    pub fn country_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.common.as_deref())
    }

    /// Flattens the payload into a record keyed by `country_code`.
    pub fn into_record(self, country_code: String) -> CountryRecord {
        let country_name = self
            .name
            .and_then(|n| n.common)
            .unwrap_or_default();
        let (postal_code_format, postal_code_regex) = match self.postal_code {
            Some(postal) => (postal.format, postal.regex),
            None => (None, None),
        };

        CountryRecord {
            country_code,
            country_name,
            postal_code_format,
            postal_code_regex,
        }
    }
}

/// Result of adding a country: the record plus whether it was fetched just now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedCountry {
    pub record: CountryRecord,
    pub created: bool,
}
