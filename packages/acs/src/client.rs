//! ACS query construction and execution.

use census_report_acs_models::fips::DEFAULT_STATE_FIPS;
use census_report_acs_models::{DEFAULT_YEAR, GeoRecord, POPULATION_VARIABLE};

use crate::{AcsError, parse};

/// Base URL of the Census Data API.
const DEFAULT_BASE_URL: &str = "https://api.census.gov/data";

/// User-Agent sent with Census requests.
const CENSUS_USER_AGENT: &str = "census-report/0.1";

/// A single ACS 5-year population query.
///
/// Defaults match the standard run: 2022 vintage, `NAME` plus the total
/// population variable, and a 20-state FIPS filter. An empty state list
/// queries all states (`state:*`).
#[derive(Debug, Clone)]
pub struct AcsQuery {
    base_url: String,
    year: u16,
    population_variable: String,
    states: Vec<String>,
    api_key: Option<String>,
}

impl Default for AcsQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl AcsQuery {
    /// Creates a query with the default year, variable, and state filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            year: DEFAULT_YEAR,
            population_variable: POPULATION_VARIABLE.to_owned(),
            states: DEFAULT_STATE_FIPS.iter().map(|s| (*s).to_owned()).collect(),
            api_key: None,
        }
    }

    /// Sets the base URL (for tests against a local server).
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the ACS vintage year.
    #[must_use]
    pub const fn with_year(mut self, year: u16) -> Self {
        self.year = year;
        self
    }

    /// Sets the state FIPS filter. An empty list queries all states.
    #[must_use]
    pub fn with_states(mut self, states: Vec<String>) -> Self {
        self.states = states;
        self
    }

    /// Sets the Census API key. Optional; without a key the API allows a
    /// lower daily request limit.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// The endpoint URL for this query's vintage year.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/{}/acs/acs5", self.base_url, self.year)
    }

    /// The `for=` geography filter value.
    #[must_use]
    pub fn geography_filter(&self) -> String {
        if self.states.is_empty() {
            "state:*".to_owned()
        } else {
            format!("state:{}", self.states.join(","))
        }
    }

    /// Issues the GET request and parses the response into records,
    /// preserving response row order.
    ///
    /// # Errors
    ///
    /// Returns [`AcsError::Http`] on transport failure,
    /// [`AcsError::Upstream`] on a non-2xx status,
    /// [`AcsError::MalformedResponse`] if the body is not a JSON array
    /// with a header row and at least one data row, and
    /// [`AcsError::SchemaMismatch`] if an expected column is absent.
    pub async fn fetch(&self) -> Result<Vec<GeoRecord>, AcsError> {
        let client = reqwest::Client::builder()
            .user_agent(CENSUS_USER_AGENT)
            .build()?;

        let url = self.endpoint();
        let get_vars = format!("NAME,{}", self.population_variable);
        let geography = self.geography_filter();

        let mut params: Vec<(&str, &str)> = vec![("get", &get_vars), ("for", &geography)];
        if let Some(key) = &self.api_key {
            params.push(("key", key));
        }

        log::debug!("GET {url} get={get_vars} for={geography}");

        let resp = client.get(&url).query(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(AcsError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let records = parse::parse_body(&body, &self.population_variable)?;
        log::info!("Fetched {} records from Census API", records.len());

        Ok(records)
    }
}
