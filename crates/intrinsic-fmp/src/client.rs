//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    record::to_record,
    types::{
        Constituent, FundamentalData, GradesConsensus, IncomeStatement, KeyMetricsTtm, Period,
        Profile, Quote, RatiosTtm,
    },
};
use intrinsic_traits::{FundamentalRecord, SectorEntry};
use reqwest::Client;
use std::env;
use tracing::debug;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(endpoint, "FMP request");
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        parse_body(&text)
    }

    /// Fetch an endpoint that returns an array and keep its first element.
    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
    ) -> Result<T> {
        let items: Vec<T> = self.get(endpoint).await?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::NoData(symbol.to_string()))
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn profile(&self, symbol: &str) -> Result<Profile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get trailing-twelve-month key metrics for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn key_metrics_ttm(&self, symbol: &str) -> Result<KeyMetricsTtm> {
        let endpoint = format!("key-metrics-ttm?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get trailing-twelve-month financial ratios for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn ratios_ttm(&self, symbol: &str) -> Result<RatiosTtm> {
        let endpoint = format!("ratios-ttm?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "income-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get the analyst grades consensus for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn grades_consensus(&self, symbol: &str) -> Result<GradesConsensus> {
        let endpoint = format!("grades-consensus?symbol={}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get the current S&P 500 constituents, in FMP's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn sp500_constituents(&self) -> Result<Vec<SectorEntry>> {
        let constituents: Vec<Constituent> = self.get("sp500-constituent").await?;
        Ok(constituents
            .into_iter()
            .map(|c| SectorEntry::new(c.symbol, c.name, c.sector))
            .collect())
    }

    /// Get every payload feeding one fundamentals record.
    ///
    /// The sub-requests run concurrently. A failing sub-request only leaves
    /// its slot empty.
    pub async fn fundamental_data(&self, symbol: &str) -> FundamentalData {
        let (quote, profile, metrics, ratios, income, grades) = tokio::join!(
            self.quote(symbol),
            self.profile(symbol),
            self.key_metrics_ttm(symbol),
            self.ratios_ttm(symbol),
            self.income_statement(symbol, Period::Annual, Some(1)),
            self.grades_consensus(symbol),
        );

        FundamentalData {
            symbol: symbol.to_uppercase(),
            quote: ok_or_log(symbol, "quote", quote),
            profile: ok_or_log(symbol, "profile", profile),
            key_metrics: ok_or_log(symbol, "key-metrics-ttm", metrics),
            ratios: ok_or_log(symbol, "ratios-ttm", ratios),
            income: ok_or_log(symbol, "income-statement", income)
                .and_then(|statements| statements.into_iter().next()),
            grades: ok_or_log(symbol, "grades-consensus", grades),
        }
    }

    /// Fetch and assemble the fundamentals record for a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::NoData`] if every sub-request failed.
    pub async fn fundamental_record(&self, symbol: &str) -> Result<FundamentalRecord> {
        let data = self.fundamental_data(symbol).await;
        if data.is_empty() {
            return Err(FmpError::NoData(symbol.to_uppercase()));
        }
        Ok(to_record(&data))
    }
}

fn ok_or_log<T>(symbol: &str, endpoint: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(symbol, endpoint, error = %e, "sub-request failed");
            None
        }
    }
}

/// Parse a response body, turning FMP's in-band error messages into errors.
fn parse_body<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    // Check for error responses
    if text.contains("\"Error Message\"") || text.contains("\"error\"") {
        return Err(FmpError::Api(text.to_string()));
    }

    serde_json::from_str(text).map_err(|e| {
        FmpError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to parse: {e}. Response: {text}"),
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("quote?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/quote?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            client.url("sp500-constituent"),
            "https://financialmodelingprep.com/stable/sp500-constituent?apikey=test_key"
        );
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"Error Message":"Invalid API KEY."}"#;
        let parsed: Result<Vec<Quote>> = parse_body(body);
        assert!(matches!(parsed, Err(FmpError::Api(_))));
    }

    #[test]
    fn test_parse_constituents_body() {
        let body = r#"[{"symbol":"MMM","name":"3M","sector":"Industrials","subSector":"Conglomerates"}]"#;
        let parsed: Vec<Constituent> = parse_body(body).unwrap();
        assert_eq!(parsed[0].sector, "Industrials");
    }

    #[test]
    fn test_parse_garbage_body() {
        let parsed: Result<Vec<Quote>> = parse_body("<html>");
        assert!(matches!(parsed, Err(FmpError::Json(_))));
    }
}
