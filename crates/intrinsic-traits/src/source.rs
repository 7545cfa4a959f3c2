//! Data source traits.
//!
//! The screening pipeline and the CLI never talk to a provider directly. They
//! go through these two traits, which keeps the pipeline testable with
//! in-memory sources and lets the cache wrap any provider.

use crate::{FundamentalRecord, Result, SectorEntry};
use async_trait::async_trait;

/// A per-ticker source of fundamentals.
///
/// Implementations should return `Ok` with absent fields for partial data and
/// reserve `Err` for a fetch that produced nothing usable. The pipeline turns
/// such errors into an empty record, so returning one never aborts a run.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use intrinsic_traits::{FundamentalRecord, FundamentalsSource, Result};
///
/// struct Fixed;
///
/// #[async_trait]
/// impl FundamentalsSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord> {
///         Ok(FundamentalRecord::empty(symbol))
///     }
/// }
/// ```
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    /// Fetch the fundamentals snapshot for one ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unreachable or returns nothing
    /// usable for `symbol`.
    async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord>;
}

/// A one-shot source of the reference index universe.
#[async_trait]
pub trait UniverseSource: Send + Sync {
    /// Fetch `{symbol, name, sector}` rows in the provider's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the universe cannot be fetched or parsed.
    async fn constituents(&self) -> Result<Vec<SectorEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntrinsicError;

    struct TestSource;

    #[async_trait]
    impl FundamentalsSource for TestSource {
        fn name(&self) -> &str {
            "test"
        }

        async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord> {
            if symbol == "FAIL" {
                return Err(IntrinsicError::DataFetch("unreachable".to_string()));
            }
            Ok(FundamentalRecord {
                price: Some(10.0),
                ..FundamentalRecord::empty(symbol)
            })
        }
    }

    struct TestUniverse;

    #[async_trait]
    impl UniverseSource for TestUniverse {
        async fn constituents(&self) -> Result<Vec<SectorEntry>> {
            Ok(vec![SectorEntry::new("AAPL", "Apple Inc.", "Information Technology")])
        }
    }

    #[tokio::test]
    async fn test_source_fetch() {
        let source = TestSource;
        assert_eq!(source.name(), "test");

        let record = source.fetch("AAPL").await.unwrap();
        assert_eq!(record.ticker, "AAPL");
        assert_eq!(record.price, Some(10.0));

        assert!(source.fetch("FAIL").await.is_err());
    }

    #[tokio::test]
    async fn test_universe_constituents() {
        let rows = TestUniverse.constituents().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sector, "Information Technology");
    }

    #[test]
    fn test_source_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Box<dyn FundamentalsSource>>();
        assert_send_sync::<Box<dyn UniverseSource>>();
    }
}
