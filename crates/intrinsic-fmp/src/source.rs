//! [`FundamentalsSource`] and [`UniverseSource`] backed by FMP.

use async_trait::async_trait;
use intrinsic_traits::{
    FundamentalRecord, FundamentalsSource, Result, SectorEntry, UniverseSource,
};
use tracing::debug;

use crate::FmpClient;

#[async_trait]
impl FundamentalsSource for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord> {
        let record = self.fundamental_record(symbol).await?;
        debug!(
            symbol,
            populated = record.populated_fields(),
            "fetched fundamentals"
        );
        Ok(record)
    }
}

#[async_trait]
impl UniverseSource for FmpClient {
    async fn constituents(&self) -> Result<Vec<SectorEntry>> {
        Ok(self.sp500_constituents().await?)
    }
}
