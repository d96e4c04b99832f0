//! In-memory caching using moka
//!
//! Quotation documents are read far more often than orders change, so the
//! per-customer order rollup and the rendered QR images are cached until a
//! write touches them.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::quotation::QuotationData;

/// Application cache holding quotation rollups and QR images
#[derive(Clone)]
pub struct AppCache {
    /// Quotation rollups (customer id -> orders and totals)
    pub quotations: Cache<String, Arc<QuotationData>>,
    /// QR code images (payload -> PNG data URI)
    pub qr_codes: Cache<String, Arc<String>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rollups: 200 customers, 30 min TTL, 10 min idle
            quotations: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),

            // QR images: payload is immutable, keep for an hour
            qr_codes: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(60 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotations_size: self.quotations.entry_count(),
            qr_codes_size: self.qr_codes.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.quotations.invalidate_all();
        self.qr_codes.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate the quotation of one customer
    pub async fn invalidate_customer(&self, customer_id: &str) {
        self.quotations.invalidate(customer_id).await;
        tracing::debug!("Cache invalidated for customer: {}", customer_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotations_size: u64,
    pub qr_codes_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerForm, OrderTotals};
    use chrono::Utc;

    fn rollup() -> Arc<QuotationData> {
        let customer = CustomerForm {
            company: "Test Co".to_string(),
            name: "Contact".to_string(),
            phone: "055-000000".to_string(),
            ..Default::default()
        }
        .into_customer("c1".to_string(), Utc::now())
        .unwrap();

        Arc::new(QuotationData {
            customer,
            orders: vec![],
            totals: OrderTotals::default(),
        })
    }

    #[tokio::test]
    async fn test_invalidate_customer() {
        let cache = AppCache::new();
        cache.quotations.insert("c1".to_string(), rollup()).await;
        cache.quotations.insert("c2".to_string(), rollup()).await;

        cache.invalidate_customer("c1").await;
        assert!(cache.quotations.get("c1").await.is_none());
        assert!(cache.quotations.get("c2").await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = AppCache::new();
        cache.quotations.insert("c1".to_string(), rollup()).await;
        cache.qr_codes.insert("payload".to_string(), Arc::new("data:".to_string())).await;

        cache.invalidate_all();
        assert!(cache.quotations.get("c1").await.is_none());
        assert!(cache.qr_codes.get("payload").await.is_none());
    }
}
