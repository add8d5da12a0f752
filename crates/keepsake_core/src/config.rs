//! Record store configuration.

use crate::model::category::Category;
use crate::stats::DEFAULT_FREQUENT_THRESHOLD;

/// Per-app settings for a `RecordStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the whole collection is persisted under.
    pub storage_key: String,
    /// Occurrence count at which a named item is classified as frequent.
    pub frequent_threshold: usize,
}

impl StoreConfig {
    /// Defaults for the app that owns category set `C`.
    pub fn for_category<C: Category>() -> Self {
        Self {
            storage_key: C::STORAGE_KEY.to_string(),
            frequent_threshold: DEFAULT_FREQUENT_THRESHOLD,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the frequent threshold; 0 is normalized to 1.
    pub fn with_frequent_threshold(mut self, threshold: usize) -> Self {
        self.frequent_threshold = threshold.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use crate::model::category::PurchaseCategory;

    #[test]
    fn defaults_follow_category_app() {
        let config = StoreConfig::for_category::<PurchaseCategory>();
        assert_eq!(config.storage_key, "purchases");
        assert_eq!(config.frequent_threshold, 3);
    }

    #[test]
    fn zero_threshold_is_normalized() {
        let config = StoreConfig::for_category::<PurchaseCategory>().with_frequent_threshold(0);
        assert_eq!(config.frequent_threshold, 1);
    }
}
