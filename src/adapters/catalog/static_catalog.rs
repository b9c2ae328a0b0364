//! Config-backed price catalog.

use std::collections::HashMap;

use crate::domain::checkout::PriceRef;
use crate::domain::foundation::ProductRef;
use crate::ports::PriceCatalog;

/// Price catalog loaded once from configuration.
///
/// In passthrough mode an unmapped product reference is used as the price
/// id itself, for storefronts whose product refs already are price ids.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceCatalog {
    prices: HashMap<String, PriceRef>,
    passthrough: bool,
}

impl StaticPriceCatalog {
    pub fn new(prices: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            prices: prices
                .into_iter()
                .map(|(product, price)| (product, PriceRef::new(price)))
                .collect(),
            passthrough: false,
        }
    }

    pub fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceCatalog for StaticPriceCatalog {
    fn price_for(&self, product: &ProductRef) -> Option<PriceRef> {
        self.prices
            .get(product.as_str())
            .cloned()
            .or_else(|| self.passthrough.then(|| PriceRef::new(product.as_str())))
    }
}
