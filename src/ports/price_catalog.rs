//! Price catalog port.

use crate::domain::checkout::PriceRef;
use crate::domain::foundation::ProductRef;

/// Resolves the payment provider's price for a product.
///
/// Synchronous: catalogs are loaded at startup.
pub trait PriceCatalog: Send + Sync {
    /// Returns the price for `product`, or `None` when it cannot be sold.
    fn price_for(&self, product: &ProductRef) -> Option<PriceRef>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_catalog_is_object_safe() {
        fn _accepts_dyn(_catalog: &dyn PriceCatalog) {}
    }
}
