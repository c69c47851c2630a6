#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::default_products;
use crate::domain::models::NaturalProduct;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageKey;

/// Natural product catalog. A stored override list replaces the seeded
/// products as long as it parses.
pub struct CatalogStore {
    storage: StorageBox,
}

impl CatalogStore {
    pub fn new(storage: StorageBox) -> CatalogStore {
        return CatalogStore { storage };
    }

    pub async fn load(&self) -> Vec<NaturalProduct> {
        let payload = match self.storage.get(StorageKey::Catalog).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return default_products(),
            Err(err) => {
                tracing::warn!(err = ?err, "Failed to read catalog override");
                return default_products();
            }
        };

        match serde_json::from_str::<Vec<NaturalProduct>>(&payload) {
            Ok(products) => return products,
            Err(err) => {
                tracing::warn!(err = ?err, "Catalog override is malformed, using the defaults");
                return default_products();
            }
        }
    }

    pub async fn save_override(&self, products: &[NaturalProduct]) -> Result<()> {
        let payload = serde_json::to_string(products)?;
        self.storage.set(StorageKey::Catalog, &payload).await?;
        tracing::debug!(products = products.len(), "Saved catalog override");
        return Ok(());
    }

    /// Adds or replaces a product by id and stores the result as the
    /// override.
    pub async fn upsert(&self, product: NaturalProduct) -> Result<Vec<NaturalProduct>> {
        let mut products = self.load().await;
        match products.iter_mut().find(|e| return e.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }

        self.save_override(&products).await?;
        return Ok(products);
    }

    pub async fn reset(&self) -> Result<()> {
        return self.storage.remove(StorageKey::Catalog).await;
    }
}
