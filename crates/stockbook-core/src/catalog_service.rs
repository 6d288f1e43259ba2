//! Product catalog maintenance and category queries.

use std::collections::{BTreeMap, BTreeSet};

use stockbook_domain::{CategoryTree, Product, ProductStock};
use tracing::info;

use crate::{
    ledger_service::LedgerService,
    records::{decode_product, encode_product, COL_ID, COL_MAIN_CATEGORY, COL_SUB_CATEGORY},
    stock_service::StockService,
    storage::{Record, TabularStore, PRODUCTS_TABLE},
    CoreError,
};

pub struct CatalogService;

impl CatalogService {
    /// Every catalog row, including rows with a blank id.
    pub fn products(store: &dyn TabularStore) -> Result<Vec<Product>, CoreError> {
        let rows = store.read_all(PRODUCTS_TABLE)?;
        Ok(rows.iter().map(decode_product).collect())
    }

    pub fn find(store: &dyn TabularStore, id: &str) -> Result<Option<Product>, CoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }
        Ok(Self::products(store)?
            .into_iter()
            .find(|product| product.matches_id(id)))
    }

    /// Every catalog row paired with its derived stock.
    pub fn stock_levels(store: &dyn TabularStore) -> Result<Vec<ProductStock>, CoreError> {
        let products = Self::products(store)?;
        let entries = LedgerService::entries(store)?;
        Ok(products
            .into_iter()
            .map(|product| {
                let current_stock = StockService::current_stock(&product.id, &entries);
                ProductStock {
                    product,
                    current_stock,
                }
            })
            .collect())
    }

    /// Like [`CatalogService::stock_levels`], without rows whose id is blank.
    pub fn list_with_stock(store: &dyn TabularStore) -> Result<Vec<ProductStock>, CoreError> {
        Ok(Self::stock_levels(store)?
            .into_iter()
            .filter(|level| !level.product.id.is_empty())
            .collect())
    }

    pub fn add_product(store: &dyn TabularStore, product: Product) -> Result<Product, CoreError> {
        if product.id.trim().is_empty() || product.main_category.trim().is_empty() {
            return Err(CoreError::Validation(
                "product id and main category are required".into(),
            ));
        }
        if Self::find(store, &product.id)?.is_some() {
            return Err(CoreError::DuplicateProduct(product.id));
        }
        store.append(PRODUCTS_TABLE, encode_product(&product))?;
        info!(product = %product.id, "product added");
        Ok(product)
    }

    /// Removes the catalog row. Ledger rows referring to the product are kept.
    pub fn delete_product(store: &dyn TabularStore, id: &str) -> Result<Product, CoreError> {
        let id = id.trim();
        let mut rows = store.read_all(PRODUCTS_TABLE)?;
        let position = rows
            .iter()
            .position(|row| !id.is_empty() && row.get(COL_ID).trim() == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        let removed = decode_product(&rows.remove(position));
        store.replace_all(PRODUCTS_TABLE, rows)?;
        info!(product = %removed.id, "product deleted");
        Ok(removed)
    }

    pub fn categories(store: &dyn TabularStore) -> Result<CategoryTree, CoreError> {
        let mut mains = BTreeSet::new();
        let mut subs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for product in Self::products(store)? {
            if product.main_category.is_empty() {
                continue;
            }
            let bucket = subs.entry(product.main_category.clone()).or_default();
            if let Some(sub) = product.sub_category {
                bucket.insert(sub);
            }
            mains.insert(product.main_category);
        }
        Ok(CategoryTree {
            main_categories: mains.into_iter().collect(),
            sub_categories: subs
                .into_iter()
                .map(|(main, set)| (main, set.into_iter().collect()))
                .collect(),
        })
    }

    /// Reassigns the categories of an existing product.
    pub fn update_categories(
        store: &dyn TabularStore,
        id: &str,
        main_category: &str,
        sub_category: Option<String>,
    ) -> Result<Product, CoreError> {
        let id = id.trim();
        if id.is_empty() || main_category.trim().is_empty() {
            return Err(CoreError::Validation(
                "product id and main category are required".into(),
            ));
        }
        let mut rows = store.read_all(PRODUCTS_TABLE)?;
        let row = rows
            .iter_mut()
            .find(|row| row.get(COL_ID).trim() == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        let mut product = decode_product(row);
        product.recategorize(main_category, sub_category);
        write_categories(row, &product);
        store.replace_all(PRODUCTS_TABLE, rows)?;
        info!(product = %product.id, main = %product.main_category, "product recategorized");
        Ok(product)
    }

    /// Blanks the main category on every product using `name`. Returns the count changed.
    pub fn clear_main_category(store: &dyn TabularStore, name: &str) -> Result<usize, CoreError> {
        let name = name.trim();
        Self::clear_where(store, COL_MAIN_CATEGORY, |row| {
            row.get(COL_MAIN_CATEGORY).trim() == name
        })
    }

    /// Blanks the sub category `sub` under main category `main`. Returns the count changed.
    pub fn clear_sub_category(
        store: &dyn TabularStore,
        main: &str,
        sub: &str,
    ) -> Result<usize, CoreError> {
        let (main, sub) = (main.trim(), sub.trim());
        Self::clear_where(store, COL_SUB_CATEGORY, |row| {
            row.get(COL_SUB_CATEGORY).trim() == sub && row.get(COL_MAIN_CATEGORY).trim() == main
        })
    }

    fn clear_where<F>(store: &dyn TabularStore, column: &str, predicate: F) -> Result<usize, CoreError>
    where
        F: Fn(&Record) -> bool,
    {
        let mut rows = store.read_all(PRODUCTS_TABLE)?;
        let mut changed = 0;
        for row in rows.iter_mut() {
            if predicate(row) {
                row.set(column, "");
                changed += 1;
            }
        }
        if changed > 0 {
            store.replace_all(PRODUCTS_TABLE, rows)?;
            info!(column, changed, "category cleared");
        }
        Ok(changed)
    }
}

fn write_categories(row: &mut Record, product: &Product) {
    let encoded = encode_product(product);
    row.set(COL_MAIN_CATEGORY, encoded.get(COL_MAIN_CATEGORY));
    row.set(COL_SUB_CATEGORY, encoded.get(COL_SUB_CATEGORY));
}
