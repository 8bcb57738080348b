//! Catalog client.
//!
//! Read-only product and category lookups, cached with `moka` (5-minute
//! TTL). Searches bypass the cache; their result sets are too varied to be
//! worth holding. Cart and order state is never cached - only catalog
//! reads.

use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use saffron_core::{CategoryId, ProductId};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::types::{Category, Page, Product};

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Box<Page<Product>>),
    Featured(Vec<Product>),
    Categories(Vec<Category>),
}

/// Client for the product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a catalog client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { api, cache }
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.api.get(&format!("/products/{id}")).await?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn products(&self, page: u32, size: u32) -> Result<Page<Product>, ApiError> {
        let cache_key = format!("products:{page}:{size}");

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(*products);
        }

        let products: Page<Product> = self
            .api
            .get(&format!("/products?page={page}&size={size}"))
            .await?;

        self.cache
            .insert(
                cache_key,
                CacheValue::Products(Box::new(products.clone())),
            )
            .await;

        Ok(products)
    }

    /// Get a page of products within a category.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn products_by_category(
        &self,
        category_id: &CategoryId,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        let cache_key = format!("category-products:{category_id}:{page}:{size}");

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for category products");
            return Ok(*products);
        }

        let products: Page<Product> = self
            .api
            .get(&format!(
                "/products/category/{category_id}?page={page}&size={size}"
            ))
            .await?;

        self.cache
            .insert(
                cache_key,
                CacheValue::Products(Box::new(products.clone())),
            )
            .await;

        Ok(products)
    }

    /// Search products. Not cached.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        let encoded = urlencoding::encode(query);
        self.api
            .get(&format!(
                "/products/search?q={encoded}&page={page}&size={size}"
            ))
            .await
    }

    /// Get the featured products for the home page.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Product>, ApiError> {
        let cache_key = "featured".to_string();

        if let Some(CacheValue::Featured(products)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products: Vec<Product> = self.api.get("/products/featured").await?;

        self.cache
            .insert(cache_key, CacheValue::Featured(products.clone()))
            .await;

        Ok(products)
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns a transport or server error.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.api.get("/categories").await?;

        self.cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Drop all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}
