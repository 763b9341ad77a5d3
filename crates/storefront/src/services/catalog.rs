//! Catalog reads: the shop grid, collections, strips and product detail.
//!
//! Every shopper-facing read goes through [`ProductFilter::storefront`], so a
//! product with no stock or a status other than `Available` never shows up,
//! newest first.

use crate::clients::{ProductClient, ProfileClient, RecordClient};
use crate::config::PageSizes;
use crate::model::{Product, ProductFilter, ProductId, ProductKind, Profile, UserId};
use crate::product_actor::ProductError;
use crate::profile_actor::ProfileError;
use record_store::{total_pages, Query};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

/// Products on each home page strip.
const HOME_STRIP: usize = 8;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// 1-based.
    pub page: usize,
    /// Page size; the shop's configured size when unset.
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub seller: Option<UserId>,
    pub kind: ProductKind,
}

impl CatalogQuery {
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    fn filter(&self) -> ProductFilter {
        ProductFilter {
            owner: self.seller,
            category: self.category.clone().filter(|c| !c.is_empty()),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            ..ProductFilter::storefront(self.kind)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlights {
    pub products: Vec<Product>,
    pub collections: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub seller: Option<Profile>,
    pub related: Vec<Product>,
}

#[derive(Clone)]
pub struct CatalogService {
    products: ProductClient,
    profiles: ProfileClient,
    pages: PageSizes,
}

impl CatalogService {
    pub fn new(products: ProductClient, profiles: ProfileClient, pages: PageSizes) -> Self {
        Self {
            products,
            profiles,
            pages,
        }
    }

    #[instrument(skip(self))]
    pub async fn browse(&self, query: CatalogQuery) -> Result<CatalogPage, CatalogError> {
        let default_limit = match query.kind {
            ProductKind::Product => self.pages.shop,
            ProductKind::Collection => self.pages.collections,
        };
        let limit = query.limit.unwrap_or(default_limit);
        let page = query.page.max(1);

        let result = self
            .products
            .list(Query::new(query.filter()).descending().page(page, limit))
            .await?;

        Ok(CatalogPage {
            total_pages: total_pages(result.total, limit),
            total: result.total,
            items: result.items,
            page,
        })
    }

    pub async fn collections(&self, page: usize) -> Result<CatalogPage, CatalogError> {
        self.browse(CatalogQuery {
            kind: ProductKind::Collection,
            ..CatalogQuery::page(page)
        })
        .await
    }

    pub async fn new_arrivals(&self) -> Result<Vec<Product>, CatalogError> {
        self.newest(ProductFilter::storefront(ProductKind::Product), self.pages.new_arrivals)
            .await
    }

    /// The newest products other than `product`.
    pub async fn related(&self, product: ProductId) -> Result<Vec<Product>, CatalogError> {
        let filter = ProductFilter {
            exclude: Some(product),
            ..ProductFilter::storefront(ProductKind::Product)
        };
        self.newest(filter, self.pages.related).await
    }

    pub async fn home(&self) -> Result<Highlights, CatalogError> {
        Ok(Highlights {
            products: self
                .newest(ProductFilter::storefront(ProductKind::Product), HOME_STRIP)
                .await?,
            collections: self
                .newest(ProductFilter::storefront(ProductKind::Collection), HOME_STRIP)
                .await?,
        })
    }

    /// Every purchasable product, unpaged.
    pub async fn quick_buy(&self) -> Result<Vec<Product>, CatalogError> {
        let query = Query::new(ProductFilter::storefront(ProductKind::Product)).descending();
        Ok(self.products.list(query).await?.items)
    }

    /// A single product with its seller. Unlike the listings this also
    /// returns products that are no longer for sale.
    #[instrument(skip(self))]
    pub async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        let product = self.products.fetch(id).await?;
        let seller = self.profiles.profile_of(product.owner).await?;
        let related = self.related(id).await?;
        Ok(ProductDetail {
            product,
            seller,
            related,
        })
    }

    async fn newest(
        &self,
        filter: ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, CatalogError> {
        let query = Query::new(filter).descending().limit(limit);
        Ok(self.products.list(query).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use record_store::mock::MockTable;
    use record_store::Page;

    #[tokio::test]
    async fn browse_asks_for_the_requested_window() {
        let mut products = MockTable::<Product>::new();
        products.expect_list().return_ok(Page {
            items: Vec::new(),
            total: 25,
        });
        let (_profile_table, profiles) = crate::profile_actor::new(1);

        let catalog = CatalogService::new(
            ProductClient::new(products.client()),
            ProfileClient::new(profiles),
            PageSizes::default(),
        );
        let page = catalog.browse(CatalogQuery::page(0)).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        products.verify();
    }

    #[test]
    fn blank_search_and_category_do_not_filter() {
        let query = CatalogQuery {
            search: Some("  ".into()),
            category: Some(String::new()),
            ..CatalogQuery::default()
        };
        let filter = query.filter();
        assert!(filter.search.is_none());
        assert!(filter.category.is_none());
        assert!(filter.purchasable);
        assert_eq!(filter.kind, Some(ProductKind::Product));
    }
}
