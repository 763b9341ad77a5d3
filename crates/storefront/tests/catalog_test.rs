mod common;

use common::{listing, product, system, user, DISTRICT};
use storefront::model::{ProductKind, ProductStatus};
use storefront::services::CatalogQuery;
use testresult::TestResult;

#[tokio::test]
async fn shop_pages_hide_what_cannot_be_bought() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    for i in 0..13 {
        product(&system, seller, &format!("Shirt {i}"), 20, 0, 1).await?;
    }
    product(&system, seller, "Sold Out Shirt", 20, 0, 0).await?;
    let mut hidden = listing(seller, "Hidden Shirt", 20, 0, 4);
    hidden.status = ProductStatus::Unavailable;
    system.tables.products.create_product(hidden).await?;

    let first = system.catalog.browse(CatalogQuery::page(1)).await?;
    assert_eq!(first.total, 13);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items.len(), 12);

    let second = system.catalog.browse(CatalogQuery::page(2)).await?;
    assert_eq!(second.items.len(), 1);
    assert!(first
        .items
        .iter()
        .chain(&second.items)
        .all(|p| p.name.starts_with("Shirt")));

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn search_and_category_narrow_the_shop() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    product(&system, seller, "Denim Jacket", 100, 0, 1).await?;
    product(&system, seller, "Leather jacket", 300, 0, 1).await?;
    let mut lamp = listing(seller, "Desk Lamp", 40, 0, 1);
    lamp.category = "home".into();
    system.tables.products.create_product(lamp).await?;

    let jackets = system
        .catalog
        .browse(CatalogQuery {
            search: Some(" JACKET ".into()),
            ..CatalogQuery::page(1)
        })
        .await?;
    assert_eq!(jackets.total, 2);

    let home = system
        .catalog
        .browse(CatalogQuery {
            category: Some("home".into()),
            ..CatalogQuery::page(1)
        })
        .await?;
    assert_eq!(home.total, 1);
    assert_eq!(home.items[0].name, "Desk Lamp");

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn collections_are_listed_apart_from_products() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    product(&system, seller, "Denim Jacket", 100, 0, 1).await?;
    let mut bundle = listing(seller, "Winter Bundle", 500, 20, 1);
    bundle.kind = ProductKind::Collection;
    system.tables.products.create_product(bundle).await?;

    let collections = system.catalog.collections(1).await?;
    assert_eq!(collections.total, 1);
    assert_eq!(collections.items[0].name, "Winter Bundle");

    let home = system.catalog.home().await?;
    assert_eq!(home.products.len(), 1);
    assert_eq!(home.collections.len(), 1);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn product_detail_carries_seller_and_related() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    let jacket = product(&system, seller, "Denim Jacket", 100, 0, 1).await?;
    product(&system, seller, "Boots", 80, 0, 1).await?;
    product(&system, seller, "Scarf", 15, 0, 1).await?;

    let detail = system.catalog.product_detail(jacket).await?;
    assert_eq!(detail.product.id, jacket);
    assert_eq!(
        detail.seller.as_ref().map(|profile| profile.display_name()),
        Some("Sok")
    );
    assert_eq!(detail.related.len(), 2);
    assert!(detail.related.iter().all(|p| p.id != jacket));

    assert_eq!(system.catalog.new_arrivals().await?.len(), 3);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn quick_buy_lists_every_purchasable_product_unpaged() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    for i in 0..14 {
        product(&system, seller, &format!("Shirt {i}"), 20, 0, 1).await?;
    }
    product(&system, seller, "Sold Out Shirt", 20, 0, 0).await?;
    let mut bundle = listing(seller, "Winter Bundle", 500, 20, 1);
    bundle.kind = ProductKind::Collection;
    system.tables.products.create_product(bundle).await?;

    let everything = system.catalog.quick_buy().await?;
    assert_eq!(everything.len(), 14);
    assert!(everything
        .iter()
        .all(|p| p.kind == ProductKind::Product && p.stock > 0));

    system.shutdown().await?;
    Ok(())
}
