mod common;

use common::{system, user, DISTRICT};
use record_store::Query;
use storefront::clients::RecordClient;
use storefront::model::{ObjectFilter, ProductKind, ProductStatus, Upload, PRODUCT_IMAGES};
use storefront::product_actor::ProductError;
use storefront::services::{ImageSource, InventoryError, ListingEdit, ListingForm, NewListing};
use testresult::TestResult;

fn form(name: &str, price: u64) -> ListingForm {
    ListingForm {
        name: name.into(),
        description: "Barely used".into(),
        price,
        discount: 0,
        stock: 2,
        category: "clothing".into(),
        brand: "Uniqlo".into(),
        condition: 80,
        usage: "6 months".into(),
        other_message: String::new(),
        status: ProductStatus::Available,
        kind: ProductKind::Product,
    }
}

fn image(name: &str) -> Upload {
    Upload::new(name, "image/png", name.as_bytes().to_vec())
}

fn new_listing(name: &str, price: u64, subs: &[&str]) -> NewListing {
    NewListing {
        form: form(name, price),
        main_image: Some(image("main.png")),
        sub_images: subs.iter().map(|s| image(s)).collect(),
    }
}

fn product_images() -> ObjectFilter {
    ObjectFilter {
        bucket: Some(PRODUCT_IMAGES.to_string()),
        ..ObjectFilter::default()
    }
}

#[tokio::test]
async fn listing_needs_a_main_image_and_three_sub_images() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;

    let result = system
        .inventory
        .create_listing(seller, new_listing("Coat", 100, &["a.png", "b.png"]))
        .await;
    assert!(matches!(result, Err(InventoryError::SubImageCount(2))));

    let mut no_main = new_listing("Coat", 100, &["a.png", "b.png", "c.png"]);
    no_main.main_image = None;
    assert!(matches!(
        system.inventory.create_listing(seller, no_main).await,
        Err(InventoryError::MissingMainImage)
    ));
    assert_eq!(system.tables.storage.count(product_images()).await?, 0);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn created_listing_points_at_its_uploads() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;

    let product = system
        .inventory
        .create_listing(seller, new_listing("Coat", 100, &["a.png", "b.png", "c.png"]))
        .await?;

    assert_eq!(product.owner, seller);
    assert_eq!(product.sub_images.len(), 3);
    let main = product.image_url.as_deref().ok_or("main image missing")?;
    assert!(main.starts_with("http://localhost:54321/storage/v1/object/public/product-images/products/"));
    assert!(main.ends_with("_main.png"));
    assert_eq!(system.tables.storage.count(product_images()).await?, 4);
    assert_eq!(system.inventory.seller_products(seller).await?.len(), 1);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn rejected_listing_leaves_no_files_behind() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;

    // A zero price is refused by the product table after the uploads
    let result = system
        .inventory
        .create_listing(seller, new_listing("Coat", 0, &["a.png", "b.png", "c.png"]))
        .await;

    assert!(matches!(
        result,
        Err(InventoryError::Product(ProductError::Invalid(_)))
    ));
    assert_eq!(system.tables.storage.count(product_images()).await?, 0);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn edit_replaces_images_and_removes_the_stale_files() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    let original = system
        .inventory
        .create_listing(seller, new_listing("Coat", 100, &["a.png", "b.png", "c.png"]))
        .await?;

    let edited = system
        .inventory
        .update_listing(
            seller,
            original.id,
            ListingEdit {
                form: form("Wool Coat", 120),
                main_image: Some(image("cover.png")),
                sub_images: Some(vec![
                    ImageSource::Existing(original.sub_images[1].clone()),
                    ImageSource::Existing(original.sub_images[2].clone()),
                    ImageSource::Upload(image("d.png")),
                ]),
            },
        )
        .await?;

    assert_eq!(edited.name, "Wool Coat");
    assert_eq!(edited.price, 120);
    assert_ne!(edited.image_url, original.image_url);
    assert_eq!(edited.sub_images[..2], original.sub_images[1..]);
    assert!(edited.sub_images[2].ends_with("_d.png"));

    // Old main image and the dropped sub-image are gone
    assert_eq!(system.tables.storage.count(product_images()).await?, 4);
    let paths = system.tables.storage.list(Query::new(product_images())).await?;
    assert!(paths.items.iter().all(|object| !object.path.ends_with("_main.png")));
    assert!(paths.items.iter().all(|object| !object.path.ends_with("_a.png")));

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn only_the_owner_edits_a_listing() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    let other = user(&system, "Lina", DISTRICT).await?;
    let product = system
        .inventory
        .create_listing(seller, new_listing("Coat", 100, &["a.png", "b.png", "c.png"]))
        .await?;

    let result = system
        .inventory
        .update_listing(
            other,
            product.id,
            ListingEdit {
                form: form("Mine Now", 1),
                main_image: None,
                sub_images: None,
            },
        )
        .await;
    assert!(matches!(result, Err(InventoryError::NotOwner(id)) if id == product.id));

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn deleting_a_listing_removes_it_and_its_images() -> TestResult {
    let system = system();
    let seller = user(&system, "Sok", DISTRICT).await?;
    let buyer = user(&system, "Dara", DISTRICT).await?;
    let product = system
        .inventory
        .create_listing(seller, new_listing("Coat", 100, &["a.png", "b.png", "c.png"]))
        .await?;
    system.cart.add(buyer, product.id, 1).await?;

    assert!(matches!(
        system.inventory.delete_listing(buyer, product.id).await,
        Err(InventoryError::NotOwner(id)) if id == product.id
    ));
    assert_eq!(system.tables.storage.count(product_images()).await?, 4);

    system.inventory.delete_listing(seller, product.id).await?;

    assert!(matches!(
        system.tables.products.fetch(product.id).await,
        Err(ProductError::NotFound(_))
    ));
    assert_eq!(system.tables.storage.count(product_images()).await?, 0);
    assert!(system.inventory.seller_products(seller).await?.is_empty());
    // The buyer's cart row for it no longer shows up
    assert!(system.cart.carts(buyer).await?.is_empty());

    system.shutdown().await?;
    Ok(())
}
