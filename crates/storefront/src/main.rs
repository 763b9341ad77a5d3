//! Walks one order from listing to delivery against an in-process store.
//!
//! ```bash
//! cargo run -p storefront -- --log-format json
//! ```

use record_store::tracing::setup_tracing;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::StorefrontSystem;
use storefront::model::{
    CouponCreate, OrderStatus, ProductKind, ProductStatus, Role, ShippingDetails, Upload, UserId,
};
use storefront::services::{
    CheckoutRequest, ListingForm, NewListing, ProfileForm, SignUp,
};
use tracing::{info, warn, Instrument};

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

const DISTRICT: &str = "Meanchey";

async fn sign_up(system: &StorefrontSystem, email: &str, name: &str) -> DemoResult<UserId> {
    let user = system
        .identity
        .sign_up(SignUp {
            email: email.to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
        })
        .await?;
    system
        .identity
        .update_profile(
            user,
            ProfileForm {
                name: name.to_string(),
                email: email.to_string(),
                phone: "012345678".to_string(),
                address: DISTRICT.to_string(),
                avatar: None,
                password: None,
            },
        )
        .await?;
    Ok(user)
}

fn image(name: &str) -> Upload {
    Upload::new(name, "image/png", name.as_bytes().to_vec())
}

#[tokio::main]
async fn main() -> DemoResult<()> {
    let config = StorefrontConfig::load()?;
    setup_tracing(&config.logging.log_level, config.logging.log_format.into());
    let settings = config.settings();

    info!("Starting storefront");
    let system = StorefrontSystem::start(&settings)?;

    let (seller, buyer, courier) = async {
        let seller = sign_up(&system, "sok@example.com", "Sok").await?;
        let buyer = sign_up(&system, "dara@example.com", "Dara").await?;
        let courier = sign_up(&system, "vuthy@example.com", "Vuthy").await?;
        system.identity.assign_role(courier, Role::Delivery).await?;
        DemoResult::Ok((seller, buyer, courier))
    }
    .instrument(tracing::info_span!("accounts"))
    .await?;

    let product = system
        .inventory
        .create_listing(
            seller,
            NewListing {
                form: ListingForm {
                    name: "Vintage Denim Jacket".to_string(),
                    description: "Worn twice".to_string(),
                    price: 250,
                    discount: 10,
                    stock: 3,
                    category: "clothing".to_string(),
                    brand: "Levi's".to_string(),
                    condition: 90,
                    usage: "1 month".to_string(),
                    other_message: String::new(),
                    status: ProductStatus::Available,
                    kind: ProductKind::Product,
                },
                main_image: Some(image("jacket.png")),
                sub_images: vec![image("front.png"), image("back.png"), image("tag.png")],
            },
        )
        .instrument(tracing::info_span!("listing"))
        .await?;
    info!(product = %product.id, url = ?product.image_url, "Listing live");

    match system.wallet.purchase(buyer, 1_000, "pm_card_visa").await {
        Ok(receipt) => info!(balance = receipt.balance, "Coins bought"),
        Err(e) => {
            warn!(error = %e, "Payment service unavailable, crediting welcome coins instead");
            system.tables.wallets.credit(buyer, 1_000).await?;
        }
    }

    system
        .tables
        .coupons
        .create_coupon(CouponCreate {
            name: "WELCOME10".to_string(),
            percent: 10,
        })
        .await?;

    let order = async {
        system.cart.add(buyer, product.id, 2).await?;
        let order = system
            .checkout
            .place_order(CheckoutRequest {
                buyer,
                seller,
                shipping: ShippingDetails {
                    full_name: "Dara".to_string(),
                    address: DISTRICT.to_string(),
                    phone_number: "012345678".to_string(),
                    note: None,
                },
                coupon_code: Some("WELCOME10".to_string()),
            })
            .await?;
        DemoResult::Ok(order)
    }
    .instrument(tracing::info_span!("checkout"))
    .await?;
    info!(order = %order.id, total = order.total, discount = order.discount, "Order placed");

    async {
        system
            .fulfilment
            .seller_update(seller, order.id, OrderStatus::Confirmed)
            .await?;
        for step in [
            OrderStatus::Pickup,
            OrderStatus::Delivering,
            OrderStatus::Completed,
        ] {
            system
                .fulfilment
                .courier_update(courier, order.id, step)
                .await?;
        }
        DemoResult::Ok(())
    }
    .instrument(tracing::info_span!("delivery"))
    .await?;

    let stats = system.fulfilment.delivery_stats().await?;
    info!(
        today = stats.today,
        completed = stats.completed,
        buyer_balance = system.wallet.balance(buyer).await?,
        seller_balance = system.wallet.balance(seller).await?,
        "Order delivered"
    );

    system.shutdown().await?;
    info!("Storefront stopped");
    Ok(())
}
