#![allow(dead_code)]

use std::sync::Arc;
use storefront::config::Settings;
use storefront::lifecycle::StorefrontSystem;
use storefront::model::{
    ProductCreate, ProductId, ProductKind, ProductStatus, Role, ShippingDetails, UserId,
};
use storefront::services::payments::MockPaymentGateway;
use storefront::services::{ProfileForm, SignUp};
use testresult::TestResult;

pub const DISTRICT: &str = "Meanchey";

/// A full system whose payment gateway expects no calls.
pub fn system() -> StorefrontSystem {
    system_with_gateway(MockPaymentGateway::new())
}

pub fn system_with_gateway(gateway: MockPaymentGateway) -> StorefrontSystem {
    StorefrontSystem::new(&Settings::default(), Arc::new(gateway))
}

/// Signs up a user with a complete profile living in `district`.
pub async fn user(system: &StorefrontSystem, name: &str, district: &str) -> TestResult<UserId> {
    let email = format!("{}@example.com", name.to_lowercase());
    let user = system
        .identity
        .sign_up(SignUp {
            email: email.clone(),
            password: "secret123".into(),
            confirm_password: "secret123".into(),
        })
        .await?;
    system
        .identity
        .update_profile(
            user,
            ProfileForm {
                name: name.into(),
                email,
                phone: "012345678".into(),
                address: district.into(),
                avatar: None,
                password: None,
            },
        )
        .await?;
    Ok(user)
}

pub async fn courier(system: &StorefrontSystem, name: &str, district: &str) -> TestResult<UserId> {
    let courier = user(system, name, district).await?;
    system.identity.assign_role(courier, Role::Delivery).await?;
    Ok(courier)
}

pub fn listing(owner: UserId, name: &str, price: u64, discount: u8, stock: u32) -> ProductCreate {
    ProductCreate {
        owner,
        name: name.into(),
        description: format!("{name} in good shape"),
        price,
        discount,
        stock,
        category: "clothing".into(),
        brand: "Levi's".into(),
        condition: 90,
        usage: "1 year".into(),
        other_message: String::new(),
        status: ProductStatus::Available,
        kind: ProductKind::Product,
        image_url: None,
        sub_images: Vec::new(),
    }
}

pub async fn product(
    system: &StorefrontSystem,
    owner: UserId,
    name: &str,
    price: u64,
    discount: u8,
    stock: u32,
) -> TestResult<ProductId> {
    Ok(system
        .tables
        .products
        .create_product(listing(owner, name, price, discount, stock))
        .await?)
}

pub async fn fund(system: &StorefrontSystem, user: UserId, coins: u64) -> TestResult {
    system.tables.wallets.credit(user, coins).await?;
    Ok(())
}

pub fn shipping(district: &str) -> ShippingDetails {
    ShippingDetails {
        full_name: "Dara Chan".into(),
        address: district.into(),
        phone_number: "012345678".into(),
        note: Some("Leave at the gate".into()),
    }
}
