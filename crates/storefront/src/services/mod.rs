//! # Workflow Services
//!
//! The storefront's flows, each a sequence of awaited calls against the
//! table clients. Services are cheap to clone; they hold clients and
//! configuration only.
//!
//! - [`catalog`]: shop grid, collections, strips, product detail
//! - [`cart`]: cart maintenance and the per-seller cart view
//! - [`coupon`]: coupon lookup with debounced input
//! - [`checkout`]: cart to order
//! - [`fulfilment`]: sales, purchases, the delivery board and status changes
//! - [`inventory`]: seller listings and their images
//! - [`wallet`]: coin purchases and history
//! - [`identity`] and [`auth`]: accounts, sessions and profiles
//! - [`reviews`]: user reviews
//! - [`payments`]: the card payment gateway

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod fulfilment;
pub mod identity;
pub mod inventory;
pub mod payments;
pub mod reviews;
pub mod wallet;

pub use auth::{AuthError, AuthProvider, LocalAuth, Session};
pub use cart::{CartService, CartServiceError};
pub use catalog::{CatalogError, CatalogPage, CatalogQuery, CatalogService, ProductDetail};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService};
pub use coupon::{CouponPreview, CouponService};
pub use fulfilment::{DeliveryStats, FulfilmentError, FulfilmentService, OrderPage, OrderView};
pub use identity::{CurrentUser, IdentityError, IdentityService, PasswordChange, ProfileForm, SignUp};
pub use inventory::{
    ImageSource, InventoryError, InventoryService, ListingEdit, ListingForm, NewListing,
};
pub use payments::{ChargeOutcome, HttpPaymentGateway, PaymentError, PaymentGateway};
pub use reviews::{ReviewPage, ReviewService};
pub use wallet::{PurchaseReceipt, Quote, TransactionPage, WalletService, WalletServiceError};
