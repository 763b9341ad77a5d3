//! A real order table against scripted product and wallet tables. The
//! wallet client looks the wallet up by user before every balance action,
//! so each credit or debit expects a `list` followed by an `action`.

use record_store::mock::MockTable;
use record_store::{Page, StoreError};
use storefront::clients::{OrderClient, ProductClient, RecordClient, WalletClient};
use storefront::model::{
    OrderCreate, OrderItem, OrderStatus, PaymentStatus, Product, ProductId, Role, ShippingDetails,
    UserId, Wallet, WalletId,
};
use storefront::order_actor::{OrderContext, OrderError};
use storefront::product_actor::ProductError;
use storefront::wallet_actor::WalletError;
use testresult::TestResult;
use tokio::task::JoinHandle;

const BUYER: UserId = UserId(1);
const SELLER: UserId = UserId(2);

fn wallet_of(user: UserId, balance: u64) -> Page<Wallet> {
    Page {
        items: vec![Wallet {
            id: WalletId(user.0),
            user,
            balance,
        }],
        total: 1,
    }
}

fn two_item_order() -> OrderCreate {
    OrderCreate {
        buyer: BUYER,
        seller: SELLER,
        items: vec![
            OrderItem {
                product: ProductId(10),
                quantity: 2,
                price: 100,
                discount: 0,
            },
            OrderItem {
                product: ProductId(11),
                quantity: 1,
                price: 60,
                discount: 50,
            },
        ],
        subtotal: 230,
        discount: 0,
        total: 230,
        coupon: None,
        shipping: ShippingDetails {
            full_name: "Dara Chan".into(),
            address: "Meanchey".into(),
            phone_number: "012345678".into(),
            note: None,
        },
    }
}

fn spawn_orders(
    products: &MockTable<Product>,
    wallets: &MockTable<Wallet>,
) -> (OrderClient, JoinHandle<()>) {
    let (table, client) = storefront::order_actor::new(8);
    let context = OrderContext {
        products: ProductClient::new(products.client()),
        wallets: WalletClient::new(wallets.client()),
    };
    (OrderClient::new(client), tokio::spawn(table.run(context)))
}

#[tokio::test]
async fn create_debits_buyer_then_takes_stock() -> TestResult {
    let mut products = MockTable::<Product>::new();
    let mut wallets = MockTable::<Wallet>::new();
    wallets.expect_list().return_ok(wallet_of(BUYER, 500));
    wallets.expect_action(WalletId(1)).return_ok(270);
    products.expect_action(ProductId(10)).return_ok(3);
    products.expect_action(ProductId(11)).return_ok(0);

    let (orders, handle) = spawn_orders(&products, &wallets);
    let id = orders.create_order(two_item_order()).await?;

    let order = orders.fetch(id).await?;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    assert_eq!(order.total, 230);
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}

#[tokio::test]
async fn failed_decrement_restores_taken_stock_and_refunds() -> TestResult {
    let mut products = MockTable::<Product>::new();
    let mut wallets = MockTable::<Wallet>::new();
    wallets.expect_list().return_ok(wallet_of(BUYER, 500));
    wallets.expect_action(WalletId(1)).return_ok(270);
    products.expect_action(ProductId(10)).return_ok(3);
    products
        .expect_action(ProductId(11))
        .return_err(StoreError::Record(Box::new(ProductError::InsufficientStock {
            requested: 1,
            available: 0,
        })));
    // Rollback: the first item goes back, then the buyer is refunded
    products.expect_action(ProductId(10)).return_ok(5);
    wallets.expect_list().return_ok(wallet_of(BUYER, 270));
    wallets.expect_action(WalletId(1)).return_ok(500);

    let (orders, handle) = spawn_orders(&products, &wallets);
    let result = orders.create_order(two_item_order()).await;

    assert_eq!(
        result,
        Err(OrderError::Stock(ProductError::InsufficientStock {
            requested: 1,
            available: 0
        }))
    );
    assert_eq!(orders.count(Default::default()).await?, 0);
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}

#[tokio::test]
async fn declined_debit_touches_no_stock() -> TestResult {
    let products = MockTable::<Product>::new();
    let mut wallets = MockTable::<Wallet>::new();
    wallets.expect_list().return_ok(wallet_of(BUYER, 100));
    wallets
        .expect_action(WalletId(1))
        .return_err(StoreError::Record(Box::new(WalletError::InsufficientBalance {
            required: 230,
            available: 100,
        })));

    let (orders, handle) = spawn_orders(&products, &wallets);
    let result = orders.create_order(two_item_order()).await;

    assert_eq!(
        result,
        Err(OrderError::Payment(WalletError::InsufficientBalance {
            required: 230,
            available: 100
        }))
    );
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}

#[tokio::test]
async fn mismatched_totals_are_rejected_before_any_charge() -> TestResult {
    let products = MockTable::<Product>::new();
    let wallets = MockTable::<Wallet>::new();
    let (orders, handle) = spawn_orders(&products, &wallets);

    let mut params = two_item_order();
    params.total = 200;
    assert!(matches!(
        orders.create_order(params).await,
        Err(OrderError::Invalid(_))
    ));
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}

#[tokio::test]
async fn cancel_restores_every_item_and_refunds_the_total() -> TestResult {
    let mut products = MockTable::<Product>::new();
    let mut wallets = MockTable::<Wallet>::new();
    wallets.expect_list().return_ok(wallet_of(BUYER, 500));
    wallets.expect_action(WalletId(1)).return_ok(270);
    products.expect_action(ProductId(10)).return_ok(3);
    products.expect_action(ProductId(11)).return_ok(0);

    let (orders, handle) = spawn_orders(&products, &wallets);
    let id = orders.create_order(two_item_order()).await?;
    products.verify();
    wallets.verify();

    // Confirming has no side effects
    orders
        .transition(id, OrderStatus::Confirmed, SELLER, Role::User)
        .await?;

    products.expect_action(ProductId(10)).return_ok(5);
    products.expect_action(ProductId(11)).return_ok(1);
    wallets.expect_list().return_ok(wallet_of(BUYER, 270));
    wallets.expect_action(WalletId(1)).return_ok(500);

    let from = orders
        .transition(id, OrderStatus::Canceled, SELLER, Role::User)
        .await?;
    assert_eq!(from, OrderStatus::Confirmed);

    let order = orders.fetch(id).await?;
    assert_eq!(order.status, OrderStatus::Canceled);
    assert_eq!(order.payment_status, PaymentStatus::Refunded);
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}

#[tokio::test]
async fn failed_refund_keeps_the_order_as_it_was() -> TestResult {
    let mut products = MockTable::<Product>::new();
    let mut wallets = MockTable::<Wallet>::new();
    wallets.expect_list().return_ok(wallet_of(BUYER, 500));
    wallets.expect_action(WalletId(1)).return_ok(270);
    products.expect_action(ProductId(10)).return_ok(3);
    products.expect_action(ProductId(11)).return_ok(0);

    let (orders, handle) = spawn_orders(&products, &wallets);
    let id = orders.create_order(two_item_order()).await?;

    products.expect_action(ProductId(10)).return_ok(5);
    products.expect_action(ProductId(11)).return_ok(1);
    wallets.expect_list().return_ok(Page::empty());

    let result = orders
        .transition(id, OrderStatus::Canceled, SELLER, Role::User)
        .await;
    assert_eq!(result, Err(OrderError::Payment(WalletError::NoWallet(BUYER))));

    let order = orders.fetch(id).await?;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Paid);
    products.verify();
    wallets.verify();

    drop(orders);
    handle.await?;
    Ok(())
}
