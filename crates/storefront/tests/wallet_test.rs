mod common;

use common::{system, system_with_gateway, user, DISTRICT};
use storefront::model::TransactionStatus;
use storefront::services::payments::{ChargeOutcome, MockPaymentGateway, PaymentError};
use storefront::services::WalletServiceError;
use testresult::TestResult;

#[tokio::test]
async fn successful_purchase_credits_coins_and_records_it() -> TestResult {
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_charge()
        .withf(|amount, card| *amount == 1_000 && card.eq("pm_card_visa"))
        .times(1)
        .returning(|_, _| Ok(ChargeOutcome::Succeeded));
    let system = system_with_gateway(gateway);
    let buyer = user(&system, "Dara", DISTRICT).await?;

    let receipt = system.wallet.purchase(buyer, 1_000, "pm_card_visa").await?;
    assert_eq!(receipt.coins, 1_000);
    assert_eq!(receipt.balance, 1_000);
    assert_eq!(system.wallet.balance(buyer).await?, 1_000);

    let history = system.wallet.history(buyer, 1).await?;
    assert_eq!(history.total, 1);
    assert_eq!(history.items[0].id, receipt.transaction);
    assert_eq!(history.items[0].status, TransactionStatus::Succeeded);
    assert_eq!(history.items[0].amount_cents, 1_000);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn gateway_failure_is_recorded_and_credits_nothing() -> TestResult {
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_charge()
        .returning(|_, _| Err(PaymentError::UnexpectedResponse("missing clientSecret".into())));
    let system = system_with_gateway(gateway);
    let buyer = user(&system, "Dara", DISTRICT).await?;

    let result = system.wallet.purchase(buyer, 300, "pm_card_visa").await;
    assert!(matches!(result, Err(WalletServiceError::Payment(_))));
    assert_eq!(system.wallet.balance(buyer).await?, 0);

    let history = system.wallet.history(buyer, 1).await?;
    assert_eq!(history.items[0].status, TransactionStatus::Failed);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn history_is_paged_per_user() -> TestResult {
    let mut gateway = MockPaymentGateway::new();
    gateway
        .expect_charge()
        .times(10)
        .returning(|_, _| Ok(ChargeOutcome::Succeeded));
    let system = system_with_gateway(gateway);
    let buyer = user(&system, "Dara", DISTRICT).await?;
    let other = user(&system, "Lina", DISTRICT).await?;

    for _ in 0..9 {
        system.wallet.purchase(buyer, 100, "pm_card_visa").await?;
    }
    system.wallet.purchase(other, 100, "pm_card_visa").await?;

    let first = system.wallet.history(buyer, 1).await?;
    assert_eq!(first.total, 9);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items.len(), 8);
    assert!(first.items.iter().all(|txn| txn.user == buyer));
    assert_eq!(system.wallet.history(buyer, 2).await?.items.len(), 1);
    assert_eq!(system.wallet.balance(buyer).await?, 900);

    system.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn purchase_without_a_wallet_is_refused_before_charging() -> TestResult {
    // The default gateway mock fails the test on any call
    let system = system();
    let unknown = storefront::model::UserId(99);

    let result = system.wallet.purchase(unknown, 500, "pm_card_visa").await;
    assert!(matches!(result, Err(WalletServiceError::Wallet(_))));

    system.shutdown().await?;
    Ok(())
}
