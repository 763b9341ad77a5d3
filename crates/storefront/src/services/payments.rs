//! Card payments through the payment-intent HTTP service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Outcome of a confirmed payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Succeeded,
    /// The processor answered with a status other than `succeeded`.
    Declined(String),
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected payment response: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges `amount_cents` to the card identified by `card`.
    async fn charge(&self, amount_cents: u64, card: &str) -> Result<ChargeOutcome, PaymentError>;
}

/// Client of the payment-intent endpoints.
///
/// A charge is two requests: `create-payment-intent` with the amount in
/// major currency units, which answers with a client secret, then
/// `confirm-payment-intent` with that secret and the card.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    endpoint: String,
    http: Client,
}

impl HttpPaymentGateway {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PaymentError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        route: &str,
        body: serde_json::Value,
    ) -> Result<T, PaymentError> {
        let url = format!("{}/api/{route}", self.endpoint);
        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentError::UnexpectedResponse(format!(
                "{route} failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[instrument(skip(self, card))]
    async fn charge(&self, amount_cents: u64, card: &str) -> Result<ChargeOutcome, PaymentError> {
        let amount = amount_cents as f64 / 100.0;
        let intent: IntentResponse = self
            .post(
                "create-payment-intent",
                serde_json::json!({ "amount": amount }),
            )
            .await?;
        debug!("Payment intent created");

        let confirmed: ConfirmResponse = self
            .post(
                "confirm-payment-intent",
                serde_json::json!({
                    "clientSecret": intent.client_secret,
                    "card": card,
                }),
            )
            .await?;

        if confirmed.status == "succeeded" {
            info!("Payment succeeded");
            Ok(ChargeOutcome::Succeeded)
        } else {
            warn!(status = %confirmed.status, "Payment not completed");
            Ok(ChargeOutcome::Declined(confirmed.status))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentResponse {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ConfirmResponse {
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_response_reads_camel_case_secret() {
        let parsed: IntentResponse =
            serde_json::from_str(r#"{"clientSecret":"pi_123_secret"}"#).unwrap();
        assert_eq!(parsed.client_secret, "pi_123_secret");
    }

    #[test]
    fn endpoint_trailing_slash_is_dropped() {
        let gateway =
            HttpPaymentGateway::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.endpoint, "http://localhost:5000");
    }
}
