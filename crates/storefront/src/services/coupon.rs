//! Coupon lookup for the checkout form.

use crate::clients::CouponClient;
use crate::coupon_actor::CouponError;
use crate::model::{percent_of, Coupon};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Quiet period after the last keystroke before a code is looked up.
pub const COUPON_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Forwards only the values that are followed by `quiet` without a newer
/// one. The last value is still delivered when the input closes.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    quiet: Duration,
) -> mpsc::Receiver<T> {
    let (sender, output) = mpsc::channel(1);
    tokio::spawn(async move {
        while let Some(mut latest) = input.recv().await {
            loop {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(value) => latest = value,
                        None => {
                            let _ = sender.send(latest).await;
                            return;
                        }
                    },
                    _ = sleep(quiet) => break,
                }
            }
            if sender.send(latest).await.is_err() {
                return;
            }
        }
    });
    output
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponPreview {
    pub coupon: Coupon,
    pub discount: u64,
    pub total: u64,
}

#[derive(Clone)]
pub struct CouponService {
    coupons: CouponClient,
}

impl CouponService {
    pub fn new(coupons: CouponClient) -> Self {
        Self { coupons }
    }

    /// Exact, case-sensitive match. A blank code is no coupon.
    #[instrument(skip(self))]
    pub async fn lookup(&self, code: &str) -> Result<Option<Coupon>, CouponError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        self.coupons.find_by_name(code).await
    }

    /// What `code` would take off `subtotal`.
    pub async fn preview(
        &self,
        code: &str,
        subtotal: u64,
    ) -> Result<Option<CouponPreview>, CouponError> {
        Ok(self.lookup(code).await?.map(|coupon| {
            let discount = percent_of(subtotal, coupon.percent);
            CouponPreview {
                coupon,
                discount,
                total: subtotal - discount,
            }
        }))
    }

    /// Looks up each code that survives the quiet period.
    pub fn watch(
        &self,
        codes: mpsc::Receiver<String>,
        quiet: Duration,
    ) -> mpsc::Receiver<Result<Option<Coupon>, CouponError>> {
        let mut settled = debounce(codes, quiet);
        let (sender, results) = mpsc::channel(1);
        let service = self.clone();
        tokio::spawn(async move {
            while let Some(code) = settled.recv().await {
                debug!(code = %code, "Coupon code settled");
                if sender.send(service.lookup(&code).await).await.is_err() {
                    break;
                }
            }
        });
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon_actor;
    use crate::model::CouponCreate;

    const QUIET: Duration = Duration::from_millis(40);

    #[tokio::test]
    async fn a_burst_settles_on_its_last_value() {
        let (sender, input) = mpsc::channel(8);
        let mut output = debounce(input, QUIET);

        for code in ["S", "SA", "SAV", "SAVE10"] {
            sender.send(code.to_string()).await.unwrap();
        }
        assert_eq!(output.recv().await.as_deref(), Some("SAVE10"));

        sleep(QUIET * 2).await;
        sender.send("X".to_string()).await.unwrap();
        drop(sender);
        assert_eq!(output.recv().await.as_deref(), Some("X"));
        assert_eq!(output.recv().await, None);
    }

    #[tokio::test]
    async fn watched_codes_resolve_to_coupons() {
        let (table, client) = coupon_actor::new(8);
        tokio::spawn(table.run(()));
        let coupons = CouponClient::new(client);
        coupons
            .create_coupon(CouponCreate {
                name: "SAVE10".into(),
                percent: 10,
            })
            .await
            .unwrap();
        let service = CouponService::new(coupons);

        let (sender, codes) = mpsc::channel(8);
        let mut results = service.watch(codes, QUIET);
        sender.send("save10".to_string()).await.unwrap();
        assert_eq!(results.recv().await, Some(Ok(None)));

        sender.send("SAVE1".to_string()).await.unwrap();
        sender.send("SAVE10".to_string()).await.unwrap();
        let found = results.recv().await.unwrap().unwrap().unwrap();
        assert_eq!(found.percent, 10);
    }

    #[tokio::test]
    async fn preview_rounds_the_discount_down() {
        let (table, client) = coupon_actor::new(8);
        tokio::spawn(table.run(()));
        let coupons = CouponClient::new(client);
        coupons
            .create_coupon(CouponCreate {
                name: "SAVE15".into(),
                percent: 15,
            })
            .await
            .unwrap();
        let service = CouponService::new(coupons);

        let preview = service.preview("SAVE15", 999).await.unwrap().unwrap();
        assert_eq!(preview.discount, 149);
        assert_eq!(preview.total, 850);
        assert_eq!(service.preview("", 999).await.unwrap(), None);
    }
}
