//! HTTP client for the external payment gateway.
//!
//! The gateway confirms a `(payment_key, order_id, amount)` triple and
//! returns approval metadata. This crate only performs the confirm call;
//! period-end math lives in `mate_core::subscription` and persistence in
//! `mate-db`.

use serde::Deserialize;

/// Configuration for the payment gateway.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL of the gateway API.
    pub api_url: String,
    /// Secret key, sent as HTTP basic auth username per gateway convention.
    pub secret_key: String,
}

impl PaymentConfig {
    /// Load payment settings from environment variables.
    ///
    /// | Env Var              | Required | Default                         |
    /// |----------------------|----------|---------------------------------|
    /// | `PAYMENT_API_URL`    | no       | `https://api.tosspayments.com`  |
    /// | `PAYMENT_SECRET_KEY` | **yes**  | --                              |
    pub fn from_env() -> Self {
        let api_url = std::env::var("PAYMENT_API_URL")
            .unwrap_or_else(|_| "https://api.tosspayments.com".into());
        let secret_key =
            std::env::var("PAYMENT_SECRET_KEY").expect("PAYMENT_SECRET_KEY must be set");
        Self {
            api_url,
            secret_key,
        }
    }
}

/// Errors from the payment gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway rejected the confirmation.
    #[error("Payment gateway error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Approval metadata returned by a successful confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApproval {
    pub order_id: String,
    /// Gateway-side payment status, e.g. `DONE`.
    pub status: String,
    pub total_amount: i64,
    pub approved_at: Option<String>,
}

/// HTTP client for the payment gateway.
pub struct PaymentApi {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl PaymentApi {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Confirm a payment: the client-side checkout hands us a payment key,
    /// our order id, and the charged amount; the gateway verifies the
    /// triple and finalizes the charge.
    pub async fn confirm(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> Result<PaymentApproval, PaymentApiError> {
        let body = serde_json::json!({
            "paymentKey": payment_key,
            "orderId": order_id,
            "amount": amount,
        });

        let response = self
            .client
            .post(format!("{}/v1/payments/confirm", self.config.api_url))
            .basic_auth(&self.config.secret_key, Some(""))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_decodes_gateway_payload() {
        let payload = serde_json::json!({
            "orderId": "order-123",
            "status": "DONE",
            "totalAmount": 9900,
            "approvedAt": "2025-03-10T12:00:00+09:00",
        });
        let approval: PaymentApproval = serde_json::from_value(payload).unwrap();
        assert_eq!(approval.order_id, "order-123");
        assert_eq!(approval.status, "DONE");
        assert_eq!(approval.total_amount, 9900);
    }

    #[test]
    fn approval_tolerates_missing_approved_at() {
        let payload = serde_json::json!({
            "orderId": "order-123",
            "status": "IN_PROGRESS",
            "totalAmount": 99000,
        });
        let approval: PaymentApproval = serde_json::from_value(payload).unwrap();
        assert_eq!(approval.approved_at, None);
    }
}
