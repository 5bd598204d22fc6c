use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::{
        payment::{Payment, PaymentRequest, PaymentStatus, PaymentType},
        user::UserRole,
    },
    repositories::{PaymentRepository, UserRepository},
};

use super::require_role;

/// Payments are recorded and updated, never deleted.
pub struct PaymentUsecase {
    payments: Arc<dyn PaymentRepository>,
    users: Arc<dyn UserRepository>,
}

fn parse_status(raw: &str) -> MarketResult<PaymentStatus> {
    raw.parse::<PaymentStatus>()
        .map_err(|_| MarketError::validation("invalid payment status"))
}

impl PaymentUsecase {
    pub fn new(payments: Arc<dyn PaymentRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { payments, users }
    }

    pub async fn get_payment(&self, id: Uuid) -> MarketResult<Payment> {
        self.payments
            .get_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("payment not found"))
    }

    async fn validate(&self, request: &PaymentRequest) -> MarketResult<(PaymentType, PaymentStatus)> {
        if request.amount <= 0.0 {
            return Err(MarketError::validation("amount must be positive"));
        }
        let payment_type = request
            .payment_type
            .parse::<PaymentType>()
            .map_err(|_| MarketError::validation("invalid payment type"))?;
        let status = parse_status(&request.status)?;

        if let Some(client_id) = request.client_id {
            if self.users.get_by_id(client_id).await?.is_none() {
                return Err(MarketError::validation("invalid client_id"));
            }
        }
        if let Some(master_id) = request.master_id {
            require_role(
                self.users.as_ref(),
                master_id,
                UserRole::Master,
                "invalid master_id",
                "master_id must refer to a master",
            )
            .await?;
        }
        Ok((payment_type, status))
    }

    pub async fn create_payment(&self, request: PaymentRequest) -> MarketResult<Payment> {
        let (payment_type, status) = self.validate(&request).await?;

        let payment = Payment {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            master_id: request.master_id,
            amount: request.amount,
            currency: request.currency,
            payment_type,
            ton_transaction_id: request.ton_transaction_id,
            status,
            created_at: Utc::now(),
        };
        self.payments.create(&payment).await?;

        info!(
            "Recorded {} {} {} ({})",
            payment.payment_type, payment.amount, payment.currency, payment.id
        );
        Ok(payment)
    }

    pub async fn update_payment(&self, id: Uuid, request: PaymentRequest) -> MarketResult<Payment> {
        let (payment_type, status) = self.validate(&request).await?;
        let existing = self.get_payment(id).await?;

        let payment = Payment {
            client_id: request.client_id,
            master_id: request.master_id,
            amount: request.amount,
            currency: request.currency,
            payment_type,
            ton_transaction_id: request.ton_transaction_id,
            status,
            ..existing
        };
        self.payments.update(&payment).await?;
        Ok(payment)
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> MarketResult<Payment> {
        let status = parse_status(status)?;

        let mut payment = self.get_payment(id).await?;
        payment.status = status;
        self.payments.update(&payment).await?;

        info!("Payment {} is now {}", id, status);
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockPaymentRepository, MockUserRepository};
    use rstest::rstest;

    fn request() -> PaymentRequest {
        PaymentRequest {
            amount: 12.5,
            currency: "TON".to_string(),
            payment_type: "tip".to_string(),
            status: "pending".to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(0.0, "tip", "pending", "amount must be positive")]
    #[case(5.0, "gift", "pending", "invalid payment type")]
    #[case(5.0, "payment", "refunded", "invalid payment status")]
    #[tokio::test]
    async fn create_validates_fields(
        #[case] amount: f64,
        #[case] payment_type: &str,
        #[case] status: &str,
        #[case] message: &str,
    ) {
        let mut payments = MockPaymentRepository::new();
        payments.expect_create().times(0);
        let uc = PaymentUsecase::new(Arc::new(payments), Arc::new(MockUserRepository::new()));

        let req = PaymentRequest {
            amount,
            payment_type: payment_type.to_string(),
            status: status.to_string(),
            ..request()
        };
        let err = uc.create_payment(req).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Validation error: {}", message));
    }

    #[tokio::test]
    async fn create_rejects_unknown_client() {
        let mut users = MockUserRepository::new();
        users.expect_get_by_id().returning(|_| Ok(None));
        let uc = PaymentUsecase::new(Arc::new(MockPaymentRepository::new()), Arc::new(users));

        let req = PaymentRequest {
            client_id: Some(Uuid::new_v4()),
            ..request()
        };
        let err = uc.create_payment(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: invalid client_id");
    }

    #[tokio::test]
    async fn create_without_parties_is_recorded() {
        let mut payments = MockPaymentRepository::new();
        payments.expect_create().times(1).returning(|_| Ok(()));
        let uc = PaymentUsecase::new(Arc::new(payments), Arc::new(MockUserRepository::new()));

        let payment = uc.create_payment(request()).await.unwrap();
        assert_eq!(payment.payment_type, PaymentType::Tip);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }
}
