use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum! {
    PaymentType {
        Payment => "payment",
        Tip => "tip",
    }
}

string_enum! {
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub master_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    pub payment_type: PaymentType,
    pub ton_transaction_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    pub client_id: Option<Uuid>,
    pub master_id: Option<Uuid>,
    pub amount: f64,
    pub currency: String,
    pub payment_type: String,
    pub ton_transaction_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: String,
}
