use chrono::{DateTime, FixedOffset};

use crate::domain::value::{DeliveryStatusCode, ErrorCode, MessageId, Money};

#[derive(Debug, Clone, PartialEq)]
pub struct SendResponse {
    pub id: MessageId,
    /// Number of billed message parts.
    pub count: u32,
    pub cost: Option<Money>,
    /// Account balance after the send, when reported.
    pub balance: Option<Money>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostResponse {
    pub count: u32,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResponse {
    pub balance: Money,
    pub credit: Option<Money>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub code: DeliveryStatusCode,
    /// Human-readable status as worded by the vendor.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub id: MessageId,
    pub phone: Option<String>,
    pub status: DeliveryStatus,
    /// Delivery failure reason, when the operator reported one.
    pub error_code: Option<ErrorCode>,
    pub message: Option<String>,
    pub cost: Option<Money>,
    pub sms_count: Option<u32>,
    pub sender_id: Option<String>,
    pub send_date: Option<DateTime<FixedOffset>>,
    pub last_date: Option<DateTime<FixedOffset>>,
    pub operator: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}
