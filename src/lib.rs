//! Typed Rust client for the SMSC.ru HTTP API.
//!
//! The crate has three layers: a domain layer of strong types, a transport layer
//! for wire-format quirks (query encoding, JSON replies, the vendor's error
//! fields), and a small client layer issuing one HTTP request per call.
//!
//! ```rust,no_run
//! use smsc::{Auth, Message, RawPhoneNumber, SendSms, SmscClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsc::SmscError> {
//!     let client = SmscClient::new(Auth::login_password("alexey", "psw")?);
//!     let phone = RawPhoneNumber::new("79999999999")?;
//!     let request = SendSms::to_one(phone, Message::sms("Hello, World!")?);
//!     let response = client.send(request).await?;
//!     println!("queued {} part(s), id {}", response.count, response.id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, HttpMethod, SmscClient, SmscClientBuilder, SmscError};
pub use domain::{
    ApiKey, BalanceResponse, CheckStatus, CostResponse, DeliveryStatus, DeliveryStatusCode,
    ErrorCode, GetCost, KnownDeliveryStatus, KnownErrorCode, Login, MaxSms, Message,
    MessageFormat, MessageId, MessageText, Money, Password, PhoneNumber, RawPhoneNumber,
    SendResponse, SendSms, SendTime, SenderId, StatusReport, Translit, UnixTimestamp,
    ValidationError,
};
