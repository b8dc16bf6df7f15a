//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{CheckStatus, GetCost, Message, MessageFormat, SendSms, SendTime, Translit};
pub use response::{
    BalanceResponse, CostResponse, DeliveryStatus, SendResponse, StatusReport,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, DeliveryStatusCode, ErrorCode, KnownDeliveryStatus, KnownErrorCode, Login, MaxSms,
    MessageId, MessageText, Money, Password, PhoneNumber, RawPhoneNumber, SenderId,
    UnixTimestamp,
};
