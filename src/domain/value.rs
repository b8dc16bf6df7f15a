use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMSC.ru account login (`login`).
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query field name used by SMSC.ru (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC.ru account password (`psw`).
///
/// Either the plain password or the lowercase MD5 hash of it; the vendor accepts both.
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query field name used by SMSC.ru (`psw`).
    pub const FIELD: &'static str = "psw";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC.ru API key (`apikey`), an alternative to login and password.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Query field name used by SMSC.ru (`apikey`).
    pub const FIELD: &'static str = "apikey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown to the recipient (`sender`).
///
/// Invariant: non-empty after trimming. The name must be registered in your SMSC.ru account.
pub struct SenderId(String);

impl SenderId {
    /// Query field name used by SMSC.ru (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`mes`).
///
/// Invariant: non-empty after trimming and at most [`MessageText::MAX_CHARS`] characters.
/// The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by SMSC.ru (`mes`).
    pub const FIELD: &'static str = "mes";

    /// Longest accepted text, counted in characters rather than bytes.
    pub const MAX_CHARS: usize = 800;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let chars = value.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_CHARS,
                actual: chars,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id assigned by SMSC.ru (`id`).
pub struct MessageId(u64);

impl MessageId {
    /// Query field name used by SMSC.ru (`id`).
    pub const FIELD: &'static str = "id";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to SMSC.ru.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query field name used by SMSC.ru for recipients (`phones`).
    pub const FIELD: &'static str = "phones";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to SMSC.ru.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query field name used by SMSC.ru for recipients (`phones`).
    pub const FIELD: &'static str = "phones";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Unix timestamp in seconds, used for scheduled sends.
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Upper bound on the number of parts a long message may be split into (`maxsms`).
///
/// Invariant: greater than zero.
pub struct MaxSms(u16);

impl MaxSms {
    /// Query field name used by SMSC.ru (`maxsms`).
    pub const FIELD: &'static str = "maxsms";

    pub fn new(value: u16) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::NotPositive { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Decimal amount reported by SMSC.ru (cost, balance, credit).
///
/// The vendor's token is kept verbatim (`"1.20"` stays `"1.20"`); use [`Money::to_f64`]
/// for arithmetic.
pub struct Money(String);

impl Money {
    /// Create a validated amount from a decimal string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let is_decimal = trimmed
            .parse::<f64>()
            .map(f64::is_finite)
            .unwrap_or(false);
        if !is_decimal || trimmed.chars().any(|ch| ch.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidMoney { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the amount exactly as the vendor reported it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_f64(&self) -> f64 {
        // Checked finite in `new`.
        self.0.parse::<f64>().unwrap_or_default()
    }

    pub fn is_negative(&self) -> bool {
        self.to_f64() < 0.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMSC.ru error code (`error_code`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by SMSC.ru.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known error variant, if one exists.
    pub fn known_kind(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Returns `true` if the request may succeed when repeated later.
    pub fn is_retryable(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this code represents an authentication/authorization error.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known_kind(), Some(kind) if kind.is_auth_error())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known SMSC.ru error codes.
pub enum KnownErrorCode {
    InvalidParameters,
    InvalidCredentials,
    InsufficientFunds,
    IpBlocked,
    InvalidDateFormat,
    MessageDenied,
    InvalidPhoneFormat,
    CannotDeliver,
    TooManyRequests,
}

impl KnownErrorCode {
    /// Convert a raw SMSC.ru integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::InvalidParameters,
            2 => Self::InvalidCredentials,
            3 => Self::InsufficientFunds,
            4 => Self::IpBlocked,
            5 => Self::InvalidDateFormat,
            6 => Self::MessageDenied,
            7 => Self::InvalidPhoneFormat,
            8 => Self::CannotDeliver,
            9 => Self::TooManyRequests,
            _ => return None,
        })
    }

    pub fn is_retryable(self) -> bool {
        matches!(self, Self::TooManyRequests)
    }

    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::IpBlocked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery status code reported by `status.php` (`status`).
///
/// Preserved as-is even when unknown to this crate.
pub struct DeliveryStatusCode(i32);

impl DeliveryStatusCode {
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub fn known_kind(self) -> Option<KnownDeliveryStatus> {
        KnownDeliveryStatus::from_code(self.0)
    }

    /// Returns `true` once the status can no longer change.
    ///
    /// Unknown codes are treated as final.
    pub fn is_final(self) -> bool {
        !matches!(
            self.known_kind(),
            Some(KnownDeliveryStatus::Waiting | KnownDeliveryStatus::PassedToOperator)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known `status.php` delivery statuses.
pub enum KnownDeliveryStatus {
    NotFound,
    Waiting,
    PassedToOperator,
    Delivered,
    Read,
    Expired,
    LinkOpened,
    Undeliverable,
    WrongNumber,
    Prohibited,
    InsufficientFunds,
    UnavailableNumber,
}

impl KnownDeliveryStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            -3 => Self::NotFound,
            -1 => Self::Waiting,
            0 => Self::PassedToOperator,
            1 => Self::Delivered,
            2 => Self::Read,
            3 => Self::Expired,
            4 => Self::LinkOpened,
            20 => Self::Undeliverable,
            22 => Self::WrongNumber,
            23 => Self::Prohibited,
            24 => Self::InsufficientFunds,
            25 => Self::UnavailableNumber,
            _ => return None,
        })
    }
}
