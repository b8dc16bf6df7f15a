use crate::domain::validation::ValidationError;
use crate::domain::value::{
    MaxSms, MessageId, MessageText, RawPhoneNumber, SenderId, UnixTimestamp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Delivery channel of a message.
pub enum MessageFormat {
    #[default]
    Sms,
    /// Shown on the recipient's screen without being stored.
    Flash,
    Viber,
}

impl MessageFormat {
    /// Flag parameter that switches the vendor to this format, if any.
    pub fn flag(self) -> Option<&'static str> {
        match self {
            Self::Sms => None,
            Self::Flash => Some("flash"),
            Self::Viber => Some("viber"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Transliteration applied by the vendor before sending (`translit`).
pub enum Translit {
    /// Cyrillic rendered with Latin letters.
    Latin,
    /// Latin rendered with look-alike Cyrillic letters.
    Cyrillic,
}

impl Translit {
    pub fn value(self) -> u8 {
        match self {
            Self::Latin => 1,
            Self::Cyrillic => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scheduled send time (`time`).
pub enum SendTime {
    At(UnixTimestamp),
    InMinutes(u32),
}

impl SendTime {
    /// Query field name used by SMSC.ru (`time`).
    pub const FIELD: &'static str = "time";

    /// Wire representation: `0<unix seconds>` or `+<minutes>`.
    pub fn encode(self) -> String {
        match self {
            Self::At(ts) => format!("0{}", ts.value()),
            Self::InMinutes(minutes) => format!("+{minutes}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Message value object consumed by [`SendSms`] and [`GetCost`].
///
/// Built once, then refined with the consuming `with_*` methods:
///
/// ```rust
/// use smsc::{Message, Translit};
///
/// let message = Message::sms("Hello, World!")?.with_translit(Translit::Latin);
/// assert_eq!(message.text().as_str(), "Hello, World!");
/// # Ok::<(), smsc::ValidationError>(())
/// ```
pub struct Message {
    text: MessageText,
    format: MessageFormat,
    sender: Option<SenderId>,
    time: Option<SendTime>,
    translit: Option<Translit>,
    tinyurl: bool,
    max_sms: Option<MaxSms>,
}

impl Message {
    pub fn new(text: MessageText, format: MessageFormat) -> Self {
        Self {
            text,
            format,
            sender: None,
            time: None,
            translit: None,
            tinyurl: false,
            max_sms: None,
        }
    }

    /// Plain SMS message.
    pub fn sms(text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(MessageText::new(text)?, MessageFormat::Sms))
    }

    /// Flash SMS message.
    pub fn flash(text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(MessageText::new(text)?, MessageFormat::Flash))
    }

    /// Viber message.
    pub fn viber(text: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(MessageText::new(text)?, MessageFormat::Viber))
    }

    /// Override the client's default sender for this message.
    pub fn with_sender(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_time(mut self, time: SendTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_translit(mut self, translit: Translit) -> Self {
        self.translit = Some(translit);
        self
    }

    /// Ask the vendor to shorten links in the text.
    pub fn with_tinyurl(mut self) -> Self {
        self.tinyurl = true;
        self
    }

    pub fn with_max_sms(mut self, max_sms: MaxSms) -> Self {
        self.max_sms = Some(max_sms);
        self
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    pub fn time(&self) -> Option<SendTime> {
        self.time
    }

    pub fn translit(&self) -> Option<Translit> {
        self.translit
    }

    pub fn tinyurl(&self) -> bool {
        self.tinyurl
    }

    pub fn max_sms(&self) -> Option<MaxSms> {
        self.max_sms
    }
}

#[derive(Debug, Clone)]
/// Send one message to one or more recipients (`send.php`).
pub struct SendSms {
    recipients: Vec<RawPhoneNumber>,
    message: Message,
}

impl SendSms {
    pub fn to_one(recipient: RawPhoneNumber, message: Message) -> Self {
        Self {
            recipients: vec![recipient],
            message,
        }
    }

    pub fn to_many(
        recipients: Vec<RawPhoneNumber>,
        message: Message,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

#[derive(Debug, Clone)]
/// Ask for the price of a message without sending it (`send.php` with `cost=1`).
pub struct GetCost {
    recipients: Vec<RawPhoneNumber>,
    message: Message,
}

impl GetCost {
    pub fn to_one(recipient: RawPhoneNumber, message: Message) -> Self {
        Self {
            recipients: vec![recipient],
            message,
        }
    }

    pub fn to_many(
        recipients: Vec<RawPhoneNumber>,
        message: Message,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self {
            recipients,
            message,
        })
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

impl From<SendSms> for GetCost {
    fn from(value: SendSms) -> Self {
        Self {
            recipients: value.recipients,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone)]
/// Query delivery status of previously sent messages (`status.php`).
///
/// Each entry pairs a recipient with the message id returned by [`SendSms`].
pub struct CheckStatus {
    entries: Vec<(RawPhoneNumber, MessageId)>,
}

impl CheckStatus {
    pub fn one(phone: RawPhoneNumber, id: MessageId) -> Self {
        Self {
            entries: vec![(phone, id)],
        }
    }

    pub fn new(entries: Vec<(RawPhoneNumber, MessageId)>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::Empty {
                field: MessageId::FIELD,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(RawPhoneNumber, MessageId)] {
        &self.entries
    }
}
