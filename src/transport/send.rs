use serde::Deserialize;

use super::money::TransportMoney;
use super::reply::{Decoded, TransportError, TransportInt, decode_reply, push_format};
use crate::domain::{
    MaxSms, Message, MessageId, MessageText, RawPhoneNumber, SendResponse, SendSms, SendTime,
    SenderId,
};

/// `cost=3`: send the message and report its cost together with the new balance.
const SEND_AND_REPORT_COST: &str = "3";

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse {
    id: TransportInt,
    cnt: TransportInt,
    #[serde(default)]
    cost: Option<TransportMoney>,
    #[serde(default)]
    balance: Option<TransportMoney>,
}

pub fn encode_send_query(
    request: &SendSms,
    default_sender: Option<&SenderId>,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_format(&mut params);
    push_recipients(&mut params, request.recipients());
    push_message(&mut params, request.message(), default_sender);
    params.push(("cost".to_owned(), SEND_AND_REPORT_COST.to_owned()));
    params
}

pub(super) fn push_recipients(params: &mut Vec<(String, String)>, recipients: &[RawPhoneNumber]) {
    let phones = recipients
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), phones));
}

pub(super) fn push_message(
    params: &mut Vec<(String, String)>,
    message: &Message,
    default_sender: Option<&SenderId>,
) {
    params.push((
        MessageText::FIELD.to_owned(),
        message.text().as_str().to_owned(),
    ));
    if let Some(sender) = message.sender().or(default_sender) {
        params.push((SenderId::FIELD.to_owned(), sender.as_str().to_owned()));
    }
    if let Some(flag) = message.format().flag() {
        params.push((flag.to_owned(), "1".to_owned()));
    }
    if let Some(translit) = message.translit() {
        params.push(("translit".to_owned(), translit.value().to_string()));
    }
    if message.tinyurl() {
        params.push(("tinyurl".to_owned(), "1".to_owned()));
    }
    if let Some(max_sms) = message.max_sms() {
        params.push((MaxSms::FIELD.to_owned(), max_sms.value().to_string()));
    }
    if let Some(time) = message.time() {
        params.push((SendTime::FIELD.to_owned(), time.encode()));
    }
}

pub fn decode_send_json_response(json: &str) -> Result<Decoded<SendResponse>, TransportError> {
    decode_reply(json, |parsed: SendJsonResponse| {
        Ok(SendResponse {
            id: MessageId::new(parsed.id.into_u64("id")?),
            count: parsed.cnt.into_u32("cnt")?,
            cost: parsed
                .cost
                .map(|cost| cost.into_non_negative("cost"))
                .transpose()?,
            balance: parsed
                .balance
                .map(|balance| balance.into_money("balance"))
                .transpose()?,
        })
    })
}
