use serde::Deserialize;

use super::money::TransportMoney;
use super::reply::{Decoded, TransportError, TransportInt, decode_reply, push_format};
use super::send::{push_message, push_recipients};
use crate::domain::{CostResponse, GetCost, SenderId};

/// `cost=1`: report the price only, nothing is sent.
const COST_ONLY: &str = "1";

#[derive(Debug, Clone, Deserialize)]
struct CostJsonResponse {
    cnt: TransportInt,
    cost: TransportMoney,
}

pub fn encode_get_cost_query(
    request: &GetCost,
    default_sender: Option<&SenderId>,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_format(&mut params);
    push_recipients(&mut params, request.recipients());
    push_message(&mut params, request.message(), default_sender);
    params.push(("cost".to_owned(), COST_ONLY.to_owned()));
    params
}

pub fn decode_get_cost_json_response(json: &str) -> Result<Decoded<CostResponse>, TransportError> {
    decode_reply(json, |parsed: CostJsonResponse| {
        Ok(CostResponse {
            count: parsed.cnt.into_u32("cnt")?,
            cost: parsed.cost.into_non_negative("cost")?,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{ErrorCode, Message, RawPhoneNumber};

    use super::*;

    #[test]
    fn encode_asks_for_cost_only() {
        let request = GetCost::to_one(
            RawPhoneNumber::new("79999999999").unwrap(),
            Message::sms("test").unwrap(),
        );
        let params = encode_get_cost_query(&request, None);

        assert_eq!(
            params,
            vec![
                ("fmt".to_owned(), "3".to_owned()),
                ("charset".to_owned(), "utf-8".to_owned()),
                ("phones".to_owned(), "79999999999".to_owned()),
                ("mes".to_owned(), "test".to_owned()),
                ("cost".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_cost_payload() {
        let Decoded::Accepted(response) =
            decode_get_cost_json_response(r#"{"cnt": 1, "cost": "1.44"}"#).unwrap()
        else {
            panic!("expected accepted reply");
        };
        assert_eq!(response.count, 1);
        assert_eq!(response.cost.as_str(), "1.44");
    }

    #[test]
    fn decode_cost_requires_cost_field() {
        assert!(matches!(
            decode_get_cost_json_response(r#"{"cnt": 1}"#),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn decode_cost_vendor_error() {
        let json = r#"{"error": "invalid number", "error_code": 7}"#;
        let Decoded::Rejected(rejection) = decode_get_cost_json_response(json).unwrap() else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.code, ErrorCode::new(7));
    }
}
