use serde::Deserialize;

use super::money::TransportMoney;
use super::reply::{Decoded, TransportError, decode_reply, push_format};
use crate::domain::BalanceResponse;

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonResponse {
    balance: TransportMoney,
    #[serde(default)]
    credit: Option<TransportMoney>,
    #[serde(default)]
    currency: Option<String>,
}

pub fn encode_get_balance_query() -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_format(&mut params);
    params.push(("cur".to_owned(), "1".to_owned()));
    params
}

pub fn decode_balance_json_response(
    json: &str,
) -> Result<Decoded<BalanceResponse>, TransportError> {
    decode_reply(json, |parsed: BalanceJsonResponse| {
        Ok(BalanceResponse {
            balance: parsed.balance.into_money("balance")?,
            credit: parsed
                .credit
                .map(|credit| credit.into_money("credit"))
                .transpose()?,
            currency: parsed.currency.filter(|it| !it.trim().is_empty()),
        })
    })
}
