use serde::Deserialize;
use serde::de::Error as DeError;

use super::reply::TransportError;
use crate::domain::Money;

/// Money-like value returned by SMSC.ru as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`10.00` remains `"10.00"` instead of becoming `"10.0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportMoney(String);

impl TransportMoney {
    pub fn into_money(self, field: &'static str) -> Result<Money, TransportError> {
        Money::new(self.0.clone()).map_err(|_| TransportError::MalformedField {
            field,
            value: self.0,
        })
    }

    /// Like [`TransportMoney::into_money`], rejecting amounts below zero.
    pub fn into_non_negative(self, field: &'static str) -> Result<Money, TransportError> {
        let money = self.into_money(field)?;
        if money.is_negative() {
            return Err(TransportError::NegativeValue {
                field,
                value: money.as_str().to_owned(),
            });
        }
        Ok(money)
    }
}

impl<'de> Deserialize<'de> for TransportMoney {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected money field to be JSON string or number",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        cost: TransportMoney,
    }

    #[test]
    fn numeric_token_is_kept_verbatim() {
        let holder: Holder = serde_json::from_str(r#"{"cost": 10.00}"#).unwrap();
        assert_eq!(holder.cost.into_money("cost").unwrap().as_str(), "10.00");
    }

    #[test]
    fn string_amount_is_unquoted() {
        let holder: Holder = serde_json::from_str(r#"{"cost": "1.44"}"#).unwrap();
        assert_eq!(holder.cost.into_money("cost").unwrap().to_f64(), 1.44);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(serde_json::from_str::<Holder>(r#"{"cost": true}"#).is_err());

        let holder: Holder = serde_json::from_str(r#"{"cost": "free"}"#).unwrap();
        assert!(matches!(
            holder.cost.into_money("cost"),
            Err(TransportError::MalformedField { field: "cost", .. })
        ));
    }

    #[test]
    fn negative_amount_rejected_when_required() {
        let holder: Holder = serde_json::from_str(r#"{"cost": -1.5}"#).unwrap();
        assert!(matches!(
            holder.cost.into_non_negative("cost"),
            Err(TransportError::NegativeValue { field: "cost", .. })
        ));
    }
}
