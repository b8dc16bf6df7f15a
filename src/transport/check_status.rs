use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::money::TransportMoney;
use super::reply::{Decoded, TransportError, TransportInt, detect_rejection, push_format};
use crate::domain::{
    CheckStatus, DeliveryStatus, DeliveryStatusCode, ErrorCode, MessageId, StatusReport,
};

/// SMSC.ru reports dates in Moscow time, which has no DST.
const MOSCOW_OFFSET: &str = "+0300";
const VENDOR_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S %z";

#[derive(Debug, Clone, Deserialize)]
struct StatusJsonRecord {
    id: TransportInt,
    status: TransportInt,
    #[serde(default)]
    status_name: Option<String>,
    #[serde(default)]
    err: Option<TransportInt>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    cost: Option<TransportMoney>,
    #[serde(default)]
    sms_cnt: Option<TransportInt>,
    #[serde(default)]
    sender_id: Option<String>,
    #[serde(default)]
    send_date: Option<String>,
    #[serde(default)]
    last_date: Option<String>,
    #[serde(default)]
    operator: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl StatusJsonRecord {
    fn into_report(self) -> Result<StatusReport, TransportError> {
        let error_code = match self.err {
            Some(err) => Some(err.into_i32("err")?).filter(|code| *code != 0),
            None => None,
        };

        Ok(StatusReport {
            id: MessageId::new(self.id.into_u64("id")?),
            phone: self.phone,
            status: DeliveryStatus {
                code: DeliveryStatusCode::new(self.status.into_i32("status")?),
                name: self.status_name,
            },
            error_code: error_code.map(ErrorCode::new),
            message: self.message,
            cost: self.cost.map(|cost| cost.into_money("cost")).transpose()?,
            sms_count: self.sms_cnt.map(|cnt| cnt.into_u32("sms_cnt")).transpose()?,
            sender_id: self.sender_id,
            send_date: parse_vendor_date("send_date", self.send_date)?,
            last_date: parse_vendor_date("last_date", self.last_date)?,
            operator: self.operator,
            region: self.region,
            country: self.country,
        })
    }
}

fn parse_vendor_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<DateTime<FixedOffset>>, TransportError> {
    let Some(value) = value.filter(|it| !it.trim().is_empty()) else {
        return Ok(None);
    };
    let with_offset = format!("{} {MOSCOW_OFFSET}", value.trim());
    DateTime::parse_from_str(&with_offset, VENDOR_DATE_FORMAT)
        .map(Some)
        .map_err(|_| TransportError::InvalidDate { field, value })
}

/// Joins a list so that the vendor always answers with an array, even for one entry.
fn list_param<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items = items.collect::<Vec<_>>();
    let mut joined = items.join(",");
    if items.len() == 1 {
        joined.push(',');
    }
    joined
}

pub fn encode_check_status_query(request: &CheckStatus) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_format(&mut params);
    params.push((
        "phone".to_owned(),
        list_param(request.entries().iter().map(|(phone, _)| phone.raw())),
    ));
    let ids = request
        .entries()
        .iter()
        .map(|(_, id)| id.to_string())
        .collect::<Vec<_>>();
    params.push((
        MessageId::FIELD.to_owned(),
        list_param(ids.iter().map(String::as_str)),
    ));
    params.push(("all".to_owned(), "2".to_owned()));
    params
}

pub fn decode_check_status_json_response(
    request: &CheckStatus,
    json: &str,
) -> Result<Decoded<Vec<StatusReport>>, TransportError> {
    if let Some(rejection) = detect_rejection(json)? {
        return Ok(Decoded::Rejected(rejection));
    }

    let records: Vec<StatusJsonRecord> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json)?
    } else {
        vec![serde_json::from_str(json)?]
    };

    let requested = request
        .entries()
        .iter()
        .map(|(_, id)| *id)
        .collect::<HashSet<MessageId>>();

    records
        .into_iter()
        .map(|record| {
            let report = record.into_report()?;
            if !requested.contains(&report.id) {
                return Err(TransportError::UnknownMessageId {
                    id: report.id.value(),
                });
            }
            Ok(report)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Decoded::Accepted)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::domain::RawPhoneNumber;

    use super::*;

    fn one(phone: &str, id: u64) -> CheckStatus {
        CheckStatus::one(RawPhoneNumber::new(phone).unwrap(), MessageId::new(id))
    }

    #[test]
    fn encode_single_entry_with_trailing_comma() {
        let params = encode_check_status_query(&one("79999999999", 1));
        assert_eq!(
            params,
            vec![
                ("fmt".to_owned(), "3".to_owned()),
                ("charset".to_owned(), "utf-8".to_owned()),
                ("phone".to_owned(), "79999999999,".to_owned()),
                ("id".to_owned(), "1,".to_owned()),
                ("all".to_owned(), "2".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_many_entries_pairs_phones_and_ids() {
        let request = CheckStatus::new(vec![
            (RawPhoneNumber::new("79990000001").unwrap(), MessageId::new(10)),
            (RawPhoneNumber::new("79990000002").unwrap(), MessageId::new(11)),
        ])
        .unwrap();
        let params = encode_check_status_query(&request);
        assert!(params.contains(&("phone".to_owned(), "79990000001,79990000002".to_owned())));
        assert!(params.contains(&("id".to_owned(), "10,11".to_owned())));
    }

    #[test]
    fn decode_full_status_record() {
        let json = r#"
        [{
          "id": 1, "send_timestamp": 1495823967, "message": "test",
          "status_name": "Доставлено", "cost": "1.20", "phone": "79262138080",
          "sender_id": "avto-disp", "last_date": "26.05.2017 21:39:32",
          "region": "г.Москва и Московская область", "send_date": "26.05.2017 21:39:27",
          "last_timestamp": 1495823972, "operator": "МегаФон", "status": 1, "country": "Россия"
        }]
        "#;

        let Decoded::Accepted(reports) =
            decode_check_status_json_response(&one("79262138080", 1), json).unwrap()
        else {
            panic!("expected accepted reply");
        };
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report.id, MessageId::new(1));
        assert_eq!(report.status.code, DeliveryStatusCode::new(1));
        assert_eq!(report.status.name.as_deref(), Some("Доставлено"));
        assert_eq!(report.cost.as_ref().map(|c| c.as_str()), Some("1.20"));
        assert_eq!(report.operator.as_deref(), Some("МегаФон"));
        assert_eq!(report.error_code, None);

        let send_date = report.send_date.unwrap();
        assert_eq!(
            send_date.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2017, 5, 26, 18, 39, 27).unwrap()
        );
    }

    #[test]
    fn decode_single_object_reply() {
        let json = r#"{"id": "5", "status": -1, "err": 0, "last_date": ""}"#;
        let Decoded::Accepted(reports) =
            decode_check_status_json_response(&one("79999999999", 5), json).unwrap()
        else {
            panic!("expected accepted reply");
        };
        assert_eq!(reports[0].status.code.as_i32(), -1);
        assert!(!reports[0].status.code.is_final());
        assert_eq!(reports[0].last_date, None);
    }

    #[test]
    fn decode_delivery_error_code() {
        let json = r#"[{"id": 5, "status": 20, "err": 253}]"#;
        let Decoded::Accepted(reports) =
            decode_check_status_json_response(&one("79999999999", 5), json).unwrap()
        else {
            panic!("expected accepted reply");
        };
        assert_eq!(reports[0].error_code, Some(ErrorCode::new(253)));
    }

    #[test]
    fn decode_top_level_error() {
        let json = r#"{"error": "authorise error", "error_code": 2}"#;
        let Decoded::Rejected(rejection) =
            decode_check_status_json_response(&one("79999999999", 5), json).unwrap()
        else {
            panic!("expected rejection");
        };
        assert_eq!(rejection.code, ErrorCode::new(2));
    }

    #[test]
    fn decode_rejects_bad_dates_and_unknown_ids() {
        let bad_date = r#"[{"id": 5, "status": 1, "send_date": "2017-05-26"}]"#;
        assert!(matches!(
            decode_check_status_json_response(&one("79999999999", 5), bad_date),
            Err(TransportError::InvalidDate {
                field: "send_date",
                ..
            })
        ));

        let unknown = r#"[{"id": 6, "status": 1}]"#;
        assert!(matches!(
            decode_check_status_json_response(&one("79999999999", 5), unknown),
            Err(TransportError::UnknownMessageId { id: 6 })
        ));
    }
}
