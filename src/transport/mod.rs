//! Transport layer: wire-format details (query encoding, JSON decoding, vendor error detection).

mod balance;
mod check_cost;
mod check_status;
mod money;
mod reply;
mod send;

pub use balance::{decode_balance_json_response, encode_get_balance_query};
pub use check_cost::{decode_get_cost_json_response, encode_get_cost_query};
pub use check_status::{decode_check_status_json_response, encode_check_status_query};
pub use reply::{Decoded, TransportError};
pub use send::{decode_send_json_response, encode_send_query};
