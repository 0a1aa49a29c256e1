mod kv;
pub use kv::KeyValue;

mod constants;
pub use constants::{NAME_KEY_TYPE, NAME_NAME_SEPARATOR, NAME_SUFFIX_SEPARATOR};

mod timestamp;
pub use timestamp::{format_iso8601, format_iso8601_date, parse_iso8601};
