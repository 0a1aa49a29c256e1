use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, OffsetDateTime};

use flowkeep_model::{format_iso8601, format_iso8601_date, parse_iso8601};

use crate::error::{CoreError, CoreResult};

/// Lower bound on the creation time of listed job flows, as it was set.
///
/// The value is kept exactly as given and only coerced into ISO-8601 when read,
/// so a calendar date stays a date (`2012-01-05`) and a datetime keeps its offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Epoch {
    /// Calendar datetime.
    At(OffsetDateTime),
    /// Calendar date, rendered without a time part.
    Date(Date),
    /// Unparsed text: RFC 3339 or `YYYY-MM-DD`.
    Text(String),
    /// Seconds since the unix epoch.
    Unix(i64),
}

impl Epoch {
    /// Render as an ISO-8601 string.
    pub fn to_iso8601(&self) -> CoreResult<String> {
        let rendered = match self {
            Epoch::At(at) => format_iso8601(*at),
            Epoch::Date(date) => format_iso8601_date(*date),
            Epoch::Text(raw) => parse_iso8601(raw).and_then(format_iso8601),
            Epoch::Unix(secs) => {
                let at = OffsetDateTime::from_unix_timestamp(*secs)
                    .map_err(|e| CoreError::InvalidEpoch(format!("{secs}: {e}")))?;
                format_iso8601(at)
            }
        };
        rendered.map_err(|e| CoreError::InvalidEpoch(e.to_string()))
    }
}

impl From<OffsetDateTime> for Epoch {
    fn from(at: OffsetDateTime) -> Self {
        Epoch::At(at)
    }
}

impl From<Date> for Epoch {
    fn from(date: Date) -> Self {
        Epoch::Date(date)
    }
}

impl From<&str> for Epoch {
    fn from(raw: &str) -> Self {
        Epoch::Text(raw.to_string())
    }
}

impl From<String> for Epoch {
    fn from(raw: String) -> Self {
        Epoch::Text(raw)
    }
}

impl From<i64> for Epoch {
    fn from(secs: i64) -> Self {
        Epoch::Unix(secs)
    }
}

impl Serialize for Epoch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rendered = self.to_iso8601().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Epoch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unix(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Epoch::Text(s),
            Raw::Unix(n) => Epoch::Unix(n),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn every_variant_renders_parseable_iso8601() {
        let inputs = [
            Epoch::from(datetime!(2012-01-05 10:30:15 +01:00)),
            Epoch::from(date!(2012 - 01 - 05)),
            Epoch::from("2012-01-05T10:30:15Z"),
            Epoch::from("2012-01-05"),
            Epoch::from(1_325_759_415_i64),
        ];

        for epoch in inputs {
            let rendered = epoch.to_iso8601().unwrap();
            assert!(
                parse_iso8601(&rendered).is_ok(),
                "{epoch:?} rendered as {rendered:?}, which does not parse back"
            );
        }
    }

    #[test]
    fn date_keeps_date_only_rendering() {
        let epoch = Epoch::from(date!(2012 - 03 - 07));
        assert_eq!(epoch.to_iso8601().unwrap(), "2012-03-07");
    }

    #[test]
    fn text_is_normalized_to_rfc3339() {
        assert_eq!(
            Epoch::from("2012-01-05").to_iso8601().unwrap(),
            "2012-01-05T00:00:00Z"
        );
        assert_eq!(
            Epoch::from(1_325_759_415_i64).to_iso8601().unwrap(),
            "2012-01-05T10:30:15Z"
        );
    }

    #[test]
    fn unparseable_text_is_invalid_epoch() {
        let err = Epoch::from("a while ago").to_iso8601().unwrap_err();
        assert!(matches!(err, CoreError::InvalidEpoch(_)));
    }

    #[test]
    fn serde_accepts_text_and_numbers() {
        let text: Epoch = serde_json::from_str(r#""2012-01-05""#).unwrap();
        assert_eq!(text, Epoch::Text("2012-01-05".to_string()));

        let unix: Epoch = serde_json::from_str("1325759415").unwrap();
        assert_eq!(unix, Epoch::Unix(1_325_759_415));

        let json = serde_json::to_string(&Epoch::from(date!(2012 - 01 - 05))).unwrap();
        assert_eq!(json, r#""2012-01-05""#);
    }
}
