//! serde helpers for the loosely typed JSON the providers return.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// Declares a string enum whose unknown wire values map to a fallback
/// variant instead of failing deserialization. Extra spellings accepted
/// on input follow the wire value after `|`.
///
/// ```ignore
/// lenient_enum! {
///     pub enum State {
///         Running => "Running",
///         Stopped => "Stopped" | "Shutdowned",
///     }
///     fallback Unrecognized => "UNRECOGNIZED";
/// }
/// ```
#[macro_export]
macro_rules! lenient_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal $(| $alias:literal)*),+ $(,)?
        }
        fallback $fallback:ident => $fallback_wire:literal;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant,)+
            $fallback,
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::$fallback => $fallback_wire,
                }
            }

            /// 不區分大小寫；未知值回傳備援變體
            pub fn from_value(value: &str) -> Self {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($wire) $(|| value.eq_ignore_ascii_case($alias))* {
                        return Self::$variant;
                    }
                )+
                Self::$fallback
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$fallback
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self::from_value(s))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(match raw {
                    ::serde_json::Value::String(s) => Self::from_value(&s),
                    ::serde_json::Value::Number(n) => Self::from_value(&n.to_string()),
                    _ => Self::$fallback,
                })
            }
        }
    };
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the timestamp shapes seen across providers: RFC 3339,
/// `2011-12-08T14:16:31-0800` and offset-less UTC values.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

pub mod date {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

pub mod optional_date {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}"))),
            _ => Ok(None),
        }
    }
}

/// `"10.0.0.0/8,192.168.0.0/16"` <-> set of entries.
pub mod comma_separated {
    use super::*;

    pub fn serialize<S>(value: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let joined = value.iter().map(String::as_str).collect::<Vec<_>>().join(",");
        serializer.serialize_str(&joined)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(split_comma(&raw))
    }
}

pub fn split_comma(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ids arrive as `"54"` from one release and `54` from the next.
pub mod string_or_number {
    use super::*;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!("expected string or number, got {other}"))),
        }
    }
}

pub mod optional_string_or_number {
    use super::*;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(serde::de::Error::custom(format!("expected string or number, got {other}"))),
        }
    }
}

/// Numbers that some releases quote (`"startport": "22"`).
pub mod number_or_string {
    use super::*;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + DeserializeOwned + Default,
        <T as FromStr>::Err: Display,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(T::default()),
            Value::String(s) if s.trim().is_empty() => Ok(T::default()),
            Value::String(s) => s
                .trim()
                .parse::<T>()
                .map_err(|e| serde::de::Error::custom(format!("invalid number {s}: {e}"))),
            number @ Value::Number(_) => {
                serde_json::from_value(number).map_err(serde::de::Error::custom)
            }
            other => Err(serde::de::Error::custom(format!("expected number, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    lenient_enum! {
        enum Protocol {
            Tcp => "tcp" | "6",
            Udp => "udp" | "17",
        }
        fallback Unknown => "UNKNOWN";
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Sample {
        #[serde(with = "string_or_number")]
        id: String,
        #[serde(default, with = "optional_string_or_number")]
        zone: Option<String>,
        #[serde(default, with = "comma_separated")]
        cidrlist: BTreeSet<String>,
        #[serde(with = "date")]
        created: DateTime<Utc>,
        #[serde(default, with = "optional_date")]
        removed: Option<DateTime<Utc>>,
        protocol: Protocol,
        #[serde(default, with = "number_or_string")]
        port: u32,
    }

    #[test]
    fn test_lenient_enum() {
        assert_eq!(Protocol::from_value("TCP"), Protocol::Tcp);
        assert_eq!(Protocol::from_value("sctp"), Protocol::Unknown);
        assert_eq!(Protocol::from_value("17"), Protocol::Udp);
        assert_eq!(Protocol::Udp.to_string(), "udp");
        assert_eq!(Protocol::default(), Protocol::Unknown);
    }

    #[test]
    fn test_sample_deserializes_loose_fields() {
        let sample: Sample = serde_json::from_str(
            r#"{"id":54,"zone":"1","cidrlist":"0.0.0.0/0, 10.0.0.0/8","created":"2011-12-08T14:16:31-0800","protocol":"TCP","port":"22"}"#,
        )
        .unwrap();

        assert_eq!(sample.id, "54");
        assert_eq!(sample.zone.as_deref(), Some("1"));
        assert_eq!(
            sample.cidrlist,
            ["0.0.0.0/0", "10.0.0.0/8"].iter().map(|s| s.to_string()).collect()
        );
        assert_eq!(
            sample.created,
            Utc.with_ymd_and_hms(2011, 12, 8, 22, 16, 31).unwrap()
        );
        assert_eq!(sample.removed, None);
        assert_eq!(sample.protocol, Protocol::Tcp);
        assert_eq!(sample.port, 22);

        let rendered = serde_json::to_value(&sample).unwrap();
        assert_eq!(rendered["id"], "54");
        assert_eq!(rendered["cidrlist"], "0.0.0.0/0,10.0.0.0/8");
        assert_eq!(rendered["protocol"], "tcp");
    }

    #[test]
    fn test_parse_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2012, 3, 19, 6, 21, 13).unwrap();
        assert_eq!(parse_date("2012-03-19T06:21:13Z"), Some(expected));
        assert_eq!(parse_date("2012-03-19T06:21:13"), Some(expected));
        assert_eq!(parse_date("2012-03-19 06:21:13"), Some(expected));
        assert_eq!(parse_date("2012-03-19T06:21:13+0000"), Some(expected));
        assert!(parse_date("2012-03-19T06:21:13.000000").is_some());
        assert_eq!(parse_date("yesterday"), None);
    }
}
