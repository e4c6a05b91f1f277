/*!
Serde support.

[`Timestamp`](crate::Timestamp) implements `Serialize` and `Deserialize`
directly, going through [`UtcCodec`](crate::UtcCodec) in both directions. A
required timestamp therefore rejects JSON `null`, `""`, and anything not in
UTC.

For `Option<Timestamp>` fields, use the helpers below with Serde's `with`
attribute:

* [`utc_codec::serde::utc::required`](self::utc::required)
* [`utc_codec::serde::utc::optional`](self::utc::optional)

The optional variant reads both `null` and `""` as `None`, and writes `None`
as `null`.

# Example

```
use utc_codec::Timestamp;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    created: Timestamp,
    #[serde(default, with = "utc_codec::serde::utc::optional")]
    deleted: Option<Timestamp>,
}

let json = r#"{"created":"2021-06-01T10:00:00.5Z","deleted":""}"#;
let got: Record = serde_json::from_str(json)?;
assert_eq!(got.deleted, None);
assert_eq!(
    serde_json::to_string(&got)?,
    r#"{"created":"2021-06-01T10:00:00.5000000Z","deleted":null}"#,
);

# Ok::<(), Box<dyn std::error::Error>>(())
```

Errors raised by the codec surface through the deserializer, so
`serde_json` reports them with a line and column:

```
use utc_codec::Timestamp;

let err = serde_json::from_str::<Timestamp>(r#""2021-06-01T10:00:00+02:00""#)
    .unwrap_err();
assert!(err.to_string().starts_with("Unexpected time-zone symbol"));
```
*/

use serde::{de, ser};

use crate::{Timestamp, Token, TokenKind, UtcCodec};

impl ser::Serialize for Timestamp {
    fn serialize<S: ser::Serializer>(&self, se: S) -> Result<S::Ok, S::Error> {
        let formatted = UtcCodec::format(*self).map_err(ser::Error::custom)?;
        se.collect_str(&formatted)
    }
}

impl<'de> de::Deserialize<'de> for Timestamp {
    fn deserialize<D: de::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        utc::required::deserialize(de)
    }
}

/// Turns whatever the deserializer hands over into a [`Token`] and lets the
/// codec decide.
struct Visitor(UtcCodec);

impl Visitor {
    fn read<E: de::Error>(&self, token: Token<'_>) -> Result<Option<Timestamp>, E> {
        self.0.read(token).map_err(E::custom)
    }
}

impl<'de> de::Visitor<'de> for Visitor {
    type Value = Option<Timestamp>;

    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("a UTC date-time string such as \"2021-06-01T10:00:00.0000000Z\"")
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<Timestamp>, E> {
        self.read(Token::String(v.as_bytes()))
    }

    #[inline]
    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Option<Timestamp>, E> {
        self.read(Token::String(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Option<Timestamp>, E> {
        self.read(Token::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Option<Timestamp>, E> {
        self.read(Token::Null)
    }

    #[inline]
    fn visit_some<D: de::Deserializer<'de>>(self, de: D) -> Result<Option<Timestamp>, D::Error> {
        de.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Option<Timestamp>, E> {
        self.read(Token::Other(TokenKind::Boolean))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Option<Timestamp>, E> {
        self.read(Token::Other(TokenKind::Integer))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Option<Timestamp>, E> {
        self.read(Token::Other(TokenKind::Integer))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Option<Timestamp>, E> {
        self.read(Token::Other(TokenKind::Float))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, _: A) -> Result<Option<Timestamp>, A::Error> {
        self.read(Token::Other(TokenKind::StartArray))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, _: A) -> Result<Option<Timestamp>, A::Error> {
        self.read(Token::Other(TokenKind::StartObject))
    }
}

/// (De)serialize timestamps as UTC date-time strings.
pub mod utc {
    /// (De)serialize a required timestamp.
    pub mod required {
        use serde::de;

        use crate::{Error, Timestamp, UtcCodec};

        /// Serialize a required timestamp as `yyyy-MM-ddTHH:mm:ss.fffffffZ`.
        #[inline]
        pub fn serialize<S: serde::Serializer>(
            timestamp: &Timestamp,
            se: S,
        ) -> Result<S::Ok, S::Error> {
            serde::Serialize::serialize(timestamp, se)
        }

        /// Deserialize a required timestamp. `null` and `""` are errors.
        #[inline]
        pub fn deserialize<'de, D: serde::Deserializer<'de>>(de: D) -> Result<Timestamp, D::Error> {
            de.deserialize_any(super::super::Visitor(UtcCodec::default()))?
                .ok_or_else(|| de::Error::custom(Error::NullValue))
        }
    }

    /// (De)serialize an optional timestamp.
    pub mod optional {
        use crate::{Timestamp, UtcCodec};

        /// Serialize an optional timestamp, writing `None` as `null`.
        #[inline]
        pub fn serialize<S: serde::Serializer>(
            timestamp: &Option<Timestamp>,
            se: S,
        ) -> Result<S::Ok, S::Error> {
            match timestamp {
                None => se.serialize_none(),
                Some(ts) => se.serialize_some(ts),
            }
        }

        /// Deserialize an optional timestamp. `null` and `""` read as `None`.
        #[inline]
        pub fn deserialize<'de, D: serde::Deserializer<'de>>(
            de: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            de.deserialize_option(super::super::Visitor(UtcCodec::nullable()))
        }
    }
}
