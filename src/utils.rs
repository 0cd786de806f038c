use chrono::NaiveDate;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Strings where the API uses `""` (or `null`) for "no value".
pub(crate) mod empty_string_as_none {
    use super::*;

    pub(crate) fn deserialize<'de, D>(de: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Deserialize::deserialize(de)?;
        Ok(value.filter(|s| !s.is_empty()))
    }

    pub(crate) fn serialize<S>(value: &Option<String>, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.as_deref().unwrap_or("").serialize(ser)
    }
}

/// Dates shown on profile pages, as `MM/DD/YYYY`.
pub(crate) mod mdy_date {
    use super::*;

    use serde::de::Error;

    const FORMAT: &str = "%m/%d/%Y";

    pub(crate) fn deserialize<'de, D>(de: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = Deserialize::deserialize(de)?;
        NaiveDate::parse_from_str(&value, FORMAT).map_err(D::Error::custom)
    }

    pub(crate) fn serialize<S>(value: &NaiveDate, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.format(FORMAT).to_string().serialize(ser)
    }
}

pub(crate) fn bool_to_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
