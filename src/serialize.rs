//! Contains custom serialization and deserialization functions.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use serde::{Serializer, Deserializer};
use serde::de::{self, Visitor, Unexpected};

/// The value written in place of a missing asset ID or app name.
pub const UNKNOWN: &str = "Unknown";

/// Serializes a number as a string and deserializes a number from either a string or a number.
pub mod string {
    use super::*;
    
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }
    
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + TryFrom<u64>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumericVisitor::<T>(PhantomData))
    }
}

struct NumericVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for NumericVisitor<T>
where
    T: FromStr + TryFrom<u64>,
    T::Err: Display,
{
    type Value = T;
    
    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string")
    }
    
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        T::try_from(v)
            .map_err(|_| de::Error::invalid_value(Unexpected::Unsigned(v), &self))
    }
    
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let unsigned = u64::try_from(v)
            .map_err(|_| de::Error::invalid_value(Unexpected::Signed(v), &self))?;
        
        self.visit_u64(unsigned)
    }
    
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.trim().parse::<T>().map_err(de::Error::custom)
    }
}

/// Deserializes a truthy value. Steam uses `1`/`0` for most flags but booleans and numeric
/// strings also appear.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;
    
    impl<'de> Visitor<'de> for TruthyVisitor {
        type Value = bool;
        
        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, an integer or a string")
        }
        
        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }
        
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }
        
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }
        
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(!matches!(v.trim(), "" | "0" | "false"))
        }
        
        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(false)
        }
    }
    
    deserializer.deserialize_any(TruthyVisitor)
}

/// Deserializes an ID sent as either a string or a number into a string. The ID is kept as-is
/// and never parsed.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;
    
    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;
        
        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an integer")
        }
        
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
        
        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }
        
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
        
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }
    
    deserializer.deserialize_any(IdVisitor)
}

/// Serializes an optional value as a string, writing [`UNKNOWN`] when it is missing.
pub fn string_or_unknown<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_str(UNKNOWN),
    }
}
