//! Plain data values: primitives and structured data.

use std::fmt;
use std::sync::Arc;

use crate::collections::{CfMap, CfVec};

/// A plain data value stored in or read from a store.
///
/// Values are immutable and cheaply cloneable; composite values use
/// structural sharing via persistent collections. `Nil` doubles as the
/// absence marker: reading a never-written key yields `Nil`, never an error.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Ordered sequence of values.
    List(CfVec<Value>),
    /// Insertion-ordered structured data.
    ///
    /// Writing a map to a store auto-vivifies a nested store node.
    Map(CfMap<Arc<str>, Value>),
}

impl Value {
    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value is a primitive.
    ///
    /// Primitives are nil, booleans, numbers, and strings; lists and maps
    /// are structured data.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Nil | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Returns true if this value is structured data (a list or map).
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list reference.
    #[must_use]
    pub const fn as_list(&self) -> Option<&CfVec<Value>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&CfMap<Arc<str>, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(l) => write!(f, "{l:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(l) => {
                write!(f, "[")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<CfVec<Value>> for Value {
    fn from(l: CfVec<Value>) -> Self {
        Self::List(l)
    }
}

impl From<CfMap<Arc<str>, Value>> for Value {
    fn from(m: CfMap<Arc<str>, Value>) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::Value;
    use crate::collections::{CfMap, CfVec};
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::{SerializeMap, SerializeSeq};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;
    use std::sync::Arc;

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Value::Nil => serializer.serialize_unit(),
                Value::Bool(b) => serializer.serialize_bool(*b),
                Value::Int(n) => serializer.serialize_i64(*n),
                Value::Float(n) => serializer.serialize_f64(*n),
                Value::String(s) => serializer.serialize_str(s),
                Value::List(l) => {
                    let mut seq = serializer.serialize_seq(Some(l.len()))?;
                    for item in l.iter() {
                        seq.serialize_element(item)?;
                    }
                    seq.end()
                }
                Value::Map(m) => {
                    let mut map = serializer.serialize_map(Some(m.len()))?;
                    for (k, v) in m.iter() {
                        map.serialize_entry(&**k, v)?;
                    }
                    map.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct ValueVisitor;

            impl<'de> Visitor<'de> for ValueVisitor {
                type Value = Value;

                fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                    formatter.write_str("a plain data value")
                }

                fn visit_unit<E>(self) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::Nil)
                }

                fn visit_none<E>(self) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::Nil)
                }

                fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    Value::deserialize(deserializer)
                }

                fn visit_bool<E>(self, b: bool) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::Bool(b))
                }

                fn visit_i64<E>(self, n: i64) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::Int(n))
                }

                #[allow(clippy::cast_precision_loss)]
                fn visit_u64<E>(self, n: u64) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    // Values above i64::MAX degrade to floats
                    Ok(i64::try_from(n).map_or(Value::Float(n as f64), Value::Int))
                }

                fn visit_f64<E>(self, n: f64) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::Float(n))
                }

                fn visit_str<E>(self, s: &str) -> std::result::Result<Value, E>
                where
                    E: serde::de::Error,
                {
                    Ok(Value::String(s.into()))
                }

                fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let mut list = CfVec::new();
                    while let Some(item) = seq.next_element()? {
                        list = list.push_back(item);
                    }
                    Ok(Value::List(list))
                }

                fn visit_map<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let mut map = CfMap::new();
                    while let Some((key, value)) = access.next_entry::<String, Value>()? {
                        map = map.insert(Arc::from(key.as_str()), value);
                    }
                    Ok(Value::Map(map))
                }
            }

            deserializer.deserialize_any(ValueVisitor)
        }
    }
}
