use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use err_derive::Error;
use rand::distributions::{Distribution, Standard};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// An identifier for some `T`. Catalog identifiers are assigned by hand
/// (`pizza-1`), whereas things like orders mint their own via `rand`, in
/// which case they look like `order-<base32>`.
pub struct Id<T> {
    val: String,
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error(display = "Empty identifier")]
    Empty,
    #[error(display = "Identifier contains whitespace: {:?}", _0)]
    Whitespace(String),
}

pub trait Entity {
    const PREFIX: &'static str;
}

const DIVIDER: &str = "-";
const RANDOM_BYTES: usize = 10;

impl<T> Id<T> {
    pub fn as_str(&self) -> &str {
        &self.val
    }

    fn unchecked(val: String) -> Self {
        Id {
            val,
            phantom: PhantomData,
        }
    }
}

impl<T: Entity> Id<T> {
    pub fn generate() -> Self {
        rand::random()
    }
}

impl<T: Entity> Distribution<Id<T>> for Standard {
    fn sample<R: ?Sized + rand::Rng>(&self, rng: &mut R) -> Id<T> {
        let raw: [u8; RANDOM_BYTES] = rng.gen();
        let suffix = data_encoding::BASE32_NOPAD.encode(&raw).to_lowercase();
        Id::unchecked(format!("{}{}{}", T::PREFIX, DIVIDER, suffix))
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.pad(&self.val)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_tuple("Id").field(&self.val).finish()
    }
}

impl<T> std::str::FromStr for Id<T> {
    type Err = IdParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.is_empty() {
            return Err(IdParseError::Empty);
        }
        if src.chars().any(char::is_whitespace) {
            return Err(IdParseError::Whitespace(src.to_string()));
        }
        Ok(Id::unchecked(src.to_string()))
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id::unchecked(self.val.clone())
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.val)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdStrVisitor<T>(PhantomData<T>);
        impl<'vi, T> de::Visitor<'vi> for IdStrVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an Id string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Id<T>, E> {
                value.parse::<Id<T>>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdStrVisitor(PhantomData))
    }
}
