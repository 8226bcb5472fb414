use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use err_derive::Error;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount of money, held as whole cents so that sums of
/// prices stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceParseError {
    #[error(display = "Not a price: {:?}", _0)]
    Malformed(String),
    #[error(display = "Too many decimal places: {:?}", _0)]
    TooPrecise(String),
}

const CENTS_PER_UNIT: u64 = 100;

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn as_cents(&self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Price;
    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl Mul<u32> for Price {
    type Output = Price;
    fn mul(self, quantity: u32) -> Price {
        Price(self.0 * u64::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = format!("{}.{:02}", self.0 / CENTS_PER_UNIT, self.0 % CENTS_PER_UNIT);
        fmt.pad(&s)
    }
}

impl FromStr for Price {
    type Err = PriceParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let malformed = || PriceParseError::Malformed(src.to_string());
        let (whole, frac) = match src.find('.') {
            Some(idx) => (&src[..idx], &src[idx + 1..]),
            None => (src, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if frac.len() > 2 {
            return Err(PriceParseError::TooPrecise(src.to_string()));
        }
        let units = whole.parse::<u64>().map_err(|_| malformed())?;
        let cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => frac.parse::<u64>().map_err(|_| malformed())?,
        };
        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Price)
            .ok_or_else(malformed)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;
        impl<'vi> de::Visitor<'vi> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a decimal price string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
                value.parse::<Price>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(PriceVisitor)
    }
}
