//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.to_i128() {
            Some(whole) if amount.is_integer() => {
                write!(f, "{whole}{currency}")
            }
            _ => write!(f, "{}{currency}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        if amount.is_sign_negative() {
            return Err("negative amount");
        }
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Turkish Lira."]
        Try = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "US Dollar."]
        Usd = 3,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::str::FromStr as _;

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Money;

    impl Serialize for Money {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_str(&raw).map_err(|e| {
                D::Error::custom(format!("invalid `Money` `{raw}`: {e}"))
            })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("125000.50TRY").unwrap(),
            Money {
                amount: decimal("125000.50"),
                currency: Currency::Try,
            },
        );

        assert_eq!(
            Money::from_str("4500EUR").unwrap(),
            Money {
                amount: decimal("4500"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("4500").is_err());
        assert!(Money::from_str("4500Eu").is_err());
        assert!(Money::from_str("4500Euros").is_err());
        assert!(Money::from_str("-10USD").is_err());
        assert!(Money::from_str("10TL€").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("125000.50"),
                currency: Currency::Try,
            }
            .to_string(),
            "125000.5TRY",
        );

        assert_eq!(
            Money {
                amount: decimal("4500.00"),
                currency: Currency::Eur,
            }
            .to_string(),
            "4500EUR",
        );
    }
}
