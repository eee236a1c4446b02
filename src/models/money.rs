use {
    rust_decimal::{Decimal, prelude::ToPrimitive},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// Number of decimal places carried by [`Money`].
pub const SCALE: u32 = 2;

/// A monetary amount in minor units (cents).
///
/// Balances and transaction amounts are integers all the way down to the
/// database. Conversion to a decimal happens only when a value is parsed from
/// user input or rendered into a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("amount is missing")]
    Empty,
    #[error("amount is not a number")]
    NotANumber,
    #[error("amount has more than {SCALE} decimal places")]
    TooPrecise,
    #[error("amount is out of range")]
    OutOfRange,
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor_units(value: i64) -> Self {
        Money(value)
    }

    /// Whole currency units, e.g. `Money::from_major(100)` is 100.00.
    pub fn from_major(units: i64) -> Option<Self> {
        units.checked_mul(10_i64.pow(SCALE)).map(Money)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let value = Decimal::from_str(trimmed).map_err(|_| MoneyParseError::NotANumber)?;
        if value.normalize().scale() > SCALE {
            return Err(MoneyParseError::TooPrecise);
        }

        let minor = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.to_i64())
            .ok_or(MoneyParseError::OutOfRange)?;

        Ok(Money(minor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional_amounts() {
        assert_eq!("100".parse::<Money>(), Ok(Money(10_000)));
        assert_eq!("0.1".parse::<Money>(), Ok(Money(10)));
        assert_eq!(" 12.34 ".parse::<Money>(), Ok(Money(1_234)));
        assert_eq!("10.500".parse::<Money>(), Ok(Money(1_050)));
    }

    #[test]
    fn test_parse_keeps_sign() {
        assert_eq!("-5".parse::<Money>(), Ok(Money(-500)));
        assert_eq!("0".parse::<Money>(), Ok(Money::ZERO));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert_eq!("xyz".parse::<Money>(), Err(MoneyParseError::NotANumber));
        assert_eq!("1.005".parse::<Money>(), Err(MoneyParseError::TooPrecise));
        assert_eq!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::OutOfRange)
        );
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Money(10_000).to_string(), "100.00");
        assert_eq!(Money(5).to_string(), "0.05");
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Money(i64::MAX).checked_add(Money(1)), None);
        assert_eq!(Money(300).checked_sub(Money(100)), Some(Money(200)));
        assert_eq!(Money::from_major(100), Some(Money(10_000)));
    }
}
