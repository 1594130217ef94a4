use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Money in thousandths, can be negative when expressing debt.
#[derive(Default, Copy, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);

    pub const fn new_inner(inner: i64) -> Self {
        Self(inner)
    }

    pub const fn new_cents(cents: i64) -> Self {
        Self(cents * 100)
    }

    pub const fn new_bucks(base: i64) -> Self {
        Self(base * 10000)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }

    pub fn cents(&self) -> i64 {
        self.0 / 100
    }

    pub fn bucks(&self) -> i64 {
        self.0 / 10000
    }

    /// Scales without wrapping, caps ride close to i64 once in thousandths
    pub const fn saturating_mul(self, rhs: i64) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&(self.bucks()), f)?;
        let cent = (self.0 % 10000) / 100;
        if cent > 0 {
            f.write_str(".")?;
            if cent < 10 {
                f.write_str("0")?;
            }
            Display::fmt(&cent, f)?;
        }
        f.write_str("$")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, rhs: i64) -> Self::Output {
        Money(self.0 * rhs)
    }
}

impl Mul<Money> for i64 {
    type Output = Money;

    fn mul(self, rhs: Money) -> Self::Output {
        Money(self * rhs.0)
    }
}

/// How many whole units of rhs fit in self, for example funds / price-per-unit
impl Div<Money> for Money {
    type Output = i64;

    fn div(self, rhs: Money) -> Self::Output {
        self.0 / rhs.0
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::add)
    }
}
