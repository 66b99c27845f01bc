//! Minimal BabyBear field implementation.
//!
//! BabyBear is a 31-bit prime field with p = 2^31 - 2^27 + 1 = 2013265921,
//! used by the algebraic (Poseidon2-style) hash instantiations.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// BabyBear prime: p = 2^31 - 2^27 + 1 = 2013265921
pub const P: u32 = 2_013_265_921;

/// BabyBear field element, stored as its canonical representative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabyBear(u32);

impl BabyBear {
    /// Zero element.
    pub const ZERO: Self = Self(0);

    /// One element.
    pub const ONE: Self = Self(1);

    /// Create a new field element, reducing mod p.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value % P)
    }

    /// Create a field element from a u64, reducing mod p.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self((value % P as u64) as u32)
    }

    /// Get the canonical representative.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Compute self^exp mod p using binary exponentiation.
    #[inline]
    pub fn pow(self, mut exp: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            exp >>= 1;
        }
        result
    }

    /// Compute the modular inverse via Fermat's little theorem.
    #[inline]
    pub fn inverse(self) -> Self {
        self.pow(P - 2)
    }
}

impl Add for BabyBear {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let sum = self.0 + rhs.0;
        Self(if sum >= P { sum - P } else { sum })
    }
}

impl AddAssign for BabyBear {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BabyBear {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(P - rhs.0 + self.0)
        }
    }
}

impl SubAssign for BabyBear {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for BabyBear {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let prod = self.0 as u64 * rhs.0 as u64;
        Self((prod % P as u64) as u32)
    }
}

impl MulAssign for BabyBear {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for BabyBear {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        if self.0 == 0 {
            self
        } else {
            Self(P - self.0)
        }
    }
}
