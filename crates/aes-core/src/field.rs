//! GF(2^8) arithmetic over the AES reduction polynomial x^8 + x^4 + x^3 + x + 1.

use core::fmt;

/// Low byte of the reduction polynomial 0x11b; the x^8 term falls off when shifting a `u8`.
const REDUCTION: u8 = 0x1b;

/// A byte interpreted as an element of GF(2^8).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Byte(pub u8);

impl Byte {
    /// Additive identity.
    pub const ZERO: Self = Self(0);
    /// Multiplicative identity.
    pub const ONE: Self = Self(1);

    /// Wraps a raw byte.
    #[inline]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw byte.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Field addition (bitwise XOR).
    #[inline]
    pub const fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }

    /// Multiplication by `x` (`{02}`), reduced modulo the AES polynomial.
    #[inline]
    pub const fn double(self) -> Self {
        let shifted = self.0 << 1;
        if self.0 & 0x80 != 0 {
            Self(shifted ^ REDUCTION)
        } else {
            Self(shifted)
        }
    }

    /// Field multiplication.
    ///
    /// Accumulates `x^k * self` for every set bit `k` of `rhs`, which is the schoolbook
    /// polynomial product reduced one degree at a time.
    pub const fn multiply(self, rhs: Self) -> Self {
        let mut acc = 0u8;
        let mut power = self;
        let mut bits = rhs.0;
        while bits != 0 {
            if bits & 1 != 0 {
                acc ^= power.0;
            }
            power = power.double();
            bits >>= 1;
        }
        Self(acc)
    }

    /// Raises the element to `exp` by square-and-multiply.
    pub const fn pow(self, mut exp: u32) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        while exp != 0 {
            if exp & 1 != 0 {
                result = result.multiply(base);
            }
            base = base.multiply(base);
            exp >>= 1;
        }
        result
    }

    /// Multiplicative inverse, with `0` mapped to `0` as in the S-box definition.
    #[inline]
    pub const fn inverse(self) -> Self {
        // a^255 = 1 for every non-zero a.
        self.pow(254)
    }
}

impl From<u8> for Byte {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Byte> for u8 {
    fn from(value: Byte) -> Self {
        value.0
    }
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

impl fmt::LowerHex for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> impl Iterator<Item = Byte> + Clone {
        (0u8..=255).map(Byte)
    }

    #[test]
    fn fips197_multiplication_examples() {
        assert_eq!(Byte(0x57).multiply(Byte(0x83)), Byte(0xc1));
        assert_eq!(Byte(0x57).multiply(Byte(0x13)), Byte(0xfe));
    }

    #[test]
    fn double_chain_matches_fips197() {
        let chain: Vec<u8> = core::iter::successors(Some(Byte(0x57)), |b| Some(b.double()))
            .take(5)
            .map(Byte::value)
            .collect();
        assert_eq!(chain, vec![0x57, 0xae, 0x47, 0x8e, 0x07]);
    }

    #[test]
    fn addition_is_xor_and_self_inverse() {
        for a in all() {
            assert_eq!(a.add(Byte::ZERO), a);
            assert_eq!(a.add(a), Byte::ZERO);
            for b in all() {
                assert_eq!(a.add(b).value(), a.value() ^ b.value());
            }
        }
    }

    #[test]
    fn multiplication_is_commutative() {
        for a in all() {
            for b in all() {
                assert_eq!(a.multiply(b), b.multiply(a), "{a} * {b}");
            }
        }
    }

    #[test]
    fn multiplication_distributes_over_addition() {
        // Every product is taken from `multiply` once, so the 256^3 check stays table lookups.
        let table: Vec<[Byte; 256]> = all()
            .map(|a| {
                let mut row = [Byte::ZERO; 256];
                for b in all() {
                    row[usize::from(b.value())] = a.multiply(b);
                }
                row
            })
            .collect();
        for a in all() {
            let row = &table[usize::from(a.value())];
            for b in all() {
                for c in all() {
                    let lhs = row[usize::from(b.add(c).value())];
                    let rhs = row[usize::from(b.value())].add(row[usize::from(c.value())]);
                    assert_eq!(lhs, rhs, "{a} * ({b} + {c})");
                }
            }
        }
    }

    #[test]
    fn identity_and_absorbing_elements() {
        for a in all() {
            assert_eq!(a.multiply(Byte::ONE), a);
            assert_eq!(a.multiply(Byte::ZERO), Byte::ZERO);
            assert_eq!(Byte::ZERO.multiply(a), Byte::ZERO);
        }
    }

    #[test]
    fn inverse_round_trips() {
        assert_eq!(Byte::ZERO.inverse(), Byte::ZERO);
        assert_eq!(Byte(0x53).inverse(), Byte(0xca));
        for a in all().skip(1) {
            assert_eq!(a.multiply(a.inverse()), Byte::ONE, "{a}");
        }
    }

    #[test]
    fn display_is_two_hex_digits() {
        assert_eq!(Byte(0x0a).to_string(), "0a");
        assert_eq!(format!("{:x}", Byte(0xf0)), "f0");
    }
}
