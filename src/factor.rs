//! Pollard's rho over `BigInt`, used to split a group order before the
//! subgroup solver takes over. Not a general factorizer: one divisor per
//! call is all the order-splitting recursion needs.

use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// One step of the iteration map `f(t) = (t^2 + 1) mod n`.
#[inline]
fn advance(t: &BigInt, n: &BigInt) -> BigInt {
    (t * t + 1u32) % n
}

///
/// Searches for a divisor of `n` with the Floyd-cycle variant of Pollard's
/// rho, starting from a point drawn uniformly from `[0, n)` out of `rng`.
///
/// The return value is always a divisor of `n` and never `1`:
/// - `n` itself for `n < 2` (already reduced) and whenever the cycle closes
///   without exposing a proper divisor (the expected outcome for prime `n`,
///   and the designated can't-split signal for the caller);
/// - `2` for even `n`;
/// - a non-trivial divisor otherwise, with high probability, in expected
///   `O(n^(1/4))` multiplications.
///
/// Termination does not rely on luck: once tortoise and hare collide,
/// `gcd(0, n) = n` ends the loop.
pub fn find_factor<R: Rng + ?Sized>(n: &BigInt, rng: &mut R) -> BigInt {
    if *n < BigInt::from(2) {
        return n.clone();
    }
    if n.is_even() {
        return BigInt::from(2);
    }

    let mut x = rng.gen_bigint_range(&BigInt::zero(), n);
    let mut y = x.clone();
    loop {
        x = advance(&x, n);
        y = advance(&advance(&y, n), n);
        let d = (&x - &y).gcd(n);
        if !d.is_one() {
            return d;
        }
    }
}
