//! Discrete logarithms modulo a prime.
//!
//! The solver splits the group order with Pollard's rho, bottoms out in
//! baby-step/giant-step once an order resists splitting, and recombines the
//! subgroup logarithms on the way back up. All loops are bounded: a missing
//! logarithm or a broken group assumption comes back as a [`DlogError`]
//! instead of a hang or a panic.

use alloc::collections::BTreeMap;
use core::ops::Sub;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;
use thiserror::Error;

use crate::factor::find_factor;
use crate::math::mod_inverse;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum DlogError {
    /// Every candidate exponent up to the stated order was checked without a
    /// hit: `target` is not a power of `base` in that subgroup.
    #[error("no logarithm of {target} to base {base} exists below order {order}")]
    LogarithmNotFound {
        target: BigInt,
        base: BigInt,
        order: BigInt,
    },
    /// A modular inverse failed where the group algebra promised one; with a
    /// prime modulus this means the parameters were wrong from the start.
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: BigInt, modulus: BigInt },
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DlogParameters {
    /// Modulus
    pub p: BigInt,

    /// Generator
    pub g: BigInt,
}

impl DlogParameters {
    /// Determines whether the given value belongs to the group Z_p
    pub fn belongs_to_group(&self, value: &BigInt) -> bool {
        value.is_positive() && value < &self.p
    }

    /// Order of the full multiplicative group, `p - 1` for a prime modulus.
    pub fn order(&self) -> BigInt {
        self.p.clone().sub(1 as i32)
    }

    /// Logarithm of `target` to the base of the generator `g`, searching the
    /// full group order. The query is reduced into canonical range first;
    /// everything else is left to [`solve`].
    pub fn discrete_log<R: Rng + ?Sized>(
        &self,
        target: &BigInt,
        rng: &mut R,
    ) -> Result<BigInt, DlogError> {
        let target = if self.p.is_positive() {
            target.mod_floor(&self.p)
        } else {
            target.clone()
        };
        solve(&target, &self.g, &self.order(), &self.p, rng)
    }
}

/// Ceiling integer square root; `Roots::sqrt` floors.
fn ceil_sqrt(n: &BigInt) -> BigInt {
    let root = n.sqrt();
    if &root * &root == *n {
        root
    } else {
        root + 1u32
    }
}

///
/// # Baby-step/giant-step
///
/// Finds `x` with `base^x = target (mod modulus)` inside the subgroup of the
/// given `order` generated by `base`. Handles prime and composite orders
/// alike in `O(sqrt(order))` time and table space.
///
/// With `m = ceil(sqrt(order)) + 1`, the giant loop runs `i` through
/// `[0, m]`, so the candidate exponents `i*m + j` sweep all of `[0, order]`;
/// exhausting them proves there is no logarithm under the stated order and
/// yields [`DlogError::LogarithmNotFound`] rather than looping on.
///
pub fn bsgs(
    target: &BigInt,
    base: &BigInt,
    order: &BigInt,
    modulus: &BigInt,
) -> Result<BigInt, DlogError> {
    let not_found = || DlogError::LogarithmNotFound {
        target: target.clone(),
        base: base.clone(),
        order: order.clone(),
    };
    // A negative order only happens with nonsense parameters (p < 1); that
    // is an empty search range, not a panic.
    if order.is_negative() {
        return Err(not_found());
    }

    let m = ceil_sqrt(order) + 1u32;

    // Baby steps: base^j for j in [0, m); the first j wins on repeated
    // values, which keeps answers minimal when m exceeds the subgroup size.
    let mut table: BTreeMap<BigInt, BigInt> = BTreeMap::new();
    let mut am = BigInt::one();
    for j in num_iter::range(BigInt::zero(), m.clone()) {
        table.entry(am.clone()).or_insert(j);
        am = am * base % modulus;
    }

    // Giant steps: walk target * base^(-m*i); a table hit at j means
    // base^(i*m + j) equals target exactly.
    let base_m = base.modpow(&m, modulus);
    let factor = mod_inverse(&base_m, modulus).ok_or_else(|| DlogError::NotInvertible {
        value: base_m.clone(),
        modulus: modulus.clone(),
    })?;

    let mut g0 = target.mod_floor(modulus);
    for i in num_iter::range_inclusive(BigInt::zero(), m.clone()) {
        if let Some(j) = table.get(&g0) {
            return Ok(i * &m + j);
        }
        g0 = g0 * &factor % modulus;
    }
    Err(not_found())
}

///
/// # Order-splitting solver
///
/// Logarithm of `target` to `base` within the cyclic group of the given
/// `order` modulo `modulus`, recursing on a factor split of the order.
///
/// The factor finder draws its starting points from `rng`; pass one seeded
/// generator through a whole batch for reproducible runs. When the order
/// resists splitting the call degrades to plain [`bsgs`], so the answer (or
/// the failure) is the same either way.
///
pub fn solve<R: Rng + ?Sized>(
    target: &BigInt,
    base: &BigInt,
    order: &BigInt,
    modulus: &BigInt,
    rng: &mut R,
) -> Result<BigInt, DlogError> {
    let m = find_factor(order, rng);
    if m == *order {
        return bsgs(target, base, order, modulus);
    }
    let cofactor = order / &m;

    // Coarse half: raising both sides to the cofactor lands the problem in
    // the subgroup of order m; the result is the answer mod m.
    let x2 = solve(
        &target.modpow(&cofactor, modulus),
        &base.modpow(&cofactor, modulus),
        &m,
        modulus,
        rng,
    )?;

    // Strip the recovered low part; what remains is a power of base^m,
    // the generator of the subgroup of order `cofactor`.
    let base_x2 = base.modpow(&x2, modulus);
    let shifted = match mod_inverse(&base_x2, modulus) {
        Some(inverse) => target * inverse % modulus,
        None => {
            return Err(DlogError::NotInvertible {
                value: base_x2,
                modulus: modulus.clone(),
            })
        }
    };
    let x1 = solve(&shifted, &base.modpow(&m, modulus), &cofactor, modulus, rng)?;

    Ok(m * x1 + x2)
}
