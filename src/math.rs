use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

///
/// Compute division in a multiplicative finite field `p` of `a/b`.
/// This equates to `a * mod_inverse(b, p)`.
/// The `division` is modeled as a multiplication with the modular multiplicative inverse.
pub fn mod_div(a: &BigInt, b: &BigInt, m: &BigInt) -> Option<BigInt> {
    mod_inverse(b, m).map(|inverse| a * inverse % m)
}

///
/// # Modular Inverse
///
/// Calculates the modular inverse `a^-1 mod m` for a positive modulus `m`,
/// reduced into `[0, m)`. Returns `None` when `a` and `m` are not coprime,
/// which is the caller's signal that a group assumption broke.
///
/// ## Credits
/// Inspired by [simon-andrews/rust-modinverse](https://github.com/simon-andrews/rust-modinverse)
/// Found in [crypto-rs](https://github.com/provotum/crypto-rs/blob/master/src/arithmetic/mod_inverse.rs)
///
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    // Reduce first so the recursion precondition `a < m` holds for any
    // input, negative included.
    let a = a.mod_floor(m);
    let (g, x, _) = extended_gcd(&a, m);
    if g != BigInt::one() {
        None
    } else {
        // actually use the modulus instead of the remainder
        // operator "%" which behaves differently for negative values
        // -> https://stackoverflow.com/questions/31210357/is-there-a-modulus-not-remainder-function-operation
        Some(((x % m) + m) % m)
    }
}

fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    assert!(a < b);
    if *a == BigInt::zero() {
        (b.clone(), BigInt::zero(), BigInt::one())
    } else {
        let (g, x, y) = extended_gcd(&(b % a), a);
        (g, y - (b / a) * x.clone(), x)
    }
}

///
/// # Miller-Rabin
///
/// Probable-prime test with `rounds` random witnesses drawn from `rng`.
/// A `false` is definite; a `true` is wrong with probability at most
/// `4^-rounds`. The solver never calls this, it is part of the arithmetic
/// surface for callers and tests.
///
pub fn is_prime<R: Rng + ?Sized>(n: &BigInt, rounds: usize, rng: &mut R) -> bool {
    let two = BigInt::from(2);
    if *n < two {
        return false;
    }
    if *n < BigInt::from(4) {
        // 2 and 3
        return true;
    }
    if n.is_even() {
        return false;
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - BigInt::one();
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    'witness: for _ in 0..rounds {
        let a = rng.gen_bigint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue 'witness;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}

///
/// # Tonelli-Shanks
///
/// Modular square root: finds `r` with `r^2 = n (mod p)` for an odd prime
/// `p` (and `p = 2` trivially). The input is reduced first; `None` means
/// `n` is no quadratic residue by Euler's criterion, which also covers
/// `n = 0`. The returned root is one of the pair `{r, p - r}`.
/// Termination relies on `p` being prime, like the oracles below.
///
pub fn tonelli_shanks(n: &BigInt, p: &BigInt) -> Option<BigInt> {
    let one = BigInt::one();
    let two = BigInt::from(2);
    let n = n.mod_floor(p);
    if *p == two {
        return Some(n);
    }
    let p_minus_one = p - &one;
    let half = &p_minus_one / &two;
    if n.modpow(&half, p) != one {
        return None;
    }

    // p - 1 = q * 2^s with q odd
    let mut q = p_minus_one.clone();
    let mut s = 0u32;
    while q.is_even() {
        q >>= 1;
        s += 1;
    }

    // Smallest non-residue; half the group qualifies, so the walk is short.
    let mut z = two.clone();
    while z.modpow(&half, p) != p_minus_one {
        z += 1;
    }

    let mut c = z.modpow(&q, p);
    let mut r = n.modpow(&((&q + &one) / &two), p);
    let mut t = n.modpow(&q, p);
    let mut m = s;

    while !t.is_one() {
        // Least i with t^(2^i) = 1; stays below m for a residue.
        let mut i = 1u32;
        let mut tq = t.modpow(&two, p);
        while !tq.is_one() {
            tq = tq.modpow(&two, p);
            i += 1;
        }
        let b = c.modpow(&(BigInt::one() << (m - i - 1)), p);
        r = r * &b % p;
        c = b.modpow(&two, p);
        t = t * &c % p;
        m = i;
    }
    Some(r)
}

///
/// Solve dlog mod `modulus` by brute force:
/// Attempts to find a value `i` such that `target = generator^i % modulus`
///
/// Only terminates when `target` is actually a power of `generator`; meant
/// as an oracle for small groups in tests and benchmarks.
pub fn brute_force_dlog(target: &BigInt, generator: &BigInt, modulus: &BigInt) -> BigInt {
    let mut i = BigInt::zero();

    while &generator.modpow(&i, modulus) != target {
        i += 1;
    }
    i
}

#[cfg(feature = "rayon")]
pub mod benchmark {
    use num_bigint::BigInt;
    use rayon::prelude::*;

    ///
    /// Bounded, parallel rendition of [`brute_force_dlog`](super::brute_force_dlog):
    /// sweeps exponents in `[0, upper_bound)` and returns the smallest hit,
    /// or `None` when the bound is exhausted.
    ///
    pub fn brute_force_dlog_bounded(
        target: &BigInt,
        generator: &BigInt,
        modulus: &BigInt,
        upper_bound: u64,
    ) -> Option<BigInt> {
        (0..upper_bound)
            .into_par_iter()
            .find_first(|item| &generator.modpow(&BigInt::from(*item), modulus) == target)
            .map(BigInt::from)
    }
}
