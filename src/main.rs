//! Batch discrete-logarithm runner.
//!
//! Reads whitespace-separated decimal tokens from stdin in fixed order:
//! modulus `p`, generator `g`, query count `k`, then `k` group elements.
//! Prints one logarithm per line on stdout; failed queries are reported on
//! stderr and the batch keeps going.

use std::error::Error;
use std::io::{self, Read};
use std::process;
use std::str::SplitWhitespace;

use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use dlp::dlog::{DlogError, DlogParameters};

/// Fixed seed so a rerun over the same input reproduces its factor splits.
const RNG_SEED: u64 = 0xf012_3456_789a_bcde;

fn next_token<'a>(
    tokens: &mut SplitWhitespace<'a>,
    what: &str,
) -> Result<&'a str, Box<dyn Error>> {
    tokens
        .next()
        .ok_or_else(|| format!("unexpected end of input, expected {}", what).into())
}

fn next_bigint(tokens: &mut SplitWhitespace<'_>, what: &str) -> Result<BigInt, Box<dyn Error>> {
    let token = next_token(tokens, what)?;
    token
        .parse()
        .map_err(|err| format!("bad {} {:?}: {}", what, token, err).into())
}

fn parse_input(input: &str) -> Result<(DlogParameters, Vec<BigInt>), Box<dyn Error>> {
    let mut tokens = input.split_whitespace();

    let p = next_bigint(&mut tokens, "modulus")?;
    let g = next_bigint(&mut tokens, "generator")?;

    let token = next_token(&mut tokens, "query count")?;
    let count: usize = token
        .parse()
        .map_err(|err| format!("bad query count {:?}: {}", token, err))?;

    // The count is untrusted; cap the preallocation so an absurd value
    // surfaces as a missing query token, not an allocation abort.
    let mut queries = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        queries.push(next_bigint(&mut tokens, "query element")?);
    }
    // Anything after the k-th query is ignored.

    Ok((DlogParameters { p, g }, queries))
}

/// Failed queries print no stdout line, so the diagnostic carries the
/// query value to keep stderr mappable back to the input.
fn describe_failure(target: &BigInt, err: &DlogError) -> String {
    format!("query {}: {}", target, err)
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let (params, queries) = parse_input(&input)?;

    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    for target in &queries {
        match params.discrete_log(target, &mut rng) {
            Ok(x) => println!("{}", x),
            Err(err) => eprintln!("error: {}", describe_failure(target, &err)),
        }
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
