//! Took from here how to work with no_std and std
//! https://github.com/KodrAus/rust-no-std

#![no_std]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

extern crate alloc;

#[allow(clippy::many_single_char_names)]
pub mod dlog;
#[allow(clippy::many_single_char_names)]
pub mod factor;
#[allow(clippy::many_single_char_names)]
pub mod math;
