#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

mod error;
pub mod misc;
pub mod session;
pub mod tls;

pub use error::Error;

/// Shortcut of [`core::result::Result<T, Error>`].
pub type Result<T> = core::result::Result<T, Error>;
