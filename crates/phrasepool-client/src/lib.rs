#![doc = include_str!("../README.md")]

mod error;
mod issuer;
mod shell;

pub use crate::error::*;
pub use crate::issuer::*;
pub use crate::shell::*;
