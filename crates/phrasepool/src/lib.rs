#![doc = include_str!("../README.md")]

mod error;
mod generator;
mod pool;
mod rand;
mod status;
mod storage;
mod words;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::pool::*;
pub use crate::rand::*;
pub use crate::status::*;
pub use crate::storage::*;
pub use crate::words::*;
