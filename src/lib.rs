#![deny(unused_must_use)]
#![deny(unsafe_code)]
#![allow(clippy::new_without_default)]

pub mod apis;
pub mod checks;

mod candle;
mod pair;
mod query;
mod report;
mod resolution;
mod suite;

pub use candle::*;
pub use pair::*;
pub use query::*;
pub use report::*;
pub use resolution::*;
pub use suite::*;
