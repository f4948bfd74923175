#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use source::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod source;
mod store;
mod tile;
mod types;
