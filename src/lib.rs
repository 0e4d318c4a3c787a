#![doc = include_str!("../README.md")]

pub mod checksum;
pub mod easy;
pub mod error;
pub mod frame;
pub mod models;
pub mod reader;
pub mod utilities;
pub mod validator;

pub use checksum::*;
pub use error::*;
pub use validator::*;
