#![allow(dead_code)]

pub mod mock_client;
pub mod observers;
pub mod strategies;

pub use mock_client::*;
pub use observers::*;
