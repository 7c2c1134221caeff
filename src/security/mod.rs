//! Security Module
//!
//! Transaction policies that make confirmation screens mandatory.

pub mod tx_policy;

pub use tx_policy::*;
