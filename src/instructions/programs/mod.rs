//! Static tables of the registered programs

pub mod associated_token;
pub mod compute_budget;
pub mod memo;
pub mod stake;
pub mod token;
