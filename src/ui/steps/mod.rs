//! Field definitions for each wizard step

pub mod account;
pub mod company;
pub mod documents;
pub mod members;
pub mod review;
