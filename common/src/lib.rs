pub mod config;
pub mod error;
pub mod nat;
pub mod network;
