pub mod mgmt;
pub mod nat;
pub mod network;
pub mod probe;
