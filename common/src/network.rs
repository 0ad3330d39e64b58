pub mod flags;
pub mod ip;
