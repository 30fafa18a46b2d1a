pub mod account;
pub mod mail;
