pub mod mail;
pub mod signer;
pub mod token;
pub mod webutils;
