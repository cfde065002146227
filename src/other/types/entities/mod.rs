pub mod signer;
pub mod user;
