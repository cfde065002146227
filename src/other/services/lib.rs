pub mod follow_gate;
pub mod follow_graph;
pub mod manifest;
pub mod non_followers;
pub mod operator;
pub mod signer;
pub mod signer_gate;
pub mod unfollow;
pub mod webhook;
