pub mod entities;

/// Farcaster account identifier.
pub type Fid = u64;
