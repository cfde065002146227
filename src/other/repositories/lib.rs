pub mod signer;

/// # Loadable<T>
/// Represents the type of a T that can be loaded from a
/// store, where the read can either fail, resolve to None
/// or resolve to Some(T).
///
/// ## Variants
/// - Err(e)           read failed
/// - Ok(None)         T not found
/// - Ok(Some(T))      T found
pub type Loadable<T> = anyhow::Result<Option<T>>;
