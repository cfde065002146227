use std::str::FromStr;

mod config;
mod environment;
pub use config::*;
pub use environment::*;

/// Utility to attempt leaking a Box to your desired static reference type.
fn try_leak<ToLeak, R: ?Sized>(to_leak: ToLeak) -> Option<&'static R>
where
  Box<R>: TryFrom<ToLeak>,
{
  let leaked: &'static R = Box::<R>::try_from(to_leak).ok().map(Box::leak)?;
  Some(leaked)
}

/// Reads a variable from the process environment. Empty values count as unset.
fn lookup_env(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Useful when you want to handle the Option yourself, and do not want the
/// result to be leaked.
///
/// The leaking version of this is `var_opt`.
fn owned_var_opt<T: FromStr>(name: &'static str) -> Option<T> {
  lookup_env(name)?.parse::<T>().ok()
}

/// Useful when you want to provide a default value for the environment variable,
/// but you do not want the parsed result to be leaked or static.
/// E.g.: Any Copy type. Not worth leaking.
fn owned_var_or<T: FromStr>(name: &'static str, default: T) -> T {
  owned_var_opt(name).unwrap_or(default)
}

/// Useful when you want to handle the Option yourself.
///
/// # Leaks
/// This method will leak the parsed value, if any.
fn var_opt<Parsed: FromStr, R: ?Sized>(name: &'static str) -> Option<&'static R>
where
  Box<R>: TryFrom<Parsed>,
{
  try_leak(owned_var_opt::<Parsed>(name)?)
}

/// Useful when you want to provide a default value for the environment variable,
/// but you don't have a static reference to the value.
/// E.g.: An owned `PathBuf` -> A `&'static Path`.
///
/// # Leaks
/// This method will leak the parsed or the default value.
fn var_or_else<Parsed: Into<Box<R>> + FromStr + Sized, R: ?Sized, V: FnOnce() -> Parsed>(
  name: &'static str,
  default: V,
) -> &'static R
where
  Box<R>: TryFrom<Parsed>,
{
  var_opt::<Parsed, R>(name).unwrap_or_else(|| Box::leak(default().into()))
}
