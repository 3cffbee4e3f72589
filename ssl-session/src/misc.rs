//! Miscellaneous

mod enum_var_strings;

use core::any::type_name;
pub use enum_var_strings::EnumVarStrings;

/// Useful when a request returns an optional field but the actual usage is within a
/// [`core::result::Result`] context.
#[track_caller]
#[inline]
pub fn into_rslt<T>(opt: Option<T>) -> crate::Result<T> {
  opt.ok_or(crate::Error::NoInnerValue(type_name::<T>()))
}

/// A tracing register with optioned parameters.
///
/// The filter is read from `RUST_LOG` and falls back to `fallback_opt` when the variable is absent
/// or invalid.
#[cfg(feature = "_tracing-subscriber")]
pub fn tracing_tree_init(
  fallback_opt: Option<&str>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
  use tracing_subscriber::{
    EnvFilter, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
  };
  let fallback = fallback_opt.unwrap_or("");
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let tracing_tree = tracing_tree::HierarchicalLayer::default()
    .with_indent_amount(2)
    .with_indent_lines(true)
    .with_targets(true)
    .with_thread_ids(true)
    .with_thread_names(true)
    .with_verbose_entry(false)
    .with_verbose_exit(false)
    .with_writer(std::io::stderr);
  tracing_subscriber::Registry::default().with(env_filter).with(tracing_tree).try_init()
}
