use crate::session::SessionHandle;

/// Factory of session handles that share the same configuration.
pub trait SessionContext {
  /// Handle created by this context.
  type Handle: SessionHandle;

  /// Allocates a new handle.
  fn new_handle(&self) -> crate::Result<Self::Handle>;
}

impl<T> SessionContext for &T
where
  T: SessionContext,
{
  type Handle = T::Handle;

  #[inline]
  fn new_handle(&self) -> crate::Result<Self::Handle> {
    (**self).new_handle()
  }
}
