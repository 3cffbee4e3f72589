use crate::session::HandshakeStatus;
use std::io::{Read, Write};

/// Primitive operations of a native TLS session object.
///
/// Every method performs a single call over the given endpoints. Transport readiness problems are
/// reported as [`crate::session::SessionError::WouldBlock`].
pub trait SessionHandle {
  /// Runs one handshake step.
  fn handshake_step(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
  ) -> crate::Result<HandshakeStatus>;

  /// Owned copy of the DER encoded leaf certificate presented by the peer, if any.
  fn peer_certificate_der(&self) -> Option<Vec<u8>>;

  /// Decrypts received bytes into `buffer`, returning how many plaintext bytes were written.
  ///
  /// `Ok(0)` is only returned when the peer cleanly closed the session.
  fn recv(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    buffer: &mut [u8],
  ) -> crate::Result<usize>;

  /// Encrypts and sends `bytes`, returning how many plaintext bytes were accepted.
  fn send(&mut self, writer: &mut dyn Write, bytes: &[u8]) -> crate::Result<usize>;

  /// Sends the close notification.
  fn shutdown(&mut self, writer: &mut dyn Write) -> crate::Result<()>;

  /// Raw state code. See [`crate::session::SessionState`].
  fn state_code(&self) -> i32;
}

impl<T> SessionHandle for &mut T
where
  T: SessionHandle,
{
  #[inline]
  fn handshake_step(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
  ) -> crate::Result<HandshakeStatus> {
    (**self).handshake_step(reader, writer)
  }

  #[inline]
  fn peer_certificate_der(&self) -> Option<Vec<u8>> {
    (**self).peer_certificate_der()
  }

  #[inline]
  fn recv(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    buffer: &mut [u8],
  ) -> crate::Result<usize> {
    (**self).recv(reader, writer, buffer)
  }

  #[inline]
  fn send(&mut self, writer: &mut dyn Write, bytes: &[u8]) -> crate::Result<usize> {
    (**self).send(writer, bytes)
  }

  #[inline]
  fn shutdown(&mut self, writer: &mut dyn Write) -> crate::Result<()> {
    (**self).shutdown(writer)
  }

  #[inline]
  fn state_code(&self) -> i32 {
    (**self).state_code()
  }
}
