//! Blocking TLS session lifecycle over a read source and a write sink.
//!
//! [`SslSession`] owns exactly one [`SessionHandle`] and forwards handshake, read, write and
//! shutdown requests to it. The handle is created by a [`SessionContext`] or supplied by the caller
//! and is shut down at most once, either explicitly or when the session is dropped.

mod handshake_status;
mod peer_certificate;
mod session_context;
mod session_error;
mod session_handle;
mod session_state;
#[cfg(test)]
mod tests;

pub use handshake_status::HandshakeStatus;
pub use peer_certificate::PeerCertificate;
pub use session_context::SessionContext;
pub use session_error::SessionError;
pub use session_handle::SessionHandle;
pub use session_state::SessionState;
use std::io::{Read, Write};

/// Capacity of the scratch buffer used by [`SslSession::read`] unless something else is
/// specified.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// TLS session bound to a pair of byte endpoints.
///
/// `R` is the source of encrypted bytes coming from the peer and `W` is the sink of encrypted
/// bytes going to the peer. Both can be owned values or references.
#[derive(Debug)]
pub struct SslSession<H, R, W>
where
  H: SessionHandle,
  R: Read,
  W: Write,
{
  endpoints: Option<(R, W)>,
  handle: H,
  is_shutdown: bool,
  read_buffer_len: usize,
}

impl<H, R, W> SslSession<H, R, W>
where
  H: SessionHandle,
  R: Read,
  W: Write,
{
  /// Wraps an already allocated handle.
  #[inline]
  pub fn from_handle(handle: H) -> Self {
    Self { endpoints: None, handle, is_shutdown: false, read_buffer_len: DEFAULT_BUFFER_SIZE }
  }

  /// Asks `context` for a new handle. Nothing is created if the context fails.
  #[inline]
  pub fn from_context<C>(context: &C) -> crate::Result<Self>
  where
    C: SessionContext<Handle = H>,
  {
    let handle = context.new_handle()?;
    _debug!("Session handle allocated");
    Ok(Self::from_handle(handle))
  }

  /// Attaches the read source and the write sink. A previously bound pair is dropped.
  #[inline]
  pub fn bind_endpoints(&mut self, reader: R, writer: W) {
    _debug!("Binding endpoints");
    self.endpoints = Some((reader, writer));
  }

  /// Repeats [`Self::do_handshake`] until the handshake is complete or an error occurs.
  ///
  /// Endpoints that return [`std::io::ErrorKind::WouldBlock`] interrupt the loop with
  /// [`SessionError::WouldBlock`] and this method can be called again once they are ready.
  #[inline]
  pub fn complete_handshake(&mut self) -> crate::Result<()> {
    loop {
      if self.do_handshake()?.is_complete() {
        return Ok(());
      }
    }
  }

  /// Runs exactly one handshake step.
  ///
  /// Sessions that already sent the close notification refuse to step with
  /// [`SessionError::AlreadyShutdown`].
  #[inline]
  pub fn do_handshake(&mut self) -> crate::Result<HandshakeStatus> {
    if self.is_shutdown {
      return Err(SessionError::AlreadyShutdown.into());
    }
    let (handle, reader, writer) = self.parts()?;
    let status = handle.handshake_step(reader, writer)?;
    if status.is_complete() {
      _debug!("Handshake is complete");
    }
    Ok(status)
  }

  /// Underlying handle.
  #[inline]
  pub fn handle(&self) -> &H {
    &self.handle
  }

  /// If [`Self::shutdown`] was already called.
  #[inline]
  pub fn is_shutdown(&self) -> bool {
    self.is_shutdown
  }

  /// Certificate presented by the peer, if any.
  ///
  /// Every call returns a new owned copy.
  #[inline]
  pub fn peer_certificate(&self) -> crate::Result<Option<PeerCertificate>> {
    self.handle.peer_certificate_der().map(PeerCertificate::from_der).transpose()
  }

  /// Performs a single receive call into a scratch buffer of [`Self::read_buffer_len`] bytes and
  /// returns exactly the received bytes.
  ///
  /// A clean closure by the peer is reported as [`SessionError::PeerClosed`].
  #[inline]
  pub fn read(&mut self) -> crate::Result<Vec<u8>> {
    let len = self.read_buffer_len;
    let (handle, reader, writer) = self.parts()?;
    let mut buffer = vec![0; len];
    let read = handle.recv(reader, writer, &mut buffer)?;
    if read == 0 {
      _debug!("Peer closed the session");
      return Err(SessionError::PeerClosed.into());
    }
    _trace!(read, "Received plaintext");
    buffer.truncate(read);
    Ok(buffer)
  }

  /// Capacity of the scratch buffer used by [`Self::read`].
  #[inline]
  pub fn read_buffer_len(&self) -> usize {
    self.read_buffer_len
  }

  /// Same as [`Self::read`] but any outcome without bytes, including errors, is collapsed into an
  /// empty vector.
  #[inline]
  pub fn read_or_empty(&mut self) -> Vec<u8> {
    match self.read() {
      Ok(elem) => elem,
      Err(_err) => {
        _trace!("Discarding read error: {_err}");
        Vec::new()
      }
    }
  }

  /// Sends the close notification.
  ///
  /// Only the first call reaches the handle. Endpoints are not required, without them the
  /// notification is only queued.
  #[inline]
  pub fn shutdown(&mut self) -> crate::Result<()> {
    if self.is_shutdown {
      return Ok(());
    }
    self.is_shutdown = true;
    _debug!("Shutting down session");
    match self.endpoints.as_mut() {
      Some((_, writer)) => self.handle.shutdown(writer),
      None => self.handle.shutdown(&mut std::io::sink()),
    }
  }

  /// Coarse phase computed from the handle. Never cached.
  #[inline]
  pub fn state(&self) -> SessionState {
    SessionState::from_code(self.handle.state_code())
  }

  /// Changes the capacity of the scratch buffer used by [`Self::read`]. Zero restores
  /// [`DEFAULT_BUFFER_SIZE`].
  #[inline]
  pub fn with_read_buffer_len(mut self, len: usize) -> Self {
    self.read_buffer_len = if len == 0 { DEFAULT_BUFFER_SIZE } else { len };
    self
  }

  /// Submits `bytes` in a single call, returning how many of them were accepted. There are no
  /// retries for partial writes.
  #[inline]
  pub fn write(&mut self, bytes: &[u8]) -> crate::Result<usize> {
    if self.is_shutdown {
      return Err(SessionError::AlreadyShutdown.into());
    }
    let (handle, _, writer) = self.parts()?;
    let written = handle.send(writer, bytes)?;
    _trace!(written, "Sent plaintext");
    Ok(written)
  }

  fn parts(&mut self) -> crate::Result<(&mut H, &mut R, &mut W)> {
    let Some((reader, writer)) = self.endpoints.as_mut() else {
      return Err(SessionError::UnboundEndpoints.into());
    };
    Ok((&mut self.handle, reader, writer))
  }
}

impl<H, R, W> Drop for SslSession<H, R, W>
where
  H: SessionHandle,
  R: Read,
  W: Write,
{
  #[inline]
  fn drop(&mut self) {
    if let Err(_err) = self.shutdown() {
      _debug!("Shutdown on drop failed: {_err}");
    }
  }
}
