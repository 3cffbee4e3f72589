use crate::{
  session::{HandshakeStatus, SessionError, SessionHandle, SessionState},
  tls::io_err,
};
use rustls::{ClientConnection, Connection, ServerConnection};
use std::io::{ErrorKind, Read, Write};

/// [`SessionHandle`] backed by a `rustls` connection.
///
/// Besides the connection itself, keeps track of whether any handshake traffic was exchanged and
/// whether a fatal error was observed because `rustls` doesn't expose either.
#[derive(Debug)]
pub struct RustlsHandle {
  conn: Connection,
  has_failed: bool,
  has_started: bool,
}

impl RustlsHandle {
  /// Wraps an existing connection.
  #[inline]
  pub fn new(conn: Connection) -> Self {
    Self { conn, has_failed: false, has_started: false }
  }

  /// Underlying connection.
  #[inline]
  pub fn connection(&self) -> &Connection {
    &self.conn
  }

  /// Mutable underlying connection.
  #[inline]
  pub fn connection_mut(&mut self) -> &mut Connection {
    &mut self.conn
  }

  /// Discards the tracking flags.
  #[inline]
  pub fn into_connection(self) -> Connection {
    self.conn
  }

  fn is_client(&self) -> bool {
    matches!(self.conn, Connection::Client(_))
  }

  // One transport read followed by record processing. Pending alerts are flushed on failure.
  fn fill(&mut self, reader: &mut dyn Read, writer: &mut dyn Write) -> crate::Result<usize> {
    let read = self.conn.read_tls(reader).map_err(io_err)?;
    if read > 0 {
      self.has_started = true;
    }
    if let Err(err) = self.conn.process_new_packets() {
      _debug!("Failed to process records: {err}");
      self.has_failed = true;
      let _rslt = self.flush(writer);
      return Err(err.into());
    }
    Ok(read)
  }

  fn flush(&mut self, writer: &mut dyn Write) -> crate::Result<usize> {
    let mut written: usize = 0;
    while self.conn.wants_write() {
      let local_written = self.conn.write_tls(writer).map_err(io_err)?;
      if local_written == 0 {
        return Err(crate::Error::UnexpectedStreamWriteEOF);
      }
      written = written.wrapping_add(local_written);
    }
    if written > 0 {
      self.has_started = true;
      writer.flush().map_err(io_err)?;
    }
    Ok(written)
  }
}

impl From<ClientConnection> for RustlsHandle {
  #[inline]
  fn from(from: ClientConnection) -> Self {
    Self::new(Connection::Client(from))
  }
}

impl From<Connection> for RustlsHandle {
  #[inline]
  fn from(from: Connection) -> Self {
    Self::new(from)
  }
}

impl From<ServerConnection> for RustlsHandle {
  #[inline]
  fn from(from: ServerConnection) -> Self {
    Self::new(Connection::Server(from))
  }
}

impl SessionHandle for RustlsHandle {
  #[inline]
  fn handshake_step(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
  ) -> crate::Result<HandshakeStatus> {
    let _ = self.flush(writer)?;
    if self.conn.is_handshaking() && self.conn.wants_read() {
      if self.fill(reader, writer)? == 0 {
        self.has_failed = true;
        return Err(SessionError::PeerClosed.into());
      }
      let _ = self.flush(writer)?;
    }
    Ok(HandshakeStatus::from(!self.conn.is_handshaking()))
  }

  #[inline]
  fn peer_certificate_der(&self) -> Option<Vec<u8>> {
    self.conn.peer_certificates().and_then(|certs| certs.first()).map(|cert| cert.to_vec())
  }

  #[inline]
  fn recv(
    &mut self,
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    buffer: &mut [u8],
  ) -> crate::Result<usize> {
    loop {
      match self.conn.reader().read(buffer) {
        Ok(read) => return Ok(read),
        Err(err) if err.kind() == ErrorKind::WouldBlock => {}
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
          return Err(crate::Error::UnexpectedStreamReadEOF);
        }
        Err(err) => return Err(err.into()),
      }
      // Buffered records are exhausted, a single transport read is needed. A zero-length read
      // marks the transport as closed and the next iteration reports how it was closed.
      let _ = self.flush(writer)?;
      let _ = self.fill(reader, writer)?;
      let _ = self.flush(writer)?;
    }
  }

  #[inline]
  fn send(&mut self, writer: &mut dyn Write, bytes: &[u8]) -> crate::Result<usize> {
    let written = self.conn.writer().write(bytes).map_err(io_err)?;
    let _ = self.flush(writer)?;
    Ok(written)
  }

  #[inline]
  fn shutdown(&mut self, writer: &mut dyn Write) -> crate::Result<()> {
    self.conn.send_close_notify();
    let _ = self.flush(writer)?;
    Ok(())
  }

  #[inline]
  fn state_code(&self) -> i32 {
    let state = if self.has_failed {
      SessionState::Error
    } else if !self.conn.is_handshaking() {
      SessionState::Ok
    } else if !self.has_started {
      SessionState::Before
    } else if self.is_client() {
      SessionState::Connect
    } else {
      SessionState::Accept
    };
    state.into()
  }
}
