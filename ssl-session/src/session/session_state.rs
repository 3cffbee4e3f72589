create_enum! {
  /// Coarse phase of a session as reported by its handle.
  ///
  /// Tags mirror the classic `SSL_ST_*` constants so codes coming from different handles share
  /// the same vocabulary.
  #[derive(Clone, Copy, Debug, Eq, PartialEq)]
  pub enum SessionState<i32> {
    /// Handshake in progress on the side that initiated the connection.
    Connect = (0x1000, "SSL_ST_CONNECT"),
    /// Handshake in progress on the side that accepted the connection.
    Accept = (0x2000, "SSL_ST_ACCEPT"),
    /// Bits that carry the sub-state.
    Mask = (0x0FFF, "SSL_ST_MASK"),
    /// Initial handshake of either side.
    Init = (0x3000, "SSL_ST_INIT"),
    /// Nothing was exchanged yet.
    Before = (0x4000, "SSL_ST_BEFORE"),
    /// Handshake finished.
    Ok = (0x03, "SSL_ST_OK"),
    /// A new handshake was requested over an established session.
    Renegotiate = (0x3004, "SSL_ST_RENEGOTIATE"),
    /// Fatal failure or unknown code.
    Error = (0x05, "SSL_ST_ERR"),
  }
}

impl SessionState {
  /// Translates a raw code. Unknown codes become [`SessionState::Error`].
  #[inline]
  pub fn from_code(code: i32) -> Self {
    Self::try_from(code).unwrap_or(Self::Error)
  }

  /// Shortcut for [`SessionState::Ok`].
  #[inline]
  pub fn is_ok(self) -> bool {
    matches!(self, Self::Ok)
  }
}
