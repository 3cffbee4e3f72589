/// Outcome of a single handshake step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandshakeStatus {
  /// Both parties agreed on keys. Application data can flow.
  Complete,
  /// More handshake messages must be exchanged.
  InProgress,
}

impl HandshakeStatus {
  /// Shortcut for [`HandshakeStatus::Complete`].
  #[inline]
  pub fn is_complete(self) -> bool {
    matches!(self, Self::Complete)
  }
}

impl From<bool> for HandshakeStatus {
  #[inline]
  fn from(from: bool) -> Self {
    if from { Self::Complete } else { Self::InProgress }
  }
}
