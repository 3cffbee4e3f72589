use crate::{session::SessionError, tls::TlsError};
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External - Misc
  //
  /// See [`rustls::Error`].
  RustlsError(Box<rustls::Error>),
  /// See [`tracing_subscriber::util::TryInitError`].
  #[cfg(feature = "_tracing-subscriber")]
  TryInitError(tracing_subscriber::util::TryInitError),
  /// See [`x509_certificate::X509CertificateError`].
  X509CertificateError(Box<x509_certificate::X509CertificateError>),

  // External - Std
  //
  /// See [`std::io::Error`].
  IoError(std::io::Error),

  // Generic
  //
  /// There is no CA provider.
  MissingCaProviders,
  /// A variant used to transform `Option`s into `Result`s
  NoInnerValue(&'static str),
  /// Unexpected end of file when reading from a stream.
  UnexpectedStreamReadEOF,
  /// Unexpected end of file when writing to a stream.
  UnexpectedStreamWriteEOF,
  /// Unexpected String
  UnexpectedString {
    /// Length of the received string
    length: usize,
  },
  /// Unexpected signed integer
  UnexpectedInt {
    /// Received number
    received: i64,
  },

  // Internal
  //
  /// See [`SessionError`].
  SessionError(SessionError),
  /// See [`TlsError`].
  TlsError(TlsError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

impl From<rustls::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: rustls::Error) -> Self {
    Self::RustlsError(from.into())
  }
}

#[cfg(feature = "_tracing-subscriber")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

impl From<x509_certificate::X509CertificateError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: x509_certificate::X509CertificateError) -> Self {
    Self::X509CertificateError(from.into())
  }
}

impl From<std::io::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<SessionError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: SessionError) -> Self {
    Self::SessionError(from)
  }
}

impl From<TlsError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: TlsError) -> Self {
    Self::TlsError(from)
  }
}
