//! Session handles, contexts and builders backed by `rustls`.

mod acceptor;
mod connector;
mod rustls_handle;
mod ssl_context;
mod tls_error;

pub use acceptor::Acceptor;
pub use connector::Connector;
pub use rustls_handle::RustlsHandle;
pub use ssl_context::SslContext;
pub use tls_error::TlsError;

use crate::session::SessionError;
use rustls::crypto::CryptoProvider;
use std::{io::ErrorKind, sync::Arc};

fn io_err(err: std::io::Error) -> crate::Error {
  if err.kind() == ErrorKind::WouldBlock {
    SessionError::WouldBlock.into()
  } else {
    err.into()
  }
}

#[allow(unreachable_code, reason = "depends on the selected set of features")]
fn provider() -> crate::Result<Arc<CryptoProvider>> {
  #[cfg(feature = "aws-lc-rs")]
  return Ok(Arc::new(rustls::crypto::aws_lc_rs::default_provider()));
  #[cfg(all(feature = "ring", not(feature = "aws-lc-rs")))]
  return Ok(Arc::new(rustls::crypto::ring::default_provider()));
  Err(TlsError::MissingProvider.into())
}
