use crate::{
  session::{SessionContext, SessionError},
  tls::RustlsHandle,
};
use rustls::{ClientConfig, ClientConnection, ServerConfig, ServerConnection};
use rustls_pki_types::ServerName;
use std::sync::Arc;

/// Shared `rustls` configuration that creates [`RustlsHandle`]s.
///
/// Cloning is cheap, configurations are reference counted.
#[derive(Clone, Debug)]
pub enum SslContext {
  /// Initiates connections to `server_name`.
  Client {
    /// Configuration
    config: Arc<ClientConfig>,
    /// Name used for SNI and certificate verification
    server_name: ServerName<'static>,
  },
  /// Accepts connections.
  Server {
    /// Configuration
    config: Arc<ServerConfig>,
  },
}

impl SslContext {
  /// Client context
  #[inline]
  pub fn client(config: Arc<ClientConfig>, server_name: ServerName<'static>) -> Self {
    Self::Client { config, server_name }
  }

  /// Server context
  #[inline]
  pub fn server(config: Arc<ServerConfig>) -> Self {
    Self::Server { config }
  }
}

impl SessionContext for SslContext {
  type Handle = RustlsHandle;

  #[inline]
  fn new_handle(&self) -> crate::Result<Self::Handle> {
    let rslt = match self {
      Self::Client { config, server_name } => {
        ClientConnection::new(Arc::clone(config), server_name.clone()).map(RustlsHandle::from)
      }
      Self::Server { config } => ServerConnection::new(Arc::clone(config)).map(RustlsHandle::from),
    };
    rslt.map_err(|_err| {
      _debug!("Failed to allocate connection: {_err}");
      SessionError::AllocationFailure.into()
    })
  }
}
