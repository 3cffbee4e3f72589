use crate::tls::{SslContext, TlsError, provider};
use rustls::ServerConfig;
use std::sync::Arc;

/// Builds server [`SslContext`]s without client authentication.
#[derive(Debug, Default)]
pub struct Acceptor {
  alpn_protocols: Vec<Vec<u8>>,
}

impl Acceptor {
  /// Creates a context with a single certificate chain and matching private key, both PEM
  /// encoded.
  #[inline]
  pub fn build_with_cert_chain_and_priv_key(
    self,
    cert_chain: &[u8],
    priv_key: &[u8],
  ) -> crate::Result<SslContext> {
    let certs = rustls_pemfile::certs(&mut &*cert_chain).collect::<Result<Vec<_>, _>>()?;
    let key = rustls_pemfile::private_key(&mut &*priv_key)?.ok_or(TlsError::MissingPrivateKey)?;
    let mut config = ServerConfig::builder_with_provider(provider()?)
      .with_safe_default_protocol_versions()?
      .with_no_client_auth()
      .with_single_cert(certs, key)?;
    config.alpn_protocols = self.alpn_protocols;
    _debug!("Server context created");
    Ok(SslContext::server(Arc::new(config)))
  }

  /// Erases the set of ALPN protocols and then pushes the expected ALPN value for an HTTP2
  /// connection.
  #[inline]
  pub fn http2(mut self) -> Self {
    self.alpn_protocols.clear();
    self.alpn_protocols.push("h2".into());
    self
  }

  /// Advertises an additional protocol.
  #[inline]
  pub fn push_alpn_protocol(mut self, protocol: &[u8]) -> Self {
    self.alpn_protocols.push(protocol.into());
    self
  }
}
