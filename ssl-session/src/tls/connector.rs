use crate::tls::{SslContext, TlsError, provider};
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::{CertificateDer, ServerName};
use std::sync::Arc;

/// Builds client [`SslContext`]s.
#[derive(Debug)]
pub struct Connector {
  alpn_protocols: Vec<Vec<u8>>,
  store: RootCertStore,
}

impl Connector {
  /// Without any trusted certificate.
  #[inline]
  pub fn new() -> Self {
    Self { alpn_protocols: Vec::new(), store: RootCertStore::empty() }
  }

  /// From the automatic selection of dependencies.
  ///
  /// An error will be returned if no dependency that provides CA certificates is selected.
  #[inline]
  pub fn from_auto() -> crate::Result<Self> {
    #[cfg(feature = "webpki-roots")]
    return Ok(Self::from_webpki_roots());
    #[cfg(not(feature = "webpki-roots"))]
    return Err(crate::Error::MissingCaProviders);
  }

  /// From the certificates of the `webpki-roots` project.
  #[cfg(feature = "webpki-roots")]
  #[inline]
  pub fn from_webpki_roots() -> Self {
    let mut this = Self::new();
    this.store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    this
  }

  /// Creates a context that connects to `hostname`.
  #[inline]
  pub fn build(self, hostname: &str) -> crate::Result<SslContext> {
    let server_name =
      ServerName::try_from(String::from(hostname)).map_err(|_err| TlsError::InvalidServerName)?;
    let mut config = ClientConfig::builder_with_provider(provider()?)
      .with_safe_default_protocol_versions()?
      .with_root_certificates(self.store)
      .with_no_client_auth();
    config.alpn_protocols = self.alpn_protocols;
    _debug!(hostname, "Client context created");
    Ok(SslContext::client(Arc::new(config), server_name))
  }

  /// Erases the current set of ALPN protocols and then pushes the expected ALPN value for a HTTP2
  /// connection.
  #[inline]
  pub fn http2(mut self) -> Self {
    self.alpn_protocols.clear();
    self.alpn_protocols.push("h2".into());
    self
  }

  /// Avoids additional round trips by specifying in advance which protocols should be used.
  #[inline]
  pub fn push_alpn_protocol(mut self, protocol: &[u8]) -> Self {
    self.alpn_protocols.push(protocol.into());
    self
  }

  /// Trusts a single DER encoded certificate.
  #[inline]
  pub fn push_der_cert(mut self, der_cert: &[u8]) -> crate::Result<Self> {
    self.store.add(CertificateDer::from_slice(der_cert))?;
    Ok(self)
  }

  /// Trusts all certificates of a PEM file.
  #[inline]
  pub fn push_certs_from_pem(mut self, pem: &[u8]) -> crate::Result<Self> {
    for rslt in rustls_pemfile::certs(&mut &*pem) {
      self.store.add(rslt?)?;
    }
    Ok(self)
  }

  /// Number of trusted certificates.
  #[inline]
  pub fn trust_anchors_len(&self) -> usize {
    self.store.len()
  }
}

impl Default for Connector {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
