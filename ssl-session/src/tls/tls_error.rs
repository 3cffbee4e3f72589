/// TLS error
#[derive(Debug)]
pub enum TlsError {
  /// Invalid server name
  InvalidServerName,
  /// The PEM input didn't contain a private key
  MissingPrivateKey,
  /// No crypto provider was selected through cargo features
  MissingProvider,
}
