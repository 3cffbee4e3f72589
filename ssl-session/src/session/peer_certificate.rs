use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use x509_certificate::X509Certificate;

/// Owned copy of the X.509 certificate presented by the remote peer.
///
/// Holds both the original DER bytes and their parsed form, nothing is shared with the session
/// that produced it.
#[derive(Clone, Debug)]
pub struct PeerCertificate {
  der: Vec<u8>,
  parsed: X509Certificate,
}

impl PeerCertificate {
  /// Parses a DER encoded certificate.
  #[inline]
  pub fn from_der(der: Vec<u8>) -> crate::Result<Self> {
    let parsed = X509Certificate::from_der(&der)?;
    Ok(Self { der, parsed })
  }

  /// Original DER bytes.
  #[inline]
  pub fn der(&self) -> &[u8] {
    &self.der
  }

  /// SHA-256 digest of the DER bytes.
  #[inline]
  pub fn fingerprint_sha256(&self) -> [u8; 32] {
    let digest = Sha256::digest(&self.der);
    let mut rslt = [0; 32];
    rslt.copy_from_slice(&digest);
    rslt
  }

  #[inline]
  pub fn into_der(self) -> Vec<u8> {
    self.der
  }

  /// Common Name of the issuer, if any.
  #[inline]
  pub fn issuer_common_name(&self) -> Option<String> {
    self.parsed.issuer_common_name()
  }

  #[inline]
  pub fn not_after(&self) -> DateTime<Utc> {
    self.parsed.validity_not_after()
  }

  #[inline]
  pub fn not_before(&self) -> DateTime<Utc> {
    self.parsed.validity_not_before()
  }

  /// Big-endian bytes of the serial number.
  #[inline]
  pub fn serial_number(&self) -> &[u8] {
    self.parsed.serial_number_asn1().as_slice()
  }

  /// Common Name of the subject, if any.
  #[inline]
  pub fn subject_common_name(&self) -> Option<String> {
    self.parsed.subject_common_name()
  }
}

impl PartialEq for PeerCertificate {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.der == other.der
  }
}

impl Eq for PeerCertificate {}
