use ssl_session::{
  Error,
  misc::into_rslt,
  session::{PeerCertificate, SessionError, SslSession},
  tls::{Acceptor, Connector, RustlsHandle},
};
use std::{
  fmt::Write,
  net::{TcpListener, TcpStream},
  path::{Path, PathBuf},
};

type TcpSession = SslSession<RustlsHandle, TcpStream, TcpStream>;

pub(crate) fn connect(
  addr: &str,
  server_name: Option<&str>,
  ca: Option<PathBuf>,
  message: Option<String>,
) -> ssl_session::Result<()> {
  let connector = match ca {
    Some(path) => Connector::new().push_certs_from_pem(&std::fs::read(path)?)?,
    None => Connector::from_auto()?,
  };
  let hostname = server_name.unwrap_or_else(|| host(addr));
  let context = connector.build(hostname)?;
  let mut session: TcpSession = SslSession::from_context(&context)?;
  let stream = TcpStream::connect(addr)?;
  session.bind_endpoints(stream.try_clone()?, stream);
  session.complete_handshake()?;
  println!("State: {}", session.state());
  print_certificate(&into_rslt(session.peer_certificate()?)?);
  if let Some(elem) = message {
    let _ = session.write(elem.as_bytes())?;
    println!("{}", String::from_utf8_lossy(&session.read()?));
  }
  session.shutdown()
}

pub(crate) fn serve(addr: &str, cert: &Path, key: &Path) -> ssl_session::Result<()> {
  let context = Acceptor::default()
    .build_with_cert_chain_and_priv_key(&std::fs::read(cert)?, &std::fs::read(key)?)?;
  let listener = TcpListener::bind(addr)?;
  loop {
    let (stream, peer) = listener.accept()?;
    let fun = || {
      let mut session: TcpSession = SslSession::from_context(&context)?;
      session.bind_endpoints(stream.try_clone()?, stream);
      session.complete_handshake()?;
      println!("{peer}: {}", session.state());
      loop {
        let bytes = match session.read() {
          Ok(elem) => elem,
          Err(Error::SessionError(SessionError::PeerClosed)) => break,
          Err(err) => return Err(err),
        };
        let _ = session.write(&bytes)?;
      }
      ssl_session::Result::Ok(())
    };
    if let Err(err) = fun() {
      eprintln!("{peer}: {err}");
    }
  }
}

fn hex(bytes: &[u8]) -> String {
  bytes.iter().fold(String::with_capacity(bytes.len().wrapping_mul(2)), |mut acc, byte| {
    let _rslt = write!(acc, "{byte:02X}");
    acc
  })
}

fn host(addr: &str) -> &str {
  addr.rsplit_once(':').map_or(addr, |(host, _)| host).trim_start_matches('[').trim_end_matches(']')
}

fn print_certificate(cert: &PeerCertificate) {
  println!("Subject: {}", cert.subject_common_name().as_deref().unwrap_or("-"));
  println!("Issuer: {}", cert.issuer_common_name().as_deref().unwrap_or("-"));
  println!("Serial: {}", hex(cert.serial_number()));
  println!("Validity: {} - {}", cert.not_before(), cert.not_after());
  println!("SHA-256: {}", hex(&cert.fingerprint_sha256()));
}
