use crate::{
  session::{
    DEFAULT_BUFFER_SIZE, HandshakeStatus, SessionContext, SessionError, SessionHandle,
    SessionState, SslSession,
  },
  tests::{CERT, Pipe},
};
use sha2::{Digest, Sha256};
use std::{
  cell::Cell,
  io::{ErrorKind, Read, Write},
  rc::Rc,
};

#[derive(Debug, Default)]
struct Mock {
  code: Rc<Cell<i32>>,
  handshake_steps: usize,
  peer_der: Option<Vec<u8>>,
  shutdowns: Rc<Cell<usize>>,
}

impl SessionHandle for Mock {
  fn handshake_step(
    &mut self,
    _: &mut dyn Read,
    _: &mut dyn Write,
  ) -> crate::Result<HandshakeStatus> {
    if self.handshake_steps == 0 {
      return Ok(HandshakeStatus::Complete);
    }
    self.handshake_steps -= 1;
    Ok(HandshakeStatus::InProgress)
  }

  fn peer_certificate_der(&self) -> Option<Vec<u8>> {
    self.peer_der.clone()
  }

  fn recv(
    &mut self,
    reader: &mut dyn Read,
    _: &mut dyn Write,
    buffer: &mut [u8],
  ) -> crate::Result<usize> {
    reader.read(buffer).map_err(|err| {
      if err.kind() == ErrorKind::WouldBlock { SessionError::WouldBlock.into() } else { err.into() }
    })
  }

  fn send(&mut self, writer: &mut dyn Write, bytes: &[u8]) -> crate::Result<usize> {
    Ok(writer.write(bytes)?)
  }

  fn shutdown(&mut self, _: &mut dyn Write) -> crate::Result<()> {
    self.shutdowns.set(self.shutdowns.get() + 1);
    Ok(())
  }

  fn state_code(&self) -> i32 {
    self.code.get()
  }
}

struct FailingContext {
  calls: Cell<usize>,
}

impl SessionContext for FailingContext {
  type Handle = Mock;

  fn new_handle(&self) -> crate::Result<Self::Handle> {
    self.calls.set(self.calls.get() + 1);
    Err(SessionError::AllocationFailure.into())
  }
}

struct MockContext {
  shutdowns: Rc<Cell<usize>>,
}

impl SessionContext for MockContext {
  type Handle = Mock;

  fn new_handle(&self) -> crate::Result<Self::Handle> {
    Ok(Mock { shutdowns: Rc::clone(&self.shutdowns), ..Mock::default() })
  }
}

type MockSession<R> = SslSession<Mock, R, Pipe>;

fn cert_der() -> Vec<u8> {
  rustls_pemfile::certs(&mut &*CERT).next().unwrap().unwrap().to_vec()
}

fn session_with_code(code: i32) -> MockSession<Pipe> {
  SslSession::from_handle(Mock { code: Rc::new(Cell::new(code)), ..Mock::default() })
}

#[test]
fn complete_handshake_repeats_steps() {
  let mut session: MockSession<Pipe> =
    SslSession::from_handle(Mock { handshake_steps: 3, ..Mock::default() });
  session.bind_endpoints(Pipe::default(), Pipe::default());
  session.complete_handshake().unwrap();
  assert_eq!(session.handle().handshake_steps, 0);
  assert_eq!(session.do_handshake().unwrap(), HandshakeStatus::Complete);
}

#[test]
fn do_handshake_runs_a_single_step() {
  let mut session: MockSession<Pipe> =
    SslSession::from_handle(Mock { handshake_steps: 2, ..Mock::default() });
  session.bind_endpoints(Pipe::default(), Pipe::default());
  assert_eq!(session.do_handshake().unwrap(), HandshakeStatus::InProgress);
  assert_eq!(session.handle().handshake_steps, 1);
}

#[test]
fn do_handshake_after_shutdown() {
  let mut session: MockSession<Pipe> =
    SslSession::from_handle(Mock { handshake_steps: 2, ..Mock::default() });
  session.bind_endpoints(Pipe::default(), Pipe::default());
  session.shutdown().unwrap();
  assert!(matches!(
    session.do_handshake(),
    Err(crate::Error::SessionError(SessionError::AlreadyShutdown))
  ));
  assert!(matches!(
    session.complete_handshake(),
    Err(crate::Error::SessionError(SessionError::AlreadyShutdown))
  ));
  assert_eq!(session.handle().handshake_steps, 2);
}

#[test]
fn drop_after_explicit_shutdown_shuts_down_once() {
  let shutdowns = Rc::new(Cell::new(0));
  {
    let mut session: MockSession<Pipe> =
      SslSession::from_handle(Mock { shutdowns: Rc::clone(&shutdowns), ..Mock::default() });
    session.shutdown().unwrap();
    session.shutdown().unwrap();
    assert!(session.is_shutdown());
    assert_eq!(shutdowns.get(), 1);
  }
  assert_eq!(shutdowns.get(), 1);
}

#[test]
fn drop_shuts_down_once() {
  let shutdowns = Rc::new(Cell::new(0));
  let context = MockContext { shutdowns: Rc::clone(&shutdowns) };
  {
    let mut session: MockSession<&[u8]> = SslSession::from_context(&context).unwrap();
    session.bind_endpoints(&[][..], Pipe::default());
    assert_eq!(shutdowns.get(), 0);
  }
  assert_eq!(shutdowns.get(), 1);
}

#[test]
fn failing_context_creates_nothing() {
  let context = FailingContext { calls: Cell::new(0) };
  let rslt: crate::Result<MockSession<Pipe>> = SslSession::from_context(&context);
  assert!(matches!(rslt, Err(crate::Error::SessionError(SessionError::AllocationFailure))));
  assert_eq!(context.calls.get(), 1);
}

#[test]
fn missing_peer_certificate() {
  let session = session_with_code(0x03);
  assert_eq!(session.peer_certificate().unwrap(), None);
}

#[test]
fn peer_certificate_is_copied_out() {
  let der = cert_der();
  let session: MockSession<Pipe> =
    SslSession::from_handle(Mock { peer_der: Some(der.clone()), ..Mock::default() });
  let first = session.peer_certificate().unwrap().unwrap();
  let second = session.peer_certificate().unwrap().unwrap();
  assert_eq!(first, second);
  assert_eq!(first.der(), &der[..]);
  assert_eq!(first.subject_common_name().as_deref(), Some("localhost"));
  assert_eq!(first.issuer_common_name().as_deref(), Some("SSL Session Test Root CA"));
  assert_eq!(first.serial_number(), &[0x12, 0x34]);
  assert_eq!(&first.fingerprint_sha256()[..], &Sha256::digest(&der)[..]);
  assert!(first.not_before() < first.not_after());
  drop(first);
  assert_eq!(second.into_der(), der);
}

#[test]
fn peer_certificate_with_invalid_der() {
  let session: MockSession<Pipe> =
    SslSession::from_handle(Mock { peer_der: Some(vec![1, 2, 3]), ..Mock::default() });
  assert!(matches!(session.peer_certificate(), Err(crate::Error::X509CertificateError(_))));
}

#[test]
fn read_in_chunks_of_the_buffer_len() {
  let mut session: MockSession<&[u8]> =
    SslSession::from_handle(Mock::default()).with_read_buffer_len(2);
  session.bind_endpoints(&b"hello"[..], Pipe::default());
  assert_eq!(session.read_buffer_len(), 2);
  assert_eq!(session.read().unwrap(), b"he");
  assert_eq!(session.read().unwrap(), b"ll");
  assert_eq!(session.read().unwrap(), b"o");
  let session = session.with_read_buffer_len(0);
  assert_eq!(session.read_buffer_len(), DEFAULT_BUFFER_SIZE);
}

#[test]
fn read_returns_only_received_bytes() {
  let mut session: MockSession<&[u8]> = SslSession::from_handle(Mock::default());
  session.bind_endpoints(&b"hello"[..], Pipe::default());
  assert_eq!(session.read_buffer_len(), DEFAULT_BUFFER_SIZE);
  let bytes = session.read().unwrap();
  assert_eq!(bytes, b"hello");
  assert_eq!(bytes.len(), 5);
}

#[test]
fn read_without_bytes() {
  let mut closed: MockSession<&[u8]> = SslSession::from_handle(Mock::default());
  closed.bind_endpoints(&[][..], Pipe::default());
  assert!(matches!(closed.read(), Err(crate::Error::SessionError(SessionError::PeerClosed))));
  assert_eq!(closed.read_or_empty(), Vec::<u8>::new());

  let mut blocked: MockSession<Pipe> = SslSession::from_handle(Mock::default());
  blocked.bind_endpoints(Pipe::default(), Pipe::default());
  assert!(matches!(blocked.read(), Err(crate::Error::SessionError(SessionError::WouldBlock))));
  assert_eq!(blocked.read_or_empty(), Vec::<u8>::new());
}

#[test]
fn state_is_computed_on_demand() {
  let code = Rc::new(Cell::new(0x4000));
  let session: MockSession<Pipe> =
    SslSession::from_handle(Mock { code: Rc::clone(&code), ..Mock::default() });
  assert_eq!(session.state(), SessionState::Before);
  code.set(0x1000);
  assert_eq!(session.state(), SessionState::Connect);
  code.set(0x03);
  assert!(session.state().is_ok());
}

#[test]
fn state_of_every_code_is_in_the_closed_set() {
  let known = [
    (0x1000, SessionState::Connect),
    (0x2000, SessionState::Accept),
    (0x0FFF, SessionState::Mask),
    (0x3000, SessionState::Init),
    (0x4000, SessionState::Before),
    (0x03, SessionState::Ok),
    (0x3004, SessionState::Renegotiate),
    (0x05, SessionState::Error),
  ];
  assert_eq!(known.len(), SessionState::len());
  for (code, state) in known {
    assert_eq!(session_with_code(code).state(), state);
    assert_eq!(i32::from(state), code);
  }
  for code in [0, -1, 0x5000, 0x1001, i32::MAX, i32::MIN] {
    assert_eq!(session_with_code(code).state(), SessionState::Error);
  }
}

#[test]
fn state_names() {
  assert_eq!(SessionState::try_from("SSL_ST_OK").unwrap(), SessionState::Ok);
  assert_eq!(SessionState::try_from("Renegotiate").unwrap(), SessionState::Renegotiate);
  assert_eq!(SessionState::try_from("0x4000").unwrap(), SessionState::Before);
  assert!(SessionState::try_from("SSL_ST_UNKNOWN").is_err());
  assert_eq!(SessionState::Accept.to_string(), "Accept");
  assert_eq!(SessionState::Mask.strings().custom, "SSL_ST_MASK");
}

#[test]
fn unbound_endpoints() {
  let shutdowns = Rc::new(Cell::new(0));
  let mut session: MockSession<Pipe> =
    SslSession::from_handle(Mock { shutdowns: Rc::clone(&shutdowns), ..Mock::default() });
  assert!(matches!(
    session.do_handshake(),
    Err(crate::Error::SessionError(SessionError::UnboundEndpoints))
  ));
  assert!(matches!(session.read(), Err(crate::Error::SessionError(SessionError::UnboundEndpoints))));
  assert!(matches!(
    session.write(b"hello"),
    Err(crate::Error::SessionError(SessionError::UnboundEndpoints))
  ));
  session.shutdown().unwrap();
  assert_eq!(shutdowns.get(), 1);
}

#[test]
fn write_is_forwarded_once() {
  let sink = Pipe::default();
  let mut session: MockSession<Pipe> = SslSession::from_handle(Mock::default());
  session.bind_endpoints(Pipe::default(), sink.clone());
  assert_eq!(session.write(b"hello").unwrap(), 5);
  assert_eq!(sink.len(), 5);
  session.shutdown().unwrap();
  assert!(matches!(
    session.write(b"world"),
    Err(crate::Error::SessionError(SessionError::AlreadyShutdown))
  ));
  assert_eq!(sink.len(), 5);
}
