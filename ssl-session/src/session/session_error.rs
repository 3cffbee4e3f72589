/// Session error
#[derive(Debug)]
pub enum SessionError {
  /// The context could not provide a new session handle.
  AllocationFailure,
  /// Handshake steps and writes are refused after the close notification was sent.
  AlreadyShutdown,
  /// The remote peer cleanly closed the session.
  PeerClosed,
  /// Operations that exchange bytes need a read source and a write sink.
  UnboundEndpoints,
  /// The underlying endpoint can not make progress right now. The same operation can be retried
  /// once the endpoint is ready.
  WouldBlock,
}
