use clap::Parser;
use std::path::PathBuf;

pub(crate) fn init() -> ssl_session::Result<()> {
  let args = Cli::parse();
  match args.commands {
    Commands::Connect(elem) => {
      crate::tls::connect(&elem.addr, elem.server_name.as_deref(), elem.ca, elem.message)?;
    }
    Commands::Serve(elem) => {
      crate::tls::serve(&elem.addr, &elem.cert, &elem.key)?;
    }
  }
  Ok(())
}

/// Blocking TLS sessions over TCP
#[derive(Debug, clap::Parser)]
#[command(author, long_about = None, name = "ssl-session", version)]
struct Cli {
  #[command(subcommand)]
  commands: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
  Connect(Connect),
  Serve(Serve),
}

/// Connects to a TLS server, prints the negotiated session and optionally exchanges a message
#[derive(Debug, clap::Args)]
struct Connect {
  /// Remote address, for example `localhost:9000`
  #[arg()]
  addr: String,
  /// PEM file with the trusted certificates. If not specified, the `webpki-roots` project is used.
  #[arg(short = 'c', value_name = "Path")]
  ca: Option<PathBuf>,
  /// Message sent after the handshake. The first response is printed.
  #[arg(short = 'm')]
  message: Option<String>,
  /// Name verified against the server certificate. Defaults to the host of `addr`.
  #[arg(short = 'n')]
  server_name: Option<String>,
}

/// Echoes every received message back to its sender
#[derive(Debug, clap::Args)]
struct Serve {
  /// Local address, for example `127.0.0.1:9000`
  #[arg()]
  addr: String,
  /// PEM file with the certificate chain
  #[arg(short = 'c', value_name = "Path")]
  cert: PathBuf,
  /// PEM file with the private key
  #[arg(short = 'k', value_name = "Path")]
  key: PathBuf,
}
