//! Command-line interface for SSL Session

mod clap;
mod tls;

fn main() -> ssl_session::Result<()> {
  let _rslt = dotenvy::dotenv();
  ssl_session::misc::tracing_tree_init(None)?;
  clap::init()
}
