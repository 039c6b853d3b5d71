//! linechat - console client for linechatd.
//!
//! Connects to the server, copies everything it sends to stdout, and turns
//! menu selections into protocol lines.

mod menu;

use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::menu::Console;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server IP address.
    #[arg(long, default_value = "127.0.0.1")]
    ip: String,

    /// Server port.
    #[arg(long, default_value_t = 8888)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.ip, cli.port);

    let stream = TcpStream::connect(&addr).await.map_err(|e| {
        error!(%addr, error = %e, "Failed to connect to server");
        e
    })?;
    info!(%addr, "Connected");
    println!(">>> connected to {addr}");

    let (mut from_server, to_server) = stream.into_split();

    // Server output is shown verbatim.
    let printer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        if let Err(e) = tokio::io::copy(&mut from_server, &mut stdout).await {
            error!(error = %e, "Lost connection to server");
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    Console::new(stdin, tokio::io::stdout(), to_server)
        .run()
        .await?;

    printer.abort();
    Ok(())
}
