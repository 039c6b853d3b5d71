//! Test server management.
//!
//! Spawns and manages linechatd instances for integration testing.

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::{sleep, timeout};

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Held so the config file outlives the process.
    _data_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a new server on a free local port.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with_limits(4096).await
    }

    /// Spawn a server with a custom inbound line limit.
    pub async fn spawn_with_limits(max_line_length: usize) -> anyhow::Result<Self> {
        let port = free_port()?;
        let data_dir = tempfile::tempdir()?;

        let config_path = data_dir.path().join("config.toml");
        let config_content = format!(
            r#"
[server]
name = "test.server"
metrics_port = 0

[listen]
address = "127.0.0.1:{port}"

[limits]
max_line_length = {max_line_length}
"#
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_linechatd"))
            .arg(&config_path)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _data_dir: data_dir,
        };

        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    ///
    /// The probe connection is closed and drained to EOF, so its own
    /// offline broadcast is out of the way before any test client joins.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if let Ok(mut probe) = tokio::net::TcpStream::connect(("127.0.0.1", self.port)).await {
                probe.shutdown().await?;
                let mut sink = Vec::new();
                timeout(Duration::from_secs(5), probe.read_to_end(&mut sink)).await??;
                sleep(Duration::from_millis(20)).await;
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client and wait for its own arrival broadcast.
    ///
    /// Broadcasts queued before the client registered may arrive first;
    /// they are skipped.
    pub async fn join(&self) -> anyhow::Result<super::client::TestClient> {
        let mut client = super::client::TestClient::connect(&self.address()).await?;
        let addr = client.addr().to_string();
        client
            .expect_eventually(&format!("[{addr}]{addr}: online success"))
            .await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
