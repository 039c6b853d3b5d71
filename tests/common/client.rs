//! Test chat client.
//!
//! Speaks the line protocol over a real socket and asserts on what comes
//! back.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter, Lines};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test chat client.
pub struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: BufWriter<OwnedWriteHalf>,
    addr: String,
    name: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let addr = stream.local_addr()?.to_string();

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            lines: BufReader::new(read_half).lines(),
            writer: BufWriter::new(write_half),
            name: addr.clone(),
            addr,
        })
    }

    /// This client's address as the server sees it (and its initial name).
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Current display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send one line.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        match timeout(dur, self.lines.next_line()).await?? {
            Some(line) => Ok(line),
            None => anyhow::bail!("server closed the connection"),
        }
    }

    /// Receive the next line and require it to equal `expected`.
    pub async fn expect(&mut self, expected: &str) -> anyhow::Result<()> {
        let line = self.recv().await?;
        anyhow::ensure!(line == expected, "expected {expected:?}, got {line:?}");
        Ok(())
    }

    /// Skip lines until one equals `expected`.
    pub async fn expect_eventually(&mut self, expected: &str) -> anyhow::Result<()> {
        loop {
            if self.recv().await? == expected {
                return Ok(());
            }
        }
    }

    /// Rename and wait for the confirmation.
    pub async fn rename(&mut self, name: &str) -> anyhow::Result<()> {
        self.send(&format!("rename|{name}")).await?;
        self.expect(&format!("You have updated your user name to {name}"))
            .await?;
        self.name = name.to_string();
        Ok(())
    }

    /// Receive `n` lines.
    pub async fn recv_n(&mut self, n: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(n);
        for _ in 0..n {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// Broadcast a marker and require it to be the very next line.
    ///
    /// Proves nothing else was queued for this client ahead of it.
    pub async fn sync(&mut self, marker: &str) -> anyhow::Result<()> {
        self.send(marker).await?;
        let expected = format!("[{}]{}: {marker}", self.addr, self.name);
        self.expect(&expected).await
    }

    /// Close the connection.
    pub async fn quit(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
