//! Interactive console: menu, broadcast mode, private mode, rename.
//!
//! Generic over its input, its console output and the server stream so
//! the whole flow can be driven from memory in tests.

use linechat_proto::Command;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Word that leaves the current mode.
pub const EXIT_WORD: &str = "exit";

const MENU: &str = "1. broadcast mode\n2. private mode\n3. rename\n0. exit\n";

/// One top-level menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Broadcast,
    Private,
    Rename,
    Exit,
}

impl MenuChoice {
    /// Parse a menu selection. Anything but `0`..=`3` is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Broadcast),
            "2" => Some(Self::Private),
            "3" => Some(Self::Rename),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// The menu loop.
pub struct Console<I, O, S> {
    input: I,
    output: O,
    server: S,
}

impl<I, O, S> Console<I, O, S>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
    S: AsyncWrite + Unpin,
{
    pub fn new(input: I, output: O, server: S) -> Self {
        Self {
            input,
            output,
            server,
        }
    }

    /// Run until `0` is chosen or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.choose().await? else {
                return Ok(());
            };
            match choice {
                MenuChoice::Broadcast => {
                    self.say(">>> broadcast mode\n").await?;
                    self.broadcast_mode().await?;
                }
                MenuChoice::Private => {
                    self.say(">>> private mode\n").await?;
                    self.private_mode().await?;
                }
                MenuChoice::Rename => {
                    self.say(">>> rename\n").await?;
                    self.rename().await?;
                }
                MenuChoice::Exit => return Ok(()),
            }
        }
    }

    /// Show the menu until a valid choice is entered. `None` on end of input.
    async fn choose(&mut self) -> io::Result<Option<MenuChoice>> {
        loop {
            self.say(MENU).await?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            match MenuChoice::parse(&line) {
                Some(choice) => return Ok(Some(choice)),
                None => self.say(">>> please enter a number from 0 to 3\n").await?,
            }
        }
    }

    async fn broadcast_mode(&mut self) -> io::Result<()> {
        loop {
            self.say(">>> message (exit to leave):\n").await?;
            let Some(text) = self.read_line().await? else {
                return Ok(());
            };
            if text == EXIT_WORD {
                return Ok(());
            }
            if text.is_empty() {
                continue;
            }
            self.send(&Command::Say { text }).await?;
        }
    }

    async fn private_mode(&mut self) -> io::Result<()> {
        loop {
            self.send(&Command::Who).await?;
            self.say(">>> recipient name (exit to leave):\n").await?;
            let Some(target) = self.read_line().await? else {
                return Ok(());
            };
            if target == EXIT_WORD {
                return Ok(());
            }
            if target.is_empty() {
                continue;
            }

            loop {
                self.say(">>> message (exit to pick another recipient):\n").await?;
                let Some(content) = self.read_line().await? else {
                    return Ok(());
                };
                if content == EXIT_WORD {
                    break;
                }
                if content.is_empty() {
                    continue;
                }
                let cmd = Command::Private {
                    target: target.clone(),
                    content,
                };
                self.send(&cmd).await?;
            }
        }
    }

    async fn rename(&mut self) -> io::Result<()> {
        self.say(">>> new user name:\n").await?;
        let Some(name) = self.read_line().await? else {
            return Ok(());
        };
        if name.is_empty() {
            return Ok(());
        }
        self.send(&Command::Rename { name }).await
    }

    /// Next input line without its terminator. `None` on end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }

    async fn send(&mut self, cmd: &Command) -> io::Result<()> {
        let mut line = cmd.to_line();
        line.push('\n');
        self.server.write_all(line.as_bytes()).await?;
        self.server.flush().await
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}
