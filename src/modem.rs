// ABOUTME: AT-command transport that hands encoded SMS-SUBMIT parts to a GSM modem in PDU mode
// ABOUTME: Drives the AT / ATZ / AT+CMGS exchange over any async byte stream with configurable timing

use crate::codec::PduError;
use crate::submit::{Pdu, SmsSubmit};
use bytes::BytesMut;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::time;
use tracing::{debug, trace, warn};

/// Ctrl-Z, ends the PDU text after an `AT+CMGS` prompt
pub const CTRL_Z: u8 = 0x1A;

const OK: &str = "OK";
const ERROR: &str = "ERROR";
const PROMPT: &str = ">";

/// Errors raised while talking to the modem
#[derive(Debug, Error)]
pub enum ModemError {
    /// I/O error on the serial line or stream
    #[error("Modem I/O error: {0}")]
    Io(#[from] io::Error),

    /// The modem did not answer within the configured timeout
    #[error("Modem did not respond in time")]
    Timeout,

    /// The modem answered with ERROR
    #[error("Modem rejected command: {0}")]
    Rejected(String),

    /// `send_pdu` was called before `initialize`
    #[error("Modem has not been initialized")]
    NotInitialized,

    /// The submission could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(#[from] PduError),
}

/// Timing for the AT command exchange
///
/// # Example
///
/// ```rust
/// use smspdu::modem::ModemConfig;
/// use std::time::Duration;
///
/// // Default configuration (5s command timeout, 1s prompt timeout, 15 probes, 500ms between parts)
/// let config = ModemConfig::default();
///
/// let config = ModemConfig::default()
///     .with_command_timeout(Duration::from_secs(10))
///     .with_init_attempts(3);
/// ```
#[derive(Debug, Clone)]
pub struct ModemConfig {
    /// How long to wait for the final OK/ERROR after a command (default: 5 seconds)
    ///
    /// The network round trip of a submission happens inside this window.
    pub command_timeout: Duration,

    /// How long to wait for the `>` prompt or a probe answer (default: 1 second)
    pub prompt_timeout: Duration,

    /// Number of `AT` probes before giving up on initialization (default: 15)
    pub init_attempts: u32,

    /// Pause between consecutive parts of one submission (default: 500 ms)
    pub part_delay: Duration,

    /// Octet that ends the PDU text (default: Ctrl-Z)
    pub terminator: u8,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(5),
            prompt_timeout: Duration::from_secs(1),
            init_attempts: 15,
            part_delay: Duration::from_millis(500),
            terminator: CTRL_Z,
        }
    }
}

impl ModemConfig {
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_prompt_timeout(mut self, timeout: Duration) -> Self {
        self.prompt_timeout = timeout;
        self
    }

    pub fn with_init_attempts(mut self, attempts: u32) -> Self {
        self.init_attempts = attempts;
        self
    }

    pub fn with_part_delay(mut self, delay: Duration) -> Self {
        self.part_delay = delay;
        self
    }

    pub fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }
}

/// GSM modem in PDU mode behind an async byte stream
///
/// Usually a serial device opened as a file, but anything readable and
/// writable works.
#[derive(Debug)]
pub struct Modem<S> {
    // Writes are buffered and flushed once per command.
    stream: BufWriter<S>,

    // Modem output not yet consumed by a response.
    buffer: BytesMut,

    config: ModemConfig,
    initialized: bool,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Modem<S> {
    pub fn new(stream: S, config: ModemConfig) -> Self {
        Self {
            stream: BufWriter::new(stream),
            buffer: BytesMut::with_capacity(1024),
            config,
            initialized: false,
        }
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Probe with `AT` until the modem answers OK, then reset it with `ATZ`
    pub async fn initialize(&mut self) -> Result<(), ModemError> {
        debug!("Initializing modem");

        let mut answered = false;
        for attempt in 1..=self.config.init_attempts {
            self.write_command("AT").await?;
            match self.wait_for(&[OK], self.config.prompt_timeout).await {
                Ok(_) => {
                    answered = true;
                    break;
                }
                Err(ModemError::Timeout) => {
                    trace!(attempt, "No answer to AT probe");
                }
                Err(e) => return Err(e),
            }
        }

        if !answered {
            warn!(attempts = self.config.init_attempts, "Modem never answered AT probe");
            return Err(ModemError::Timeout);
        }

        self.write_command("ATZ").await?;
        self.final_result(self.config.prompt_timeout).await?;

        self.initialized = true;
        debug!("Modem ready");
        Ok(())
    }

    /// Submit one part; returns the modem's final response text
    pub async fn send_pdu(&mut self, pdu: &Pdu) -> Result<String, ModemError> {
        if !self.initialized {
            return Err(ModemError::NotInitialized);
        }

        self.write_command(&format!("AT+CMGS={}", pdu.cmgs_length()))
            .await?;

        let prompt = self.wait_for(&[PROMPT, ERROR], self.config.prompt_timeout).await?;
        if prompt.contains(ERROR) {
            return Err(ModemError::Rejected(prompt));
        }

        let hex = pdu.to_hex();
        trace!(pdu = %hex, "Writing PDU");
        self.stream.write_all(hex.as_bytes()).await?;
        self.stream.write_u8(self.config.terminator).await?;
        self.stream.flush().await?;

        self.final_result(self.config.command_timeout).await
    }

    /// Encode every part first, then submit them in order
    ///
    /// Nothing reaches the modem when encoding fails. Returns the number of
    /// parts sent.
    pub async fn send_submission(&mut self, submit: &SmsSubmit) -> Result<usize, ModemError> {
        let pdus = submit.to_pdus()?;

        for (index, pdu) in pdus.iter().enumerate() {
            if index > 0 {
                time::sleep(self.config.part_delay).await;
            }
            self.send_pdu(pdu).await?;
            debug!(part = index + 1, total = pdus.len(), "Message part sent to modem");
        }

        Ok(pdus.len())
    }

    /// Hand back the underlying stream
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    async fn write_command(&mut self, command: &str) -> Result<(), ModemError> {
        debug!(command, "-> modem");
        self.stream.write_all(command.as_bytes()).await?;
        self.stream.write_u8(b'\r').await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn final_result(&mut self, limit: Duration) -> Result<String, ModemError> {
        let response = self.wait_for(&[OK, ERROR], limit).await?;
        if response.contains(ERROR) {
            return Err(ModemError::Rejected(response));
        }
        Ok(response)
    }

    async fn wait_for(&mut self, markers: &[&str], limit: Duration) -> Result<String, ModemError> {
        let response = time::timeout(limit, self.read_response(markers))
            .await
            .map_err(|_| ModemError::Timeout)??;
        debug!(response = response.trim(), "<- modem");
        Ok(response)
    }

    /// Read until one of `markers` shows up and consume the buffered text up
    /// to and including it
    async fn read_response(&mut self, markers: &[&str]) -> Result<String, ModemError> {
        loop {
            if let Some(end) = find_marker(&self.buffer, markers) {
                let response = self.buffer.split_to(end);
                return Ok(String::from_utf8_lossy(&response).into_owned());
            }

            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                return Err(ModemError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "modem closed the stream",
                )));
            }
        }
    }
}

/// End offset of the earliest marker in `buffer`
fn find_marker(buffer: &[u8], markers: &[&str]) -> Option<usize> {
    markers
        .iter()
        .filter_map(|marker| {
            let marker = marker.as_bytes();
            buffer
                .windows(marker.len())
                .position(|window| window == marker)
                .map(|start| start + marker.len())
        })
        .min()
}
