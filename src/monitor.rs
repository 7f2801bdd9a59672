// src/monitor.rs
//! Serial reader session: connect, read lines, print decoded GGA fixes

use crate::{
    config::ReaderConfig,
    display::Console,
    error::{GpsError, Result},
    gps::nmea,
};
use log::{debug, error, info, trace, warn};
use std::{future::Future, io::Write};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    time::{sleep, timeout},
};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// How the read loop ended when no error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Interrupted,
    EndOfStream,
}

/// Exclusive owner of an open serial stream.
///
/// The stream is released by [`SerialLink::close`] or, failing that, when
/// the link is dropped. Closing a link that holds nothing is a no-op.
pub struct SerialLink<S> {
    port: String,
    reader: Option<BufReader<S>>,
}

impl<S: AsyncRead> SerialLink<S> {
    pub fn new(port: impl Into<String>, stream: S) -> Self {
        Self {
            port: port.into(),
            reader: Some(BufReader::new(stream)),
        }
    }
}

impl<S> SerialLink<S> {
    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    fn reader_mut(&mut self) -> Option<&mut BufReader<S>> {
        self.reader.as_mut()
    }

    /// Release the stream, returning whether anything was open
    pub fn close(&mut self) -> bool {
        match self.reader.take() {
            Some(reader) => {
                drop(reader);
                debug!("Closed serial port {}", self.port);
                true
            }
            None => false,
        }
    }
}

impl<S> Drop for SerialLink<S> {
    fn drop(&mut self) {
        if self.reader.take().is_some() {
            debug!("Serial port {} released on drop", self.port);
        }
    }
}

/// Reads NMEA lines from one serial device and prints what it finds
pub struct GnssReader {
    config: ReaderConfig,
}

impl GnssReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Open the configured serial device
    pub fn connect(&self) -> Result<SerialLink<SerialStream>> {
        let port = &self.config.port;
        info!("Opening {} at {} baud", port, self.config.baud_rate);

        let stream = tokio_serial::new(port, self.config.baud_rate)
            .timeout(self.config.read_timeout())
            .open_native_async()
            .map_err(|e| GpsError::Connection {
                port: port.clone(),
                message: e.to_string(),
            })?;

        Ok(SerialLink::new(port.clone(), stream))
    }

    /// Connect and read until Ctrl-C, the end of the stream, or an I/O error
    pub async fn run<W: Write>(&self, console: &mut Console<W>) -> Result<()> {
        console.connecting(&self.config.port, self.config.baud_rate)?;
        let link = self.connect();
        self.run_session(link, console, interrupt_signal()).await
    }

    /// Drive one session over an already attempted connection.
    ///
    /// A failed connection is reported and returned without reading. On
    /// every other path the link is closed before returning.
    pub async fn run_session<S, W, F>(
        &self,
        link: Result<SerialLink<S>>,
        console: &mut Console<W>,
        shutdown: F,
    ) -> Result<()>
    where
        S: AsyncRead + Unpin,
        W: Write,
        F: Future<Output = ()>,
    {
        let mut link = match link {
            Ok(link) => link,
            Err(err) => {
                let message = match &err {
                    GpsError::Connection { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                error!("{}", err);
                console.connection_failed(&self.config.port, &message)?;
                return Err(err);
            }
        };

        let outcome = match console.connected() {
            Ok(()) => self.read_loop(&mut link, console, shutdown).await,
            Err(e) => Err(e.into()),
        };

        let notice = match &outcome {
            Ok(LoopExit::Interrupted) => console.stopped_by_user(),
            Ok(LoopExit::EndOfStream) => console.stream_ended(),
            Err(e) => {
                error!("Read loop on {} failed: {}", link.port(), e);
                Ok(())
            }
        };

        if link.close() {
            console.connection_closed()?;
        }
        notice?;

        outcome.map(|exit| debug!("Session ended: {:?}", exit))
    }

    /// Read lines until `shutdown` resolves or the stream ends
    pub async fn read_loop<S, W, F>(
        &self,
        link: &mut SerialLink<S>,
        console: &mut Console<W>,
        shutdown: F,
    ) -> Result<LoopExit>
    where
        S: AsyncRead + Unpin,
        W: Write,
        F: Future<Output = ()>,
    {
        let port = link.port().to_string();
        let reader = link
            .reader_mut()
            .ok_or_else(|| GpsError::Other(format!("Serial port {} is not open", port)))?;

        let read_timeout = self.config.read_timeout();
        let poll_interval = self.config.poll_interval();

        tokio::pin!(shutdown);
        // Partial bytes survive a timed out read and are completed by the next one
        let mut buf = Vec::new();

        loop {
            let read = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(LoopExit::Interrupted),
                read = timeout(read_timeout, reader.read_until(b'\n', &mut buf)) => read,
            };

            match read {
                Err(_) => trace!("No data from {} within {:?}", port, read_timeout),
                Ok(Ok(0)) => {
                    if !buf.is_empty() {
                        self.handle_line(&buf, console)?;
                    }
                    info!("End of stream on {}", port);
                    return Ok(LoopExit::EndOfStream);
                }
                Ok(Ok(_)) => {
                    let handled = self.handle_line(&buf, console);
                    buf.clear();
                    handled?;
                }
                Ok(Err(e)) => return Err(e.into()),
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(LoopExit::Interrupted),
                _ = sleep(poll_interval) => {}
            }
        }
    }

    /// Decode, echo and, for GGA sentences, parse one line.
    ///
    /// Decode and parse failures are printed and swallowed; only console
    /// write errors are returned.
    pub fn handle_line<W: Write>(&self, bytes: &[u8], console: &mut Console<W>) -> Result<()> {
        let line = match decode_line(bytes) {
            Ok(line) => line,
            Err(e) => {
                debug!("{}", e);
                console.decode_failed()?;
                return Ok(());
            }
        };

        console.raw_line(line)?;

        if nmea::is_gga_sentence(line) {
            match nmea::parse_gga(line) {
                Ok(fix) => console.fix(&fix)?,
                Err(GpsError::Parse(detail)) => {
                    debug!("Rejected GGA sentence {:?}: {}", line, detail);
                    console.parse_failed(&detail)?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

/// Decode a raw line as UTF-8 and strip the line terminator
pub fn decode_line(bytes: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(bytes)?.trim())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// List available serial ports
pub fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}
