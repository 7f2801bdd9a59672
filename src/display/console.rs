// src/display/console.rs
//! Line-oriented console output

use crate::gps::GgaFix;
use std::io::{self, Write};

/// Writes every user-visible message of a reader session
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn connecting(&mut self, port: &str, baud_rate: u32) -> io::Result<()> {
        writeln!(
            self.out,
            "Attempting to connect to port: {} at baud rate: {}",
            port, baud_rate
        )
    }

    pub fn connected(&mut self) -> io::Result<()> {
        writeln!(self.out, "Connection successful! Reading data...")?;
        writeln!(self.out, "---")?;
        writeln!(self.out, "NOTE: Please ensure your GNSS device has a clear view of the sky.")?;
        writeln!(self.out, "It may take a few minutes to acquire a satellite fix.")?;
        writeln!(self.out, "---")
    }

    pub fn connection_failed(&mut self, port: &str, message: &str) -> io::Result<()> {
        writeln!(self.out, "Error: Could not open port {}.", port)?;
        writeln!(
            self.out,
            "Please check if the device is connected and the port name is correct."
        )?;
        writeln!(self.out, "The error message was: {}", message)
    }

    pub fn raw_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "RAW DATA: {}", line)
    }

    pub fn decode_failed(&mut self) -> io::Result<()> {
        writeln!(self.out, "Could not decode line, skipping.")
    }

    pub fn parse_failed(&mut self, detail: &str) -> io::Result<()> {
        writeln!(self.out, "  NMEA parsing error: {}", detail)
    }

    /// Print the decoded fields of a GGA sentence followed by the fix status
    pub fn fix(&mut self, fix: &GgaFix) -> io::Result<()> {
        writeln!(self.out, "  Parsed Sentence: {}", fix.sentence_type)?;
        writeln!(self.out, "  Timestamp: {}", fix.format_timestamp())?;
        writeln!(self.out, "  Latitude: {}", GgaFix::format_coordinate(fix.latitude))?;
        writeln!(self.out, "  Longitude: {}", GgaFix::format_coordinate(fix.longitude))?;
        writeln!(self.out, "  Fix Quality: {}", fix.gps_qual)?;
        writeln!(self.out, "  Fix Type: {}", fix.fix_description())?;
        writeln!(self.out, "  Satellites in Use: {}", fix.num_sats)?;

        if fix.has_fix() {
            writeln!(self.out, "  Status: VALID FIX ACQUIRED!")
        } else {
            writeln!(self.out, "  Status: NO FIX. Waiting for satellites...")
        }
    }

    pub fn stopped_by_user(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nProgram stopped by user.")
    }

    pub fn stream_ended(&mut self) -> io::Result<()> {
        writeln!(self.out, "Serial stream ended.")
    }

    pub fn connection_closed(&mut self) -> io::Result<()> {
        writeln!(self.out, "Serial connection closed.")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn render(f: impl FnOnce(&mut Console<Vec<u8>>) -> io::Result<()>) -> String {
        let mut console = Console::new(Vec::new());
        f(&mut console).unwrap();
        String::from_utf8(console.into_inner()).unwrap()
    }

    fn sample_fix(gps_qual: u8) -> GgaFix {
        GgaFix {
            sentence_type: "GGA".to_string(),
            timestamp: NaiveTime::from_hms_opt(9, 27, 50),
            latitude: Some(53.361336666),
            longitude: Some(-6.50562),
            gps_qual,
            num_sats: 8,
        }
    }

    #[test]
    fn test_valid_fix_output() {
        let text = render(|c| c.fix(&sample_fix(1)));

        assert!(text.contains("  Parsed Sentence: GGA\n"));
        assert!(text.contains("  Timestamp: 09:27:50\n"));
        assert!(text.contains("  Latitude: 53.361337\n"));
        assert!(text.contains("  Longitude: -6.505620\n"));
        assert!(text.contains("  Fix Quality: 1\n"));
        assert!(text.contains("  Fix Type: GPS\n"));
        assert!(text.contains("  Satellites in Use: 8\n"));
        assert!(text.contains("VALID FIX ACQUIRED"));
        assert!(!text.contains("NO FIX"));
    }

    #[test]
    fn test_no_fix_output() {
        let text = render(|c| c.fix(&sample_fix(0)));

        assert!(text.contains("NO FIX"));
        assert!(!text.contains("VALID FIX"));
    }

    #[test]
    fn test_connection_failure_names_port() {
        let text = render(|c| c.connection_failed("/dev/ttyUSB9", "No such file or directory"));

        assert!(text.contains("Could not open port /dev/ttyUSB9."));
        assert!(text.contains("The error message was: No such file or directory"));
    }
}
