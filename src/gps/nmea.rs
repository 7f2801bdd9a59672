// src/gps/nmea.rs
//! GGA sentence detection and parsing

use super::data::GgaFix;
use crate::error::{GpsError, Result};
use ::nmea::{sentences::FixType, ParseResult};

/// Talker variants of the GGA sentence that get decoded
pub const GGA_PREFIXES: [&str; 2] = ["$GNGGA", "$GPGGA"];

/// Check whether a line carries GGA fix data
pub fn is_gga_sentence(line: &str) -> bool {
    GGA_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Parse a GGA sentence into a fix record
pub fn parse_gga(line: &str) -> Result<GgaFix> {
    let parsed = ::nmea::parse_str(line).map_err(|e| GpsError::Parse(e.to_string()))?;

    match parsed {
        ParseResult::GGA(gga) => Ok(GgaFix {
            sentence_type: "GGA".to_string(),
            timestamp: gga.fix_time,
            latitude: gga.latitude,
            longitude: gga.longitude,
            gps_qual: gga.fix_type.map_or(0, fix_quality_code),
            num_sats: gga.fix_satellites.unwrap_or(0),
        }),
        other => Err(GpsError::Parse(format!("expected GGA sentence, got {:?}", other))),
    }
}

/// Numeric GGA quality field for a fix type
#[allow(unreachable_patterns)]
fn fix_quality_code(fix_type: FixType) -> u8 {
    match fix_type {
        FixType::Invalid => 0,
        FixType::Gps => 1,
        FixType::DGps => 2,
        FixType::Pps => 3,
        FixType::Rtk => 4,
        FixType::FloatRtk => 5,
        FixType::Estimated => 6,
        FixType::Manual => 7,
        FixType::Simulation => 8,
        // FixType variants added by later parser releases
        other => {
            log::warn!("Unknown fix type {:?}, reporting no fix", other);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GPGGA_FIX: &str =
        "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76";
    const GNGGA_NO_FIX: &str =
        "$GNGGA,092750.000,5321.6802,N,00630.3372,W,0,0,99.99,61.7,M,55.2,M,,*53";
    const GNGGA_DGPS_SOUTH: &str =
        "$GNGGA,123519,4807.038,S,01131.000,E,2,12,0.9,545.4,M,46.9,M,,*4C";

    #[test]
    fn test_gga_prefix_detection() {
        assert!(is_gga_sentence(GPGGA_FIX));
        assert!(is_gga_sentence(GNGGA_NO_FIX));
        assert!(!is_gga_sentence("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"));
        assert!(!is_gga_sentence("$GLGGA,123519"));
        assert!(!is_gga_sentence(" $GPGGA"));
        assert!(!is_gga_sentence(""));
    }

    #[test]
    fn test_gpgga_parsing() {
        let fix = parse_gga(GPGGA_FIX).unwrap();

        assert_eq!(fix.sentence_type, "GGA");
        assert_eq!(fix.format_timestamp(), "09:27:50");
        assert_eq!(GgaFix::format_coordinate(fix.latitude), "53.361337");
        assert_eq!(GgaFix::format_coordinate(fix.longitude), "-6.505620");
        assert_eq!(fix.gps_qual, 1);
        assert_eq!(fix.num_sats, 8);
        assert!(fix.has_fix());
    }

    #[test]
    fn test_no_fix_parsing() {
        let fix = parse_gga(GNGGA_NO_FIX).unwrap();

        assert_eq!(fix.gps_qual, 0);
        assert_eq!(fix.num_sats, 0);
        assert!(!fix.has_fix());
    }

    #[test]
    fn test_southern_latitude_is_negative() {
        let fix = parse_gga(GNGGA_DGPS_SOUTH).unwrap();

        assert!(fix.latitude.unwrap() < 0.0);
        assert!(fix.longitude.unwrap() > 0.0);
        assert_eq!(fix.gps_qual, 2);
        assert_eq!(fix.num_sats, 12);
    }

    #[test]
    fn test_fix_quality_codes() {
        assert_eq!(fix_quality_code(FixType::Invalid), 0);
        assert_eq!(fix_quality_code(FixType::Gps), 1);
        assert_eq!(fix_quality_code(FixType::Rtk), 4);
        assert_eq!(fix_quality_code(FixType::Simulation), 8);
    }

    #[test]
    fn test_bad_checksum_is_parse_error() {
        let corrupted = GPGGA_FIX.replace("*76", "*00");
        assert!(matches!(parse_gga(&corrupted), Err(GpsError::Parse(_))));
    }

    #[test]
    fn test_truncated_sentence_is_parse_error() {
        assert!(matches!(parse_gga("$GPGGA,123519,48"), Err(GpsError::Parse(_))));
    }
}
