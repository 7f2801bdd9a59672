// src/gps/data.rs
//! Fix data decoded from a GGA sentence

use chrono::NaiveTime;

/// One GGA fix, rebuilt for every sentence and dropped after printing
#[derive(Debug, Clone, PartialEq)]
pub struct GgaFix {
    pub sentence_type: String,
    pub timestamp: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub gps_qual: u8,
    pub num_sats: u32,
}

impl GgaFix {
    /// Check if the receiver reports a position solution
    pub fn has_fix(&self) -> bool {
        self.gps_qual > 0
    }

    /// Get fix type description
    pub fn fix_description(&self) -> String {
        match self.gps_qual {
            0 => "No fix".to_string(),
            1 => "GPS".to_string(),
            2 => "DGPS".to_string(),
            3 => "PPS".to_string(),
            4 => "RTK".to_string(),
            5 => "Float RTK".to_string(),
            6 => "Estimated".to_string(),
            7 => "Manual".to_string(),
            8 => "Simulation".to_string(),
            quality => format!("Unknown ({})", quality),
        }
    }

    /// Format coordinate for display
    pub fn format_coordinate(coord: Option<f64>) -> String {
        match coord {
            Some(val) => format!("{:.6}", val),
            None => "n/a".to_string(),
        }
    }

    pub fn format_timestamp(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.to_string(),
            None => "n/a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(gps_qual: u8) -> GgaFix {
        GgaFix {
            sentence_type: "GGA".to_string(),
            timestamp: NaiveTime::from_hms_opt(12, 35, 19),
            latitude: Some(48.1173),
            longitude: Some(-11.516666),
            gps_qual,
            num_sats: 8,
        }
    }

    #[test]
    fn test_has_fix_follows_quality() {
        assert!(!fix(0).has_fix());
        assert!(fix(1).has_fix());
        assert!(fix(4).has_fix());
    }

    #[test]
    fn test_fix_description() {
        assert_eq!(fix(0).fix_description(), "No fix");
        assert_eq!(fix(2).fix_description(), "DGPS");
        assert_eq!(fix(9).fix_description(), "Unknown (9)");
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(GgaFix::format_coordinate(Some(48.1173)), "48.117300");
        assert_eq!(GgaFix::format_coordinate(Some(-11.516666)), "-11.516666");
        assert_eq!(GgaFix::format_coordinate(None), "n/a");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(fix(1).format_timestamp(), "12:35:19");

        let mut no_time = fix(0);
        no_time.timestamp = None;
        assert_eq!(no_time.format_timestamp(), "n/a");
    }
}
