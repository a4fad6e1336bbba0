//! Severity level definitions
//!
//! Nine levels, most urgent first. The numeric value is what appears in
//! sink lines, and a lower value means a more urgent record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum LogLevel {
    Emerge = 0,
    Alert = 1,
    Crit = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
    #[default]
    Debug2 = 8,
}

impl LogLevel {
    /// Every level, most urgent first
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Emerge,
        LogLevel::Alert,
        LogLevel::Crit,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Debug2,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Emerge => "EMERGE",
            LogLevel::Alert => "ALERT",
            LogLevel::Crit => "CRIT",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Debug2 => "DEBUG2",
        }
    }

    /// Numeric encoding used in sink lines
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Whether a logger configured with `self` as threshold accepts `level`
    #[inline]
    pub fn accepts(self, level: LogLevel) -> bool {
        self >= level
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Emerge | LogLevel::Alert => BrightRed,
            LogLevel::Crit | LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Notice => Cyan,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
            LogLevel::Debug2 => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMERGE" | "EMERG" => Ok(LogLevel::Emerge),
            "ALERT" => Ok(LogLevel::Alert),
            "CRIT" => Ok(LogLevel::Crit),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "NOTICE" => Ok(LogLevel::Notice),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "DEBUG2" => Ok(LogLevel::Debug2),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encoding() {
        for (idx, level) in LogLevel::ALL.iter().enumerate() {
            assert_eq!(level.as_u8() as usize, idx);
            assert_eq!(LogLevel::from_u8(idx as u8), Some(*level));
        }
        assert_eq!(LogLevel::from_u8(9), None);
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(LogLevel::Emerge < LogLevel::Alert);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Debug < LogLevel::Debug2);
    }

    #[test]
    fn test_threshold_accepts() {
        assert!(LogLevel::Debug2.accepts(LogLevel::Emerge));
        assert!(LogLevel::Debug2.accepts(LogLevel::Debug2));
        assert!(LogLevel::Emerge.accepts(LogLevel::Emerge));
        assert!(!LogLevel::Emerge.accepts(LogLevel::Alert));
        assert!(!LogLevel::Info.accepts(LogLevel::Debug));
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("Debug2".parse::<LogLevel>(), Ok(LogLevel::Debug2));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_is_most_verbose() {
        assert_eq!(LogLevel::default(), LogLevel::Debug2);
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(LogLevel::try_from("warn".to_string()), Ok(LogLevel::Warning));
        assert!(LogLevel::try_from("loud".to_string()).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&LogLevel::Notice).unwrap();
        assert_eq!(json, "\"NOTICE\"");
        let level: LogLevel = serde_json::from_str("\"crit\"").unwrap();
        assert_eq!(level, LogLevel::Crit);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }
}
