use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// nginx severity levels, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Notice = 2,
    Warn = 3,
    Error = 4,
    Crit = 5,
    Alert = 6,
    Emerg = 7,
}

impl Severity {
    /// Map a log token to a level. Unknown tokens give `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "notice" => Some(Self::Notice),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            "crit" => Some(Self::Crit),
            "alert" => Some(Self::Alert),
            "emerg" => Some(Self::Emerg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Crit => "crit",
            Self::Alert => "alert",
            Self::Emerg => "emerg",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(&s.to_ascii_lowercase()).ok_or_else(|| format!("unknown level: {s}"))
    }
}

/// Row order for the error-stat table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsOrder {
    /// Order in which each message was first seen.
    #[default]
    FirstSeen,
    /// Highest count first; ties keep first-seen order.
    Count,
}

impl FromStr for StatsOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-seen" => Ok(Self::FirstSeen),
            "count" => Ok(Self::Count),
            _ => Err(format!("unknown order: {s} (expected first-seen or count)")),
        }
    }
}
