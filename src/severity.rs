//! The fixed severity scale
//!
//! Five tiers share one numeric axis: the pipeline's top-level orchestration
//! (`MAIN*`), its primary operations (`PRIM*`), the low-level tools (`TOOL*`),
//! the conventional levels interleaved between them, and a terse `SUMMARY`
//! level just above `NOTSET`. Ranks are consumed literally by downstream
//! filters, so they are kept exactly as assigned even where a tier's local
//! order looks uneven.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogError;

/// Logical layer of the pipeline a severity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Top-level orchestration
    Main,
    /// Primary operations
    Prims,
    /// Low-level tool operations
    Tools,
    /// Conventional DEBUG..CRITICAL levels
    Standard,
    /// Terse summary output
    Summary,
    /// The implicit minimum
    Unset,
}

/// A named severity level with a fixed rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    NotSet,
    Summary,
    ToolDebug,
    Debug,
    ToolInfo,
    ToolWarning,
    Info,
    ToolError,
    ToolCritical,
    Warning,
    PrimDebug,
    PrimInfo,
    Error,
    PrimWarning,
    PrimError,
    Critical,
    PrimCritical,
    MainDebug,
    MainInfo,
    MainWarning,
    MainError,
    MainCritical,
}

impl Severity {
    /// Every level, ascending by rank
    pub const ALL: [Severity; 22] = [
        Severity::NotSet,
        Severity::Summary,
        Severity::ToolDebug,
        Severity::Debug,
        Severity::ToolInfo,
        Severity::ToolWarning,
        Severity::Info,
        Severity::ToolError,
        Severity::ToolCritical,
        Severity::Warning,
        Severity::PrimDebug,
        Severity::PrimInfo,
        Severity::Error,
        Severity::PrimWarning,
        Severity::PrimError,
        Severity::Critical,
        Severity::PrimCritical,
        Severity::MainDebug,
        Severity::MainInfo,
        Severity::MainWarning,
        Severity::MainError,
        Severity::MainCritical,
    ];

    /// Numeric rank used for all threshold comparisons
    pub fn rank(&self) -> u8 {
        match self {
            Severity::NotSet => 0,
            Severity::Summary => 5,
            Severity::ToolDebug => 9,
            Severity::Debug => 10,
            Severity::ToolInfo => 15,
            Severity::ToolWarning => 19,
            Severity::Info => 20,
            Severity::ToolError => 25,
            Severity::ToolCritical => 29,
            Severity::Warning => 30,
            Severity::PrimDebug => 35,
            Severity::PrimInfo => 39,
            Severity::Error => 40,
            Severity::PrimWarning => 45,
            Severity::PrimError => 49,
            Severity::Critical => 50,
            Severity::PrimCritical => 55,
            Severity::MainDebug => 60,
            Severity::MainInfo => 65,
            Severity::MainWarning => 70,
            Severity::MainError => 75,
            Severity::MainCritical => 80,
        }
    }

    /// Get the display name for this level
    pub fn name(&self) -> &'static str {
        match self {
            Severity::NotSet => "NOTSET",
            Severity::Summary => "SUMMARY",
            Severity::ToolDebug => "TOOLDEBUG",
            Severity::Debug => "DEBUG",
            Severity::ToolInfo => "TOOLINFO",
            Severity::ToolWarning => "TOOLWARNING",
            Severity::Info => "INFO",
            Severity::ToolError => "TOOLERROR",
            Severity::ToolCritical => "TOOLCRITICAL",
            Severity::Warning => "WARNING",
            Severity::PrimDebug => "PRIMDEBUG",
            Severity::PrimInfo => "PRIMINFO",
            Severity::Error => "ERROR",
            Severity::PrimWarning => "PRIMWARNING",
            Severity::PrimError => "PRIMERROR",
            Severity::Critical => "CRITICAL",
            Severity::PrimCritical => "PRIMCRITICAL",
            Severity::MainDebug => "MAINDEBUG",
            Severity::MainInfo => "MAININFO",
            Severity::MainWarning => "MAINWARNING",
            Severity::MainError => "MAINERROR",
            Severity::MainCritical => "MAINCRITICAL",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Severity::NotSet => Tier::Unset,
            Severity::Summary => Tier::Summary,
            Severity::ToolDebug
            | Severity::ToolInfo
            | Severity::ToolWarning
            | Severity::ToolError
            | Severity::ToolCritical => Tier::Tools,
            Severity::PrimDebug
            | Severity::PrimInfo
            | Severity::PrimWarning
            | Severity::PrimError
            | Severity::PrimCritical => Tier::Prims,
            Severity::MainDebug
            | Severity::MainInfo
            | Severity::MainWarning
            | Severity::MainError
            | Severity::MainCritical => Tier::Main,
            Severity::Debug
            | Severity::Info
            | Severity::Warning
            | Severity::Error
            | Severity::Critical => Tier::Standard,
        }
    }

    /// Look up the level carrying exactly this rank
    pub fn from_rank(rank: u8) -> Option<Severity> {
        Severity::ALL.iter().copied().find(|s| s.rank() == rank)
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Severity::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LogError::UnknownSeverity(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Severity::ToolDebug,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_match_scale() {
        assert_eq!(Severity::NotSet.rank(), 0);
        assert_eq!(Severity::Summary.rank(), 5);
        assert_eq!(Severity::ToolWarning.rank(), 19);
        assert_eq!(Severity::PrimInfo.rank(), 39);
        assert_eq!(Severity::PrimError.rank(), 49);
        assert_eq!(Severity::MainCritical.rank(), 80);
    }

    #[test]
    fn test_all_is_strictly_ascending_and_unique() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = Severity::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Severity::ALL.len());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("priminfo".parse::<Severity>().unwrap(), Severity::PrimInfo);
        assert_eq!(" MAINERROR ".parse::<Severity>().unwrap(), Severity::MainError);
        assert_eq!("Summary".parse::<Severity>().unwrap(), Severity::Summary);
    }

    #[test]
    fn test_parse_unknown_fails_fast() {
        let err = "VERBOSE".parse::<Severity>().unwrap_err();
        assert!(matches!(err, LogError::UnknownSeverity(name) if name == "VERBOSE"));
    }

    #[test]
    fn test_ordering_follows_rank() {
        assert!(Severity::ToolWarning < Severity::Info);
        assert!(Severity::PrimInfo < Severity::Error);
        assert!(Severity::PrimError < Severity::Critical);
        assert!(Severity::PrimCritical > Severity::Critical);
    }

    #[test]
    fn test_from_rank() {
        assert_eq!(Severity::from_rank(45), Some(Severity::PrimWarning));
        assert_eq!(Severity::from_rank(1), None);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Severity::MainInfo.tier(), Tier::Main);
        assert_eq!(Severity::PrimDebug.tier(), Tier::Prims);
        assert_eq!(Severity::ToolCritical.tier(), Tier::Tools);
        assert_eq!(Severity::Warning.tier(), Tier::Standard);
        assert_eq!(Severity::Summary.tier(), Tier::Summary);
        assert_eq!(Severity::NotSet.tier(), Tier::Unset);
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(Severity::from(tracing::Level::TRACE), Severity::ToolDebug);
        assert_eq!(Severity::from(tracing::Level::WARN), Severity::Warning);
        assert_eq!(Severity::from(tracing::Level::ERROR), Severity::Error);
    }
}
