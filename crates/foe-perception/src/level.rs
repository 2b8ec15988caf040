//! Detection levels.

use std::fmt;

/// How aware an agent is of the target, ordered by urgency.
///
/// `Ord` follows declaration order, so `max` picks the more urgent level.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionLevel {
    #[default]
    None,
    Noticed,
    Indicator,
    Alert,
}

impl DetectionLevel {
    /// `true` for anything above `None`.
    #[inline]
    pub fn is_aware(self) -> bool {
        self > DetectionLevel::None
    }

    pub fn name(self) -> &'static str {
        match self {
            DetectionLevel::None      => "NONE",
            DetectionLevel::Noticed   => "NOTICED",
            DetectionLevel::Indicator => "INDICATOR",
            DetectionLevel::Alert     => "ALERT",
        }
    }
}

impl fmt::Display for DetectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
