//! Detection zones and their configuration.

use crate::{DetectionLevel, PerceptionError, PerceptionResult};

/// Which sense a zone models.  Declaration order is evaluation priority.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneKind {
    /// Narrow cone matching the flashlight.
    Focused,
    /// Wide cone, close range.
    Short,
    /// Widest cone, medium range.
    Peripheral,
    /// Distance only.
    Hearing,
}

impl ZoneKind {
    /// Level produced when this zone is the first match.
    #[inline]
    pub fn level(self) -> DetectionLevel {
        match self {
            ZoneKind::Hearing => DetectionLevel::Noticed,
            ZoneKind::Focused | ZoneKind::Short | ZoneKind::Peripheral => DetectionLevel::Alert,
        }
    }
}

/// One detection zone.
///
/// The effective range is `min_range + (max_range - min_range) * exposure`,
/// so a fully hidden target (exposure 0) is detected only within `min_range`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub kind:           ZoneKind,
    /// Half-width of the cone in degrees; `None` disables the angle check.
    pub half_angle_deg: Option<f32>,
    pub min_range:      f32,
    pub max_range:      f32,
}

impl Zone {
    pub fn cone(kind: ZoneKind, half_angle_deg: f32, min_range: f32, max_range: f32) -> Self {
        Self { kind, half_angle_deg: Some(half_angle_deg), min_range, max_range }
    }

    pub fn radial(kind: ZoneKind, min_range: f32, max_range: f32) -> Self {
        Self { kind, half_angle_deg: None, min_range, max_range }
    }

    /// Range at `exposure` (clamped to `[0, 1]`).  Non-decreasing in exposure.
    #[inline]
    pub fn range(&self, exposure: f32) -> f32 {
        let t = exposure.clamp(0.0, 1.0);
        self.min_range + (self.max_range - self.min_range) * t
    }

    /// `true` if a target at `distance` and `deviation` radians off the
    /// facing falls inside this zone.
    pub fn contains(&self, distance: f32, deviation: f32, exposure: f32) -> bool {
        if distance > self.range(exposure) {
            return false;
        }
        match self.half_angle_deg {
            Some(deg) => deviation <= deg.to_radians(),
            None => true,
        }
    }

    pub fn validate(&self) -> PerceptionResult<()> {
        if !(self.min_range >= 0.0) || self.min_range > self.max_range {
            return Err(PerceptionError::InvertedRange {
                kind: self.kind,
                min:  self.min_range,
                max:  self.max_range,
            });
        }
        if let Some(deg) = self.half_angle_deg {
            if !(deg > 0.0 && deg <= 180.0) {
                return Err(PerceptionError::BadAngle { kind: self.kind, deg });
            }
        }
        Ok(())
    }
}

// ── PerceptionConfig ──────────────────────────────────────────────────────────

/// Zones in priority order plus the cache and boost parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    /// Evaluated front to back; first match wins.
    pub zones:               Vec<Zone>,
    /// Seconds a detection result is reused before the next raycast.
    pub ttl_secs:            f32,
    /// Exposure multiplier applied while the agent is already searching or
    /// alerted.
    pub alert_stealth_boost: f32,
}

/// Default zones, in priority order:
///
/// | Zone         | Half-angle | Range (hidden → exposed) |
/// |--------------|-----------:|--------------------------|
/// | `Focused`    | 15°        | 6 → 14                   |
/// | `Short`      | 45°        | 2 → 5                    |
/// | `Peripheral` | 80°        | 4 → 9                    |
/// | `Hearing`    | —          | 1 → 3                    |
///
/// `Focused` models a lit flashlight: the narrow beam reaches further than
/// the unaided cones.  Configure a shorter beam for an unlit agent.
impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                Zone::cone(ZoneKind::Focused, 15.0, 6.0, 14.0),
                Zone::cone(ZoneKind::Short, 45.0, 2.0, 5.0),
                Zone::cone(ZoneKind::Peripheral, 80.0, 4.0, 9.0),
                Zone::radial(ZoneKind::Hearing, 1.0, 3.0),
            ],
            ttl_secs:            0.5,
            alert_stealth_boost: 1.5,
        }
    }
}

impl PerceptionConfig {
    pub fn validate(&self) -> PerceptionResult<()> {
        for zone in &self.zones {
            zone.validate()?;
        }
        if !(self.ttl_secs >= 0.0) {
            return Err(PerceptionError::Config(format!("ttl_secs must be >= 0, got {}", self.ttl_secs)));
        }
        if !(self.alert_stealth_boost >= 1.0) {
            return Err(PerceptionError::Config(format!(
                "alert_stealth_boost must be >= 1, got {}",
                self.alert_stealth_boost
            )));
        }
        Ok(())
    }
}
