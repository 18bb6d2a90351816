//! Page geometry: formats, orientation and measurement units

use serde::{Deserialize, Serialize};

/// Points per millimetre
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Standard page formats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PageFormat {
    /// Portrait size in points (width, height)
    pub fn size_pt(self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (595.28, 841.89),
            PageFormat::A5 => (419.53, 595.28),
            PageFormat::Letter => (612.0, 792.0),
            PageFormat::Legal => (612.0, 1008.0),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Unit used for caller-facing coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Pt,
    #[default]
    Mm,
    In,
    Px,
}

impl Unit {
    /// Number of points in one unit
    pub fn points_per_unit(self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => PT_PER_MM,
            Unit::In => 72.0,
            Unit::Px => 72.0 / 96.0,
        }
    }

    /// Convert a value in this unit to points
    pub fn to_points(self, value: f64) -> f64 {
        value * self.points_per_unit()
    }

    /// Convert a value in points to this unit
    pub fn from_points(self, value: f64) -> f64 {
        value / self.points_per_unit()
    }
}

/// Page configuration for a new document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default)]
    pub unit: Unit,

    #[serde(default)]
    pub format: PageFormat,

    /// Compress content streams on save
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_compress() -> bool {
    true
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            unit: Unit::default(),
            format: PageFormat::default(),
            compress: true,
        }
    }
}

impl PageConfig {
    /// Page size in points, oriented
    pub fn size_pt(&self) -> (f64, f64) {
        let (w, h) = self.format.size_pt();
        match self.orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }

    /// Page size in the configured unit
    pub fn size(&self) -> (f64, f64) {
        let (w, h) = self.size_pt();
        (self.unit.from_points(w), self.unit.from_points(h))
    }
}

/// Rectangle measured from the top-left corner of the page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert from `unit` to points
    pub fn to_points(self, unit: Unit) -> Self {
        Self {
            x: unit.to_points(self.x),
            y: unit.to_points(self.y),
            width: unit.to_points(self.width),
            height: unit.to_points(self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_in_mm() {
        let config = PageConfig::default();
        let (w, h) = config.size();
        assert!((w - 210.0).abs() < 0.01);
        assert!((h - 297.0).abs() < 0.01);
    }

    #[test]
    fn test_landscape_swaps_axes() {
        let config = PageConfig {
            orientation: Orientation::Landscape,
            unit: Unit::Pt,
            ..PageConfig::default()
        };
        assert_eq!(config.size_pt(), (841.89, 595.28));
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(Unit::In.to_points(1.0), 72.0);
        assert_eq!(Unit::Pt.from_points(12.0), 12.0);
        assert!((Unit::Mm.to_points(25.4) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_page_config_from_json() {
        let config: PageConfig =
            serde_json::from_str(r#"{"orientation":"landscape","format":"letter"}"#).unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.format, PageFormat::Letter);
        assert_eq!(config.unit, Unit::Mm);
        assert!(config.compress);
    }

    #[test]
    fn test_rect_to_points() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0).to_points(Unit::In);
        assert_eq!(rect, Rect::new(72.0, 144.0, 216.0, 288.0));
    }
}
