//! Marker-precedence coloring of status lines.

use serde::{Deserialize, Serialize};

use crate::style::Color;

/// One `(marker, color)` entry of a [`ColorRuleTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    /// Substring searched for anywhere in the line.
    pub marker: String,
    pub color: Color,
}

impl ColorRule {
    pub fn new(marker: impl Into<String>, color: Color) -> Self {
        Self {
            marker: marker.into(),
            color,
        }
    }
}

/// An ordered list of color rules. Earlier entries take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRuleTable {
    rules: Vec<ColorRule>,
}

impl ColorRuleTable {
    pub fn new(rules: Vec<ColorRule>) -> Self {
        Self { rules }
    }

    /// The built-in status table: `[OK]`, then `[ERR]`, then `[WARN]`, then `>>`.
    ///
    /// A line carrying both an error marker and an arrow is an error line;
    /// generic markers never outrank a status marker.
    pub fn status() -> Self {
        Self::new(vec![
            ColorRule::new("[OK]", Color::rgb(0, 255, 100)),
            ColorRule::new("[ERR]", Color::rgb(255, 30, 60)),
            ColorRule::new("[WARN]", Color::rgb(255, 200, 0)),
            ColorRule::new(">>", Color::rgb(0, 240, 255)),
        ])
    }

    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    /// Returns the color of the first rule whose marker occurs in `line`,
    /// or `default` if none match.
    pub fn classify(&self, line: &str, default: Color) -> Color {
        classify(line, self, default)
    }
}

/// Maps a text line to its display color by marker precedence.
pub fn classify(line: &str, table: &ColorRuleTable, default: Color) -> Color {
    table
        .rules
        .iter()
        .find(|rule| line.contains(rule.marker.as_str()))
        .map_or(default, |rule| rule.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK: Color = Color::rgb(0, 255, 100);
    const ERR: Color = Color::rgb(255, 30, 60);
    const WARN: Color = Color::rgb(255, 200, 0);
    const ARROW: Color = Color::rgb(0, 240, 255);

    #[test]
    fn ok_outranks_arrow() {
        let table = ColorRuleTable::status();
        assert_eq!(classify("[OK] >> synced", &table, Color::WHITE), OK);
        assert_eq!(classify(">> Android-App-Core [OK]", &table, Color::WHITE), OK);
    }

    #[test]
    fn error_outranks_arrow_and_warning() {
        let table = ColorRuleTable::status();
        assert_eq!(classify(">> Gamma [ERR]", &table, Color::WHITE), ERR);
        assert_eq!(classify("[WARN] then [ERR]", &table, Color::WHITE), ERR);
        assert_eq!(classify(">> Backend-API-Node [WARN]", &table, Color::WHITE), WARN);
    }

    #[test]
    fn unmatched_lines_use_default() {
        let table = ColorRuleTable::status();
        assert_eq!(classify("Cpu Load: 45%", &table, Color::WHITE), Color::WHITE);
        assert_eq!(classify("> Alpha", &table, Color::BLACK), Color::BLACK);
        assert_eq!(classify(">> arrow", &table, Color::BLACK), ARROW);
        assert_eq!(classify("", &ColorRuleTable::default(), Color::BLACK), Color::BLACK);
    }

    #[test]
    fn table_order_is_precedence() {
        let table = ColorRuleTable::new(vec![
            ColorRule::new(">>", ARROW),
            ColorRule::new("[ERR]", ERR),
        ]);
        assert_eq!(table.classify(">> [ERR]", Color::WHITE), ARROW);
    }

    #[test]
    fn table_serializes_as_list() {
        let json = serde_json::to_string(&ColorRuleTable::status()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"marker\":\"[OK]\""));
    }
}
