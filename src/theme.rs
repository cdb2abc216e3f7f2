//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.
//!
//! Piece colours are fixed by the shape catalog; a theme only restyles the
//! board background, grid lines and the sidebar.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Board and UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Colour of an empty cell.
    pub empty: Color,
    /// Lines between cells.
    pub grid_line: Color,
    /// Sidebar border.
    pub border: Color,
    /// Text (score, lines).
    pub main_fg: Color,
    /// Titles.
    pub title: Color,
    /// Game-over banner.
    pub alert: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            empty: Color::Rgb(0, 0, 0),
            grid_line: Color::Rgb(128, 128, 128),
            border: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(255, 255, 255),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            alert: Color::Rgb(0xE0, 0x6C, 0x75),
        }
    }
}

impl Theme {
    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Keys that are missing or unparsable keep their default colour.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        Self::from_map(&map)
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        let defaults = Self::default();
        let get = |key: &str, fallback: Color| -> Result<Color, ThemeError> {
            map.get(key).map_or(Ok(fallback), |v| parse_hex(v))
        };
        Ok(Self {
            empty: get("main_bg", defaults.empty)?,
            grid_line: get("inactive_fg", defaults.grid_line)?,
            border: get("div_line", defaults.border)?,
            main_fg: get("main_fg", defaults.main_fg)?,
            title: get("title", defaults.title)?,
            alert: get("temp_end", defaults.alert)?,
        })
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    if !s.is_ascii() {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(parse_hex("#12"), Err(ThemeError::InvalidHex(_))));
        assert!(matches!(parse_hex("#GG0000"), Err(ThemeError::InvalidHex(_))));
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[main_bg]="#31353F""##);
        assert_eq!(map.get("main_bg"), Some(&"#31353F".to_string()));
    }

    #[test]
    fn test_from_map_keeps_defaults_for_missing_keys() {
        let map = parse_theme_file("# comment\ntheme[inactive_fg]='#101010'\n");
        let theme = Theme::from_map(&map).unwrap();
        assert_eq!(theme.grid_line, Color::Rgb(0x10, 0x10, 0x10));
        assert_eq!(theme.empty, Theme::default().empty);
    }

    #[test]
    fn test_from_map_reports_bad_hex() {
        let map = parse_theme_file(r#"theme[title]="nope""#);
        assert!(Theme::from_map(&map).is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Theme::load(Path::new("/nonexistent/blocktui.theme")).unwrap_err();
        assert!(matches!(err, ThemeError::Io(_)));
    }
}
