//! Building [`CircularProgressArgs`] from textual attributes.
//!
//! Hosts that inflate views from markup hand over plain key/value strings.
//! Recognised keys:
//!
//! | key | format |
//! |---|---|
//! | `progressColor` | `#RRGGBB` or `#AARRGGBB` |
//! | `progress` | float |
//! | `maxProgress` | float |
//! | `stroke` | `8dp`, `8px` or a bare number in dp |
//! | `isIndeterminate` | `true` / `false` |
//! | `autostart` | `true` / `false` |
//!
//! Unknown keys are skipped.

use sweeping_ui::{Color, Dp};
use thiserror::Error;
use tracing::debug;

use super::CircularProgressArgs;

/// Ordered textual attributes. Later entries for the same key win.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// The last value given for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// An attribute value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// A float attribute did not parse.
    #[error("attribute `{name}`: `{value}` is not a number")]
    InvalidFloat {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
    /// A flag was neither `true` nor `false`.
    #[error("attribute `{name}`: `{value}` is not `true` or `false`")]
    InvalidBool {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
    /// A color was not a hex literal of 6 or 8 digits.
    #[error("attribute `{name}`: `{value}` is not a `#RRGGBB` or `#AARRGGBB` color")]
    InvalidColor {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
    /// A size had an unknown unit or no number.
    #[error("attribute `{name}`: `{value}` is not a dimension like `8dp` or `8px`")]
    InvalidDimension {
        /// Attribute name.
        name: String,
        /// Rejected value.
        value: String,
    },
}

fn parse_float(name: &str, value: &str) -> Result<f32, AttributeError> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| AttributeError::InvalidFloat {
            name: name.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_bool(name: &str, value: &str) -> Result<bool, AttributeError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AttributeError::InvalidBool {
            name: name.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, AttributeError> {
    let error = || AttributeError::InvalidColor {
        name: name.to_owned(),
        value: value.to_owned(),
    };
    let hex = value.trim().strip_prefix('#').ok_or_else(error)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(error());
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| error())?;
    match hex.len() {
        6 => Ok(Color::from_argb_u32(0xFF00_0000 | packed)),
        8 => Ok(Color::from_argb_u32(packed)),
        _ => Err(error()),
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<Dp, AttributeError> {
    let error = || AttributeError::InvalidDimension {
        name: name.to_owned(),
        value: value.to_owned(),
    };
    let trimmed = value.trim();
    let (number, is_px) = if let Some(number) = trimmed.strip_suffix("px") {
        (number, true)
    } else if let Some(number) = trimmed.strip_suffix("dp") {
        (number, false)
    } else {
        (trimmed, false)
    };
    let number = number.trim().parse::<f64>().map_err(|_| error())?;
    Ok(if is_px {
        Dp::from_pixels_f64(number)
    } else {
        Dp(number)
    })
}

impl CircularProgressArgs {
    /// Builds args from `attributes`, starting from the defaults.
    ///
    /// ```
    /// use sweeping_components::progress::{AttributeSet, CircularProgressArgs};
    /// use sweeping_ui::{Color, Dp};
    ///
    /// let attributes = AttributeSet::new()
    ///     .with("progressColor", "#FF0000")
    ///     .with("stroke", "4dp")
    ///     .with("isIndeterminate", "true");
    /// let args = CircularProgressArgs::from_attributes(&attributes).unwrap();
    /// assert_eq!(args.progress_color, Color::RED);
    /// assert_eq!(args.stroke_width, Dp(4.0));
    /// assert!(args.resolved_autostart());
    /// ```
    pub fn from_attributes(attributes: &AttributeSet) -> Result<Self, AttributeError> {
        let mut args = Self::default();
        for (name, value) in attributes.iter() {
            match name {
                "progressColor" => args.progress_color = parse_color(name, value)?,
                "progress" => args.progress = parse_float(name, value)?,
                "maxProgress" => args.max_progress = parse_float(name, value)?,
                "stroke" => args.stroke_width = parse_dimension(name, value)?,
                "isIndeterminate" => args.is_indeterminate = parse_bool(name, value)?,
                "autostart" => args.autostart = Some(parse_bool(name, value)?),
                _ => debug!(name, value, "Ignoring unknown progress attribute"),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_gives_defaults() {
        let args = CircularProgressArgs::from_attributes(&AttributeSet::new());
        assert_eq!(args, Ok(CircularProgressArgs::default()));
    }

    #[test]
    fn test_all_keys() {
        let attributes: AttributeSet = [
            ("progressColor", "#80FF0000"),
            ("progress", "12.5"),
            ("maxProgress", "50"),
            ("stroke", "6"),
            ("isIndeterminate", "false"),
            ("autostart", "true"),
        ]
        .into_iter()
        .collect();
        let args = CircularProgressArgs::from_attributes(&attributes);
        let expected = CircularProgressArgs::default()
            .progress_color(Color::from_rgba_u8(255, 0, 0, 0x80))
            .progress(12.5)
            .max_progress(50.0)
            .stroke_width(Dp(6.0))
            .autostart(true);
        assert_eq!(args, Ok(expected));
    }

    #[test]
    fn test_later_entries_win() {
        let attributes = AttributeSet::new()
            .with("progress", "1")
            .with("progress", "2");
        assert_eq!(attributes.get("progress"), Some("2"));
        let args = CircularProgressArgs::from_attributes(&attributes);
        assert_eq!(args.map(|a| a.progress), Ok(2.0));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let attributes = AttributeSet::new().with("layout_width", "match_parent");
        assert!(CircularProgressArgs::from_attributes(&attributes).is_ok());
    }

    #[test]
    fn test_dimension_units() {
        assert_eq!(parse_dimension("stroke", "8dp"), Ok(Dp(8.0)));
        assert_eq!(parse_dimension("stroke", " 3.5 "), Ok(Dp(3.5)));
        // Scale factor is 1 in tests.
        assert_eq!(parse_dimension("stroke", "12px"), Ok(Dp(12.0)));
        assert!(parse_dimension("stroke", "wide").is_err());
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let attributes = AttributeSet::new().with("progressColor", "red");
        assert_eq!(
            CircularProgressArgs::from_attributes(&attributes),
            Err(AttributeError::InvalidColor {
                name: "progressColor".into(),
                value: "red".into(),
            })
        );

        let attributes = AttributeSet::new().with("autostart", "yes");
        let error = CircularProgressArgs::from_attributes(&attributes).unwrap_err();
        assert_eq!(
            error.to_string(),
            "attribute `autostart`: `yes` is not `true` or `false`"
        );

        assert!(parse_color("c", "#12345").is_err());
        assert!(parse_color("c", "#+1234567").is_err());
        assert!(parse_float("p", "half").is_err());
    }
}
