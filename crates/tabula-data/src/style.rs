//! Cell presentation styles.
//!
//! A [`Style`] describes the visual presentation of a single value in
//! a [`Row`], independent of the value itself. Most backends don't
//! support styling; those that do (e.g. spreadsheet-backed sources)
//! attach one style per cell. Styles are immutable value objects built
//! through [`StyleBuilder`].
//!
//! [`Row`]: crate::Row

use std::fmt;

use tabula_common::{TabulaError, TabulaResult};

/// The neutral style: no flags set, no optional field present.
///
/// This is the identity element of [`Style::merge`] and renders to an
/// empty CSS string.
pub const NO_STYLE: Style = Style {
    bold: false,
    italic: false,
    underline: false,
    font_size: None,
    alignment: None,
    foreground: None,
    background: None,
};

/// A unit for sizing fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    /// Point unit.
    Pt,
    /// Pixel unit.
    Px,
    /// Percent unit.
    Percent,
}

impl SizeUnit {
    /// The CSS suffix for this unit.
    pub fn css_unit(&self) -> &'static str {
        match self {
            SizeUnit::Pt => "pt",
            SizeUnit::Px => "px",
            SizeUnit::Percent => "%",
        }
    }
}

/// Horizontal text alignment of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Left-aligned.
    Left,
    /// Right-aligned.
    Right,
    /// Centered.
    Center,
    /// Justified.
    Justify,
}

impl TextAlignment {
    /// The CSS value for this alignment.
    pub fn css_value(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Right => "right",
            TextAlignment::Center => "center",
            TextAlignment::Justify => "justify",
        }
    }
}

/// A color used for value highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a color, validating that each channel is in 0-255.
    pub fn rgb(red: i32, green: i32, blue: i32) -> TabulaResult<Self> {
        for (channel, value) in [("red", red), ("green", green), ("blue", blue)] {
            if !(0..=255).contains(&value) {
                return Err(TabulaError::invalid_style(format!(
                    "{} channel must be in 0-255, got {}",
                    channel, value
                )));
            }
        }
        Ok(Self {
            red: red as u8,
            green: green as u8,
            blue: blue as u8,
        })
    }

    /// The red channel.
    pub fn red(&self) -> u8 {
        self.red
    }

    /// The green channel.
    pub fn green(&self) -> u8 {
        self.green
    }

    /// The blue channel.
    pub fn blue(&self) -> u8 {
        self.blue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
    }
}

/// Visual presentation of a single cell value.
///
/// Two styles are equal iff every field is equal. [`NO_STYLE`] is the
/// neutral element; a plain cell carries it by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    bold: bool,
    italic: bool,
    underline: bool,
    font_size: Option<(u32, SizeUnit)>,
    alignment: Option<TextAlignment>,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl Style {
    /// Starts building a style.
    pub fn builder() -> StyleBuilder {
        StyleBuilder::default()
    }

    /// Whether the value is written in bold text.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Whether the value is written in italic text.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Whether the value is underlined.
    pub fn is_underline(&self) -> bool {
        self.underline
    }

    /// The font size and its unit, if set.
    pub fn font_size(&self) -> Option<(u32, SizeUnit)> {
        self.font_size
    }

    /// The text alignment, if set.
    pub fn alignment(&self) -> Option<TextAlignment> {
        self.alignment
    }

    /// The foreground (text) color, if set.
    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// The background color, if set.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Renders this style as CSS text.
    ///
    /// The output is canonical: declarations appear in a fixed order
    /// (font-weight, font-style, text-decoration, font-size,
    /// text-align, color, background-color), unset properties are
    /// omitted, declarations are joined by `"; "` with no trailing
    /// separator. [`NO_STYLE`] renders as the empty string.
    pub fn to_css(&self) -> String {
        let mut declarations: Vec<String> = Vec::new();
        if self.bold {
            declarations.push("font-weight: bold".to_string());
        }
        if self.italic {
            declarations.push("font-style: italic".to_string());
        }
        if self.underline {
            declarations.push("text-decoration: underline".to_string());
        }
        if let Some((size, unit)) = self.font_size {
            declarations.push(format!("font-size: {}{}", size, unit.css_unit()));
        }
        if let Some(alignment) = self.alignment {
            declarations.push(format!("text-align: {}", alignment.css_value()));
        }
        if let Some(color) = self.foreground {
            declarations.push(format!("color: {}", color));
        }
        if let Some(color) = self.background {
            declarations.push(format!("background-color: {}", color));
        }
        declarations.join("; ")
    }

    /// Combines two styles; fields set on `other` win.
    ///
    /// Merging with [`NO_STYLE`] on either side is the identity.
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            font_size: other.font_size.or(self.font_size),
            alignment: other.alignment.or(self.alignment),
            foreground: other.foreground.or(self.foreground),
            background: other.background.or(self.background),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        NO_STYLE
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

/// Builder for [`Style`].
///
/// Accumulates raw inputs and validates them on [`build`]: the font
/// size must be positive and every color channel in range, otherwise
/// building fails with an invalid-style error.
///
/// [`build`]: StyleBuilder::build
#[derive(Debug, Default)]
pub struct StyleBuilder {
    bold: bool,
    italic: bool,
    underline: bool,
    font_size: Option<(i64, SizeUnit)>,
    alignment: Option<TextAlignment>,
    foreground: Option<(i32, i32, i32)>,
    background: Option<(i32, i32, i32)>,
}

impl StyleBuilder {
    /// Writes the value in bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Writes the value in italics.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Underlines the value.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, size: i64, unit: SizeUnit) -> Self {
        self.font_size = Some((size, unit));
        self
    }

    /// Sets the text alignment.
    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Sets the foreground (text) color.
    pub fn foreground(mut self, red: i32, green: i32, blue: i32) -> Self {
        self.foreground = Some((red, green, blue));
        self
    }

    /// Sets the background color.
    pub fn background(mut self, red: i32, green: i32, blue: i32) -> Self {
        self.background = Some((red, green, blue));
        self
    }

    /// Validates the accumulated inputs and builds the style.
    pub fn build(self) -> TabulaResult<Style> {
        let font_size = match self.font_size {
            Some((size, unit)) => {
                if size <= 0 {
                    return Err(TabulaError::invalid_style(format!(
                        "font size must be positive, got {}",
                        size
                    )));
                }
                Some((size as u32, unit))
            }
            None => None,
        };
        let color = |channels: Option<(i32, i32, i32)>| -> TabulaResult<Option<Color>> {
            channels.map(|(r, g, b)| Color::rgb(r, g, b)).transpose()
        };
        Ok(Style {
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            font_size,
            alignment: self.alignment,
            foreground: color(self.foreground)?,
            background: color(self.background)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_style_renders_empty() {
        assert_eq!(NO_STYLE.to_css(), "");
        assert_eq!(Style::default(), NO_STYLE);
    }

    #[test]
    fn test_css_property_order_is_canonical() {
        let style = Style::builder()
            .bold()
            .italic()
            .underline()
            .font_size(12, SizeUnit::Pt)
            .alignment(TextAlignment::Center)
            .foreground(255, 0, 0)
            .background(0, 0, 255)
            .build()
            .unwrap();
        assert_eq!(
            style.to_css(),
            "font-weight: bold; font-style: italic; text-decoration: underline; \
             font-size: 12pt; text-align: center; color: rgb(255,0,0); \
             background-color: rgb(0,0,255)"
        );
    }

    #[test]
    fn test_unset_properties_omitted() {
        let style = Style::builder()
            .bold()
            .foreground(0, 128, 0)
            .build()
            .unwrap();
        assert_eq!(style.to_css(), "font-weight: bold; color: rgb(0,128,0)");
    }

    #[test]
    fn test_percent_font_size() {
        let style = Style::builder()
            .font_size(150, SizeUnit::Percent)
            .build()
            .unwrap();
        assert_eq!(style.to_css(), "font-size: 150%");
    }

    #[test]
    fn test_color_channel_out_of_range() {
        assert!(Color::rgb(300, 0, 0).is_err());
        assert!(Color::rgb(0, -1, 0).is_err());
        assert!(Style::builder().foreground(300, 0, 0).build().is_err());
    }

    #[test]
    fn test_negative_font_size_rejected() {
        assert!(Style::builder().font_size(-1, SizeUnit::Pt).build().is_err());
        assert!(Style::builder().font_size(0, SizeUnit::Px).build().is_err());
    }

    #[test]
    fn test_equality_is_field_wise() {
        let a = Style::builder().bold().foreground(1, 2, 3).build().unwrap();
        let b = Style::builder().bold().foreground(1, 2, 3).build().unwrap();
        let c = Style::builder().bold().foreground(1, 2, 4).build().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_merge_identity() {
        let style = Style::builder()
            .italic()
            .font_size(10, SizeUnit::Px)
            .background(10, 20, 30)
            .build()
            .unwrap();
        assert_eq!(style.merge(&NO_STYLE), style);
        assert_eq!(NO_STYLE.merge(&style), style);
    }

    #[test]
    fn test_merge_other_side_wins() {
        let base = Style::builder()
            .font_size(10, SizeUnit::Px)
            .alignment(TextAlignment::Left)
            .build()
            .unwrap();
        let overlay = Style::builder().font_size(14, SizeUnit::Pt).build().unwrap();
        let merged = base.merge(&overlay);
        assert_eq!(merged.font_size(), Some((14, SizeUnit::Pt)));
        assert_eq!(merged.alignment(), Some(TextAlignment::Left));
    }
}
