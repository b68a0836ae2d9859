//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`CellStyle`] - Cell style record, every field optional
//! - [`FontWeight`], [`FontSlant`], [`TextDecoration`] - Font settings
//! - [`TextAlign`], [`VerticalAlign`] - Text alignment
//! - [`Color`] - Color representation

mod alignment;
mod color;
mod font;

pub use alignment::{TextAlign, VerticalAlign};
pub use color::Color;
pub use font::{FontSlant, FontWeight, TextDecoration};

use serde::{Deserialize, Serialize};

/// Cell style record
///
/// Every field is optional; an absent field means "inherit the default".
/// Style deltas use the same type, and [`CellStyle::merge`] overlays one
/// onto another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontSlant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,
    /// Number format code (stored, not applied)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl CellStyle {
    /// Create a new empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font weight to bold (or back to normal)
    pub fn bold(mut self, bold: bool) -> Self {
        self.font_weight = Some(if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        });
        self
    }

    /// Set font slant to italic (or back to normal)
    pub fn italic(mut self, italic: bool) -> Self {
        self.font_style = Some(if italic {
            FontSlant::Italic
        } else {
            FontSlant::Normal
        });
        self
    }

    /// Set text decoration
    pub fn decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = Some(decoration);
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Set font family
    pub fn font_family<S: Into<String>>(mut self, family: S) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set text color
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set background color
    pub fn background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set horizontal alignment
    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = Some(align);
        self
    }

    /// Enable or disable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Set number format code
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Check if the style renders bold
    pub fn is_bold(&self) -> bool {
        self.font_weight.map_or(false, |w| w.is_bold())
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `delta` onto this style
    ///
    /// Fields set in `delta` overwrite; fields absent from `delta` keep
    /// their current value.
    pub fn merge(&mut self, delta: &CellStyle) {
        fn overlay<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *slot = Some(v.clone());
            }
        }

        overlay(&mut self.font_family, &delta.font_family);
        overlay(&mut self.font_size, &delta.font_size);
        overlay(&mut self.font_weight, &delta.font_weight);
        overlay(&mut self.font_style, &delta.font_style);
        overlay(&mut self.text_decoration, &delta.text_decoration);
        overlay(&mut self.color, &delta.color);
        overlay(&mut self.background_color, &delta.background_color);
        overlay(&mut self.text_align, &delta.text_align);
        overlay(&mut self.vertical_align, &delta.vertical_align);
        overlay(&mut self.wrap_text, &delta.wrap_text);
        overlay(&mut self.number_format, &delta.number_format);
        overlay(&mut self.border_color, &delta.border_color);
        overlay(&mut self.border_style, &delta.border_style);
        overlay(&mut self.border_width, &delta.border_width);
        overlay(&mut self.padding, &delta.padding);
    }

    /// Return a copy of this style with `delta` overlaid
    pub fn merged(&self, delta: &CellStyle) -> CellStyle {
        let mut style = self.clone();
        style.merge(delta);
        style
    }
}
