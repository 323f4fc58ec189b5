//! Reader accessibility settings and the text style they produce.

use serde::{Deserialize, Serialize};

pub const FONT_SIZE_MIN: i32 = 12;
pub const FONT_SIZE_MAX: i32 = 32;
pub const FONT_SIZE_STEP: i32 = 2;
pub const LINE_SPACING_MIN: f64 = 1.0;
pub const LINE_SPACING_MAX: f64 = 3.0;
pub const LINE_SPACING_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMode {
    #[default]
    Normal,
    High,
}

impl ContrastMode {
    /// Anything other than `high` is treated as normal contrast.
    pub fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("high") {
            ContrastMode::High
        } else {
            ContrastMode::Normal
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    OpenDyslexic,
    Lexend,
    Other(String),
}

impl From<String> for FontFamily {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OpenDyslexic" => FontFamily::OpenDyslexic,
            "Lexend" => FontFamily::Lexend,
            _ => FontFamily::Other(value),
        }
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        match family {
            FontFamily::OpenDyslexic => "OpenDyslexic".into(),
            FontFamily::Lexend => "Lexend".into(),
            FontFamily::Other(name) => name,
        }
    }
}

pub const DYSLEXIC_FONT_CLASS: &str = "dyslexic-font";
pub const LEXEND_FONT_CLASS: &str = "lexend-font";
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";

/// Style applied to every text-content element.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: String,
    pub line_height: String,
    /// Inline font family; empty clears any previous inline value.
    pub font_family: String,
    pub add_classes: Vec<&'static str>,
    pub remove_classes: Vec<&'static str>,
}

// Accepts both the backend's snake_case names and the camelCase the page
// templates embed.
#[derive(Deserialize)]
#[serde(default)]
struct SettingsWire {
    #[serde(alias = "fontSize")]
    font_size: f64,
    #[serde(alias = "lineSpacing")]
    line_spacing: f64,
    #[serde(alias = "contrastMode")]
    contrast_mode: String,
    #[serde(alias = "fontFamily")]
    preferred_font: String,
}

impl Default for SettingsWire {
    fn default() -> Self {
        let d = ReaderSettings::default();
        Self {
            font_size: d.font_size_px as f64,
            line_spacing: d.line_spacing,
            contrast_mode: "normal".into(),
            preferred_font: d.font_family.into(),
        }
    }
}

impl From<SettingsWire> for ReaderSettings {
    fn from(wire: SettingsWire) -> Self {
        let mut settings = ReaderSettings {
            contrast_mode: ContrastMode::from_value(&wire.contrast_mode),
            font_family: FontFamily::from(wire.preferred_font),
            ..ReaderSettings::default()
        };
        settings.set_font_size(wire.font_size.round() as i32);
        settings.set_line_spacing(wire.line_spacing);
        settings
    }
}

/// Font size and line spacing are clamped on every write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsWire")]
pub struct ReaderSettings {
    #[serde(rename = "font_size")]
    font_size_px: i32,
    line_spacing: f64,
    contrast_mode: ContrastMode,
    #[serde(rename = "preferred_font")]
    font_family: FontFamily,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size_px: 16,
            line_spacing: 1.5,
            contrast_mode: ContrastMode::Normal,
            font_family: FontFamily::OpenDyslexic,
        }
    }
}

impl ReaderSettings {
    pub fn font_size_px(&self) -> i32 {
        self.font_size_px
    }

    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    pub fn contrast_mode(&self) -> ContrastMode {
        self.contrast_mode
    }

    pub fn font_family(&self) -> &FontFamily {
        &self.font_family
    }

    pub fn set_font_size(&mut self, px: i32) {
        self.font_size_px = px.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    pub fn adjust_font_size(&mut self, delta: i32) {
        self.set_font_size(self.font_size_px.saturating_add(delta));
    }

    /// Spacing is kept at one decimal place so repeated steps do not drift.
    pub fn set_line_spacing(&mut self, spacing: f64) {
        let spacing = if spacing.is_finite() { spacing } else { LINE_SPACING_MIN };
        self.line_spacing = ((spacing * 10.0).round() / 10.0).clamp(LINE_SPACING_MIN, LINE_SPACING_MAX);
    }

    pub fn adjust_line_spacing(&mut self, delta: f64) {
        self.set_line_spacing(self.line_spacing + delta);
    }

    pub fn set_contrast_mode(&mut self, mode: ContrastMode) {
        self.contrast_mode = mode;
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        self.font_family = family;
    }

    pub fn font_size_label(&self) -> String {
        format!("{}px", self.font_size_px)
    }

    pub fn line_spacing_label(&self) -> String {
        format!("{:.1}", self.line_spacing)
    }

    pub fn text_style(&self) -> TextStyle {
        let mut add = Vec::new();
        let mut remove = Vec::new();
        let mut font_family = String::new();
        match &self.font_family {
            FontFamily::OpenDyslexic => {
                add.push(DYSLEXIC_FONT_CLASS);
                remove.push(LEXEND_FONT_CLASS);
            }
            FontFamily::Lexend => {
                add.push(LEXEND_FONT_CLASS);
                remove.push(DYSLEXIC_FONT_CLASS);
            }
            FontFamily::Other(name) => {
                remove.extend([DYSLEXIC_FONT_CLASS, LEXEND_FONT_CLASS]);
                font_family = name.clone();
            }
        }
        match self.contrast_mode {
            ContrastMode::High => add.push(HIGH_CONTRAST_CLASS),
            ContrastMode::Normal => remove.push(HIGH_CONTRAST_CLASS),
        }
        TextStyle {
            font_size: self.font_size_label(),
            line_height: self.line_spacing_label(),
            font_family,
            add_classes: add,
            remove_classes: remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn font_size_stays_in_range() {
        let mut s = ReaderSettings::default();
        for _ in 0..50 {
            s.adjust_font_size(FONT_SIZE_STEP);
            assert!((FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&s.font_size_px()));
        }
        assert_eq!(s.font_size_px(), FONT_SIZE_MAX);
        for _ in 0..50 {
            s.adjust_font_size(-FONT_SIZE_STEP);
        }
        assert_eq!(s.font_size_px(), FONT_SIZE_MIN);
        s.adjust_font_size(i32::MIN);
        assert_eq!(s.font_size_px(), FONT_SIZE_MIN);
    }

    #[test]
    fn line_spacing_stays_in_range_without_drift() {
        let mut s = ReaderSettings::default();
        for _ in 0..40 {
            s.adjust_line_spacing(LINE_SPACING_STEP);
            assert!(s.line_spacing() >= LINE_SPACING_MIN && s.line_spacing() <= LINE_SPACING_MAX);
        }
        assert_eq!(s.line_spacing(), 3.0);
        for _ in 0..5 {
            s.adjust_line_spacing(-LINE_SPACING_STEP);
        }
        assert_eq!(s.line_spacing_label(), "2.5");
        for _ in 0..40 {
            s.adjust_line_spacing(-LINE_SPACING_STEP);
        }
        assert_eq!(s.line_spacing(), 1.0);
        s.set_line_spacing(f64::NAN);
        assert_eq!(s.line_spacing(), 1.0);
    }

    #[test]
    fn bundled_fonts_use_classes() {
        let mut s = ReaderSettings::default();
        let style = s.text_style();
        assert_eq!(style.add_classes, vec![DYSLEXIC_FONT_CLASS]);
        assert!(style.remove_classes.contains(&LEXEND_FONT_CLASS));
        assert!(style.remove_classes.contains(&HIGH_CONTRAST_CLASS));
        assert_eq!(style.font_family, "");

        s.set_font_family(FontFamily::from("Arial".to_string()));
        s.set_contrast_mode(ContrastMode::High);
        let style = s.text_style();
        assert_eq!(style.font_family, "Arial");
        assert_eq!(style.add_classes, vec![HIGH_CONTRAST_CLASS]);
        assert_eq!(style.font_size, "16px");
        assert_eq!(style.line_height, "1.5");
    }

    #[test]
    fn serializes_with_backend_field_names() {
        let s = ReaderSettings::default();
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({
                "font_size": 16,
                "line_spacing": 1.5,
                "contrast_mode": "normal",
                "preferred_font": "OpenDyslexic"
            })
        );
    }

    #[test]
    fn deserialization_clamps_and_accepts_template_names() {
        let s: ReaderSettings = serde_json::from_value(json!({
            "fontSize": 48, "lineSpacing": 0.2, "contrastMode": "high", "fontFamily": "Lexend"
        }))
        .unwrap();
        assert_eq!(s.font_size_px(), FONT_SIZE_MAX);
        assert_eq!(s.line_spacing(), LINE_SPACING_MIN);
        assert_eq!(s.contrast_mode(), ContrastMode::High);
        assert_eq!(s.font_family(), &FontFamily::Lexend);
    }

    #[test]
    fn contrast_values_other_than_high_are_normal() {
        assert_eq!(ContrastMode::from_value("HIGH"), ContrastMode::High);
        assert_eq!(ContrastMode::from_value("sepia"), ContrastMode::Normal);
    }
}
