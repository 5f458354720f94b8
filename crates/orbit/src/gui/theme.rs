use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit_core::{CenterStyle, SectorColors};
use palette::Srgba;

pub struct ThemeColors {
    pub sectors: SectorColors,
    pub center: Srgba<f64>,
    pub center_hover: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            sectors: SectorColors::default(),
            center: Srgba::new(0.2, 0.2, 0.2, 0.6),
            center_hover: Srgba::new(0.3, 0.3, 0.3, 0.8),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            sectors: SectorColors {
                background: Self::lookup_color(
                    context,
                    "theme_bg_color",
                    fallback.sectors.background,
                    Some(0.5),
                ),
                background_hover: Self::lookup_color(
                    context,
                    "theme_selected_bg_color",
                    fallback.sectors.background_hover,
                    Some(0.9),
                ),
                border: Self::lookup_color(
                    context,
                    "borders",
                    fallback.sectors.border,
                    Some(0.85),
                ),
                separator: Self::lookup_color(
                    context,
                    "theme_fg_color",
                    fallback.sectors.separator,
                    Some(0.3),
                ),
            },
            center: Self::lookup_color(context, "theme_bg_color", fallback.center, Some(0.6)),
            center_hover: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.center_hover,
                Some(0.8),
            ),
            label: Self::lookup_color(context, "theme_fg_color", fallback.label, None),
        }
    }

    /// What the center control shows for each navigation state.
    pub fn center_glyph(&self, style: CenterStyle) -> Option<&'static str> {
        match style {
            CenterStyle::Back => Some("←"),
            CenterStyle::Close => Some("✕"),
            CenterStyle::None => None,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-window, .orbit-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_glyphs() {
        let colors = ThemeColors::default();
        assert_eq!(colors.center_glyph(CenterStyle::Back), Some("←"));
        assert_eq!(colors.center_glyph(CenterStyle::Close), Some("✕"));
        assert_eq!(colors.center_glyph(CenterStyle::None), None);
    }
}
