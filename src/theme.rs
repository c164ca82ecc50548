use catppuccin::PALETTE;
use ratatui::style::Color;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colors used to draw overlays and the surface below them.
///
/// Every color is RGB so that opacity can be rendered by blending; see
/// [`blend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,
    pub text: Color,
    pub subtext0: Color,
    pub mauve: Color,
    pub lavender: Color,
    pub peach: Color,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            crust: catppuccin_to_color(&c.crust),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            mauve: catppuccin_to_color(&c.mauve),
            lavender: catppuccin_to_color(&c.lavender),
            peach: catppuccin_to_color(&c.peach),
        }
    }

    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Background of overlay surfaces.
    #[must_use]
    pub const fn surface(&self) -> Color {
        self.base
    }

    /// Color the page fades toward behind a modal.
    #[must_use]
    pub const fn scrim(&self) -> Color {
        self.crust
    }

    /// Backdrop that faded content blends into.
    #[must_use]
    pub const fn backdrop(&self) -> Color {
        self.mantle
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.lavender
    }

    #[must_use]
    pub const fn title(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn key_hint(&self) -> Color {
        self.peach
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// Information about a theme for display in selectors.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub theme: Theme,
}

/// Returns a list of all available built-in themes.
pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo { name: "Catppuccin Mocha", theme: Theme::catppuccin_mocha() },
        ThemeInfo { name: "Catppuccin Macchiato", theme: Theme::catppuccin_macchiato() },
        ThemeInfo { name: "Catppuccin Frappé", theme: Theme::catppuccin_frappe() },
        ThemeInfo { name: "Catppuccin Latte", theme: Theme::catppuccin_latte() },
    ]
}

/// Look up a theme by name. Returns the default theme if not found.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|t| t.name == name)
        .map(|t| t.theme)
        .unwrap_or_default()
}

/// Mix `fg` over `bg` with `alpha` in `[0, 1]`.
///
/// Only RGB colors can be mixed; anything else snaps to whichever side
/// dominates.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend(fg: Color, bg: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| {
                (f32::from(f) - f32::from(b))
                    .mul_add(alpha, f32::from(b))
                    .round() as u8
            };
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if alpha >= 0.5 => fg,
        _ => bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name_falls_back_to_default() {
        assert_eq!(theme_from_name("Catppuccin Latte"), Theme::catppuccin_latte());
        assert_eq!(theme_from_name("Solarized"), Theme::default());
    }

    #[test]
    fn test_blend_rgb() {
        let white = Color::Rgb(255, 255, 255);
        let black = Color::Rgb(0, 0, 0);
        assert_eq!(blend(white, black, 1.0), white);
        assert_eq!(blend(white, black, 0.0), black);
        assert_eq!(blend(white, black, 0.5), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_blend_named_colors_snap() {
        assert_eq!(blend(Color::Red, Color::Black, 0.7), Color::Red);
        assert_eq!(blend(Color::Red, Color::Black, 0.2), Color::Black);
    }
}
