use ratatui::style::Color;

/// Color palette used by every view.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Single RGB color.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::standard()
    }
}

impl Theme {
    /// Blue and gray palette of the mobile client.
    ///
    pub fn standard() -> Self {
        Theme {
            name: "default",
            primary: rgb(0, 123, 255),
            accent: rgb(23, 162, 184),
            banner: rgb(0, 123, 255),
            text: rgb(248, 249, 250),
            text_muted: rgb(108, 117, 125),
            success: rgb(40, 167, 69),
            warning: rgb(255, 193, 7),
            error: rgb(220, 53, 69),
            border_active: rgb(0, 123, 255),
            border_normal: rgb(173, 181, 189),
            highlight_bg: rgb(0, 86, 179),
            highlight_fg: rgb(255, 255, 255),
        }
    }

    pub fn dracula() -> Self {
        Theme {
            name: "dracula",
            primary: rgb(189, 147, 249),
            accent: rgb(139, 233, 253),
            banner: rgb(255, 121, 198),
            text: rgb(248, 248, 242),
            text_muted: rgb(98, 114, 164),
            success: rgb(80, 250, 123),
            warning: rgb(255, 184, 108),
            error: rgb(255, 85, 85),
            border_active: rgb(189, 147, 249),
            border_normal: rgb(98, 114, 164),
            highlight_bg: rgb(139, 233, 253),
            highlight_fg: rgb(40, 42, 54),
        }
    }

    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night",
            primary: rgb(125, 207, 255),
            accent: rgb(158, 206, 106),
            banner: rgb(255, 159, 196),
            text: rgb(169, 177, 214),
            text_muted: rgb(117, 121, 148),
            success: rgb(158, 206, 106),
            warning: rgb(255, 202, 40),
            error: rgb(247, 118, 142),
            border_active: rgb(125, 207, 255),
            border_normal: rgb(117, 121, 148),
            highlight_bg: rgb(125, 207, 255),
            highlight_fg: rgb(26, 27, 38),
        }
    }

    /// Look up a theme by its configured name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::standard()),
            "dracula" => Some(Self::dracula()),
            "tokyo-night" => Some(Self::tokyo_night()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "dracula", "tokyo-night"]
    }
}
