use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Tile number color
    pub tile: Color,
    /// Tiles already sitting on their goal cell
    pub tile_home: Color,
    /// Background of the tile a hint points at
    pub hint_bg: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Win banner color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            tile: Color::Rgb { r: 80, g: 180, b: 255 },
            tile_home: Color::Rgb { r: 90, g: 255, b: 130 },
            hint_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
        }
    }
}
