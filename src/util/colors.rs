use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x005fb4e8);
pub const SECONDARY: Color = Color::from_u32(0x002f6f94);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x0088d4fe);
