pub mod font;
pub mod glyph;
