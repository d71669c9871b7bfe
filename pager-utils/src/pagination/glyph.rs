//! Reaction glyph table and the `Token` type built on it.

/// Symbolic reaction names and the glyph each one is displayed as.
pub const GLYPHS: &[(&str, &str)] = &[
    ("1234", "🔢"),
    ("right", "▶"),
    ("forward", "▶"),
    ("backward", "◀"),
    ("left", "◀"),
    ("up", "🔼"),
    ("down", "🔽"),
    ("play", "▶"),
    ("pause", "⏸"),
    ("square", "⏹"),
    ("circle", "⏺"),
    ("next", "⏭"),
    ("prev", "⏮"),
    ("right_double", "⏩"),
    ("fast_forward", "⏩"),
    ("left_double", "⏪"),
    ("rewind", "⏪"),
    ("up_double", "⏫"),
    ("down_double", "⏬"),
    ("point_right", "➡"),
    ("right_arrow", "➡"),
    ("point_left", "⬅"),
    ("left_arrow", "⬅"),
    ("point_up", "⬆"),
    ("up_arrow", "⬆"),
    ("point_down", "⬇"),
    ("down_arrow", "⬇"),
    ("up_right_arrow", "↗"),
    ("point_up_right", "↗"),
    ("down_right_arrow", "↘"),
    ("point_down_right", "↘"),
    ("down_left_arrow", "↙"),
    ("point_down_left", "↙"),
    ("up_left_arrow", "↖"),
    ("point_up_left", "↖"),
    ("hook_right", "↪"),
    ("hook_left", "↩"),
    ("arrow_clockwise", "🔃"),
    ("reload", "🔃"),
];

const VARIATION_SELECTOR: char = '\u{fe0f}';

/// Look up the glyph for a symbolic name.
pub fn glyph_for(name: &str) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find_map(|(symbol, glyph)| (*symbol == name).then_some(*glyph))
}

/// Strip the emoji variation selector.
///
/// Discord reports some glyphs with U+FE0F and some without, depending on
/// the client that reacted.
pub fn normalize_glyph(glyph: &str) -> &str {
    glyph.trim_end_matches(VARIATION_SELECTOR)
}

/// A reaction control, identified by its glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Resolve a symbolic name through [`GLYPHS`], or keep a raw glyph as-is.
    pub fn new(name_or_glyph: &str) -> Self {
        let glyph = glyph_for(name_or_glyph).unwrap_or(name_or_glyph);
        Self(normalize_glyph(glyph).to_owned())
    }

    /// The glyph attached to the message.
    pub fn glyph(&self) -> &str {
        &self.0
    }

    /// Whether a reported reaction glyph is this token.
    pub fn matches(&self, glyph: &str) -> bool {
        self.0 == normalize_glyph(glyph)
    }
}

impl From<&str> for Token {
    fn from(name_or_glyph: &str) -> Self {
        Self::new(name_or_glyph)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
