pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

/// Printable ASCII (32..=126) as 3x5 bitmaps, rows top to bottom, three bits
/// per row, most significant bit leftmost.
const ASCII_GLYPHS: [u16; 95] = [
    0x0000, 0x2482, 0x5a00, 0x5f7d, 0x7ddf, 0x52a5, 0x2aab, 0x2400, // ' '..'\''
    0x1491, 0x4494, 0x0aa8, 0x05d0, 0x0014, 0x01c0, 0x0002, 0x12a4, // '('..'/'
    0x7b6f, 0x2c97, 0x73e7, 0x73cf, 0x5bc9, 0x79cf, 0x79ef, 0x7292, // '0'..'7'
    0x7bef, 0x7bcf, 0x0410, 0x0414, 0x1511, 0x0e38, 0x4454, 0x72c2, // '8'..'?'
    0x7be7, 0x2bed, 0x6bae, 0x7927, 0x6b6e, 0x79a7, 0x79a4, 0x796f, // '@'..'G'
    0x5bed, 0x7497, 0x726f, 0x5bad, 0x4927, 0x5fed, 0x5ffd, 0x7b6f, // 'H'..'O'
    0x6ba4, 0x7b79, 0x6bad, 0x79cf, 0x7492, 0x5b6f, 0x5b6a, 0x5bfd, // 'P'..'W'
    0x5aad, 0x5a92, 0x72a7, 0x6926, 0x4889, 0x324b, 0x2a00, 0x0007, // 'X'..'_'
    0x4400, 0x0e7f, 0x49ae, 0x0f27, 0x13ef, 0x0fa7, 0x39a4, 0x0f79, // '`'..'g'
    0x49ad, 0x2092, 0x106a, 0x4bad, 0x4927, 0x0ded, 0x0d6d, 0x0f6f, // 'h'..'o'
    0x0d74, 0x0f79, 0x0d64, 0x0f8f, 0x2e93, 0x0b6f, 0x0b6a, 0x0b7a, // 'p'..'w'
    0x0a95, 0x0b79, 0x0e57, 0x3593, 0x2492, 0x64d6, 0x0780, // 'x'..'~'
];

const FALLBACK_GLYPH: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph(u16);

impl Glyph {
    pub(crate) fn is_set(self, row: i32, col: i32) -> bool {
        if !(0..GLYPH_HEIGHT).contains(&row) || !(0..GLYPH_WIDTH).contains(&col) {
            return false;
        }
        let bit = 14 - (row * GLYPH_WIDTH + col);
        (self.0 >> bit) & 1 == 1
    }
}

pub(crate) fn glyph_for(ch: char) -> Option<Glyph> {
    match ch {
        ' '..='~' => Some(Glyph(ASCII_GLYPHS[ch as usize - 32])),
        _ => None,
    }
}

/// Glyph for `ch`, or a visible fallback for anything outside printable ASCII.
pub(crate) fn glyph_or_fallback(ch: char) -> Glyph {
    glyph_for(ch)
        .or_else(|| glyph_for(FALLBACK_GLYPH))
        .unwrap_or(Glyph(0))
}
