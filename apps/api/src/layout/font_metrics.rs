//! Static font-metric table for DejaVu Sans, the font embedded in generated PDFs.
//!
//! Character widths are in em units (advance width / 2048 units-per-em). This
//! is an approximation of the real glyph metrics. Turkish letters are measured
//! as their base Latin glyph, which matches DejaVu's accented forms to within
//! rounding. Other non-ASCII characters fall back to `average_char_width`.
//! Index = (char as usize) - 32.

/// Static character-width table for a font.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters with no entry.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let c = fold_turkish(c);
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_em`.
    ///
    /// Runs of whitespace collapse to a single space. A word wider than the
    /// line on its own is split at character boundaries. Blank input yields
    /// no lines.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            for piece in self.split_long_word(word, max_width_em) {
                let piece_w = self.measure_str(&piece);

                if current.is_empty() {
                    current = piece;
                    current_width = piece_w;
                } else if current_width + self.space_width + piece_w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current = piece;
                    current_width = piece_w;
                } else {
                    current.push(' ');
                    current.push_str(&piece);
                    current_width += self.space_width + piece_w;
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn split_long_word(&self, word: &str, max_width_em: f32) -> Vec<String> {
        if self.measure_str(word) <= max_width_em {
            return vec![word.to_string()];
        }

        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut width = 0.0_f32;
        for c in word.chars() {
            let w = self.char_width(c);
            if !piece.is_empty() && width + w > max_width_em {
                pieces.push(std::mem::take(&mut piece));
                width = 0.0;
            }
            piece.push(c);
            width += w;
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

fn fold_turkish(c: char) -> char {
    match c {
        'ç' => 'c',
        'Ç' => 'C',
        'ğ' => 'g',
        'Ğ' => 'G',
        'ı' => 'i',
        'İ' => 'I',
        'ö' => 'o',
        'Ö' => 'O',
        'ş' => 's',
        'Ş' => 'S',
        'ü' => 'u',
        'Ü' => 'U',
        'â' => 'a',
        'î' => 'i',
        'û' => 'u',
        other => other,
    }
}

/// DejaVu Sans Book.
pub static DEJAVU_SANS: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.318, 0.401, 0.462, 0.838, 0.636, 0.950, 0.780, 0.275, 0.390, 0.390, 0.500, 0.838, 0.318, 0.361, 0.318, 0.337,
        // 0     1     2     3     4     5     6     7     8     9
        0.636, 0.636, 0.636, 0.636, 0.636, 0.636, 0.636, 0.636, 0.636, 0.636,
        // :     ;     <     =     >     ?     @
        0.337, 0.337, 0.838, 0.838, 0.838, 0.531, 1.000,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.684, 0.686, 0.698, 0.770, 0.632, 0.575, 0.775, 0.752, 0.295, 0.295, 0.656, 0.557, 0.863,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.748, 0.787, 0.603, 0.787, 0.695, 0.635, 0.611, 0.732, 0.684, 0.989, 0.685, 0.611, 0.685,
        // [     \     ]     ^     _     `
        0.390, 0.337, 0.390, 0.838, 0.500, 0.500,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.613, 0.635, 0.550, 0.635, 0.615, 0.352, 0.635, 0.634, 0.278, 0.278, 0.579, 0.278, 0.974,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.634, 0.612, 0.635, 0.635, 0.411, 0.521, 0.392, 0.634, 0.592, 0.818, 0.592, 0.592, 0.525,
        // {     |     }     ~
        0.636, 0.337, 0.636, 0.838,
    ],
    average_char_width: 0.62,
    space_width: 0.318,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(DEJAVU_SANS.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rapor" = R(0.695) + a(0.613) + p(0.635) + o(0.612) + r(0.411) = 2.966
        let width = DEJAVU_SANS.measure_str("Rapor");
        assert!((width - 2.966).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_turkish_letters_measure_as_base_glyph() {
        assert_eq!(
            DEJAVU_SANS.measure_str("Şirket"),
            DEJAVU_SANS.measure_str("Sirket")
        );
        assert_eq!(DEJAVU_SANS.char_width('ı'), DEJAVU_SANS.char_width('i'));
    }

    #[test]
    fn test_unknown_non_ascii_falls_back() {
        assert_eq!(DEJAVU_SANS.char_width('€'), DEJAVU_SANS.average_char_width);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = DEJAVU_SANS.wrap("Sayın Yetkili,", 40.0);
        assert_eq!(lines, vec!["Sayın Yetkili,".to_string()]);
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = DEJAVU_SANS.wrap("  iki   kelime  ", 40.0);
        assert_eq!(lines, vec!["iki kelime".to_string()]);
    }

    #[test]
    fn test_wrap_blank_text_yields_no_lines() {
        assert!(DEJAVU_SANS.wrap("   \t ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let text = "Firmanızın dijital dönüşüm sürecinde ihtiyaç duyduğu danışmanlık \
                    hizmetlerini kapsamlı bir şekilde sunmayı teklif ediyoruz. "
            .repeat(4);
        let max = 20.0;
        let lines = DEJAVU_SANS.wrap(&text, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                DEJAVU_SANS.measure_str(line) <= max + 1e-3,
                "line too wide: {line}"
            );
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_splits_overlong_word() {
        let word = "a".repeat(100);
        let lines = DEJAVU_SANS.wrap(&word, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(DEJAVU_SANS.measure_str(line) <= 10.0 + 1e-3);
        }
    }
}
