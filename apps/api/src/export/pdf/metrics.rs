//! Static glyph-width tables for the two standard PDF fonts the built-in
//! converter emits.
//!
//! Widths are Adobe AFM advance widths in 1/1000 em. Tables cover ASCII
//! 0x20..=0x7E; index = (char as usize) - 32. Anything else falls back to
//! `average_char_width`.

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfFont {
    Helvetica,
    HelveticaBold,
}

impl PdfFont {
    pub fn for_weight(bold: bool) -> Self {
        if bold {
            PdfFont::HelveticaBold
        } else {
            PdfFont::Helvetica
        }
    }

    /// BaseFont name in the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            PdfFont::Helvetica => "Helvetica",
            PdfFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            PdfFont::Helvetica => "F1",
            PdfFont::HelveticaBold => "F2",
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            PdfFont::Helvetica => &HELVETICA,
            PdfFont::HelveticaBold => &HELVETICA_BOLD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_char_width: u16,
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c) as f32).sum::<f32>() / 1000.0
    }

    /// Width of `s` in points at `size_pt`.
    pub fn measure_pt(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt
    }

    pub fn space_width_pt(&self, size_pt: f32) -> f32 {
        self.char_width(' ') as f32 / 1000.0 * size_pt
    }
}

#[rustfmt::skip]
static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // sp    !    "    #    $    %    &    '
        278, 278, 355, 556, 556, 889, 667, 191,
        // (     )    *    +    ,    -    .    /
        333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :     ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-Z
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [     \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-z
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {     |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        // sp    !    "    #    $    %    &    '
        278, 333, 474, 556, 556, 889, 722, 238,
        // (     )    *    +    ,    -    .    /
        333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :     ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A-Z
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [     \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a-z
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {     |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_glyph_widths() {
        let regular = PdfFont::Helvetica.metrics();
        assert_eq!(regular.char_width(' '), 278);
        assert_eq!(regular.char_width('i'), 222);
        assert_eq!(regular.char_width('m'), 833);
        assert_eq!(regular.char_width('W'), 944);
        assert_eq!(regular.char_width('~'), 584);

        let bold = PdfFont::HelveticaBold.metrics();
        assert_eq!(bold.char_width('b'), 611);
        assert_eq!(bold.char_width('i'), 278);
    }

    #[test]
    fn test_bold_is_never_narrower_for_lowercase() {
        let regular = PdfFont::Helvetica.metrics();
        let bold = PdfFont::HelveticaBold.metrics();
        for c in 'a'..='z' {
            assert!(
                bold.char_width(c) >= regular.char_width(c),
                "bold '{c}' narrower than regular"
            );
        }
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let regular = PdfFont::Helvetica.metrics();
        assert_eq!(regular.char_width('é'), regular.average_char_width);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let regular = PdfFont::Helvetica.metrics();
        // "aa" = 2 * 556 / 1000 em
        assert!((regular.measure_str("aa") - 1.112).abs() < 1e-4);
        assert!((regular.measure_pt("aa", 10.0) - 11.12).abs() < 1e-3);
    }
}
