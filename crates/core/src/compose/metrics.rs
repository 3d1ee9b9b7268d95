//! Standard PDF font metrics.
//!
//! Advance widths of the base-14 fonts used by the document writer, in
//! thousandths of an em, for the printable ASCII range. Characters outside
//! that range are written as `?` and measured as such.

/// Fonts available to the document writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
    /// Courier, for tabular text.
    Mono,
}

impl Font {
    /// All fonts in resource order.
    pub const ALL: [Self; 3] = [Self::Regular, Self::Bold, Self::Mono];

    /// PDF base font name.
    #[must_use]
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Mono => "Courier",
        }
    }

    /// Resource name used in content streams.
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
        }
    }

    /// Advance width of one character in thousandths of an em.
    #[must_use]
    pub fn char_width(self, ch: char) -> i32 {
        let index = printable_index(ch);
        match self {
            Self::Regular => HELVETICA[index],
            Self::Bold => HELVETICA_BOLD[index],
            Self::Mono => 600,
        }
    }

    /// Width of `text` set at `size` points, rounded down to whole points.
    #[must_use]
    pub fn text_width(self, text: &str, size: i32) -> i32 {
        let units: i32 = text.chars().map(|ch| self.char_width(ch)).sum();
        units * size / 1000
    }
}

/// Maps a character to its slot in the width tables, `?` when unprintable.
fn printable_index(ch: char) -> usize {
    let code = u32::from(ch);
    let code = if (0x20..=0x7e).contains(&code) { code } else { u32::from('?') };
    (code - 0x20) as usize
}

#[rustfmt::skip]
const HELVETICA: [i32; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [i32; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

/// Greedy word wrap of `text` to `max_width` points.
///
/// Words wider than the line are placed on their own line rather than split.
#[must_use]
pub fn wrap(text: &str, font: Font, size: i32, max_width: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
