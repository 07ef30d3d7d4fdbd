//! Lookup tables for character substitution mutators.

/// Visually confusable characters for lowercase ASCII letters.
///
/// Mostly Cyrillic lookalikes, plus a few Greek and Latin-extended ones.
pub fn homoglyphs(c: char) -> &'static [char] {
    match c {
        'a' => &['\u{0430}', '\u{03B1}'], // а α
        'b' => &['\u{044C}', '\u{0432}'], // ь в
        'c' => &['\u{0441}', '\u{00E7}'], // с ç
        'd' => &['\u{0501}'],             // ԁ
        'e' => &['\u{0435}'],             // е
        'g' => &['\u{0261}'],             // ɡ
        'h' => &['\u{04BB}'],             // һ
        'i' => &['\u{0456}'],             // і
        'j' => &['\u{0458}'],             // ј
        'k' => &['\u{043A}'],             // к
        'l' => &['\u{04CF}'],             // ӏ
        'm' => &['\u{043C}'],             // м
        'n' => &['\u{043F}'],             // п
        'o' => &['\u{043E}', '\u{03BF}'], // о ο
        'p' => &['\u{0440}'],             // р
        'q' => &['\u{051B}'],             // ԛ
        's' => &['\u{0455}'],             // ѕ
        't' => &['\u{0442}'],             // т
        'u' => &['\u{03C5}'],             // υ
        'v' => &['\u{0475}'],             // ѵ
        'w' => &['\u{051D}'],             // ԝ
        'x' => &['\u{0445}'],             // х
        'y' => &['\u{0443}'],             // у
        _ => &[],
    }
}

/// Neighbouring keys on a QWERTY keyboard.
pub fn qwerty_neighbours(c: char) -> &'static str {
    match c {
        'a' => "qwsz",
        'b' => "vghn",
        'c' => "xdfv",
        'd' => "serfcx",
        'e' => "wrsd",
        'f' => "drtgvc",
        'g' => "ftyhbv",
        'h' => "gyujnb",
        'i' => "ujko",
        'j' => "huikmn",
        'k' => "jiolm",
        'l' => "kop",
        'm' => "njk",
        'n' => "bhjm",
        'o' => "iklp",
        'p' => "ol",
        'q' => "wa",
        'r' => "edft",
        's' => "awedxz",
        't' => "rfgy",
        'u' => "yhji",
        'v' => "cfgb",
        'w' => "qase",
        'x' => "zsdc",
        'y' => "tghu",
        'z' => "asx",
        _ => "",
    }
}

pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Characters used by addition and insertion.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
