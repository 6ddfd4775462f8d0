//! Header anchor tables.
//!
//! A line is a section header when its lowercased text contains one of
//! [`NUMBERED_ANCHORS`] or [`NAMED_ANCHORS`]. Anchors carry their trailing `:` (or `|` for the
//! numbered form) so that ordinary lyrics mentioning "chorus" or "verse"
//! stay lyrics.

use crate::model::SectionType;

/// Numbered section markers (`1:`, `2|`, ...)
pub const NUMBERED_ANCHORS: &[&str] = &[
    "1|", "2|", "3|", "4|", "5|", "6|", "1:", "2:", "3:", "4:", "5:", "6:", "7:", "8:", "9:",
    "0:",
];

/// Section names: Russian, English, Ukrainian, Belarusian and a handful of
/// Romance/Slavic languages
pub const NAMED_ANCHORS: &[&str] = &[
    // ru
    "вступление:",
    "интро:",
    "куплет:",
    "припев:",
    "переход:",
    "реп:",
    "мост:",
    "мостик:",
    "вставка:",
    "речитатив:",
    "бридж:",
    "инструментал:",
    "проигрыш:",
    "запев:",
    "концовка:",
    "окончание:",
    "в конце:",
    "кода:",
    "тэг:",
    "рэп:",
    "стих:",
    "слово:",
    "декламация:",
    "финал:",
    "библия:",
    // en
    "intro:",
    "verse:",
    "chorus:",
    "bridge:",
    "instrumental:",
    "build:",
    "ending:",
    "link:",
    "outro:",
    "interlude:",
    "rap:",
    "spontaneous:",
    "refrain:",
    "tag:",
    "coda:",
    "vamp:",
    "channel:",
    "break:",
    "breakdown:",
    "hook:",
    "turnaround:",
    "turn:",
    "solo:",
    "chords:",
    // uk
    "вступ:",
    "інтро:",
    "приспів:",
    "інструментал:",
    "інтерлюдія:",
    "брідж:",
    "заспів:",
    "міст:",
    "програш:",
    "соло:",
    "перехід:",
    "повтор:",
    "кінець:",
    "в кінці:",
    "фінал:",
    "кінцівка:",
    "закінчення:",
    "тег:",
    "вірш:",
    "частина:",
    "декламація:",
    "біблія:",
    // be
    "прыпеў:",
    "прысьпеў:",
    "пройгрыш:",
    // de, fr, it, es, pt, ro, pl
    "strophe:",
    "interludio:",
    "couplet:",
    "pont:",
    "ponte:",
    "final:",
    "cor:",
    "strofă:",
    "refren:",
    "verso:",
    "coro:",
    "puente:",
    "refrão:",
    "parte:",
    "strofa:",
    "zwrotka:",
    "espontáneo:",
];

/// Named anchors that mark a verse
pub const VERSE_ANCHORS: &[&str] = &[
    "куплет:",
    "запев:",
    "стих:",
    "verse:",
    "заспів:",
    "вірш:",
    "strophe:",
    "couplet:",
    "strofă:",
    "verso:",
    "strofa:",
    "zwrotka:",
];

/// Named anchors that mark a chorus
pub const CHORUS_ANCHORS: &[&str] = &[
    "припев:",
    "chorus:",
    "refrain:",
    "приспів:",
    "прыпеў:",
    "прысьпеў:",
    "refren:",
    "coro:",
    "cor:",
    "refrão:",
];

/// All anchors contained in an already lowercased, trimmed header text
pub fn matching_anchors(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    NUMBERED_ANCHORS
        .iter()
        .chain(NAMED_ANCHORS.iter())
        .copied()
        .filter(move |anchor| text.contains(anchor))
}

/// Single-letter part labels such as `A:` or `B:` on a line of their own
pub fn is_section_letter(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_alphabetic()
    )
}

/// Decide the section type of a lowercased, trimmed header text.
///
/// Named verse anchors win over named chorus anchors. When only numbered
/// markers matched (`Verse 2:`, `Chorus 2:`), the bare section name decides.
/// A marker with no name at all (`1:`) is `Other`.
pub fn section_type(text: &str) -> SectionType {
    let matched: Vec<&str> = matching_anchors(text).collect();
    if matched.iter().any(|a| VERSE_ANCHORS.contains(a)) {
        return SectionType::Verse;
    }
    if matched.iter().any(|a| CHORUS_ANCHORS.contains(a)) {
        return SectionType::Chorus;
    }
    if matched.is_empty() || matched.iter().any(|a| !NUMBERED_ANCHORS.contains(a)) {
        return SectionType::Other;
    }

    let names_in = |anchors: &[&str]| {
        anchors
            .iter()
            .any(|anchor| text.contains(anchor.trim_end_matches(':')))
    };
    if names_in(VERSE_ANCHORS) {
        SectionType::Verse
    } else if names_in(CHORUS_ANCHORS) {
        SectionType::Chorus
    } else {
        SectionType::Other
    }
}
