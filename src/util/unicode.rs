/// Space characters that paste in from web pages and word processors and
/// should behave like an ASCII space in a monospace sheet.
const UNICODE_SPACES: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}',
    '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{202F}', '\u{205F}',
    '\u{3000}',
];

pub fn is_unicode_space(c: char) -> bool {
    UNICODE_SPACES.contains(&c)
}

/// Normalize `\r\n` and lone `\r` to `\n`, and Unicode spaces to ASCII spaces.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            c if is_unicode_space(c) => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Length in characters. Column arithmetic on sheets assumes one cell per character.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
