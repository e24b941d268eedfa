//! Display width helpers.
//!
//! Provides ANSI-aware width calculation for menu lines so the line sink can
//! pad every row to the screen width.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Cut `text` to at most `width` display columns in a single pass. Escape
/// sequences are copied whole and take no columns; sequences after the cut
/// are kept so trailing resets still apply. Returns the text and its width.
pub fn truncate_to_width(text: &str, width: usize) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut full = false;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            out.push(ch);
            match chars.next() {
                Some('[') => {
                    out.push('[');
                    for next in chars.by_ref() {
                        out.push(next);
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(next) => out.push(next),
                None => {}
            }
            continue;
        }
        if full {
            continue;
        }
        let columns = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + columns > width {
            full = true;
            continue;
        }
        used += columns;
        out.push(ch);
    }
    (out, used)
}

/// Number of addressable cursor columns in a line of menu text.
pub fn text_columns(text: &str) -> usize {
    text.chars().count()
}
