//! Log sanitizing for user-controlled strings. Task text comes straight from
//! the user's markdown and may span lines; logs must stay one line per entry.

const MAX_PREVIEW: usize = 120;

/// Collapse a string to a single loggable line: control characters become
/// visible escapes, and anything past the preview cap is dropped behind an
/// ellipsis.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut truncated = false;
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            truncated = true;
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if truncated {
        out.push('…');
    }
    out
}
