/// Visible lines of a dialog box for a given reveal cursor.
///
/// Returns at most two lines: the previously completed line (kept on screen while the next
/// one fills in) followed by the line currently being typed, cut at the cursor. Offsets
/// count characters of the lines themselves, separators excluded. A cursor past the end
/// shows the last two lines in full.
pub fn visible_window<S: AsRef<str>>(lines: &[S], cursor: usize) -> Vec<String> {
    let Some(last) = lines.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut offset = 0usize;
    let mut current = last;
    let mut completed = false;
    for (i, line) in lines.iter().enumerate() {
        let len = line.as_ref().chars().count();
        if offset + len >= cursor {
            current = i;
            completed = true;
            break;
        }
        offset += len;
    }

    let mut out = Vec::with_capacity(2);
    if current > 0 {
        out.push(lines[current - 1].as_ref().to_string());
    }

    let line = lines[current].as_ref();
    if completed {
        out.push(prefix_chars(line, cursor - offset).to_string());
    } else {
        out.push(line.to_string());
    }
    out
}

/// First `n` characters of `s`, never splitting a multi-byte sequence.
pub fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/window.rs"]
mod tests;
