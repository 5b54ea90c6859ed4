/// Pixel-width measurement for a fixed font and size.
///
/// Implementations must be deterministic and monotonic in string length. Shaping engines
/// keep scratch state around, hence `&mut self`.
pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn width_px(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn width_px(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Split `text` into newline-delimited paragraphs.
///
/// Always yields at least one paragraph; separators are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Greedily wrap one paragraph into lines no wider than `max_width_px`.
///
/// Words are whitespace-separated and rejoined with single spaces. A word wider than the
/// limit on its own keeps its own line. An empty paragraph yields one empty line.
pub fn wrap<M>(paragraph: &str, max_width_px: f32, measure: &mut M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let mut candidate = String::with_capacity(current.len() + 1 + word.len());
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);

        if measure.width_px(&candidate) > max_width_px {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
