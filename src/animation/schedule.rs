//! Reveal scheduling: how many frames a paragraph gets and which cursor each frame shows.

/// Frames allotted to a paragraph of `paragraph_len` characters out of `total_frames` frames
/// spread over `text_len` characters: `ceil(total_frames * paragraph_len / text_len)`.
///
/// Because of the ceiling the per-paragraph budgets may add up to more than `total_frames`
/// (by at most `paragraphs - 1`). The result is clamped to `1..=max(paragraph_len, 1)`, so
/// an empty paragraph still gets a single frame.
pub fn paragraph_frame_budget(total_frames: usize, paragraph_len: usize, text_len: usize) -> usize {
    let raw = if text_len == 0 {
        1
    } else {
        (total_frames * paragraph_len).div_ceil(text_len)
    };
    raw.clamp(1, paragraph_len.max(1))
}

/// Monotonic reveal cursors for a paragraph.
///
/// Yields `floor(len * i / frames)` for `i in 1..=frames`, with `frames` clamped to `len`
/// (one step per character is the finest useful granularity). The last cursor is always
/// `len`. A zero-length paragraph or zero frame budget yields a single cursor of `len`.
#[derive(Clone, Debug)]
pub struct RevealSchedule {
    len: usize,
    frames: usize,
    next: usize,
}

impl RevealSchedule {
    pub fn new(paragraph_len: usize, frames: usize) -> Self {
        let frames = frames.min(paragraph_len).max(1);
        Self {
            len: paragraph_len,
            frames,
            next: 1,
        }
    }

    /// Number of cursors the schedule yields.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Cursor for step `i` (1-based).
    pub fn cursor_at(&self, i: usize) -> usize {
        self.len * i / self.frames
    }
}

impl Iterator for RevealSchedule {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next > self.frames {
            return None;
        }
        let cursor = self.cursor_at(self.next);
        self.next += 1;
        Some(cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.frames + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RevealSchedule {}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
