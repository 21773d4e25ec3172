use crate::domain::StackFrame;
use std::num::NonZeroUsize;

/// Cuts `text` into consecutive windows of `chunk_size` characters. Only the last window
/// may be shorter; an empty input yields no windows.
pub fn split_by_length(text: &str, chunk_size: NonZeroUsize) -> Vec<&str> {
    let chunk_size = chunk_size.get();
    let mut windows = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == chunk_size {
            windows.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        windows.push(&text[start..]);
    }
    windows
}

/// Greedy grouping of stack frames for stack-trace splitting.
///
/// Frames are accumulated into the current group while the running rendered length
/// stays below `max_length` and more than one frame is still unassigned. The frame that
/// reaches the limit closes its group, so a single oversized frame forms a group alone.
pub fn group_frames(frames: &[StackFrame], max_length: NonZeroUsize) -> Vec<&[StackFrame]> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut length = 0;

    for (idx, frame) in frames.iter().enumerate() {
        length += frame.rendered_len();
        let unassigned = frames.len() - idx;
        if length < max_length.get() && unassigned > 1 {
            continue;
        }
        groups.push(&frames[start..=idx]);
        start = idx + 1;
        length = 0;
    }
    groups
}
