//! Payload chunking for the transport message limit.
//!
//! Telegram rejects messages over 4096 characters, so oversized payloads are
//! split into sequential chunks. A split never lands inside an HTML tag,
//! otherwise the parse mode would reject the chunk.

enum Segment<'a> {
    /// Plain text, splittable at any character boundary
    Text(&'a str),
    /// A whole `<...>` tag, atomic
    Tag(&'a str),
}

/// Split `text` into chunks of at most `limit` characters.
///
/// Order and content are preserved: concatenating the chunks yields the
/// original text. Splits prefer line boundaries and never fall inside a tag.
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 || text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for segment in segments(text) {
        match segment {
            Segment::Tag(tag) => {
                let len = tag.chars().count();
                if len > limit {
                    // A tag wider than the whole payload limit; last resort
                    // is a character split.
                    pack_text(tag, limit, &mut chunks, &mut current, &mut current_len);
                    continue;
                }
                if current_len + len > limit {
                    chunks.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push_str(tag);
                current_len += len;
            }
            Segment::Text(run) => {
                pack_text(run, limit, &mut chunks, &mut current, &mut current_len);
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Append a splittable text run, flushing full chunks as needed.
fn pack_text(
    mut run: &str,
    limit: usize,
    chunks: &mut Vec<String>,
    current: &mut String,
    current_len: &mut usize,
) {
    while !run.is_empty() {
        let room = limit - *current_len;
        if room == 0 {
            chunks.push(std::mem::take(current));
            *current_len = 0;
            continue;
        }

        let run_len = run.chars().count();
        if run_len <= room {
            current.push_str(run);
            *current_len += run_len;
            return;
        }

        // Cut after `room` characters, preferring the last newline inside
        // the window so blocks stay together.
        let window_end = byte_index_after(run, room);
        let cut = match run[..window_end].rfind('\n') {
            Some(idx) => idx + 1,
            None => window_end,
        };

        current.push_str(&run[..cut]);
        chunks.push(std::mem::take(current));
        *current_len = 0;
        run = &run[cut..];
    }
}

/// Byte index after the first `n` characters of `s`.
fn byte_index_after(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Split text into atomic tag segments and splittable text runs.
fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => match rest.find('>') {
                Some(end) => {
                    out.push(Segment::Tag(&rest[..=end]));
                    rest = &rest[end + 1..];
                }
                None => {
                    // Unterminated tag; treat the remainder as text.
                    out.push(Segment::Text(rest));
                    rest = "";
                }
            },
            Some(pos) => {
                out.push(Segment::Text(&rest[..pos]));
                rest = &rest[pos..];
            }
            None => {
                out.push(Segment::Text(rest));
                rest = "";
            }
        }
    }
    out
}
