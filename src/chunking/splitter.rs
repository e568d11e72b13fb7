use super::TextSplit;

pub(super) const PARAGRAPH_SEP: &str = "\n\n";
const LINE_SEP: &str = "\n";
const SENTENCE_SEP: &str = " ";

/// Smallest unit the merger works with. `sep` is what joins it to the
/// previous piece when both land in the same chunk.
#[derive(Debug)]
pub(super) struct Piece {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub sep: &'static str,
}

impl Piece {
    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn sep_len(&self) -> usize {
        self.sep.len()
    }
}

/// Break `text` into pieces no larger than `budget` characters.
pub(super) fn pieces(text: &str, budget: usize) -> Vec<Piece> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();

    for (start, end) in split_at_blank_lines(&lines) {
        let para = lines[start..=end].join("\n");
        if para.chars().count() <= budget {
            out.push(Piece {
                text: para,
                start_line: start + 1,
                end_line: end + 1,
                sep: PARAGRAPH_SEP,
            });
            continue;
        }

        // Paragraph too large: fall back to its lines
        for (offset, line) in lines[start..=end].iter().enumerate() {
            let sep = if offset == 0 { PARAGRAPH_SEP } else { LINE_SEP };
            split_line(line, start + offset + 1, sep, budget, &mut out);
        }
    }

    out
}

/// Greedily merge pieces into chunks of at most `budget` characters.
pub(super) fn merge(pieces: Vec<Piece>, budget: usize, overlap: usize) -> Vec<TextSplit> {
    let mut splits = Vec::new();
    let mut start = 0usize;
    let mut len = 0usize;

    for i in 0..pieces.len() {
        let piece_len = pieces[i].char_len();
        if i == start {
            len = piece_len;
            continue;
        }

        let added = piece_len + pieces[i].sep_len();
        if len + added <= budget {
            len += added;
            continue;
        }

        splits.push(build_split(&pieces[start..i]));

        // Walk back over trailing pieces of the flushed chunk that fit the overlap
        let mut new_start = i;
        let mut tail = 0usize;
        while new_start > start + 1 {
            let extra = pieces[new_start - 1].char_len() + pieces[new_start].sep_len();
            if tail + extra > overlap {
                break;
            }
            tail += extra;
            new_start -= 1;
        }

        if new_start < i && tail + piece_len <= budget {
            start = new_start;
            len = tail + piece_len;
        } else {
            start = i;
            len = piece_len;
        }
    }

    if start < pieces.len() {
        splits.push(build_split(&pieces[start..]));
    }

    splits
}

fn build_split(pieces: &[Piece]) -> TextSplit {
    let mut content = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            content.push_str(piece.sep);
        }
        content.push_str(&piece.text);
    }
    TextSplit {
        content,
        start_line: pieces.first().map(|p| p.start_line).unwrap_or(1),
        end_line: pieces.last().map(|p| p.end_line).unwrap_or(1),
    }
}

/// Inclusive (start, end) line ranges of non-blank runs.
fn split_at_blank_lines(lines: &[&str]) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut seg_start = None;

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            if let Some(start) = seg_start.take() {
                segments.push((start, i - 1));
            }
        } else if seg_start.is_none() {
            seg_start = Some(i);
        }
    }

    if let Some(start) = seg_start {
        segments.push((start, lines.len() - 1));
    }

    segments
}

fn split_line(line: &str, line_no: usize, sep: &'static str, budget: usize, out: &mut Vec<Piece>) {
    let push = |out: &mut Vec<Piece>, text: String, sep: &'static str| {
        out.push(Piece {
            text,
            start_line: line_no,
            end_line: line_no,
            sep,
        });
    };

    if line.chars().count() <= budget {
        push(out, line.to_string(), sep);
        return;
    }

    for (n, sentence) in sentences(line).into_iter().enumerate() {
        let sentence_sep = if n == 0 { sep } else { SENTENCE_SEP };
        if sentence.chars().count() <= budget {
            push(out, sentence.to_string(), sentence_sep);
            continue;
        }
        for (k, window) in hard_windows(sentence, budget).into_iter().enumerate() {
            push(out, window, if k == 0 { sentence_sep } else { "" });
        }
    }
}

/// Split after `.`, `!` or `?` when followed by whitespace.
fn sentences(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_i, next)) = chars.peek() {
            if next.is_whitespace() {
                let sentence = line[start..i + c.len_utf8()].trim();
                if !sentence.is_empty() {
                    out.push(sentence);
                }
                start = next_i;
            }
        }
    }

    let rest = line[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

fn hard_windows(s: &str, budget: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    chars
        .chunks(budget.max(1))
        .map(|window| window.iter().collect())
        .collect()
}
