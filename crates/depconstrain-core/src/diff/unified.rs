//! Unified-diff rendering of an [`EditScript`] over lines of text.
//!
//! The output follows the `diff -u` layout (`---`/`+++` labels, `@@` hunk
//! headers, ` `/`-`/`+` line markers) so it can be fed to `patch` as is.

use crate::diff::engine::{Edit, EditKind, EditScript};

/// Render `script` (computed from `source` to `target`) as unified-diff lines
///
/// `context` is the number of unchanged lines shown around each change;
/// changes closer than `2 * context` lines share a hunk. Returns no lines at
/// all for an empty script.
pub fn render_unified_diff<S: AsRef<str>>(
    old_label: &str,
    new_label: &str,
    source: &[S],
    target: &[S],
    script: &EditScript,
    context: usize,
) -> Vec<String> {
    if script.is_empty() {
        return Vec::new();
    }

    let mut out = vec![format!("--- {}", old_label), format!("+++ {}", new_label)];
    for hunk in group_hunks(script.edits(), context) {
        render_hunk(&mut out, source, target, hunk, context);
    }
    out
}

fn group_hunks(edits: &[Edit], context: usize) -> Vec<&[Edit]> {
    let mut hunks = Vec::new();
    let mut start = 0;
    for i in 1..edits.len() {
        let gap = edits[i]
            .source
            .start
            .saturating_sub(edits[i - 1].source.end);
        if gap > 2 * context {
            hunks.push(&edits[start..i]);
            start = i;
        }
    }
    hunks.push(&edits[start..]);
    hunks
}

fn render_hunk<S: AsRef<str>>(
    out: &mut Vec<String>,
    source: &[S],
    target: &[S],
    hunk: &[Edit],
    context: usize,
) {
    let (first, last) = match (hunk.first(), hunk.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return,
    };

    let src_start = first.source.start.saturating_sub(context);
    let tgt_start = first.target.start - (first.source.start - src_start);
    let src_end = (last.source.end + context).min(source.len());
    let tgt_end = last.target.end + (src_end - last.source.end);

    out.push(format!(
        "@@ -{} +{} @@",
        hunk_range(src_start, src_end - src_start),
        hunk_range(tgt_start, tgt_end - tgt_start)
    ));

    let mut cursor = src_start;
    for edit in hunk {
        push_lines(out, ' ', &source[cursor..edit.source.start]);
        match edit.kind {
            EditKind::Delete => {
                push_lines(out, '-', &source[edit.source.clone()]);
                cursor = edit.source.end;
            }
            EditKind::Insert => {
                push_lines(out, '+', &target[edit.target.clone()]);
                cursor = edit.source.start;
            }
        }
    }
    push_lines(out, ' ', &source[cursor..src_end]);
}

/// `start,count` with 1-based start; an empty range names the line before it
fn hunk_range(start: usize, count: usize) -> String {
    if count == 0 {
        format!("{},0", start)
    } else {
        format!("{},{}", start + 1, count)
    }
}

fn push_lines<S: AsRef<str>>(out: &mut Vec<String>, marker: char, lines: &[S]) {
    out.extend(lines.iter().map(|line| format!("{}{}", marker, line.as_ref())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::diff_eq;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_no_changes_renders_nothing() {
        let a = lines("a\nb");
        let script = diff_eq(&a, &a);
        assert!(render_unified_diff("x", "x", &a, &a, &script, 0).is_empty());
    }

    #[test]
    fn test_single_line_change_zero_context() {
        let a = lines("{\n  \"a\" : 1\n}");
        let b = lines("{\n  \"a\": 1\n}");
        let script = diff_eq(&a, &b);

        let rendered = render_unified_diff("f.json", "f.json", &a, &b, &script, 0);
        assert_eq!(
            rendered,
            vec![
                "--- f.json",
                "+++ f.json",
                "@@ -2,1 +2,1 @@",
                "-  \"a\" : 1",
                "+  \"a\": 1",
            ]
        );
    }

    #[test]
    fn test_pure_deletion_header() {
        let a = lines("a\n\nb");
        let b = lines("a\nb");
        let script = diff_eq(&a, &b);

        let rendered = render_unified_diff("f", "f", &a, &b, &script, 0);
        assert_eq!(rendered[2], "@@ -2,1 +1,0 @@");
        assert_eq!(rendered[3], "-");
    }

    #[test]
    fn test_context_lines_surround_change() {
        let a = lines("1\n2\n3\n4\n5");
        let b = lines("1\n2\nthree\n4\n5");
        let script = diff_eq(&a, &b);

        let rendered = render_unified_diff("a", "b", &a, &b, &script, 1);
        assert_eq!(
            rendered,
            vec!["--- a", "+++ b", "@@ -2,3 +2,3 @@", " 2", "-3", "+three", " 4"]
        );
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let a = lines("x\n1\n2\n3\n4\n5\ny");
        let b = lines("X\n1\n2\n3\n4\n5\nY");
        let script = diff_eq(&a, &b);

        let rendered = render_unified_diff("a", "b", &a, &b, &script, 1);
        let headers: Vec<&String> = rendered.iter().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers.len(), 2);
    }
}
