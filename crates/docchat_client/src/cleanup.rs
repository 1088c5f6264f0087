//! Text normalization applied to model output before display.

/// Clean up noisy model output. Deterministic and idempotent: a second pass
/// finds no prefix to strip and the whitespace is already in normal form.
pub fn clean_answer(text: &str) -> String {
    let stripped = strip_answer_prefix(text);
    let without_citations = strip_citation_markers(stripped);
    let collapsed = collapse_newlines(&collapse_horizontal_ws(&without_citations));
    collapsed.trim().to_string()
}

/// Remove a leading boilerplate `Answer (from your documents):` marker,
/// case-insensitively, with optional whitespace between the two words.
fn strip_answer_prefix(text: &str) -> &str {
    let Some(rest) = strip_prefix_ci(text, "answer") else {
        return text;
    };
    match strip_prefix_ci(rest.trim_start(), "(from your documents):") {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

/// Remove inline `(source: ...)` markers anywhere in the text. The backend
/// reports sources separately, so the inline copies are noise.
fn strip_citation_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = find_ci(rest, "(source:") {
        out.push_str(&rest[..start]);
        match rest[start..].find(')') {
            Some(close) => rest = &rest[start + close + 1..],
            None => {
                // Unterminated marker: leave it alone.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn collapse_horizontal_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            in_run = false;
            out.push(ch);
        }
    }
    out
}

/// Collapse three or more consecutive newlines to exactly two.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    out
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &text[prefix.len()..])
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::clean_answer;

    #[test]
    fn strips_the_boilerplate_prefix() {
        assert_eq!(clean_answer("Answer (from your documents): hi"), "hi");
        assert_eq!(clean_answer("ANSWER (FROM YOUR DOCUMENTS): hi"), "hi");
        assert_eq!(clean_answer("answer(from your documents):hi"), "hi");
    }

    #[test]
    fn keeps_text_that_merely_starts_with_answer() {
        assert_eq!(clean_answer("Answer me this"), "Answer me this");
    }

    #[test]
    fn strips_citation_markers() {
        assert_eq!(
            clean_answer("text (source: doc1.pdf) more"),
            "text more"
        );
        assert_eq!(
            clean_answer("a (SOURCE: x) b (source: y) c"),
            "a b c"
        );
    }

    #[test]
    fn unterminated_marker_is_kept() {
        assert_eq!(clean_answer("tail (source: doc"), "tail (source: doc");
    }

    #[test]
    fn collapses_horizontal_whitespace() {
        assert_eq!(clean_answer("a \t  b"), "a b");
    }

    #[test]
    fn collapses_newline_runs_to_two() {
        assert_eq!(clean_answer("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_answer("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_the_result() {
        assert_eq!(clean_answer("  hi  \n"), "hi");
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "Answer (from your documents):   spaced\t\tout (source: a.pdf) \n\n\n\n end ",
            "plain",
            "",
            "text (source: doc1.pdf) more",
        ];
        for input in inputs {
            let once = clean_answer(input);
            assert_eq!(clean_answer(&once), once, "input {input:?}");
        }
    }
}
