//! Plain-text rendering helpers for the terminal view.

use docchat_core::Source;

pub fn banner(backend: &str, streaming: bool) -> String {
    let mode = if streaming { "streaming" } else { "batch" };
    format!(
        "Docchat - ask about your uploaded documents.\n\
         Backend: {backend} ({mode} mode)\n\
         Commands: /upload <path>..., /quit\n"
    )
}

/// One line per cited document, using the file name component of the path
/// and the snippet when the backend provided one.
pub fn source_lines(sources: &[Source]) -> Vec<String> {
    sources
        .iter()
        .map(|source| match source.snippet.as_deref() {
            Some(snippet) => format!("  [{} - {}]", file_name(&source.source), snippet),
            None => format!("  [{}]", file_name(&source.source)),
        })
        .collect()
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::{banner, file_name, source_lines};
    use docchat_core::Source;

    #[test]
    fn source_lines_use_the_file_name_component() {
        let sources = vec![
            Source {
                source: "docs/deep/cv.pdf".to_string(),
                snippet: Some("worked at Verizon".to_string()),
            },
            Source {
                source: "notes.md".to_string(),
                snippet: None,
            },
        ];

        assert_eq!(
            source_lines(&sources),
            vec![
                "  [cv.pdf - worked at Verizon]".to_string(),
                "  [notes.md]".to_string(),
            ]
        );
    }

    #[test]
    fn file_name_keeps_bare_names() {
        assert_eq!(file_name("a.pdf"), "a.pdf");
        assert_eq!(file_name("x/y/a.pdf"), "a.pdf");
    }

    #[test]
    fn banner_names_the_backend_and_mode() {
        let text = banner("http://127.0.0.1:8000", false);
        assert!(text.contains("http://127.0.0.1:8000"));
        assert!(text.contains("batch mode"));
    }
}
