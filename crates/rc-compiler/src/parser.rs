use std::path::Path;

use rc_core::{check_source_redirects, InputError, Redirect, RedirectTable, SourceRedirect};

/// Error type for redirect list parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed redirect on line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Source list encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON array of `{from, to, exact?}` objects
    #[default]
    Json,
    /// One `<from> <to>` pair per line, `#` comments
    Lines,
}

impl InputFormat {
    /// Pick a format from the file extension, falling back to the content.
    pub fn detect(path: &Path, text: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ if text.trim_start().starts_with('[') => Self::Json,
            _ => Self::Lines,
        }
    }
}

/// Parse a raw redirect list. JSON entries tagged `"exact": false` are rejected.
pub fn parse_redirect_list(text: &str, format: InputFormat) -> Result<Vec<Redirect>, ParseError> {
    match format {
        InputFormat::Json => {
            let sources: Vec<SourceRedirect> = serde_json::from_str(text)?;
            Ok(check_source_redirects(sources)?)
        }
        InputFormat::Lines => parse_lines(text),
    }
}

/// Read a consolidated table back from its JSON form.
pub fn parse_table(text: &str) -> Result<RedirectTable, ParseError> {
    Ok(serde_json::from_str(text)?)
}

fn parse_lines(text: &str) -> Result<Vec<Redirect>, ParseError> {
    let mut redirects = Vec::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || is_comment_line(line) {
            continue;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(from), Some(to), None) => redirects.push(Redirect::new(from, to)),
            _ => {
                return Err(ParseError::MalformedLine {
                    line: i + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(redirects)
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_list() {
        let text = r#"[
            {"from": "/app", "to": "/guides/app"},
            {"from": "/company", "to": "https://wandb.ai/site/company", "exact": true}
        ]"#;
        let redirects = parse_redirect_list(text, InputFormat::Json).unwrap();
        assert_eq!(
            redirects,
            vec![
                Redirect::new("/app", "/guides/app"),
                Redirect::exact("/company", "https://wandb.ai/site/company"),
            ]
        );
    }

    #[test]
    fn rejects_json_missing_target() {
        let err = parse_redirect_list(r#"[{"from": "/app"}]"#, InputFormat::Json).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn rejects_consolidated_table_as_source() {
        let text = r#"[
            {"from": "/a", "to": "/x", "exact": false},
            {"from": "/a/b", "to": "/y", "exact": true}
        ]"#;
        let err = parse_redirect_list(text, InputFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Input(InputError::PrefixRuleInSource { index: 0, .. })
        ));
    }

    #[test]
    fn parses_line_list() {
        let text = "# moved docs\n/app /guides/app\n\n   /examples    /guides/integrations  \n";
        let redirects = parse_redirect_list(text, InputFormat::Lines).unwrap();
        assert_eq!(
            redirects,
            vec![
                Redirect::new("/app", "/guides/app"),
                Redirect::new("/examples", "/guides/integrations"),
            ]
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = parse_redirect_list("/a /b\n/c\n", InputFormat::Lines).unwrap_err();
        match err {
            ParseError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "/c");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_redirect_list("/a /b 301\n", InputFormat::Lines).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn detects_format() {
        assert_eq!(InputFormat::detect(Path::new("redirects.json"), "/a /b"), InputFormat::Json);
        assert_eq!(InputFormat::detect(Path::new("_redirects"), "  [\n]"), InputFormat::Json);
        assert_eq!(InputFormat::detect(Path::new("_redirects"), "/a /b"), InputFormat::Lines);
    }

    #[test]
    fn parses_table() {
        let table = parse_table(r#"[{"from":"/a","to":"/x","exact":false}]"#).unwrap();
        assert_eq!(table.prefix_count(), 1);
        assert_eq!(table.resolve("/a/b").as_deref(), Some("/x/b"));
    }
}
