//! Delimited-text export of the current result set.

use crate::models::SearchResult;

/// Serialize results to delimited text, one row per result:
/// `filename,lineOrContext,"snippet"`.
///
/// The snippet field is always quoted and any embedded `"` is doubled. The
/// second column is the match's line number when the backend supplied one,
/// otherwise the file path. No header row; output is deterministic for a
/// given input order.
pub fn to_delimited_text(results: &[SearchResult]) -> String {
    let mut out = String::new();
    for result in results {
        let context = match result.lineno {
            Some(n) => n.to_string(),
            None => result.path.clone(),
        };
        out.push_str(&result.filename);
        out.push(',');
        out.push_str(&context);
        out.push(',');
        out.push('"');
        out.push_str(&result.snippet.replace('"', "\"\""));
        out.push('"');
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(filename: &str, lineno: Option<u64>, snippet: &str) -> SearchResult {
        SearchResult {
            filename: filename.to_string(),
            lineno,
            snippet: snippet.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_quote_doubling() {
        let rows = to_delimited_text(&[result("notes.txt", Some(3), r#"He said "hi""#)]);
        assert_eq!(rows, "notes.txt,3,\"He said \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_snippet_always_quoted() {
        let rows = to_delimited_text(&[result("a.txt", Some(1), "plain")]);
        assert_eq!(rows, "a.txt,1,\"plain\"\n");
    }

    #[test]
    fn test_path_used_when_no_line_number() {
        let mut r = result("b.bin", None, "hit");
        r.path = "incoming/b.bin".to_string();
        let rows = to_delimited_text(&[r]);
        assert_eq!(rows, "b.bin,incoming/b.bin,\"hit\"\n");
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert_eq!(to_delimited_text(&[]), "");
    }

    #[test]
    fn test_row_order_preserved() {
        let rows = to_delimited_text(&[
            result("first.txt", Some(1), "a"),
            result("second.txt", Some(2), "b"),
        ]);
        let lines: Vec<_> = rows.lines().collect();
        assert!(lines[0].starts_with("first.txt"));
        assert!(lines[1].starts_with("second.txt"));
    }
}
