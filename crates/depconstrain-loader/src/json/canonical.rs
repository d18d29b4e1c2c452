//! Canonical rendering of a constraints document
//!
//! Two-space indentation, `": "` between keys and values, one value per line
//! inside non-empty arrays and objects, `[]` / `{}` when empty, keys in the
//! order they were read, `\n` line endings and no trailing newline.

use crate::errors::{internal, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Render `document` in canonical form
///
/// # Errors
///
/// `Internal` if serialization fails, which a parsed [`Value`] never does.
pub fn render_canonical(document: &Value) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"  "));
    document
        .serialize(&mut serializer)
        .map_err(|e| internal("render_canonical", e.to_string()))?;
    String::from_utf8(out).map_err(|e| internal("render_canonical", e.to_string()))
}

/// Canonical rendering split into lines
///
/// # Errors
///
/// As for [`render_canonical`].
pub fn canonical_lines(document: &Value) -> Result<Vec<String>> {
    Ok(render_canonical(document)?
        .lines()
        .map(str::to_string)
        .collect())
}

/// Canonical file content: the rendering plus a final newline
///
/// # Errors
///
/// As for [`render_canonical`].
pub fn canonical_file_content(document: &Value) -> Result<String> {
    let mut content = render_canonical(document)?;
    content.push('\n');
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_layout() {
        let document: Value = serde_json::from_str(
            r#"{"version":"1.0.0","dependencyConstraints":[{"group":"g","rejectedVersions":[],"because":{}}]}"#,
        )
        .unwrap();

        let expected = "\
{
  \"version\": \"1.0.0\",
  \"dependencyConstraints\": [
    {
      \"group\": \"g\",
      \"rejectedVersions\": [],
      \"because\": {}
    }
  ]
}";
        assert_eq!(render_canonical(&document).unwrap(), expected);
    }

    #[test]
    fn test_key_order_preserved() {
        let document: Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        assert_eq!(
            canonical_lines(&document).unwrap(),
            vec!["{", "  \"b\": 1,", "  \"a\": 2", "}"]
        );
    }

    #[test]
    fn test_file_content_ends_with_newline() {
        let content = canonical_file_content(&json!([])).unwrap();
        assert_eq!(content, "[]\n");
    }
}
