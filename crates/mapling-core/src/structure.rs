use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result};

/// Placeholder title used when no structure can be recovered.
pub const DEFAULT_TITLE: &str = "Topic";

/// The loosely-typed nested title/children shape recovered from free text,
/// prior to canonicalization into a [`crate::MapTree`].
///
/// Every field is defaulted: a model that omits `title` or `children` (or
/// names them with the wrong value type elsewhere in the object) still
/// decodes, it just decodes to something emptier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapStructure {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: Vec<MapBranch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapBranch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<MapBranch>,
}

impl MapStructure {
    /// The fixed fallback returned whenever recovery fails: a placeholder
    /// title with exactly two empty branches.
    pub fn default_skeleton() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            children: vec![
                MapBranch {
                    name: "Branch 1".to_string(),
                    children: Vec::new(),
                },
                MapBranch {
                    name: "Branch 2".to_string(),
                    children: Vec::new(),
                },
            ],
        }
    }
}

fn embedded_object_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    // Greedy: first `{` through the last `}` in the text. Model responses
    // routinely wrap the object in prose or a ```json fence; the greedy span
    // covers nested braces without a real JSON scanner.
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Strict structure extraction.
///
/// Locates the first brace-delimited span in `text` and decodes it as a
/// [`MapStructure`]. Callers that want the never-fails behavior should use
/// [`recover_structure`] instead.
pub fn extract_structure(text: &str) -> Result<MapStructure> {
    let m = embedded_object_regex()
        .find(text)
        .ok_or(Error::StructureNotFound)?;
    Ok(serde_json::from_str(m.as_str())?)
}

/// Total structure recovery: [`extract_structure`], falling back to
/// [`MapStructure::default_skeleton`] on any failure.
///
/// Recovery failures are logged, never raised — by contract the caller gets
/// a usable structure back for any input.
pub fn recover_structure(text: &str) -> MapStructure {
    match extract_structure(text) {
        Ok(structure) => structure,
        Err(err) => {
            tracing::warn!(error = %err, "structure recovery failed, using default skeleton");
            MapStructure::default_skeleton()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_embedded_in_prose() {
        let text = r#"Sure! Here is the mind map:
```json
{"title": "Calculus", "children": [{"name": "Limits"}, {"name": "Derivatives", "children": [{"name": "Chain rule"}]}]}
```
Let me know if you need anything else."#;
        let s = extract_structure(text).unwrap();
        assert_eq!(s.title, "Calculus");
        assert_eq!(s.children.len(), 2);
        assert_eq!(s.children[1].children[0].name, "Chain rule");
    }

    #[test]
    fn missing_fields_default() {
        let s = extract_structure(r#"{"children": [{}]}"#).unwrap();
        assert_eq!(s.title, "");
        assert_eq!(s.children.len(), 1);
        assert_eq!(s.children[0].name, "");
        assert!(s.children[0].children.is_empty());
    }

    #[test]
    fn no_braces_is_structure_not_found() {
        assert!(matches!(
            extract_structure("just some prose"),
            Err(Error::StructureNotFound)
        ));
        assert!(matches!(
            extract_structure(""),
            Err(Error::StructureNotFound)
        ));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        assert!(matches!(
            extract_structure("{not json at all}"),
            Err(Error::StructureDecode(_))
        ));
    }

    #[test]
    fn recovery_falls_back_to_skeleton() {
        let s = recover_structure("no structure here");
        assert_eq!(s, MapStructure::default_skeleton());
        assert_eq!(s.title, DEFAULT_TITLE);
        assert_eq!(s.children.len(), 2);
        assert!(s.children.iter().all(|b| b.children.is_empty()));
    }

    #[test]
    fn recovery_prefers_parsed_structure() {
        let s = recover_structure(r#"{"title": "T", "children": []}"#);
        assert_eq!(s.title, "T");
        assert!(s.children.is_empty());
    }
}
