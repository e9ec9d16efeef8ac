//! Reading templates and classifying their lines

use std::path::Path;

use super::{AnchorKind, MarkerSet, TemplateError};

/// One classified template line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLine<'a> {
    /// Copied to the output verbatim
    Plain(&'a str),
    /// Replaced by an emitted block
    Anchor {
        kind: AnchorKind,
        /// Text preceding the marker token, applied to every emitted line
        indent: &'a str,
        /// The line ended in `\r\n`; the block keeps that terminator
        crlf: bool,
    },
}

/// A template split into classified lines
///
/// Lines are split on `\n` only, so joining them back with `\n` reproduces
/// the source byte-for-byte. A trailing newline shows up as a final empty
/// plain line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    pub lines: Vec<TemplateLine<'a>>,
}

impl<'a> Template<'a> {
    /// Classify every line of `text` against `markers`
    pub fn parse(text: &'a str, markers: &MarkerSet) -> Result<Self, TemplateError> {
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| classify_line(line, index + 1, markers))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }

    /// Number of anchor lines
    pub fn anchor_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, TemplateLine::Anchor { .. }))
            .count()
    }

    /// Anchor kinds in the order they appear
    pub fn anchors(&self) -> impl Iterator<Item = AnchorKind> + '_ {
        self.lines.iter().filter_map(|l| match l {
            TemplateLine::Anchor { kind, .. } => Some(*kind),
            TemplateLine::Plain(_) => None,
        })
    }
}

/// Read a template file
pub fn read_template(path: &Path) -> Result<String, TemplateError> {
    std::fs::read_to_string(path).map_err(|source| TemplateError::Missing {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify a single line
///
/// The earliest marker occurrence decides the indentation. A line holding
/// markers of two different kinds is rejected.
fn classify_line<'a>(
    line: &'a str,
    line_number: usize,
    markers: &MarkerSet,
) -> Result<TemplateLine<'a>, TemplateError> {
    let mut found: Option<(usize, AnchorKind)> = None;
    let mut tokens: Vec<String> = Vec::new();

    for (token, kind) in markers.iter() {
        let Some(pos) = line.find(token) else {
            continue;
        };
        tokens.push(token.to_string());
        match found {
            Some((_, existing)) if existing != kind => {
                return Err(TemplateError::AmbiguousAnchor {
                    line: line_number,
                    tokens,
                });
            }
            Some((earliest, _)) if earliest <= pos => {}
            _ => found = Some((pos, kind)),
        }
    }

    Ok(match found {
        Some((pos, kind)) => TemplateLine::Anchor {
            kind,
            indent: &line[..pos],
            crlf: line.ends_with('\r'),
        },
        None => TemplateLine::Plain(line),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{GEN_PARAMS_MARKER, OUTPUT_PARAMS_MARKER, PARSE_PARAMS_MARKER};

    #[test]
    fn test_anchor_indent_is_prefix_before_marker() {
        let template = Template::parse("    PYTHON_GEN_PARAMS_HERE", &MarkerSet::header()).unwrap();
        assert_eq!(
            template.lines,
            vec![TemplateLine::Anchor {
                kind: AnchorKind::Declare,
                indent: "    ",
                crlf: false,
            }]
        );
    }

    #[test]
    fn test_marker_anywhere_in_line() {
        let template =
            Template::parse("\t// PYTHON_PARSE_PARAMS_HERE trailing", &MarkerSet::source()).unwrap();
        assert_eq!(
            template.lines[0],
            TemplateLine::Anchor {
                kind: AnchorKind::Parse,
                indent: "\t// ",
                crlf: false,
            }
        );
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let template = Template::parse("python_gen_params_here", &MarkerSet::source()).unwrap();
        assert_eq!(template.anchor_count(), 0);
    }

    #[test]
    fn test_same_token_different_artifacts() {
        let header = Template::parse(GEN_PARAMS_MARKER, &MarkerSet::header()).unwrap();
        let source = Template::parse(GEN_PARAMS_MARKER, &MarkerSet::source()).unwrap();
        assert_eq!(header.anchors().collect::<Vec<_>>(), vec![AnchorKind::Declare]);
        assert_eq!(source.anchors().collect::<Vec<_>>(), vec![AnchorKind::Define]);
    }

    #[test]
    fn test_plain_lines_and_trailing_newline() {
        let text = "#include <string>\nnamespace params\n";
        let template = Template::parse(text, &MarkerSet::header()).unwrap();
        assert_eq!(
            template.lines,
            vec![
                TemplateLine::Plain("#include <string>"),
                TemplateLine::Plain("namespace params"),
                TemplateLine::Plain(""),
            ]
        );
    }

    #[test]
    fn test_two_kinds_on_one_line_is_ambiguous() {
        let line = format!("{PARSE_PARAMS_MARKER} {OUTPUT_PARAMS_MARKER}");
        let text = format!("first\n{line}");
        let err = Template::parse(&text, &MarkerSet::source()).unwrap_err();
        match err {
            TemplateError::AmbiguousAnchor { line, tokens } => {
                assert_eq!(line, 2);
                assert_eq!(tokens.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_kind_twice_uses_earliest() {
        let markers = MarkerSet::new()
            .with_marker("LATE", AnchorKind::Output)
            .unwrap()
            .with_marker("EARLY", AnchorKind::Output)
            .unwrap();
        let template = Template::parse("  EARLY LATE", &markers).unwrap();
        assert_eq!(
            template.lines[0],
            TemplateLine::Anchor {
                kind: AnchorKind::Output,
                indent: "  ",
                crlf: false,
            }
        );
    }

    #[test]
    fn test_crlf_anchor_is_flagged() {
        let template =
            Template::parse("#pragma once\r\n  PYTHON_GEN_PARAMS_HERE\r\n", &MarkerSet::header())
                .unwrap();
        assert_eq!(template.lines[0], TemplateLine::Plain("#pragma once\r"));
        assert_eq!(
            template.lines[1],
            TemplateLine::Anchor {
                kind: AnchorKind::Declare,
                indent: "  ",
                crlf: true,
            }
        );
    }

    #[test]
    fn test_missing_template_file() {
        let err = read_template(Path::new("/nonexistent/params_template.h")).unwrap_err();
        assert!(matches!(err, TemplateError::Missing { .. }));
        assert!(err.to_string().contains("params_template.h"));
    }
}
