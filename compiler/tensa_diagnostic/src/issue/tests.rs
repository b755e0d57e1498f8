use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_issue_at_uses_source_positions() {
    let source = SourceMap::new("a = 1\nb = a + x\n");
    let issue = Issue::at(Span::new(10, 15), &source, "boom", Severity::Error);

    assert_eq!(
        issue,
        Issue {
            start_line: 2,
            start_column: 5,
            end_line: 2,
            end_column: 10,
            message: "boom".to_string(),
            severity: Severity::Error,
        }
    );
}

#[test]
fn test_issue_display() {
    let source = SourceMap::new("x");
    let issue = Issue::at(Span::new(0, 1), &source, "bad shape", Severity::Warning);
    assert_eq!(issue.to_string(), "1:1: warning: bad shape");
}

#[test]
fn test_issue_serializes_camel_case() {
    let issue = Issue::at(Span::new(2, 4), &SourceMap::default(), "m", Severity::Error);
    let json = serde_json::to_value(&issue).unwrap_or_default();

    assert_eq!(
        json,
        serde_json::json!({
            "startLine": 1,
            "startColumn": 3,
            "endLine": 1,
            "endColumn": 5,
            "message": "m",
            "severity": "error",
        })
    );
}

#[test]
fn test_diagnostics_keeps_order() {
    let source = SourceMap::default();
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.push(Issue::at(Span::new(9, 10), &source, "second in source", Severity::Error));
    diagnostics.push(Issue::at(Span::new(0, 1), &source, "first in source", Severity::Hint));

    let messages: Vec<&str> = diagnostics.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(messages, vec!["second in source", "first in source"]);
    assert_eq!(diagnostics.len(), 2);
}
