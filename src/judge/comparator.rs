//! Output comparison
//!
//! Decides pass/fail from expected vs. produced output. The normalization
//! policy is fixed behavior since it determines grading fairness: line
//! endings are unified, trailing whitespace is trimmed per line, and leading/
//! trailing blank lines are dropped before an exact equality check. There is
//! no numeric tolerance and no token reordering.

/// Compare expected and produced output under the normalization policy
pub fn outputs_match(expected: &str, actual: &str) -> bool {
    normalize(expected) == normalize(actual)
}

/// Apply the normalization policy to one output
fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let lines: Vec<&str> = unified.split('\n').map(str::trim_end).collect();

    let Some(start) = lines.iter().position(|line| !line.is_empty()) else {
        // Nothing but blank lines
        return String::new();
    };
    let end = lines.iter().rposition(|line| !line.is_empty()).unwrap_or(start) + 1;

    lines[start..end].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_output_matches() {
        assert!(outputs_match("hello\nworld", "hello\nworld"));
    }

    #[test]
    fn test_missing_trailing_newline_matches() {
        // "4\n" expected, program printed "4"
        assert!(outputs_match("4\n", "4"));
    }

    #[test]
    fn test_crlf_matches_lf() {
        assert!(outputs_match("a\r\nb\r\n", "a\nb\n"));
    }

    #[test]
    fn test_trailing_whitespace_per_line_ignored() {
        assert!(outputs_match("1 2 3   \n4 5 6\t\n", "1 2 3\n4 5 6\n"));
    }

    #[test]
    fn test_leading_and_trailing_blank_lines_ignored() {
        assert!(outputs_match("\n\nanswer\n\n\n", "answer"));
    }

    #[test]
    fn test_interior_blank_lines_are_significant() {
        assert!(!outputs_match("a\n\nb", "a\nb"));
        assert!(outputs_match("a\n\nb", "a\n\nb\n"));
    }

    #[test]
    fn test_leading_whitespace_within_line_is_significant() {
        assert!(!outputs_match("  indented", "indented"));
    }

    #[test]
    fn test_different_output_rejected() {
        assert!(!outputs_match("42", "24"));
        assert!(!outputs_match("1\n2\n3", "1\n2"));
    }

    #[test]
    fn test_all_blank_outputs_match() {
        assert!(outputs_match("", ""));
        assert!(outputs_match("\n\n", ""));
        assert!(outputs_match("   \n", "\r\n"));
    }
}
