//! Minimal `multipart/mixed` reader for batch responses.
//!
//! Works on borrowed slices of the response text. Both CRLF and bare LF
//! line endings are accepted.

/// A part split into its MIME headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Part<'a> {
    pub headers: Vec<(&'a str, &'a str)>,
    pub body: &'a str,
}

impl<'a> Part<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (head, body) = split_head(raw);
        Self {
            headers: parse_headers(head),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    pub fn content_type(&self) -> Option<&'a str> {
        self.header("Content-Type")
    }
}

/// Boundary announced by the first non-blank line, if it is a delimiter.
pub(crate) fn detect_boundary(text: &str) -> Option<&str> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let boundary = line.strip_prefix("--")?;
    let boundary = boundary.strip_suffix("--").unwrap_or(boundary);
    (!boundary.is_empty()).then_some(boundary)
}

/// `boundary` parameter of a `multipart/*` content type.
pub(crate) fn boundary_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("boundary")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Body of every part delimited by `boundary`, in order.
///
/// Text before the first delimiter and after the close delimiter is
/// ignored. The line break preceding each delimiter belongs to the
/// delimiter, not to the part.
pub(crate) fn split_parts<'a>(text: &'a str, boundary: &str) -> Vec<&'a str> {
    let open = format!("--{}", boundary);
    let close = format!("--{}--", boundary);

    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end();
        let is_close = trimmed == close;
        if is_close || trimmed == open {
            if let Some(begin) = start.take() {
                parts.push(strip_line_break(&text[begin..offset]));
            }
            if is_close {
                return parts;
            }
            start = Some(offset + line.len());
        }
        offset += line.len();
    }

    // Unterminated final part.
    if let Some(begin) = start {
        let tail = &text[begin..];
        if !tail.trim().is_empty() {
            parts.push(strip_line_break(tail));
        }
    }
    parts
}

/// Split at the first blank line into head and body.
///
/// Without a blank line the whole text is head.
pub(crate) fn split_head(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            return (&text[..offset], &text[offset + line.len()..]);
        }
        offset += line.len();
    }
    (text, "")
}

pub(crate) fn parse_headers(head: &str) -> Vec<(&str, &str)> {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect()
}

fn strip_line_break(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_boundary_from_first_line() {
        assert_eq!(detect_boundary("\r\n--batch_1\r\nx"), Some("batch_1"));
        assert_eq!(detect_boundary("--batch_1--"), Some("batch_1"));
        assert_eq!(detect_boundary("HTTP/1.1 201 Created"), None);
        assert_eq!(detect_boundary("--"), None);
        assert_eq!(detect_boundary(""), None);
    }

    #[test]
    fn reads_boundary_parameter() {
        assert_eq!(
            boundary_param("multipart/mixed; boundary=changeset_9"),
            Some("changeset_9")
        );
        assert_eq!(
            boundary_param("multipart/mixed;Boundary=\"cs\""),
            Some("cs")
        );
        assert_eq!(boundary_param("application/json"), None);
    }

    #[test]
    fn splits_parts_and_ignores_epilogue() {
        let text = "preamble\r\n--b\r\none\r\n--b\r\ntwo\r\nlines\r\n--b--\r\nepilogue";
        assert_eq!(split_parts(text, "b"), vec!["one", "two\r\nlines"]);
    }

    #[test]
    fn keeps_unterminated_last_part() {
        let text = "--b\nfirst\n--b\nsecond\n";
        assert_eq!(split_parts(text, "b"), vec!["first", "second"]);
    }

    #[test]
    fn parses_part_headers_case_insensitively() {
        let part = Part::parse("content-type: application/http\r\nContent-ID: 1\r\n\r\nbody");
        assert_eq!(part.content_type(), Some("application/http"));
        assert_eq!(part.header("content-id"), Some("1"));
        assert_eq!(part.body, "body");
    }

    #[test]
    fn head_without_blank_line_has_empty_body() {
        assert_eq!(split_head("a: b"), ("a: b", ""));
        assert_eq!(split_head("\r\n{}"), ("", "{}"));
    }
}
