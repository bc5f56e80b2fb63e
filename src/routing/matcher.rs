//! Route matching logic.
//!
//! # Responsibilities
//! - Match a request path against compiled pattern components
//! - Bind placeholder text through its converter
//! - Require the whole path to be consumed
//!
//! # Design Decisions
//! - Matching is case-sensitive
//! - No regex: placeholders consume the longest run of accepted characters
//!   and back off one character at a time if the rest does not match
//! - A converter that rejects the text (e.g. `int` overflow) is a non-match,
//!   never an error
//! - Candidate ends are filtered by the following literal before conversion,
//!   and characters are never rescanned, so a placeholder followed by a
//!   literal matches in linear time

use crate::routing::pattern::Component;
use crate::routing::params::PathParams;

/// Match `path` in full against `components`.
pub fn match_components(components: &[Component], path: &str) -> Option<PathParams> {
    let mut params = PathParams::new();
    if match_from(components, path, &mut params) {
        Some(params)
    } else {
        None
    }
}

fn match_from(components: &[Component], rest: &str, params: &mut PathParams) -> bool {
    let Some((head, tail)) = components.split_first() else {
        return rest.is_empty();
    };

    match head {
        Component::Literal(text) => match rest.strip_prefix(text.as_str()) {
            Some(remaining) => match_from(tail, remaining, params),
            None => false,
        },
        Component::Param { name, converter } => {
            // Byte offsets where the accepted run could end, shortest first.
            let ends: Vec<usize> = rest
                .char_indices()
                .take_while(|(_, c)| converter.accepts_char(*c))
                .map(|(i, c)| i + c.len_utf8())
                .collect();

            for end in ends.into_iter().rev() {
                if !can_follow(tail, &rest[end..]) {
                    continue;
                }
                // Every character up to `end` already passed `accepts_char`.
                let Some(value) = converter.convert_accepted(&rest[..end]) else {
                    continue;
                };
                params.push(name, value);
                if match_from(tail, &rest[end..], params) {
                    return true;
                }
                params.pop();
            }
            false
        }
    }
}

/// Cheap check that the component after a placeholder can start at `rest`.
fn can_follow(tail: &[Component], rest: &str) -> bool {
    match tail.first() {
        None => rest.is_empty(),
        Some(Component::Literal(text)) => rest.starts_with(text.as_str()),
        Some(Component::Param { .. }) => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::routing::pattern::RoutePattern;

    fn pattern(raw: &str) -> RoutePattern {
        RoutePattern::parse(raw).unwrap()
    }

    #[test]
    fn test_int_placeholder() {
        let p = pattern("<int:pk>/");

        let params = p.matches("42/").unwrap();
        assert_eq!(params.get_int("pk"), Some(42));

        assert!(p.matches("abc/").is_none());
        assert!(p.matches("42").is_none());
        assert!(p.matches("42/extra").is_none());
        assert!(p.matches("/42/").is_none());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let p = pattern("<int:pk>/results/");
        assert!(p.matches("1/results/").is_some());
        assert!(p.matches("1/Results/").is_none());
    }

    #[test]
    fn test_backtracking_between_placeholders() {
        let p = pattern("<slug:a>-<slug:b>/");
        let params = p.matches("one-two-three/").unwrap();
        assert_eq!(params.get("a").unwrap().to_string(), "one-two");
        assert_eq!(params.get("b").unwrap().to_string(), "three");
    }

    #[test]
    fn test_path_converter_spans_segments() {
        let p = pattern("files/<path:rest>");
        let params = p.matches("files/a/b/c.txt").unwrap();
        assert_eq!(params.get("rest").unwrap().to_string(), "a/b/c.txt");
        assert!(p.matches("files/").is_none());
    }

    #[test]
    fn test_str_stops_at_slash() {
        let p = pattern("<name>/");
        assert!(p.matches("alice/").is_some());
        assert!(p.matches("alice/bob/").is_none());
    }

    #[test]
    fn test_multibyte_text() {
        let p = pattern("<name>/");
        let params = p.matches("été/").unwrap();
        assert_eq!(params.get("name").unwrap().to_string(), "été");
    }

    #[test]
    fn test_long_digit_run_is_linear() {
        let p = pattern("<int:question_id>/vote/");
        let path = format!("{}/vote/", "9".repeat(64_000));

        let start = std::time::Instant::now();
        assert!(p.matches(&path).is_none());
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_long_str_run_with_trailing_literal() {
        let p = pattern("<name>/");
        let long = "a".repeat(64_000);

        let start = std::time::Instant::now();
        let params = p.matches(&format!("{}/", long)).unwrap();
        assert_eq!(params.get("name").unwrap().to_string(), long);
        assert!(p.matches(&format!("{}/x", long)).is_none());
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }
}
