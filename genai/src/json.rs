//! JSON helpers for untrusted provider responses.

/// Extracts the first balanced `[...]` substring of `text`.
///
/// Providers wrap JSON in prose and code fences, so the response cannot be
/// parsed as-is. The scan tracks bracket depth and skips string literals
/// (including escapes); an array that opens but never closes yields `None`.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if escape_next {
            escape_next = false;
            continue;
        }
        match b {
            b'\\' if in_string => escape_next = true,
            b'"' => in_string = !in_string,
            b'[' if !in_string => depth += 1,
            b']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Deserialize JSON with basic repair for common malformations.
///
/// If the initial parse fails, attempts to fix trailing commas and
/// single quotes before retrying.
pub fn unmarshal_json<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T, serde_json::Error> {
    match serde_json::from_slice(data) {
        Ok(v) => Ok(v),
        Err(e) => {
            let s = String::from_utf8_lossy(data);
            let fixed = repair_json(&s);
            match serde_json::from_str(&fixed) {
                Ok(v) => Ok(v),
                Err(_) => Err(e),
            }
        }
    }
}

fn repair_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_string = false;
    let mut escape_next = false;
    let chars: Vec<char> = s.chars().collect();

    for i in 0..chars.len() {
        let ch = chars[i];

        if escape_next {
            result.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            result.push(ch);
            escape_next = true;
            continue;
        }

        if ch == '"' {
            in_string = !in_string;
            result.push(ch);
            continue;
        }

        if !in_string && ch == '\'' {
            result.push('"');
            continue;
        }

        if !in_string && ch == ',' {
            // Skip trailing commas before } or ]
            let rest = chars[i + 1..].iter().collect::<String>();
            let trimmed = rest.trim_start();
            if trimmed.starts_with('}') || trimmed.starts_with(']') {
                continue;
            }
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_extract_plain_array() {
        assert_eq!(extract_json_array("[1, 2, 3]"), Some("[1, 2, 3]"));
    }

    #[test]
    fn test_extract_from_prose() {
        let text = "Here is your melody:\n```json\n[{\"value\":\"1\"}]\n```\nEnjoy!";
        assert_eq!(extract_json_array(text), Some("[{\"value\":\"1\"}]"));
    }

    #[test]
    fn test_extract_nested() {
        let text = "x [[1, 2], [3]] y [4]";
        assert_eq!(extract_json_array(text), Some("[[1, 2], [3]]"));
    }

    #[test]
    fn test_extract_ignores_brackets_in_strings() {
        let text = r#"[{"note": "a ] tricky [ one"}] tail"#;
        assert_eq!(
            extract_json_array(text),
            Some(r#"[{"note": "a ] tricky [ one"}]"#)
        );
    }

    #[test]
    fn test_extract_escaped_quote() {
        let text = r#"[{"note": "quote \" ] here"}]"#;
        assert_eq!(extract_json_array(text), Some(text));
    }

    #[test]
    fn test_extract_unterminated() {
        assert_eq!(extract_json_array("[1, 2"), None);
        assert_eq!(extract_json_array("no array here"), None);
    }

    #[test]
    fn test_unmarshal_normal() {
        #[derive(Deserialize)]
        struct T {
            name: String,
        }
        let result: T = unmarshal_json(br#"{"name":"hello"}"#).unwrap();
        assert_eq!(result.name, "hello");
    }

    #[test]
    fn test_unmarshal_trailing_comma() {
        let result: Vec<i32> = unmarshal_json(b"[1, 2, 3,]").unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_unmarshal_single_quotes() {
        #[derive(Deserialize)]
        struct T {
            name: String,
        }
        let result: T = unmarshal_json(b"{'name': 'world'}").unwrap();
        assert_eq!(result.name, "world");
    }

    #[test]
    fn test_unmarshal_truncated() {
        let result: Result<serde_json::Value, _> = unmarshal_json(br#"[{"value": "#);
        assert!(result.is_err());
    }
}
