const RESERVED: [char; 3] = [';', '=', '&'];
const ENCODED_COMMA: &str = "%2C";
const COMMA_REPLACEMENT: char = '/';

/// Make free text safe to place inside a GFF attribute value.
///
/// Commas between two digits (numeric ranges such as `2,3`) are
/// percent-encoded, any other comma becomes `/`. Then `;`, `=` and
/// `&` get a leading backslash.
///
/// # Example
///
/// ```rust
/// use gffpack::escape_reserved_characters;
///
/// assert_eq!(
///     escape_reserved_characters("2,3-containing domain, functional protein; integrase"),
///     r"2%2C3-containing domain/ functional protein\; integrase"
/// );
/// ```
pub fn escape_reserved_characters(text: &str) -> String {
    let text = replace_commas(text);
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        if RESERVED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

pub fn replace_commas(text: &str) -> String {
    if !text.contains(',') {
        return text.to_string();
    }

    let chars = text.chars().collect::<Vec<_>>();
    let mut replaced = String::with_capacity(text.len() + 4);

    for (idx, ch) in chars.iter().enumerate() {
        if *ch != ',' {
            replaced.push(*ch);
            continue;
        }

        let digit_before = idx > 0 && chars[idx - 1].is_ascii_digit();
        let digit_after = chars.get(idx + 1).map_or(false, |c| c.is_ascii_digit());

        if digit_before && digit_after {
            replaced.push_str(ENCODED_COMMA);
        } else {
            replaced.push(COMMA_REPLACEMENT);
        }
    }

    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved_characters() {
        let func = "2,3-containing domain, functional protein; integrase";
        assert_eq!(
            escape_reserved_characters(func),
            r"2%2C3-containing domain/ functional protein\; integrase"
        );
    }

    #[test]
    fn test_escape_leaves_no_bare_reserved_characters() {
        let escaped = escape_reserved_characters("a;b=c&d");
        assert_eq!(escaped, r"a\;b\=c\&d");

        let chars = escaped.chars().collect::<Vec<_>>();
        for (idx, ch) in chars.iter().enumerate() {
            if RESERVED.contains(ch) {
                assert_eq!(chars[idx - 1], '\\');
            }
        }
    }

    #[test]
    fn test_replace_commas_digit_flanked() {
        assert_eq!(replace_commas("1,2"), "1%2C2");
        assert_eq!(replace_commas("a,b"), "a/b");
        assert_eq!(replace_commas(",1"), "/1");
        assert_eq!(replace_commas("1,"), "1/");
        assert_eq!(replace_commas("1, 2"), "1/ 2");
    }

    #[test]
    fn test_escape_without_special_characters() {
        assert_eq!(escape_reserved_characters("ABC transporter"), "ABC transporter");
    }
}
