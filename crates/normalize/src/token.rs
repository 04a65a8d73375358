use serde::{Deserialize, Serialize};

/// A whitespace-delimited run of canonical text with its UTF-8 byte offsets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset (inclusive) in the canonical text.
    pub start: usize,
    /// Byte offset (exclusive) in the canonical text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits text on Unicode whitespace, keeping byte offsets.
///
/// Yields the same runs as `str::split_whitespace`, in order.
pub fn tokenize(text: &str) -> Vec<Token> {
    let base = text.as_ptr() as usize;
    text.split_whitespace()
        .map(|field| {
            // `field` is a subslice of `text`, so the pointer difference is its offset.
            let start = field.as_ptr() as usize - base;
            Token {
                text: field.to_string(),
                start,
                end: start + field.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_point_into_source() {
        let text = "Int( 1 ),\n  /usr/bin/bash";
        let tokens = tokenize(text);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Int(", "1", "),", "/usr/bin/bash"]);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn matches_split_whitespace() {
        let text = " a\u{00A0}b\tc  ";
        let ours: Vec<String> = tokenize(text).into_iter().map(|t| t.text).collect();
        let std: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(ours, std);
    }

    #[test]
    fn empty_and_blank_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }
}
