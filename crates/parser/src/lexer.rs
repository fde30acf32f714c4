//! Logos-based lexer for relation and attribute names.
//!
//! A name starts with a letter or underscore, followed by letters, digits or
//! underscores. The same rule holds in schema files and interactive input.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum NameToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,
}

/// Returns `true` if `name` is a valid attribute or relation name.
#[must_use]
pub fn is_name(name: &str) -> bool {
    let mut lexer = NameToken::lexer(name);
    let first = lexer.next();
    let span = lexer.span();
    matches!(first, Some(Ok(NameToken::Name)))
        && span == (0..name.len())
        && lexer.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::is_name;

    #[test]
    fn test_names() {
        assert!(is_name("Cust_No"));
        assert!(is_name("_tmp1"));
        assert!(is_name("a"));
        assert!(!is_name("1a"));
        assert!(!is_name("a b"));
        assert!(!is_name("a-b"));
        assert!(!is_name(" a"));
        assert!(!is_name("a,"));
        assert!(!is_name(""));
        assert!(!is_name("é"));
    }
}
