//! Text helpers shared by the entry parser and templates

/// Marker opening and closing a verbatim code block
pub const CODE_FENCE: &str = "```";

/// Return `text` with its first character in upper case
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reflow `text` into lines of at most `width` columns.
///
/// Words are separated by single spaces and never split; a word longer than
/// `width` gets a line of its own. Every line after the first starts with
/// `indent` spaces, which do not count towards the width. Code blocks are
/// kept line by line and only indented.
pub fn wrap_text(text: &str, width: usize, indent: usize) -> String {
    let prefix = format!("\n{}", " ".repeat(indent));

    if text.starts_with(CODE_FENCE) {
        return text.lines().collect::<Vec<_>>().join(&prefix);
    }

    let mut result = String::with_capacity(text.len());
    let mut column = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if column > 0 && column + 1 + len > width {
            result.push_str(&prefix);
            column = 0;
        }

        if column > 0 {
            result.push(' ');
            column += 1;
        }
        result.push_str(word);
        column += len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("subject line"), "Subject line");
        assert_eq!(capitalize("Subject line"), "Subject line");
        assert_eq!(capitalize("ärger"), "Ärger");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("```code"), "```code");
    }

    #[test]
    fn test_capitalize_idempotent() {
        for text in ["bugfix", "Bugfix", "second block. may", "1.0 release"] {
            let once = capitalize(text);
            assert_eq!(capitalize(&once), once);
        }
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("Example string", 80, 4), "Example string");
    }

    #[test]
    fn test_wrap_with_indent() {
        assert_eq!(
            wrap_text(LOREM, 70, 3),
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do\n   eiusmod tempor incididunt ut labore et dolore magna aliqua."
        );
        assert_eq!(
            wrap_text(LOREM, 55, 2),
            "Lorem ipsum dolor sit amet, consectetur adipiscing\n  elit, sed do eiusmod tempor incididunt ut labore et\n  dolore magna aliqua."
        );
    }

    #[test]
    fn test_wrap_code_block() {
        assert_eq!(
            wrap_text("```\nexample\n   with\n       random spaces\n```", 10, 3),
            "```\n   example\n      with\n          random spaces\n   ```"
        );
    }

    #[test]
    fn test_wrap_long_word() {
        let url = "https://github.com/restic/restic/issues/12345";
        assert_eq!(
            wrap_text(&format!("see {url} now"), 10, 2),
            format!("see\n  {url}\n  now")
        );
    }

    #[test]
    fn test_wrap_preserves_words() {
        for width in [1, 5, 20, 55, 200] {
            let wrapped = wrap_text(LOREM, width, 4);
            for line in wrapped.lines() {
                let line = line.trim_start();
                assert!(line.chars().count() <= width || !line.contains(' '));
            }
            let words: Vec<&str> = wrapped.split_whitespace().collect();
            assert_eq!(words, LOREM.split_whitespace().collect::<Vec<_>>());
        }
    }
}
