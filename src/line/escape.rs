//! Escape sequences in displayed text.
//!
//! `\at` is `@`, `\n` is a newline and `\s` is a backslash. Inside output blocks
//! `\lb` and `\rb` are braces.

/// Replace escape sequences in text.
///
/// Braces are only unescaped if `inside_output` is set.
pub fn unescape(text: &str, inside_output: bool) -> String {
    let mut sequences: Vec<(&str, &str)> = vec![("\\at", "@")];

    if inside_output {
        sequences.push(("\\lb", "{"));
        sequences.push(("\\rb", "}"));
    }

    sequences.push(("\\n", "\n"));
    sequences.push(("\\s", "\\"));

    let mut buffer = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find('\\') {
        buffer.push_str(&rest[..index]);
        rest = &rest[index..];

        match sequences
            .iter()
            .find(|(sequence, _)| rest.starts_with(sequence))
        {
            Some((sequence, replacement)) => {
                buffer.push_str(replacement);
                rest = &rest[sequence.len()..];
            }
            None => {
                buffer.push('\\');
                rest = &rest[1..];
            }
        }
    }

    buffer.push_str(rest);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_newline_and_backslash_are_unescaped_everywhere() {
        assert_eq!(unescape("mail\\atme\\nnow \\s", false), "mail@me\nnow \\");
    }

    #[test]
    fn braces_are_only_unescaped_inside_output() {
        assert_eq!(unescape("\\lbx\\rb", true), "{x}");
        assert_eq!(unescape("\\lbx\\rb", false), "\\lbx\\rb");
    }

    #[test]
    fn unknown_sequences_are_kept() {
        assert_eq!(unescape("a\\qb\\", true), "a\\qb\\");
    }

    #[test]
    fn escaped_backslash_does_not_start_a_new_sequence() {
        assert_eq!(unescape("\\sn", false), "\\n");
    }
}
