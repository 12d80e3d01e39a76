// src/core/tokenizer.rs

//! Lenient tokenizer for rc-file lines.
//!
//! The grammar is deliberately forgiving: dangling escapes and unterminated
//! quotes degrade to best-effort tokens instead of failing the parse.
//! Existing rc files in the wild depend on that leniency, so it is a
//! compatibility contract, not a bug to harden away.

/// Removes backslash-newline sequences so a trailing backslash joins its
/// physical line with the next one. `\<CR><LF>` is handled before `\<LF>`
/// so Windows line endings continue cleanly. Runs before any tokenization.
pub fn strip_line_continuations(contents: &str) -> String {
    contents.replace("\\\r\n", "").replace("\\\n", "")
}

/// Splits one logical line into tokens.
///
/// Whitespace separates tokens. Single and double quotes group text without
/// appearing in the output token. A backslash escapes the next character,
/// inside or outside quotes; a backslash with nothing after it stays
/// literal. An unescaped `comment` character outside quotes ends the line.
pub fn tokenize(line: &str, comment: char) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if (c == ' ' || c == '\t') && !in_single && !in_double {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c == '\'' && !in_double {
            in_single = !in_single;
        } else if c == '"' && !in_single {
            in_double = !in_double;
        } else if c == '\\' {
            match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            }
        } else if c == comment && !in_single && !in_double {
            break;
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
