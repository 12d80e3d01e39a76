// src/core/commons.rs

//! Tiny flag-scanning helpers shared by the option processor and the
//! startup-option validator.

/// Extracts the value of a `--key=value` or `--key value` style option.
///
/// Returns the value together with a flag telling whether it came from
/// `next_arg` (the space-separated form). A bare `--key` at the end of the
/// argument list yields `None`, which historically reads as an unrecognized
/// option rather than a missing-value error.
pub fn unary_option<'a>(
    arg: &'a str,
    next_arg: Option<&'a str>,
    key: &str,
) -> Option<(&'a str, bool)> {
    let rest = arg.strip_prefix(key)?;
    if let Some(value) = rest.strip_prefix('=') {
        return Some((value, false));
    }
    if rest.is_empty() {
        return next_arg.map(|value| (value, true));
    }
    // Trailing garbage in the option name, e.g. `--keyx`.
    None
}

/// True when `arg` is exactly `key` (a flag that takes no value).
pub fn nullary_option(arg: &str, key: &str) -> bool {
    arg == key
}

/// True when a token is option-shaped: it starts with `-` and is not one of
/// the help spellings that end the startup-option region.
pub fn is_arg(arg: &str) -> bool {
    arg.starts_with('-') && arg != "--help" && arg != "-help" && arg != "-h"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_attached_form() {
        assert_eq!(
            unary_option("--bazelrc=/x/rc", Some("next"), "--bazelrc"),
            Some(("/x/rc", false))
        );
        // An empty attached value is still a value.
        assert_eq!(
            unary_option("--bazelrc=", Some("next"), "--bazelrc"),
            Some(("", false))
        );
    }

    #[test]
    fn unary_space_separated_form() {
        assert_eq!(
            unary_option("--bazelrc", Some("/x/rc"), "--bazelrc"),
            Some(("/x/rc", true))
        );
    }

    #[test]
    fn unary_bare_key_without_successor_is_unrecognized() {
        assert_eq!(unary_option("--bazelrc", None, "--bazelrc"), None);
    }

    #[test]
    fn unary_rejects_prefix_collisions() {
        // `--bazelrcs` must not match `--bazelrc`.
        assert_eq!(unary_option("--bazelrcs=/x", Some("n"), "--bazelrc"), None);
        assert_eq!(unary_option("--other=/x", Some("n"), "--bazelrc"), None);
    }

    #[test]
    fn nullary_requires_exact_match() {
        assert!(nullary_option("--nomaster_bazelrc", "--nomaster_bazelrc"));
        assert!(!nullary_option("--nomaster_bazelrc=1", "--nomaster_bazelrc"));
        assert!(!nullary_option("--nomaster_bazelrcs", "--nomaster_bazelrc"));
    }

    #[test]
    fn option_shaped_tokens() {
        assert!(is_arg("--batch"));
        assert!(is_arg("-x"));
        assert!(is_arg("--"));
        assert!(!is_arg("build"));
        assert!(!is_arg(""));
    }

    #[test]
    fn help_spellings_end_the_startup_region() {
        assert!(!is_arg("--help"));
        assert!(!is_arg("-help"));
        assert!(!is_arg("-h"));
        // Other help-ish spellings are still ordinary options.
        assert!(is_arg("--helpful"));
    }
}
