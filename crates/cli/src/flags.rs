//! Descriptor-table command-line parser
//!
//! Every flag is declared once as a `FlagSpec` binding codes and help
//! text to a typed setter, and the same table drives both parsing and
//! the help table. Verbs are presence-only booleans; options take a
//! single `code:value` token, so option values cannot themselves contain
//! a colon.

use crate::help::wrap_help;

/// How a matched flag writes into the option record
pub enum Binding<R> {
    /// Bare token, sets a boolean
    Verb(fn(&mut R)),
    /// `code:value` token, assigns the raw value verbatim
    Text(fn(&mut R, &str)),
    /// `code:value` token parsed against a fixed member set; the setter
    /// reports whether the value was recognized
    Choice {
        assign: fn(&mut R, &str) -> bool,
        variants: &'static [&'static str],
    },
}

/// One declared flag: codes, pre-wrapped help lines, and its binding
pub struct FlagSpec<R> {
    pub(crate) short_code: &'static str,
    pub(crate) long_code: &'static str,
    pub(crate) help_lines: Vec<String>,
    binding: Binding<R>,
}

impl<R> FlagSpec<R> {
    pub fn verb(
        short_code: &'static str,
        long_code: &'static str,
        help: &str,
        set: fn(&mut R),
    ) -> Self {
        Self {
            short_code,
            long_code,
            help_lines: wrap_help(help),
            binding: Binding::Verb(set),
        }
    }

    pub fn text(
        short_code: &'static str,
        long_code: &'static str,
        help: &str,
        assign: fn(&mut R, &str),
    ) -> Self {
        Self {
            short_code,
            long_code,
            help_lines: wrap_help(help),
            binding: Binding::Text(assign),
        }
    }

    pub fn choice(
        short_code: &'static str,
        long_code: &'static str,
        help: &str,
        assign: fn(&mut R, &str) -> bool,
        variants: &'static [&'static str],
    ) -> Self {
        Self {
            short_code,
            long_code,
            help_lines: wrap_help(help),
            binding: Binding::Choice { assign, variants },
        }
    }

    fn matches_verb(&self, upper: &str) -> bool {
        let short = self.short_code.to_uppercase();
        let long = self.long_code.to_uppercase();
        (!short.is_empty() && upper == short) || (!long.is_empty() && upper == long)
    }

    /// Match an option token against this flag's codes. The token must
    /// split into exactly two parts on `:`; anything else is not an
    /// option token for this flag (it may still be a verb, another
    /// flag, or an extra). The value comes from the raw token so its
    /// case survives.
    fn option_value<'a>(&self, raw: &'a str, upper: &str) -> Option<&'a str> {
        let parts: Vec<&str> = upper.split(':').collect();
        if parts.len() != 2 {
            return None;
        }

        let short = self.short_code.to_uppercase();
        let long = self.long_code.to_uppercase();
        let cmd = parts[0];
        if (short.is_empty() || cmd != short) && (long.is_empty() || cmd != long) {
            return None;
        }

        raw.split(':').nth(1)
    }
}

/// What a parse run produced. Fields set by tokens before a failing one
/// remain set; there is no rollback.
pub struct ParseOutcome {
    pub success: bool,
    pub extras: Vec<String>,
    pub errors: Vec<String>,
}

/// Populate `record` from `args`. Unmatched tokens accumulate in order
/// into `extras` and are not an error by themselves; an unrecognized
/// value for a `Choice` flag aborts parsing after recording the
/// offending token and the valid `code:value` set.
pub fn parse<R>(specs: &[FlagSpec<R>], args: &[String], record: &mut R) -> ParseOutcome {
    let mut extras = Vec::new();
    let mut errors = Vec::new();

    for token in args {
        let upper = token.to_uppercase();
        let mut captured = false;

        for spec in specs {
            match &spec.binding {
                Binding::Verb(set) => {
                    if spec.matches_verb(&upper) {
                        set(record);
                        captured = true;
                    }
                }
                Binding::Text(assign) => {
                    if let Some(value) = spec.option_value(token, &upper) {
                        assign(record, value);
                        captured = true;
                    }
                }
                Binding::Choice { assign, variants } => {
                    if let Some(value) = spec.option_value(token, &upper) {
                        if !assign(record, value) {
                            // Suggestions echo the code the way the user
                            // typed it, dashes included
                            let code = token.split(':').next().unwrap_or(token);
                            errors.push(format!("Invalid argument: {}:{}", code, value));
                            let valid: Vec<String> = variants
                                .iter()
                                .map(|variant| format!("{}:{}", code, variant))
                                .collect();
                            errors.push(format!("Valid values are: {}", valid.join(" ")));
                            return ParseOutcome {
                                success: false,
                                extras,
                                errors,
                            };
                        }
                        captured = true;
                    }
                }
            }
        }

        if !captured {
            extras.push(token.clone());
        }
    }

    ParseOutcome {
        success: true,
        extras,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::Options;
    use rig_core::BuildConfig;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_descriptor_count_and_codes() {
        let specs = Options::descriptors();
        assert_eq!(specs.len(), 5);
        for spec in &specs {
            assert!(!spec.short_code.is_empty() || !spec.long_code.is_empty());
        }
    }

    #[test]
    fn test_verb_matches_either_code_case_insensitively() {
        for token in ["-h", "--help", "--HELP", "-H"] {
            let mut options = Options::default();
            let outcome = parse(&Options::descriptors(), &args(&[token]), &mut options);
            assert!(outcome.success);
            assert!(options.help, "token {} should set help", token);
            assert!(outcome.extras.is_empty());
        }
    }

    #[test]
    fn test_choice_option_sets_field() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--config:Production"]),
            &mut options,
        );
        assert!(outcome.success);
        assert_eq!(options.config, BuildConfig::Production);
        assert!(outcome.extras.is_empty());
    }

    #[test]
    fn test_choice_value_is_case_insensitive() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["-c:production"]),
            &mut options,
        );
        assert!(outcome.success);
        assert_eq!(options.config, BuildConfig::Production);
    }

    #[test]
    fn test_invalid_choice_aborts_with_suggestions() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--config:Bogus"]),
            &mut options,
        );
        assert!(!outcome.success);
        assert_eq!(outcome.errors[0], "Invalid argument: --config:Bogus");
        assert_eq!(
            outcome.errors[1],
            "Valid values are: --config:Debug --config:Production"
        );
    }

    #[test]
    fn test_no_rollback_before_failing_token() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--verbose", "--config:Bogus"]),
            &mut options,
        );
        assert!(!outcome.success);
        assert!(options.verbose);
    }

    #[test]
    fn test_unmatched_tokens_become_extras() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--unknown-flag", "leftover"]),
            &mut options,
        );
        assert!(outcome.success);
        assert_eq!(outcome.extras, vec!["--unknown-flag", "leftover"]);
    }

    #[test]
    fn test_text_option_takes_raw_value() {
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--root:Some Dir/Nested"]),
            &mut options,
        );
        assert!(outcome.success);
        assert_eq!(options.root, "Some Dir/Nested");
    }

    #[test]
    fn test_token_with_two_colons_is_an_extra() {
        // Option values cannot contain a colon; the token matches no
        // descriptor and falls through
        let mut options = Options::default();
        let outcome = parse(
            &Options::descriptors(),
            &args(&["--config:a:b"]),
            &mut options,
        );
        assert!(outcome.success);
        assert_eq!(outcome.extras, vec!["--config:a:b"]);
        assert_eq!(options.config, BuildConfig::Debug);
    }
}
