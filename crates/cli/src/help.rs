//! Help-text wrapping and table rendering
//!
//! Both operate on the same descriptor table the parser uses, so the
//! printed help can never drift from what actually parses.

use crate::flags::FlagSpec;

const WRAP_WIDTH: usize = 50;

/// Greedy word wrap: flush before a word when the accumulated text plus
/// the word and its separating space would exceed the width. The final
/// word carries no separator. A word longer than the width gets a line
/// of its own, over-long.
pub fn wrap_help(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split(' ').collect();
    let mut lines = Vec::new();
    let mut current = String::new();

    for (index, word) in words.iter().enumerate() {
        let separator = usize::from(index + 1 < words.len());
        if !current.is_empty() && current.len() + word.len() + separator > WRAP_WIDTH {
            lines.push(current.trim_end().to_string());
            current.clear();
        }
        current.push_str(word);
        if separator == 1 {
            current.push(' ');
        }
    }
    lines.push(current.trim_end().to_string());
    lines
}

/// Render the bordered flag table: short code, long code, help text.
/// Multi-line help renders one row per line with the flag columns blank
/// on continuation rows; the dashed rule is sized to the widest row.
pub fn render<R>(specs: &[FlagSpec<R>], program: &str) -> String {
    let longest_short = specs.iter().map(|s| s.short_code.len()).max().unwrap_or(0);
    let longest_long = specs.iter().map(|s| s.long_code.len()).max().unwrap_or(0);
    let longest_help = specs
        .iter()
        .flat_map(|s| s.help_lines.iter().map(|line| line.len()))
        .max()
        .unwrap_or(0);

    // Column maxima plus the border characters
    let line_length = longest_short + longest_long + longest_help + 9;
    let rule = "-".repeat(line_length);

    let mut out = String::new();
    out.push_str(&format!("Usage: {} [options]\n\nOptions:\n", program));
    out.push_str(&rule);
    out.push('\n');

    for spec in specs {
        for (index, line) in spec.help_lines.iter().enumerate() {
            let (short, long) = if index == 0 {
                (spec.short_code, spec.long_code)
            } else {
                ("", "")
            };
            let prefix = format!(
                "| {:>short_width$} | {:<long_width$} |",
                short,
                long,
                short_width = longest_short,
                long_width = longest_long
            );
            let padding = line_length - prefix.len() - 2 - line.len();
            out.push_str(&format!("{} {}{}|\n", prefix, line, " ".repeat(padding)));
        }
        out.push_str(&rule);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opts::Options;

    #[test]
    fn test_short_text_stays_on_one_line() {
        assert_eq!(wrap_help("Print the version."), vec!["Print the version."]);
    }

    #[test]
    fn test_long_text_wraps_under_width() {
        let text = "Selects the build configuration used to compile every \
                    project in the solution. Defaults to Debug.";
        let lines = wrap_help(text);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.len() <= 50, "line too long: {:?}", line);
        }
        // No word lost in the wrap
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_gets_its_own_line() {
        let word = "a".repeat(60);
        let text = format!("short {} tail", word);
        let lines = wrap_help(&text);
        assert!(lines.contains(&word));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_boundary_word_fills_line_exactly() {
        // 44 chars + space + "123456" lands exactly at 50 as the final
        // word and does not wrap
        let text = format!("{} 123456", "b".repeat(43));
        assert_eq!(wrap_help(&text).len(), 1);
    }

    #[test]
    fn test_table_layout() {
        let specs = Options::descriptors();
        let rendered = render(&specs, "rig");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Usage: rig [options]");
        assert_eq!(lines[2], "Options:");

        let rule = lines[3];
        assert!(rule.chars().all(|c| c == '-'));

        // Every row is exactly as wide as the rule
        for line in &lines[3..] {
            assert_eq!(line.len(), rule.len(), "row width mismatch: {:?}", line);
        }

        // First row of an entry carries the codes, continuations do not
        assert!(rendered.contains("--config"));
        let config_rows: Vec<&str> = lines
            .iter()
            .skip_while(|l| !l.contains("--config"))
            .take_while(|l| !l.starts_with('-'))
            .copied()
            .collect();
        assert!(config_rows.len() >= 2);
        assert!(!config_rows[1].contains("--config"));
        assert!(!config_rows[1].contains("-c"));
    }
}
