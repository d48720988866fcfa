use crate::generator::{
    ConfigurationError, DEFAULT_LENGTH, GenerationConfig, MAX_ATTEMPTS, Password, generate_password,
};
use crate::strength::{StrengthLevel, score};
use anyhow::{Context, Result};
use console::{Style, Term};
use std::io::{self, BufRead, Write};

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub verbose: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn strength_style(level: StrengthLevel, color_support: bool) -> Style {
    if !color_support {
        return Style::new();
    }

    match level {
        StrengthLevel::Weak => Style::new().red(),
        StrengthLevel::Medium => Style::new().yellow(),
        StrengthLevel::Strong => Style::new().green(),
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

pub fn display_output(password: &Password, config: &GenerationConfig, options: &DisplayOptions) {
    let level = password.strength();

    println!("Generated password: {}", password.as_str());
    println!(
        "Strength: {}",
        strength_style(level, options.color_support).apply_to(level)
    );

    if !password.meets_coverage() {
        display_shortfall(password, options);
    }

    if options.verbose {
        println!();
        display_settings(config, options);
        display_stats(password, options);
    }
}

fn display_shortfall(password: &Password, options: &DisplayOptions) {
    let (_, check_warn) = get_status_symbols(options.unicode_support);
    let style = if options.color_support {
        Style::new().yellow()
    } else {
        Style::new()
    };

    eprintln!(
        "{} Complexity requirements not met after {} attempts",
        style.apply_to(format!("[{}]", check_warn)),
        password.attempts()
    );
}

pub fn display_error(err: &ConfigurationError, options: &DisplayOptions) {
    let style = if options.color_support {
        Style::new().red()
    } else {
        Style::new()
    };

    eprintln!("{} {}", style.apply_to("Error:"), err);
}

fn display_settings(config: &GenerationConfig, options: &DisplayOptions) {
    let (mid, last) = tree_branches(options.unicode_support);

    let excluded: String = config.excluded_chars.iter().collect();

    println!("Settings:");
    println!("  {} Length     {}", mid, config.length);
    println!("  {} Letters    {}", mid, enabled_label(config.use_letters));
    println!("  {} Digits     {}", mid, enabled_label(config.use_digits));
    println!("  {} Symbols    {}", mid, enabled_label(config.use_symbols));
    println!(
        "  {} Complexity {}",
        mid,
        enabled_label(config.enforce_complexity)
    );
    if excluded.is_empty() {
        println!("  {} Excluded   none", last);
    } else {
        println!("  {} Excluded   {}", last, excluded);
    }
    println!();
}

fn display_stats(password: &Password, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (mid, last) = tree_branches(options.unicode_support);

    let coverage_style = if options.color_support {
        if password.meets_coverage() {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };
    let coverage_status = if password.meets_coverage() {
        check_ok
    } else {
        check_warn
    };

    let length = password.len();

    println!("Stats:");
    println!(
        "  {} Length     {} {}",
        mid,
        length,
        if length == 1 { "char" } else { "chars" }
    );
    println!(
        "  {} Attempts   {} {}/{}",
        mid,
        coverage_style.apply_to(format!("[{}]", coverage_status)),
        password.attempts(),
        MAX_ATTEMPTS
    );
    println!("  {} Score      {}/6", last, score(password.as_str()));
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from terminal")?;

    if read == 0 {
        anyhow::bail!("Input closed before all settings were entered");
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    read_answer(input)
}

pub fn parse_length(answer: &str) -> Option<usize> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Some(DEFAULT_LENGTH);
    }

    trimmed.parse::<usize>().ok().filter(|&n| n >= 1)
}

pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };

    loop {
        let answer = ask(input, output, &format!("{} {}: ", question, hint))?;
        match parse_yes_no(&answer, default) {
            Some(value) => return Ok(value),
            None => writeln!(output, "Please answer y or n.")?,
        }
    }
}

/// Collects the six generation settings from the terminal.
pub fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<GenerationConfig> {
    let length = loop {
        let answer = ask(
            input,
            output,
            &format!("Password length [{}]: ", DEFAULT_LENGTH),
        )?;
        match parse_length(&answer) {
            Some(length) => break length,
            None => writeln!(output, "Length must be a whole number of at least 1.")?,
        }
    };

    let use_letters = ask_yes_no(input, output, "Include letters (a-z, A-Z)?", true)?;
    let use_digits = ask_yes_no(input, output, "Include numbers (0-9)?", true)?;
    let use_symbols = ask_yes_no(input, output, "Include symbols (!@#$%^&*)?", true)?;
    let enforce_complexity = ask_yes_no(
        input,
        output,
        "Enforce complexity (at least one of each selected type)?",
        false,
    )?;
    let excluded = ask(input, output, "Exclude characters []: ")?;

    Ok(GenerationConfig::default()
        .with_length(length)
        .letters(use_letters)
        .digits(use_digits)
        .symbols(use_symbols)
        .enforce_complexity(enforce_complexity)
        .exclude(&excluded))
}

pub fn run_interactive(options: &DisplayOptions) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let term = Term::stdout();

    loop {
        let config = prompt_config(&mut input, &mut output)?;
        term.write_line("")?;

        match generate_password(&config) {
            Ok(password) => display_output(&password, &config, options),
            Err(err) => display_error(&err, options),
        }

        term.write_line("")?;
        if !ask_yes_no(&mut input, &mut output, "Generate another?", false)? {
            break;
        }
        term.write_line("")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_parse_length() {
        let cases = vec![
            ("", Some(12)),
            ("  ", Some(12)),
            ("1", Some(1)),
            (" 32 ", Some(32)),
            ("0", None),
            ("-4", None),
            ("twelve", None),
            ("12.5", None),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_length(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("", true), Some(true));
        assert_eq!(parse_yes_no("", false), Some(false));
        assert_eq!(parse_yes_no("Y", false), Some(true));
        assert_eq!(parse_yes_no(" yes ", false), Some(true));
        assert_eq!(parse_yes_no("N", true), Some(false));
        assert_eq!(parse_yes_no("no", true), Some(false));
        assert_eq!(parse_yes_no("maybe", true), None);
    }

    #[test]
    fn test_prompt_config_defaults() {
        let mut input = Cursor::new("\n\n\n\n\n\n");
        let mut output = Vec::new();

        let config = prompt_config(&mut input, &mut output).unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_prompt_config_custom_answers() {
        let mut input = Cursor::new("20\ny\nn\nno\ny\n0Ol1\n");
        let mut output = Vec::new();

        let config = prompt_config(&mut input, &mut output).unwrap();
        assert_eq!(config.length, 20);
        assert!(config.use_letters);
        assert!(!config.use_digits);
        assert!(!config.use_symbols);
        assert!(config.enforce_complexity);
        assert_eq!(config.excluded_chars.len(), 4);
        assert!(config.excluded_chars.contains(&'O'));
    }

    #[test]
    fn test_prompt_config_reprompts_on_invalid_input() {
        let mut input = Cursor::new("abc\n0\n8\nmaybe\ny\n\n\n\n\n");
        let mut output = Vec::new();

        let config = prompt_config(&mut input, &mut output).unwrap();
        assert_eq!(config.length, 8);
        assert!(config.use_letters);

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript
                .matches("Length must be a whole number of at least 1.")
                .count(),
            2
        );
        assert!(transcript.contains("Please answer y or n."));
    }

    #[test]
    fn test_prompt_config_keeps_spaces_in_exclusions() {
        let mut input = Cursor::new("\n\n\n\n\n a \n");
        let mut output = Vec::new();

        let config = prompt_config(&mut input, &mut output).unwrap();
        assert!(config.excluded_chars.contains(&' '));
        assert!(config.excluded_chars.contains(&'a'));
    }

    #[test]
    fn test_prompt_config_fails_on_closed_input() {
        let mut input = Cursor::new("16\n");
        let mut output = Vec::new();

        let result = prompt_config(&mut input, &mut output);
        assert!(result.is_err());
    }
}
