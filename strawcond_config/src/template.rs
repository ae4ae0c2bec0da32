//! printf-style run-number templating for archive file names.
//!
//! Supports `%d`, `%i`, `%u` and `%s` with an optional `0` flag and width,
//! plus `%%`. The pattern must consume the run number exactly once.

use anyhow::{bail, ensure};

/// Renders `pattern` with `run` substituted for its single placeholder.
///
/// # Example
/// ```
/// use strawcond_config::render_run_pattern;
///
/// let name = render_run_pattern("run_%06d.odb.lz4", 1234).unwrap();
/// assert_eq!(name, "run_001234.odb.lz4");
/// ```
pub fn render_run_pattern(pattern: &str, run: u32) -> anyhow::Result<String> {
    let mut rendered = String::with_capacity(pattern.len() + 8);
    let mut substitutions = 0usize;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            rendered.push(c);
            continue;
        }
        if chars.next_if_eq(&'%').is_some() {
            rendered.push('%');
            continue;
        }

        let zero_pad = chars.next_if_eq(&'0').is_some();
        let mut width = 0usize;
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            width = width * 10 + digit.to_digit(10).map_or(0, |d| d as usize);
        }

        let fill = match chars.next() {
            Some('d' | 'i' | 'u') if zero_pad => '0',
            Some('d' | 'i' | 'u' | 's') => ' ',
            Some(other) => bail!("unsupported conversion '%{other}' in pattern '{pattern}'"),
            None => bail!("incomplete conversion at end of pattern '{pattern}'"),
        };

        let digits = run.to_string();
        for _ in digits.len()..width {
            rendered.push(fill);
        }
        rendered.push_str(&digits);
        substitutions += 1;
    }

    ensure!(
        substitutions == 1,
        "pattern '{pattern}' must contain exactly one run number placeholder, found {substitutions}"
    );
    Ok(rendered)
}
