//! Regex and glob operand compilation

use regex::{Regex, RegexBuilder};

/// Compiles a `regex` operand.
///
/// Accepts `/pattern/flags` with flags `i`, `m`, `s`, `x` (`g` and `u` are
/// accepted and ignored), or a bare pattern.
pub fn compile_regex(source: &str) -> Result<Regex, String> {
    let (pattern, flags) = match source.strip_prefix('/').and_then(|rest| {
        rest.rfind('/')
            .map(|end| (&rest[..end], &rest[end + 1..]))
    }) {
        Some(parts) => parts,
        None => (source, ""),
    };

    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'g' | 'u' => &mut builder,
            other => return Err(format!("unsupported regex flag `{}`", other)),
        };
    }

    builder.build().map_err(|e| e.to_string())
}

/// Compiles a `glob` operand into an anchored regex.
///
/// `**` matches any sequence, `*` any sequence without `/`, `?` one
/// character other than `/`.
pub fn compile_glob(glob: &str) -> Result<Regex, String> {
    let mut pattern = String::with_capacity(glob.len() * 2 + 2);
    pattern.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                pattern.push_str(".*");
            }
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    pattern.push('$');
    Regex::new(&pattern).map_err(|e| e.to_string())
}
