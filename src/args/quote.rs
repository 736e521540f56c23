//! Command-line quoting for platforms that create processes from a single
//! string instead of an argument vector.
//!
//! The target parser treats backslashes literally unless they precede a
//! double quote. A run of `n` backslashes followed by a quote is read as
//! `n / 2` literal backslashes, plus an escaped quote when `n` is odd.
//! Every argument is therefore wrapped in quotes, backslash runs in front of
//! a quote (including the closing one) are doubled, and embedded quotes get
//! one extra backslash.

/// Serialize `argv` into a single command line.
///
/// `prefix`, when given, takes the program slot and every element of `argv`
/// follows it. With `escape_backslashes` every backslash is escaped as if it
/// preceded a quote.
pub fn argv_to_string(argv: &[String], prefix: Option<&str>, escape_backslashes: bool) -> String {
    prefix
        .into_iter()
        .chain(argv.iter().map(String::as_str))
        .map(|arg| quote_arg(arg, escape_backslashes))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str, escape_backslashes: bool) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    let mut bs = 0usize;

    out.push('"');
    for c in arg.chars() {
        match c {
            '\\' if !escape_backslashes => {
                bs += 1;
                continue;
            }
            '\\' | '"' => bs = 2 * bs + 1,
            _ => {}
        }
        push_backslashes(&mut out, bs);
        bs = 0;
        out.push(c);
    }
    // The closing quote must not be escaped by a trailing run.
    push_backslashes(&mut out, 2 * bs);
    out.push('"');
    out
}

fn push_backslashes(out: &mut String, n: usize) {
    out.extend(std::iter::repeat('\\').take(n));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn plain_args_are_only_wrapped() {
        assert_eq!(argv_to_string(&s(&["gcc", "-c", "a b.c"]), None, false), r#""gcc" "-c" "a b.c""#);
    }

    #[test]
    fn empty_argument_stays_visible() {
        assert_eq!(argv_to_string(&s(&["gcc", ""]), None, false), r#""gcc" """#);
    }

    #[test]
    fn inner_backslashes_untouched() {
        assert_eq!(
            argv_to_string(&s(&[r"C:\Program Files\cl.exe"]), None, false),
            r#""C:\Program Files\cl.exe""#
        );
    }

    #[test]
    fn backslashes_before_quote_are_doubled_plus_one() {
        assert_eq!(argv_to_string(&s(&[r#"a\"b"#]), None, false), r#""a\\\"b""#);
        assert_eq!(argv_to_string(&s(&[r#"a\\"b"#]), None, false), r#""a\\\\\"b""#);
    }

    #[test]
    fn escape_backslashes_doubles_each_one() {
        assert_eq!(argv_to_string(&s(&[r"a\b"]), None, true), r#""a\\b""#);
        assert_eq!(argv_to_string(&s(&[r"a\"]), None, true), r#""a\\""#);
    }

    #[test]
    fn prefix_takes_program_slot() {
        assert_eq!(
            argv_to_string(&s(&["script.sh", "-x"]), Some("sh.exe"), false),
            r#""sh.exe" "script.sh" "-x""#
        );
    }

    #[test]
    fn nothing_to_serialize() {
        assert_eq!(argv_to_string(&[], None, false), "");
        assert_eq!(argv_to_string(&[], Some("cl"), false), r#""cl""#);
    }
}
