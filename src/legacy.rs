//! Legacy tuple listing
//!
//! Older registries are script modules holding two named lists of quoted
//! tuples:
//!
//! ```text
//! cpp_examples = [
//!     ("red_vs_ared --queueType=RED", "True", "True"),
//! ]
//! python_examples = []
//! ```
//!
//! `parse` converts such a listing into an [`ExampleRegistry`], turning the
//! string flags into booleans. `render` writes the same layout back out.

use crate::catalog::{
    format_flag, parse_flag, CompiledExample, ExampleEntry, ExampleRegistry, ScriptExample,
};
use crate::error::{RegistryError, Result};
use regex::Regex;
use std::str::Chars;
use tracing::trace;

const COMPILED_LIST: &str = "cpp_examples";
const SCRIPT_LIST: &str = "python_examples";

const HEADER: &str = "#! /usr/bin/env python
## -*- Mode: python; py-indent-offset: 4; indent-tabs-mode: nil; coding: utf-8; -*-
";

const COMPILED_COMMENT: &str = "# A list of C++ examples to run in order to ensure that they remain
# buildable and runnable over time.  Each tuple in the list contains
#
#     (example_name, do_run, do_valgrind_run).
#
# See test.py for more information.
";

const SCRIPT_COMMENT: &str = "# A list of Python examples to run in order to ensure that they remain
# runnable over time.  Each tuple in the list contains
#
#     (example_name, do_run).
#
# See test.py for more information.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum List {
    Compiled,
    Script,
}

impl List {
    fn name(self) -> &'static str {
        match self {
            List::Compiled => COMPILED_LIST,
            List::Script => SCRIPT_LIST,
        }
    }
}

/// Lexical pieces of a list body line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Str(String),
    Open,
    Close,
    Comma,
    End,
}

/// Read a quoted string body after its opening quote
///
/// Decodes `\\`, `\"`, `\'`, `\n`, `\r` and `\t`. Any other escape is kept
/// verbatim, backslash included.
fn read_string(chars: &mut Chars<'_>, quote: char, line_no: usize) -> Result<String> {
    let mut value = String::new();
    while let Some(ch) = chars.next() {
        match ch {
            c if c == quote => return Ok(value),
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('r') => value.push('\r'),
                Some('t') => value.push('\t'),
                Some(c @ ('\\' | '"' | '\'')) => value.push(c),
                Some(c) => {
                    value.push('\\');
                    value.push(c);
                }
                None => break,
            },
            c => value.push(c),
        }
    }
    Err(RegistryError::legacy(line_no, "unterminated string"))
}

/// Split one line into tokens, dropping a trailing `#` comment
fn tokenize(text: &str, line_no: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '#' => break,
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            ',' => tokens.push(Token::Comma),
            ']' => tokens.push(Token::End),
            '"' | '\'' => tokens.push(Token::Str(read_string(&mut chars, ch, line_no)?)),
            c if c.is_whitespace() => {}
            other => {
                return Err(RegistryError::legacy(
                    line_no,
                    format!("unexpected character '{other}' in list"),
                ))
            }
        }
    }
    Ok(tokens)
}

/// Collect the fields of a tuple whose `(` was already consumed
fn read_tuple<I: Iterator<Item = Token>>(tokens: &mut I, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut expect_field = true;
    for token in tokens.by_ref() {
        match (token, expect_field) {
            (Token::Str(field), true) => {
                fields.push(field);
                expect_field = false;
            }
            (Token::Comma, false) => expect_field = true,
            (Token::Close, _) => return Ok(fields),
            _ => return Err(RegistryError::legacy(line_no, "malformed tuple")),
        }
    }
    Err(RegistryError::legacy(line_no, "tuple is not closed on its line"))
}

fn entry_from_fields(list: List, fields: Vec<String>, line_no: usize) -> Result<ExampleEntry> {
    let flag = |literal: &str| {
        parse_flag(literal).map_err(|err| RegistryError::legacy(line_no, err.to_string()))
    };
    let arity = fields.len();
    let mut fields = fields.into_iter();
    match (list, fields.next(), fields.next(), fields.next(), arity) {
        (List::Compiled, Some(invocation), Some(run), Some(valgrind), 3) => {
            let (run, valgrind) = (flag(run.as_str())?, flag(valgrind.as_str())?);
            Ok(CompiledExample::new(invocation, run, valgrind).into())
        }
        (List::Script, Some(invocation), Some(run), None, 2) => {
            Ok(ScriptExample::new(invocation, flag(run.as_str())?).into())
        }
        (List::Compiled, ..) => Err(RegistryError::legacy(
            line_no,
            format!("{COMPILED_LIST} tuples need 3 quoted fields, got {arity}"),
        )),
        (List::Script, ..) => Err(RegistryError::legacy(
            line_no,
            format!("{SCRIPT_LIST} tuples need 2 quoted fields, got {arity}"),
        )),
    }
}

/// Parse the tuples on one line of list body; true when the list closes
fn parse_items(
    list: List,
    tokens: Vec<Token>,
    line_no: usize,
    out: &mut Vec<ExampleEntry>,
) -> Result<bool> {
    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        match token {
            Token::Comma => {}
            Token::Open => {
                let entry = entry_from_fields(list, read_tuple(&mut tokens, line_no)?, line_no)?;
                trace!(line = line_no, invocation = entry.invocation(), "legacy entry");
                out.push(entry);
            }
            Token::End => {
                if tokens.next().is_some() {
                    return Err(RegistryError::legacy(line_no, "unexpected text after list"));
                }
                return Ok(true);
            }
            Token::Str(_) | Token::Close => {
                return Err(RegistryError::legacy(line_no, "unexpected text in list"))
            }
        }
    }
    Ok(false)
}

/// Parse a legacy tuple listing
///
/// Compiled entries come first, then script entries, each in source order.
/// Either list may be missing. Each tuple must sit on a single line.
pub fn parse(source: &str) -> Result<ExampleRegistry> {
    let list_open = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\[(.*)$")?;
    let mut compiled = Vec::new();
    let mut scripts = Vec::new();
    let mut open: Option<(List, usize)> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        let (list, body) = match open {
            Some((list, _)) => (list, line),
            None => {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let caps = list_open.captures(line).ok_or_else(|| {
                    RegistryError::legacy(line_no, format!("expected a list assignment, got '{line}'"))
                })?;
                let list = match &caps[1] {
                    COMPILED_LIST => List::Compiled,
                    SCRIPT_LIST => List::Script,
                    other => {
                        return Err(RegistryError::legacy(
                            line_no,
                            format!("unknown list '{other}'"),
                        ))
                    }
                };
                open = Some((list, line_no));
                (list, caps.get(2).map_or("", |m| m.as_str()))
            }
        };

        let target = match list {
            List::Compiled => &mut compiled,
            List::Script => &mut scripts,
        };
        if parse_items(list, tokenize(body, line_no)?, line_no, target)? {
            open = None;
        }
    }

    if let Some((list, start)) = open {
        return Err(RegistryError::legacy(
            start,
            format!("list '{}' is never closed", list.name()),
        ));
    }

    compiled.extend(scripts);
    Ok(ExampleRegistry::from_entries(compiled))
}

/// Quote a field as a double-quoted string literal
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Write a registry as a legacy tuple listing
pub fn render(registry: &ExampleRegistry) -> String {
    let compiled: Vec<String> = registry
        .compiled()
        .map(|e| {
            format!(
                "({}, \"{}\", \"{}\")",
                quote(&e.invocation),
                format_flag(e.do_run),
                format_flag(e.do_valgrind_run)
            )
        })
        .collect();
    let scripts: Vec<String> = registry
        .scripts()
        .map(|e| format!("({}, \"{}\")", quote(&e.invocation), format_flag(e.do_run)))
        .collect();

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(COMPILED_COMMENT);
    out.push_str(&render_list(COMPILED_LIST, &compiled));
    out.push('\n');
    out.push_str(SCRIPT_COMMENT);
    out.push_str(&render_list(SCRIPT_LIST, &scripts));
    out
}

fn render_list(name: &str, tuples: &[String]) -> String {
    if tuples.is_empty() {
        return format!("{name} = []\n");
    }
    let mut out = format!("{name} = [\n");
    for tuple in tuples {
        out.push_str(&format!("    {tuple},\n"));
    }
    out.push_str("]\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExampleKind;

    const NETWORK_LISTING: &str = r#"#! /usr/bin/env python
## -*- Mode: python; py-indent-offset: 4; indent-tabs-mode: nil; coding: utf-8; -*-

# A list of C++ examples to run in order to ensure that they remain
# buildable and runnable over time.
cpp_examples = [
    ("main-packet-header", "True", "True"),
    ("red_vs_ared --queueType=ARED", "True", "False"),  # trailing comment
    ("adaptive-red-tests --testNumber=15", "False", "False"),
]

python_examples = []
"#;

    #[test]
    fn test_parse_listing() {
        let registry = parse(NETWORK_LISTING).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.scripts().count(), 0);

        let compiled: Vec<_> = registry.compiled().collect();
        assert_eq!(compiled[0].invocation, "main-packet-header");
        assert!(compiled[1].do_run);
        assert!(!compiled[1].do_valgrind_run);
        assert!(!compiled[2].do_run);
    }

    #[test]
    fn test_parse_scripts_after_compiled() {
        let source = r#"
python_examples = [("sample-simulator.py", "True")]
cpp_examples = [("red-tests", "True", "True")]
"#;
        let registry = parse(source).unwrap();
        let kinds: Vec<_> = registry.entries().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, [ExampleKind::Compiled, ExampleKind::Script]);
    }

    #[test]
    fn test_parse_single_quotes_and_hash_in_string() {
        let source = "cpp_examples = [('odd#name', 'True', 'False')]\n";
        let registry = parse(source).unwrap();
        assert_eq!(registry.entries()[0].invocation(), "odd#name");
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse("cpp_examples = [\n    (\"red-tests\", \"True\"),\n]\n").unwrap_err();
        match err {
            RegistryError::Legacy { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("3 quoted fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_flag_literal() {
        let err = parse("python_examples = [(\"a.py\", \"yes\")]\n").unwrap_err();
        assert!(matches!(err, RegistryError::Legacy { line: 1, .. }));
        assert!(err.to_string().contains("'yes'"));
    }

    #[test]
    fn test_unknown_list() {
        let err = parse("java_examples = []\n").unwrap_err();
        assert!(err.to_string().contains("unknown list 'java_examples'"));
    }

    #[test]
    fn test_unterminated_list() {
        let err = parse("cpp_examples = [\n    (\"red-tests\", \"True\", \"True\"),\n").unwrap_err();
        assert!(matches!(err, RegistryError::Legacy { line: 1, .. }));
    }

    #[test]
    fn test_stray_text() {
        assert!(parse("print('hi')\n").is_err());
        assert!(parse("cpp_examples = [\n    garbage\n]\n").is_err());
    }

    #[test]
    fn test_render_matches_source_layout() {
        let registry = ExampleRegistry::builtin().unwrap();
        let text = render(&registry);
        assert!(text.starts_with("#! /usr/bin/env python"));
        assert!(text.contains("    (\"red_vs_ared --queueType=RED\", \"True\", \"True\"),\n"));
        assert!(text.contains("python_examples = []\n"));
    }

    #[test]
    fn test_render_escapes_quotes_and_backslashes() {
        let registry = ExampleRegistry::from_entries(vec![
            CompiledExample::new(r#"tool --name="a b""#, true, true).into(),
            ScriptExample::new(r"C:\tmp\run.py", false).into(),
        ]);
        let text = render(&registry);
        assert!(text.contains(r#"    ("tool --name=\"a b\"", "True", "True"),"#));
        assert!(text.contains(r#"    ("C:\\tmp\\run.py", "False"),"#));
    }

    #[test]
    fn test_render_leaves_parens_and_single_quotes() {
        let registry = ExampleRegistry::from_entries(vec![CompiledExample::new(
            "tool --expr=(1+2) 'x' #3",
            true,
            false,
        )
        .into()]);
        let text = render(&registry);
        assert!(text.contains(r#"    ("tool --expr=(1+2) 'x' #3", "True", "False"),"#));
    }

    #[test]
    fn test_render_escapes_line_breaks() {
        let registry =
            ExampleRegistry::from_entries(vec![ScriptExample::new("a\nb\tc\rd", true).into()]);
        let text = render(&registry);
        assert!(text.contains(r#"    ("a\nb\tc\rd", "True"),"#));
        assert_eq!(parse(&text).unwrap(), registry);
    }

    #[test]
    fn test_special_characters_round_trip() {
        let registry = ExampleRegistry::from_entries(vec![
            CompiledExample::new(r#"tool --name="a b""#, true, true).into(),
            CompiledExample::new("tool --expr=(1+2)", true, false).into(),
            CompiledExample::new(r"back\slash \", false, false).into(),
            CompiledExample::new("", true, true).into(),
            ScriptExample::new(r#"run "x""#, true).into(),
            ScriptExample::new("it's # not a comment", false).into(),
        ]);
        assert_eq!(parse(&render(&registry)).unwrap(), registry);
    }

    #[test]
    fn test_parse_escapes_in_single_quotes() {
        let source = r#"python_examples = [('it\'s', 'True'), ('say \"hi\"', "False")]"#;
        let registry = parse(source).unwrap();
        let scripts: Vec<_> = registry.scripts().map(|s| s.invocation.as_str()).collect();
        assert_eq!(scripts, ["it's", r#"say "hi""#]);
    }

    #[test]
    fn test_parse_keeps_unknown_escape() {
        let registry = parse(r#"cpp_examples = [("a\d", "True", "True")]"#).unwrap();
        assert_eq!(registry.entries()[0].invocation(), r"a\d");
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("cpp_examples = [\n    (\"red-tests\", \"True\", \"True),\n]\n").unwrap_err();
        match err {
            RegistryError::Legacy { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("unterminated string"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_text_after_closing_bracket() {
        let err = parse("python_examples = [] extra\n").unwrap_err();
        assert!(matches!(err, RegistryError::Legacy { line: 1, .. }));
    }

    #[test]
    fn test_render_parse_round_trip() {
        let registry = ExampleRegistry::from_entries(vec![
            CompiledExample::new("red-tests", true, false).into(),
            ScriptExample::new("sample-simulator.py", false).into(),
        ]);
        assert_eq!(parse(&render(&registry)).unwrap(), registry);

        let builtin = ExampleRegistry::builtin().unwrap();
        assert_eq!(parse(&render(&builtin)).unwrap(), builtin);
    }
}
