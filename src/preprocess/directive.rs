use crate::error::DirectiveErrorKind;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// A parsed preprocessor directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
	Define { name: &'a str, value: &'a str },
	Ifdef(&'a str),
	Ifndef(&'a str),
	Endif,
}

/// Whether `name` can be used as a define name.
pub fn is_identifier(name: &str) -> bool {
	IDENTIFIER.is_match(name)
}

/// Parse one line of input.
///
/// Returns `Ok(None)` for ordinary lines. A line is a directive when its
/// first whitespace-separated token is one of the directive keywords; the
/// rest of the line must then be well formed.
pub fn parse_directive(line: &str) -> Result<Option<Directive<'_>>, DirectiveErrorKind> {
	if !line.starts_with("//#") {
		return Ok(None);
	}

	let tokens: Vec<&str> = line.split_whitespace().collect();
	let directive = match tokens.as_slice() {
		["//#define", rest @ ..] => match rest {
			[name] => Directive::Define {
				name: checked_name(*name)?,
				value: "",
			},
			[name, value] => Directive::Define {
				name: checked_name(*name)?,
				value: *value,
			},
			_ => return Err(DirectiveErrorKind::Malformed),
		},
		["//#ifdef", rest @ ..] => Directive::Ifdef(single_name(rest)?),
		["//#ifndef", rest @ ..] => Directive::Ifndef(single_name(rest)?),
		["//#endif"] => Directive::Endif,
		["//#endif", ..] => return Err(DirectiveErrorKind::Malformed),
		_ => return Ok(None),
	};

	Ok(Some(directive))
}

fn single_name<'a>(rest: &[&'a str]) -> Result<&'a str, DirectiveErrorKind> {
	match rest {
		[name] => checked_name(*name),
		_ => Err(DirectiveErrorKind::Malformed),
	}
}

fn checked_name(name: &str) -> Result<&str, DirectiveErrorKind> {
	if is_identifier(name) {
		Ok(name)
	} else {
		Err(DirectiveErrorKind::IllegalName(name.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ordinary_lines() {
		assert_eq!(parse_directive("var x = 1;\n"), Ok(None));
		assert_eq!(parse_directive("// #define A\n"), Ok(None));
		assert_eq!(parse_directive("//#defined A\n"), Ok(None));
		assert_eq!(parse_directive("  //#define A\n"), Ok(None));
		assert_eq!(parse_directive(""), Ok(None));
	}

	#[test]
	fn test_parse_define() {
		assert_eq!(
			parse_directive("//#define DEBUG\n"),
			Ok(Some(Directive::Define {
				name: "DEBUG",
				value: ""
			}))
		);
		assert_eq!(
			parse_directive("//#define VERSION 1.2.3\r\n"),
			Ok(Some(Directive::Define {
				name: "VERSION",
				value: "1.2.3"
			}))
		);
	}

	#[test]
	fn test_define_token_count() {
		assert_eq!(
			parse_directive("//#define\n"),
			Err(DirectiveErrorKind::Malformed)
		);
		assert_eq!(
			parse_directive("//#define A b c\n"),
			Err(DirectiveErrorKind::Malformed)
		);
	}

	#[test]
	fn test_illegal_names() {
		assert_eq!(
			parse_directive("//#define 1abc\n"),
			Err(DirectiveErrorKind::IllegalName("1abc".to_string()))
		);
		assert_eq!(
			parse_directive("//#ifdef a-b\n"),
			Err(DirectiveErrorKind::IllegalName("a-b".to_string()))
		);
		assert!(parse_directive("//#ifndef $jq_1\n").unwrap().is_some());
	}

	#[test]
	fn test_parse_conditionals() {
		assert_eq!(
			parse_directive("//#ifdef A\n"),
			Ok(Some(Directive::Ifdef("A")))
		);
		assert_eq!(
			parse_directive("//#ifndef A"),
			Ok(Some(Directive::Ifndef("A")))
		);
		assert_eq!(
			parse_directive("//#ifdef\n"),
			Err(DirectiveErrorKind::Malformed)
		);
		assert_eq!(
			parse_directive("//#ifdef A B\n"),
			Err(DirectiveErrorKind::Malformed)
		);
	}

	#[test]
	fn test_parse_endif() {
		assert_eq!(parse_directive("//#endif\n"), Ok(Some(Directive::Endif)));
		assert_eq!(
			parse_directive("//#endif A\n"),
			Err(DirectiveErrorKind::Malformed)
		);
	}
}
