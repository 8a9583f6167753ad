use std::borrow::Cow;
use std::collections::HashMap;

/// Name of the module being processed.
pub const MODULE: &str = "__MODULE__";
/// Name of the file being processed.
pub const FILE: &str = "__FILE__";
/// Always defined, empty.
pub const PREPROCESSOR: &str = "__PREPROCESSOR__";
/// Current source line, resolved when substituted.
pub const LINE: &str = "__LINE__";

/// Values defined during one preprocessing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefineTable {
	values: HashMap<String, String>,
}

impl DefineTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// A table holding only the reserved names for `module` and `file`.
	///
	/// Backslashes in `file` are written as `/` so the value can be quoted.
	pub fn seeded(module: &str, file: &str) -> Self {
		let mut table = Self::new();
		table.values.insert(MODULE.to_string(), module.to_string());
		table.values.insert(FILE.to_string(), file.replace('\\', "/"));
		table.values.insert(PREPROCESSOR.to_string(), String::new());
		table.values.insert(LINE.to_string(), String::new());
		table
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Stored value of `name`. `__LINE__` has no stored value.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Define `name`. Returns `false`, leaving the table unchanged, if the
	/// name is already defined.
	pub fn define(&mut self, name: &str, value: &str) -> bool {
		if self.contains(name) {
			return false;
		}
		self.values.insert(name.to_string(), value.to_string());
		true
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Replace every `@NAME@` of a defined name in `line`.
	///
	/// `@__LINE__@` becomes `src_line`. Tokens naming undefined values are
	/// left as they are. Substituted values are not scanned again.
	pub fn substitute<'a>(&self, line: &'a str, src_line: usize) -> Cow<'a, str> {
		if !line.contains('@') {
			return Cow::Borrowed(line);
		}

		let mut out = String::with_capacity(line.len());
		let mut rest = line;

		while let Some(start) = rest.find('@') {
			out.push_str(&rest[..start]);
			let after = &rest[start + 1..];

			if let Some(end) = after.find('@') {
				let name = &after[..end];
				if let Some(value) = self.value_at(name, src_line) {
					out.push_str(&value);
					rest = &after[end + 1..];
					continue;
				}
			}

			out.push('@');
			rest = after;
		}

		out.push_str(rest);
		Cow::Owned(out)
	}

	fn value_at(&self, name: &str, src_line: usize) -> Option<Cow<'_, str>> {
		if name == LINE && self.contains(LINE) {
			return Some(Cow::Owned(src_line.to_string()));
		}
		self.get(name).map(Cow::Borrowed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_seeded_reserved_names() {
		let table = DefineTable::seeded("app", "src\\main.js");

		assert_eq!(table.get(MODULE), Some("app"));
		assert_eq!(table.get(FILE), Some("src/main.js"));
		assert_eq!(table.get(PREPROCESSOR), Some(""));
		assert!(table.contains(LINE));
		assert_eq!(table.len(), 4);
	}

	#[test]
	fn test_define_rejects_duplicates() {
		let mut table = DefineTable::new();

		assert!(table.define("A", "1"));
		assert!(!table.define("A", "2"));
		assert_eq!(table.get("A"), Some("1"));
	}

	#[test]
	fn test_substitute_defined_tokens() {
		let mut table = DefineTable::seeded("app", "a.js");
		table.define("A", "1");

		assert_eq!(table.substitute("x@A@y@A@z\n", 3), "x1y1z\n");
		assert_eq!(table.substitute("'@__MODULE__@/@__FILE__@'", 1), "'app/a.js'");
		assert_eq!(table.substitute("line @__LINE__@", 42), "line 42");
	}

	#[test]
	fn test_substitute_leaves_unknown_tokens() {
		let mut table = DefineTable::new();
		table.define("B", "2");

		assert_eq!(table.substitute("mail me@example.com", 1), "mail me@example.com");
		assert_eq!(table.substitute("@A@B@", 1), "@A2");
		assert_eq!(table.substitute("@@", 1), "@@");
	}

	#[test]
	fn test_substitute_does_not_rescan_values() {
		let mut table = DefineTable::new();
		table.define("A", "@B@");
		table.define("B", "x");

		assert_eq!(table.substitute("@A@", 1), "@B@");
	}

	#[test]
	fn test_substitute_without_markers_borrows() {
		let table = DefineTable::seeded("app", "a.js");
		assert!(matches!(table.substitute("plain text\n", 1), Cow::Borrowed(_)));
	}
}
