use crate::error::{DirectiveError, DirectiveErrorKind};
use crate::preprocess::defines::DefineTable;
use crate::preprocess::directive::{Directive, parse_directive};

/// Names reported in errors and seeded as `__MODULE__` / `__FILE__`.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
	pub module: &'a str,
	pub file: &'a str,
}

/// Result of one preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutput {
	/// Emitted lines, each with its original terminator.
	pub text: String,

	/// Define table as it stood at end of input.
	pub defines: DefineTable,

	/// Number of lines emitted.
	pub emitted_lines: usize,

	/// Number of lines read.
	pub source_lines: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
	active: bool,
	opened_at: usize,
}

/// Open conditional blocks above an always-active base frame.
#[derive(Debug)]
struct ConditionalStack {
	frames: Vec<Frame>,
}

impl ConditionalStack {
	fn new() -> Self {
		ConditionalStack {
			frames: vec![Frame {
				active: true,
				opened_at: 0,
			}],
		}
	}

	fn is_active(&self) -> bool {
		self.frames.last().is_some_and(|f| f.active)
	}

	/// Open a block. An inactive parent keeps every child inactive.
	fn push(&mut self, condition: bool, line: usize) {
		let active = self.is_active() && condition;
		self.frames.push(Frame {
			active,
			opened_at: line,
		});
	}

	/// Close the innermost block; `false` if only the base frame is left.
	fn pop(&mut self) -> bool {
		if self.frames.len() == 1 {
			return false;
		}
		self.frames.pop();
		true
	}

	/// Line of the innermost block still open.
	fn innermost_open(&self) -> Option<usize> {
		if self.frames.len() > 1 {
			self.frames.last().map(|f| f.opened_at)
		} else {
			None
		}
	}
}

struct Pass<'a> {
	ctx: PassContext<'a>,
	defines: DefineTable,
	stack: ConditionalStack,
	src_line: usize,
	dst_line: usize,
	output: String,
}

impl<'a> Pass<'a> {
	fn error(&self, kind: DirectiveErrorKind, line: usize) -> DirectiveError {
		DirectiveError {
			kind,
			line,
			module: self.ctx.module.to_string(),
			file: self.ctx.file.to_string(),
		}
	}

	fn line(&mut self, line: &str) -> Result<(), DirectiveError> {
		self.src_line += 1;

		let directive = parse_directive(line).map_err(|kind| self.error(kind, self.src_line))?;

		match directive {
			Some(Directive::Define { name, value }) => {
				if !self.defines.define(name, value) {
					return Err(self.error(
						DirectiveErrorKind::DuplicateDefine(name.to_string()),
						self.src_line,
					));
				}
			}
			Some(Directive::Ifdef(name)) => {
				let defined = self.defines.contains(name);
				self.stack.push(defined, self.src_line);
			}
			Some(Directive::Ifndef(name)) => {
				let defined = self.defines.contains(name);
				self.stack.push(!defined, self.src_line);
			}
			Some(Directive::Endif) => {
				if !self.stack.pop() {
					return Err(self.error(DirectiveErrorKind::UnmatchedEndif, self.src_line));
				}
			}
			None if self.stack.is_active() => {
				self.dst_line += 1;
				let substituted = self.defines.substitute(line, self.src_line);
				self.output.push_str(&substituted);
			}
			None => {}
		}

		Ok(())
	}

	fn finish(self) -> Result<PassOutput, DirectiveError> {
		if let Some(line) = self.stack.innermost_open() {
			return Err(self.error(DirectiveErrorKind::UnterminatedConditional, line));
		}

		Ok(PassOutput {
			text: self.output,
			defines: self.defines,
			emitted_lines: self.dst_line,
			source_lines: self.src_line,
		})
	}
}

/// Run one preprocessing pass over `text`, starting from `defines`.
///
/// The input is split into lines that keep their terminators. Directive
/// lines are never emitted; other lines are emitted, with `@NAME@` tokens
/// substituted, only while every enclosing conditional is active.
pub fn preprocess_text(
	text: &str,
	ctx: PassContext<'_>,
	defines: DefineTable,
) -> Result<PassOutput, DirectiveError> {
	let mut pass = Pass {
		ctx,
		defines,
		stack: ConditionalStack::new(),
		src_line: 0,
		dst_line: 0,
		output: String::with_capacity(text.len()),
	};

	for line in text.split_inclusive('\n') {
		pass.line(line)?;
	}

	pass.finish()
}

/// Run a pass over `text` with a freshly seeded define table.
pub fn preprocess(module: &str, file: &str, text: &str) -> Result<PassOutput, DirectiveError> {
	preprocess_text(text, PassContext { module, file }, DefineTable::seeded(module, file))
}
