//! Line commands and result rendering for the interactive prompt.

use std::fmt::Write as _;

use scout_project::ProjectItem;

pub const HELP: &str = "\
type text          search as you type (debounced)
:now TEXT          search immediately
:cancel            drop the pending and in-flight search
:detail ID         show one project
:help              this text
:quit              exit
";

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Search(String),
	Now(String),
	Cancel,
	Detail(u64),
	Help,
	Quit,
	Invalid(String),
}

impl Command {
	/// Lines starting with `:` are commands; anything else is search input.
	pub fn parse(line: &str) -> Self {
		let Some(rest) = line.trim_start().strip_prefix(':') else {
			return Self::Search(line.to_owned());
		};

		let (name, arg) = match rest.split_once(char::is_whitespace) {
			Some((name, arg)) => (name, arg.trim()),
			None => (rest.trim_end(), ""),
		};

		match name {
			"now" | "n" => Self::Now(arg.to_owned()),
			"cancel" | "c" => Self::Cancel,
			"detail" | "d" => match arg.parse() {
				Ok(id) => Self::Detail(id),
				Err(_) => Self::Invalid(format!("expected a numeric project id, got '{arg}'")),
			},
			"help" | "h" => Self::Help,
			"quit" | "q" => Self::Quit,
			other => Self::Invalid(format!("unknown command ':{other}' (try :help)")),
		}
	}
}

/// Renders one delivered result set.
pub fn render_results(keyword: &str, rows: &[ProjectItem]) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "{} result(s) for '{keyword}'", rows.len());
	for row in rows {
		let _ = writeln!(out, "  [{:>4}] {}  {}", row.id, row.title, row.date);
	}
	out
}

pub fn render_detail(item: &ProjectItem) -> String {
	format!("#{} {} ({})\n  {}\n  {}\n", item.id, item.title, item.date, item.summary, item.details)
}
