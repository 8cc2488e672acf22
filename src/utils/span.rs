use annotate_snippets::{
	display_list::{DisplayList, FormatOptions},
	snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};
use itertools::Itertools;
use std::fmt::{self, Debug, Display};
use std::ops::Range;

use crate::utils::char_index::char_index;

/// Диапазон в символах (не в байтах) исходной строки.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlobalSpan(pub Range<usize>);

impl GlobalSpan {
	pub fn at(position: usize) -> Self {
		GlobalSpan(position..position)
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spanned<T> {
	pub span: GlobalSpan,
	pub inner: T,
}

impl<T> Spanned<T> {
	pub fn new(t: T, span: GlobalSpan) -> Self {
		Spanned {
			span,
			inner: t,
		}
	}
}

impl<T: Display> Display for Spanned<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} at position {}", self.inner, self.span.0.start)
	}
}

impl<T: Display + Debug> std::error::Error for Spanned<T> {}

impl<T: Display> Spanned<T> {
	/// Ошибка, подчёркнутая в строке, из которой она получена.
	pub fn render_snippet(&self, string: &str, color: bool) -> String {
		render_snippet(string, &self.span, &self.inner.to_string(), None, color)
	}
}

/// Однострочный `snippet` с подчёркнутым диапазоном.
pub fn render_snippet(string: &str, span: &GlobalSpan, title: &str, footer: Option<&str>, color: bool) -> String {
	// Пробел в конце, чтобы было что подчеркнуть, если ошибка в конце строки.
	let source = format!("{} ", string.trim_end_matches(|c| c == '\n' || c == '\r'));
	let length = source.chars().count();
	let start = span.0.start.min(length - 1);
	let end = span.0.end.max(start + 1).min(length);

	let snippet = Snippet {
		title: Some(Annotation {
			label: Some(title),
			id: None,
			annotation_type: AnnotationType::Error,
		}),
		footer: footer
			.map(|label| Annotation {
				label: Some(label),
				id: None,
				annotation_type: AnnotationType::Note,
			})
			.into_iter()
			.collect(),
		slices: vec![
			Slice {
				source: &source,
				line_start: 1,
				origin: None,
				fold: false,
				annotations: vec![
					SourceAnnotation {
						label: "",
						annotation_type: AnnotationType::Error,
						range: (start, end),
					},
				],
			},
		],
		opt: FormatOptions {
			color,
			..Default::default()
		},
	};
	DisplayList::from(snippet).to_string()
}

/// Ошибка `rust-peg` в виде диапазона и списка ожидаемых токенов.
pub fn peg_error_to_spanned(err: &peg::error::ParseError<peg::str::LineCol>, string: &str) -> Spanned<String> {
	let position = char_index(string, err.location.offset).0;
	let expected = err.expected
		.tokens()
		.sorted()
		.join(", ");
	Spanned::new(expected, GlobalSpan(position..position + 1))
}
