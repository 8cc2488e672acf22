use std::ops::Range;

/// Номер символа (не байта) в строке.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CharIndex(pub usize);

/// Переводит байтовое смещение в номер символа. Смещение за концом строки даёт длину строки в символах.
pub fn char_index(s: &str, byte: usize) -> CharIndex {
	CharIndex(s.char_indices().take_while(|(index, _)| *index < byte).count())
}

/// Переводит байтовый диапазон в диапазон символов. `None`, если границы диапазона не попадают на границы символов.
pub fn get_char_range(s: &str, range: Range<usize>) -> Option<Range<CharIndex>> {
	let mut iter = s
		.char_indices()
		.enumerate()
		.map(|(char_position, (index, _))| (CharIndex(char_position), index))
		.chain(std::iter::once((CharIndex(s.chars().count()), s.len())));
	let start = iter.find(|(_, index)| *index == range.start)?.0;
	if range.end == range.start {
		return Some(start..start);
	}
	let end = iter.find(|(_, index)| *index == range.end)?.0;
	Some(start..end)
}
