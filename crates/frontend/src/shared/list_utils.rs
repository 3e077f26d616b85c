//! Generic list helpers: search, sorting, match highlighting
use leptos::prelude::*;
use std::cmp::Ordering;
use std::ops::Range;

/// Types that can be matched against a search term
pub trait Searchable {
    /// Case-insensitive substring match; `filter` is already lowercase
    fn matches_filter(&self, filter: &str) -> bool;

    /// Value of the given field, used for highlighting
    fn get_field_value(&self, field: &str) -> Option<String>;
}

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive substring test
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Sorts a list by the given field
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Keeps the items matching the search term; an empty term keeps everything
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let filter = filter.to_lowercase();
    if filter.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches_filter(&filter))
        .cloned()
        .collect()
}

/// Byte ranges of `text` matching `filter` case-insensitively.
///
/// Lowercasing runs per character so every range lands on a char boundary of
/// `text`, even where a character changes byte length when lowercased.
pub fn match_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    let filter_lower = filter.to_lowercase();
    if filter_lower.is_empty() {
        return Vec::new();
    }

    // offsets[i] is the byte in `text` where lowered byte i starts a character
    let mut lowered = String::with_capacity(text.len());
    let mut offsets: Vec<Option<usize>> = Vec::with_capacity(text.len() + 1);
    for (pos, ch) in text.char_indices() {
        offsets.push(Some(pos));
        lowered.extend(ch.to_lowercase());
        offsets.resize(lowered.len(), None);
    }
    offsets.push(Some(text.len()));

    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = lowered[from..].find(&filter_lower) {
        let start = from + pos;
        let end = start + filter_lower.len();
        match (offsets[start], offsets[end]) {
            (Some(s), Some(e)) => {
                ranges.push(s..e);
                from = end;
            }
            // match splits the lowercase form of a single character
            _ => {
                from = start + lowered[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    ranges
}

/// Highlights matches in text (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    for range in ranges {
        if range.start > last_pos {
            parts.push(view! { <span>{text[last_pos..range.start].to_string()}</span> }.into_any());
        }
        last_pos = range.end;
        parts.push(view! {
            <mark class="search-match">{text[range].to_string()}</mark>
        }.into_any());
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS class of a column's sort indicator
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-icon table__sort-icon--active"
    } else {
        "table__sort-icon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.0, filter)
        }

        fn get_field_value(&self, field: &str) -> Option<String> {
            (field == "name").then(|| self.0.to_string())
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "n" => self.1.cmp(&other.1),
                _ => self.0.cmp(other.0),
            }
        }
    }

    #[test]
    fn test_filter_empty_term_keeps_all() {
        let rows = vec![Row("a", 1), Row("b", 2)];
        assert_eq!(filter_list(&rows, ""), rows);
    }

    #[test]
    fn test_filter_single_char_is_applied() {
        let rows = vec![Row("Alpha", 1), Row("Beta", 2)];
        assert_eq!(filter_list(&rows, "L"), vec![Row("Alpha", 1)]);
    }

    #[test]
    fn test_sort_both_directions() {
        let mut rows = vec![Row("b", 2), Row("a", 3), Row("c", 1)];
        sort_list(&mut rows, "n", true);
        assert_eq!(rows.iter().map(|r| r.1).collect::<Vec<_>>(), vec![1, 2, 3]);
        sort_list(&mut rows, "name", false);
        assert_eq!(rows.iter().map(|r| r.0).collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_match_ranges_ascii() {
        assert_eq!(match_ranges("Acme Corp acme", "ACME"), vec![0..4, 10..14]);
        assert!(match_ranges("Acme", "").is_empty());
        assert!(match_ranges("Acme", "zzz").is_empty());
    }

    #[test]
    fn test_match_ranges_with_length_changing_lowercase() {
        // KELVIN SIGN shrinks to 'k', DOTTED CAPITAL I grows to "i\u{307}"
        let text = "\u{212A}\u{130}\u{130} Deal";
        assert_eq!(text.to_lowercase().len(), text.len());

        let ranges = match_ranges(text, "i");
        assert!(ranges.is_empty() || ranges.iter().all(|r| text.get(r.clone()).is_some()));

        assert_eq!(match_ranges(text, "k"), vec![0..3]);
        assert_eq!(match_ranges(text, "deal"), vec![8..12]);
        assert_eq!(match_ranges("\u{130}stanbul", "i\u{307}s"), vec![0..3]);
    }

    #[test]
    fn test_highlight_does_not_split_characters() {
        let _ = highlight_matches("\u{212A}\u{130}\u{130} Deal", "i");
        let _ = highlight_matches("\u{212A}elvin", "kel");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("title", "title", true), " ▲");
        assert_eq!(get_sort_indicator("title", "title", false), " ▼");
        assert_eq!(get_sort_indicator("title", "state", true), " ⇅");
    }
}
