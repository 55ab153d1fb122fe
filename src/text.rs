//! Fixed-capacity text helpers.

use heapless::String;

/// Collect `chars` into a `String<N>`, stopping at the first char that does
/// not fit.
pub fn truncated<const N: usize>(chars: impl IntoIterator<Item = char>) -> String<N> {
    let mut out = String::new();
    for c in chars {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept_whole() {
        let s: String<8> = truncated("bob".chars());
        assert_eq!(s.as_str(), "bob");
    }

    #[test]
    fn long_text_is_cut_at_capacity() {
        let s: String<8> = truncated("Bartholomew".chars());
        assert_eq!(s.as_str(), "Bartholo");
    }

    #[test]
    fn multibyte_char_that_does_not_fit_is_dropped_whole() {
        // 7 ASCII bytes leave one byte; 'ë' needs two.
        let s: String<8> = truncated("Chlo-Zoë".chars());
        assert_eq!(s.as_str(), "Chlo-Zo");
    }

    #[test]
    fn mapped_chars_are_collected() {
        let s: String<16> = truncated("a,b".chars().map(|c| if c == ',' { '\n' } else { c }));
        assert_eq!(s.as_str(), "a\nb");
    }
}
