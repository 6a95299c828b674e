use crate::ConfigError;

/// Genre listing the crawl starts from when no `start` URL is given.
pub const DEFAULT_START_URL: &str = "https://itunes.apple.com/us/genre/ios-shopping/id6024?mt=8";

/// Alphabetic index buckets in storefront order. `*` collects names that do
/// not start with a Latin letter.
pub const LETTER_BUCKETS: [char; 27] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '*',
];

/// Start-up options that choose the traversal root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Listing URL the crawl starts from.
    pub start: String,
    /// First alphabetic bucket to sweep (inclusive).
    pub start_letter: String,
    /// Last alphabetic bucket to sweep (inclusive).
    pub end_letter: String,
    /// Crawl only the popularity-ranked listing at `start`, skipping the sweep.
    pub popular: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_URL.to_owned(),
            start_letter: "A".to_owned(),
            end_letter: "Z".to_owned(),
            popular: false,
        }
    }
}

impl CrawlOptions {
    /// Returns the buckets between `start_letter` and `end_letter`, inclusive.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidLetter`] if either bound is not a bucket letter.
    /// - [`ConfigError::EmptyLetterRange`] if `end_letter` precedes `start_letter`.
    pub fn letter_range(&self) -> Result<&'static [char], ConfigError> {
        let start = bucket_index(&self.start_letter)?;
        let end = bucket_index(&self.end_letter)?;
        if end < start {
            return Err(ConfigError::EmptyLetterRange {
                start: LETTER_BUCKETS[start],
                end: LETTER_BUCKETS[end],
            });
        }
        Ok(&LETTER_BUCKETS[start..=end])
    }
}

/// Position of a single-character bucket name in [`LETTER_BUCKETS`].
fn bucket_index(letter: &str) -> Result<usize, ConfigError> {
    let mut chars = letter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(ConfigError::InvalidLetter(letter.to_owned()));
    };
    LETTER_BUCKETS
        .iter()
        .position(|&b| b == c)
        .ok_or_else(|| ConfigError::InvalidLetter(letter.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(start: &str, end: &str) -> CrawlOptions {
        CrawlOptions {
            start_letter: start.to_owned(),
            end_letter: end.to_owned(),
            ..CrawlOptions::default()
        }
    }

    #[test]
    fn default_range_covers_a_through_z() {
        let range = CrawlOptions::default().letter_range().unwrap();
        assert_eq!(range.len(), 26);
        assert_eq!(range.first(), Some(&'A'));
        assert_eq!(range.last(), Some(&'Z'));
    }

    #[test]
    fn range_is_inclusive() {
        assert_eq!(options("A", "C").letter_range().unwrap(), &['A', 'B', 'C']);
    }

    #[test]
    fn single_letter_range() {
        assert_eq!(options("Q", "Q").letter_range().unwrap(), &['Q']);
    }

    #[test]
    fn other_bucket_is_reachable() {
        assert_eq!(options("Y", "*").letter_range().unwrap(), &['Y', 'Z', '*']);
    }

    #[test]
    fn lowercase_letter_is_rejected() {
        let err = options("a", "C").letter_range().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLetter(ref l) if l == "a"));
    }

    #[test]
    fn multi_char_letter_is_rejected() {
        let err = options("A", "CD").letter_range().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLetter(ref l) if l == "CD"));
    }

    #[test]
    fn empty_letter_is_rejected() {
        let err = options("", "C").letter_range().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLetter(_)));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = options("D", "B").letter_range().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyLetterRange {
                start: 'D',
                end: 'B'
            }
        ));
    }
}
