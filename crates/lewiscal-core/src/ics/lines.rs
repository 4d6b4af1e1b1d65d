//! Logical line iteration over folded ICS text.
//!
//! RFC 5545 lets a producer wrap a long content line by inserting a line break
//! followed by a single space or tab. [`unfold`] undoes that wrapping lazily.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Split;

/// A restartable view of the logical lines in a piece of ICS text.
///
/// Cheap to copy; every call to [`LogicalLines::iter`] starts over from the
/// first line.
#[derive(Debug, Clone, Copy)]
pub struct LogicalLines<'a> {
    text: &'a str,
}

/// Returns the logical lines of `text`.
pub fn unfold(text: &str) -> LogicalLines<'_> {
    LogicalLines { text }
}

impl<'a> LogicalLines<'a> {
    /// Returns an iterator over the unfolded lines.
    pub fn iter(&self) -> Unfold<'a> {
        Unfold {
            physical: self.text.split('\n').peekable(),
        }
    }
}

impl<'a> IntoIterator for LogicalLines<'a> {
    type Item = Cow<'a, str>;
    type IntoIter = Unfold<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator yielding unfolded lines.
///
/// Lines are borrowed from the input unless a continuation had to be joined.
#[derive(Debug, Clone)]
pub struct Unfold<'a> {
    physical: Peekable<Split<'a, char>>,
}

impl<'a> Iterator for Unfold<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let head = strip_cr(self.physical.next()?).trim_start();
            let mut line = Cow::Borrowed(head);

            while let Some(continuation) = self
                .physical
                .next_if(|next| is_continuation(next))
                .map(strip_cr)
            {
                // skip the single fold marker, keep everything after it
                line.to_mut().push_str(&continuation[1..]);
            }

            let len = line.trim_end().len();
            match &mut line {
                Cow::Borrowed(s) => *s = &s[..len],
                Cow::Owned(s) => s.truncate(len),
            }

            if line.is_empty() {
                continue;
            }
            return Some(line);
        }
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<String> {
        unfold(text).iter().map(Cow::into_owned).collect()
    }

    #[test]
    fn splits_on_crlf_and_lf() {
        assert_eq!(
            collect("BEGIN:VEVENT\r\nUID:1\nEND:VEVENT\r\n"),
            vec!["BEGIN:VEVENT", "UID:1", "END:VEVENT"]
        );
    }

    #[test]
    fn joins_space_continuation() {
        assert_eq!(collect("SUMMARY:Long Ti\n tle"), vec!["SUMMARY:Long Title"]);
    }

    #[test]
    fn joins_tab_continuation() {
        assert_eq!(collect("SUMMARY:Long Ti\r\n\ttle\r\n"), vec!["SUMMARY:Long Title"]);
    }

    #[test]
    fn joins_multiple_continuations() {
        assert_eq!(
            collect("DESCRIPTION:one\n  two\n three\nUID:x"),
            vec!["DESCRIPTION:one twothree", "UID:x"]
        );
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(
            collect("\r\nBEGIN:VEVENT\r\n   \r\n\r\nEND:VEVENT\r\n\r\n"),
            vec!["BEGIN:VEVENT", "END:VEVENT"]
        );
    }

    #[test]
    fn continuation_after_blank_line_stands_alone() {
        assert_eq!(collect("UID:1\n\n orphan"), vec!["UID:1", "orphan"]);
    }

    #[test]
    fn borrows_unfolded_lines() {
        let text = "UID:1\nSUMMARY:a\n b";
        let lines: Vec<_> = unfold(text).iter().collect();
        assert!(matches!(lines[0], Cow::Borrowed("UID:1")));
        assert!(matches!(lines[1], Cow::Owned(_)));
    }

    #[test]
    fn restartable() {
        let lines = unfold("A:1\nB:2");
        let first: Vec<_> = lines.iter().collect();
        let second: Vec<_> = lines.into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("\r\n\n").is_empty());
    }
}
