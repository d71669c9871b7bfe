use std::num::IntErrorKind;

use crate::error::PaginationError;

/// Reply word that abandons a page-jump prompt.
pub const CANCEL_REPLY: &str = "cancel";

/// What the invoking user answered to a page-jump prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageReply {
    /// The user typed `cancel`.
    Cancel,
    /// A one-based page number. Not yet checked against the page count;
    /// negative numbers collapse to `0` so they fail the range check.
    Page(usize),
}

/// Parse a page-jump reply.
///
/// `cancel` is matched case-insensitively after trimming. Integers too large
/// to represent still count as pages and fail the range check later.
/// Anything that is not an integer is rejected with
/// [`PaginationError::InvalidInput`].
pub fn parse_page_reply(raw: &str) -> Result<PageReply, PaginationError> {
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case(CANCEL_REPLY) {
        return Ok(PageReply::Cancel);
    }

    match trimmed.parse::<i64>() {
        Ok(number) => Ok(PageReply::Page(usize::try_from(number).unwrap_or(0))),
        Err(source)
            if matches!(
                source.kind(),
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
            ) =>
        {
            Ok(PageReply::Page(0))
        }
        Err(_) => Err(PaginationError::InvalidInput {
            input: trimmed.to_owned(),
        }),
    }
}

/// Parse an optional one-based page argument.
///
/// Returns `Some(1)` when absent, `None` when present but not a page number.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().ok().filter(|page| *page >= 1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_ignores_case_and_whitespace() {
        assert_eq!(parse_page_reply("  CanCel \n"), Ok(PageReply::Cancel));
    }

    #[test]
    fn numbers_parse_as_pages() {
        assert_eq!(parse_page_reply("3"), Ok(PageReply::Page(3)));
        assert_eq!(parse_page_reply(" 99 "), Ok(PageReply::Page(99)));
        assert_eq!(parse_page_reply("-4"), Ok(PageReply::Page(0)));
    }

    #[test]
    fn oversized_numbers_are_pages_that_cannot_exist() {
        assert_eq!(
            parse_page_reply("99999999999999999999"),
            Ok(PageReply::Page(0))
        );
        assert_eq!(
            parse_page_reply("-99999999999999999999"),
            Ok(PageReply::Page(0))
        );
        assert!(parse_page_reply("9999999999999999999x").is_err());
    }

    #[test]
    fn words_are_invalid_input() {
        assert_eq!(
            parse_page_reply("abc"),
            Err(PaginationError::InvalidInput {
                input: "abc".to_owned()
            })
        );
        assert!(parse_page_reply("2.5").is_err());
        assert!(parse_page_reply("").is_err());
    }

    #[test]
    fn one_based_page_argument() {
        assert_eq!(parse_one_based_page(None), Some(1));
        assert_eq!(parse_one_based_page(Some("4")), Some(4));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("utility")), None);
    }
}
