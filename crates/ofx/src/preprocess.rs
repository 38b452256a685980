//! One-off textual fix-ups for known-bad bank exports.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::bytes::Regex;

// Some banks drop the <BANKACCTFROM> open tag between the currency element
// and the account block. Reinserted before tokenizing; should become
// unnecessary as upstream exports are fixed.
static MISSING_BANKACCTFROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(</CURDEF>\s+)(<BANKID>)").expect("pattern is valid"));

pub(crate) fn preprocess(data: &[u8]) -> Cow<'_, [u8]> {
    MISSING_BANKACCTFROM.replace_all(data, &b"${1}<BANKACCTFROM>$2"[..])
}

#[cfg(test)]
mod tests {
    use super::preprocess;

    #[test]
    fn missing_bankacctfrom_open_tag_is_reinserted() {
        let data = b"<CURDEF>USD</CURDEF>\n<BANKID>111000025</BANKID>";
        assert_eq!(
            preprocess(data).as_ref(),
            &b"<CURDEF>USD</CURDEF>\n<BANKACCTFROM><BANKID>111000025</BANKID>"[..]
        );
    }

    #[test]
    fn well_formed_account_blocks_are_untouched() {
        let data = b"<CURDEF>USD</CURDEF>\n<BANKACCTFROM>\n<BANKID>111000025</BANKID>";
        assert_eq!(preprocess(data).as_ref(), &data[..]);
    }
}
