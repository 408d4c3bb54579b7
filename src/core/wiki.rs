//! MediaWiki text helpers exposed to page templates.

use url::form_urlencoded;

const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// Lets long `a/b/c` names wrap by putting a zero-width space after every slash.
pub fn format_link_text(text: String) -> String {
    text.replace('/', &format!("/{}", ZERO_WIDTH_SPACE))
}

/// In-page anchor for a section heading, the way MediaWiki encodes it.
pub fn gen_url(text: String) -> String {
    if text.contains('/') {
        return format!("#{}", text.replace('/', ".2F"));
    }

    let underscored = text.replace(' ', "_");
    let encoded: String = form_urlencoded::byte_serialize(underscored.as_bytes())
        .collect::<String>()
        // form encoding keeps '*' and escapes '~'; anchors want the opposite
        .replace('*', "%2A")
        .replace("%7E", "~");
    format!("#{}", encoded)
}

/// Escapes characters that would split a table cell.
pub fn wiki_cell(text: String) -> String {
    text.replace('|', "&#124;")
}
