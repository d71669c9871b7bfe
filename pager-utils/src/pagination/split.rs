//! Splitting long text into embed fields across several pages.

use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::EmbedFieldBuilder;

/// Largest field value Discord accepts, in characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Zero-width space, used as an invisible field title.
pub const BLANK_FIELD_TITLE: &str = "\u{200b}";

/// Split text into chunks of at most [`FIELD_VALUE_LIMIT`] characters.
///
/// Text is cut after every `.` and newline, and consecutive pieces are
/// packed together while they fit. A single piece longer than the limit is
/// hard-split on character boundaries.
pub fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in text.split_inclusive(['.', '\n']) {
        for part in hard_split(piece) {
            let part_len = part.chars().count();

            if current_len + part_len > FIELD_VALUE_LIMIT && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            current.push_str(part);
            current_len += part_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn hard_split(piece: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = piece;

    while let Some((cut, _)) = rest.char_indices().nth(FIELD_VALUE_LIMIT) {
        let (head, tail) = rest.split_at(cut);
        parts.push(head);
        rest = tail;
    }

    if !rest.is_empty() {
        parts.push(rest);
    }

    parts
}

/// Lay long text out as fields on copies of `template`, `per_page` fields
/// per page.
///
/// The first field on each page is titled `field_title`; the others get an
/// invisible title so they read as one continuous block.
pub fn split_fields(
    text: &str,
    template: &Embed,
    per_page: usize,
    field_title: &str,
) -> Vec<Embed> {
    let per_page = per_page.max(1);

    split_chunks(text)
        .chunks(per_page)
        .map(|group| {
            let mut page = template.clone();
            page.fields.extend(group.iter().enumerate().map(|(index, chunk)| {
                let title = if index == 0 {
                    field_title
                } else {
                    BLANK_FIELD_TITLE
                };
                EmbedFieldBuilder::new(title, chunk.clone()).build()
            }));
            page
        })
        .collect()
}
