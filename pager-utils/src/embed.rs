use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a plain page embed with the bot's standard styling.
///
/// The position footer is not set here; paged embeds compute it at render time.
pub fn build_page_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
        .validate()?
        .build();

    Ok(embed)
}

/// Footer text for a zero-based page index, e.g. `"2/5"`.
pub fn position_footer_text(index: usize, total: usize) -> String {
    format!("{}/{}", index + 1, total)
}

/// Clone a page and stamp it with its position footer.
pub fn with_position_footer(page: &Embed, index: usize, total: usize) -> Embed {
    let mut rendered = page.clone();
    rendered.footer = Some(EmbedFooterBuilder::new(position_footer_text(index, total)).build());
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_is_one_based() {
        assert_eq!(position_footer_text(0, 3), "1/3");
        assert_eq!(position_footer_text(2, 3), "3/3");
    }

    #[test]
    fn stamping_replaces_existing_footer_without_touching_the_source() {
        let page = EmbedBuilder::new()
            .title("Owls")
            .footer(EmbedFooterBuilder::new("source footer").build())
            .build();

        let rendered = with_position_footer(&page, 1, 4);

        assert_eq!(rendered.footer.map(|footer| footer.text).as_deref(), Some("2/4"));
        assert_eq!(
            page.footer.map(|footer| footer.text).as_deref(),
            Some("source footer")
        );
        assert_eq!(rendered.title.as_deref(), Some("Owls"));
    }
}
