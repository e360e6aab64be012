use chrono::DateTime;
use gallery_core::AppViewModel;
use gallery_engine::PhotoCard;

use super::constants::*;

/// One revealed card, as the terminal page stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card: PhotoCard,
    pub width: u32,
    pub height: u32,
}

/// Renders a card as exactly `CARD_ROWS` lines.
pub fn card_lines(view: &CardView) -> Vec<String> {
    let card = &view.card;
    let author = match card.author_name() {
        Some(name) => format!("by {name} <{}>", card.author_link()),
        None => format!("<{}>", card.author_link()),
    };
    vec![
        format!(
            "#{id:<6} {author}  likes {likes}  {date}",
            id = card.photo_id,
            likes = format_with_commas(card.like_count),
            date = format_timestamp(&card.created_at),
        ),
        format!("        {} [{}x{}]", card.image_url, view.width, view.height),
        format!("        -> {}", card.source_url),
    ]
}

pub fn status_line(view: &AppViewModel, shown: usize) -> String {
    let mut parts = vec![format!("Photos {shown}/{}", view.photo_count)];
    if view.loading {
        parts.push("loading".to_string());
    }
    if view.exhausted {
        parts.push("end of gallery".to_string());
    }
    if view.load_error_visible {
        parts.push(match view.load_error.as_deref() {
            Some(reason) => format!("failed to load photo data: {reason}"),
            None => "failed to load photo data".to_string(),
        });
    }
    parts.join(" | ")
}

pub fn help_line() -> String {
    format!(
        "[{KEY_SCROLL_DOWN}/enter] down  [{KEY_SCROLL_UP}] up  [{KEY_SHUFFLE}] shuffle  [{KEY_TOP}] top  [{KEY_QUIT}] quit"
    )
}

fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::{Service, UserInfo};

    fn card(author: Option<UserInfo>) -> CardView {
        CardView {
            card: PhotoCard {
                photo_id: 7,
                image_url: "https://cdn.example/7.jpg".to_string(),
                source_url: "https://twitter.com/alice/status/7".to_string(),
                author,
                like_count: 12_345,
                created_at: "2022-03-04T05:06:07.000Z".to_string(),
            },
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn known_author_is_named_and_linked() {
        let lines = card_lines(&card(Some(UserInfo {
            service: Service::Twitter,
            user_name: Some("alice".to_string()),
            profile_url: "https://twitter.com/alice/".to_string(),
        })));
        assert_eq!(lines.len(), CARD_ROWS as usize);
        assert_eq!(
            lines[0],
            "#7      by alice <https://twitter.com/alice/>  likes 12,345  2022-03-04 05:06"
        );
        assert_eq!(lines[1], "        https://cdn.example/7.jpg [640x480]");
    }

    #[test]
    fn unknown_author_falls_back_to_source_url() {
        let lines = card_lines(&card(None));
        assert!(lines[0].starts_with("#7      <https://twitter.com/alice/status/7>"));
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn status_line_lists_flags() {
        let view = AppViewModel {
            photo_count: 30,
            exhausted: true,
            load_error_visible: true,
            ..AppViewModel::default()
        };
        assert_eq!(
            status_line(&view, 30),
            "Photos 30/30 | end of gallery | failed to load photo data"
        );
    }

    #[test]
    fn status_line_includes_failure_reason() {
        let view = AppViewModel {
            exhausted: true,
            load_error_visible: true,
            load_error: Some("http status 404".to_string()),
            ..AppViewModel::default()
        };
        assert_eq!(
            status_line(&view, 0),
            "Photos 0/0 | end of gallery | failed to load photo data: http status 404"
        );
    }
}
