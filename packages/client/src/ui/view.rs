//! Pure view rendering.
//!
//! Every function here maps state or an event to a string; only the
//! runner touches the terminal. Untrusted text (message bodies, user
//! names) is sanitized before rendering, then URL-linking is applied on
//! the sanitized text.

use std::sync::OnceLock;

use regex::Regex;

use idobata_shared::time::format_clock_time;

use crate::domain::User;
use crate::usecase::{ReceivedMessage, SessionUpdate};

// Greedy non-whitespace match, the same shape the servers' web clients use.
fn url_regex() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| Regex::new(r"https?://\S+").expect("URL pattern is a valid regex"))
}

/// Strip control characters from untrusted text.
///
/// Message bodies and user names come from other clients; a raw ESC
/// would let them inject terminal escape sequences into the rendered
/// output. Tabs and newlines survive.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Wrap `http(s)://` URLs in OSC 8 hyperlinks.
///
/// Everything outside a URL passes through as-is. Call on sanitized text
/// only; linkification adds the output's only escape sequences.
pub fn linkify(text: &str) -> String {
    url_regex()
        .replace_all(text, "\u{1b}]8;;$0\u{1b}\\$0\u{1b}]8;;\u{1b}\\")
        .to_string()
}

/// Render one chat message block: local timestamp, `You` or the sender
/// name, and the linkified body.
pub fn render_message(message: &ReceivedMessage, timestamp_millis: i64) -> String {
    let time = format_clock_time(timestamp_millis);
    let header = if message.own {
        "You".to_string()
    } else {
        sanitize(&message.sender.name)
    };
    let body = linkify(&sanitize(&message.text));
    format!("[{time}] {header}: {body}")
}

/// Render the participant list.
pub fn render_roster(users: &[User]) -> String {
    if users.is_empty() {
        return "participants: (none)".to_string();
    }
    let names: Vec<String> = users.iter().map(|u| sanitize(&u.name)).collect();
    format!("participants ({}): {}", users.len(), names.join(", "))
}

/// Render an inline error in the nickname phase.
pub fn render_inline_error(reason: &str) -> String {
    format!("error: {}", sanitize(reason))
}

/// Render one session update; `None` means nothing to show.
pub fn render_update(update: &SessionUpdate, timestamp_millis: i64) -> Option<String> {
    match update {
        SessionUpdate::RosterReplaced(users) => Some(render_roster(users)),
        SessionUpdate::ParticipantJoined(user) => {
            Some(format!("* {} joined", sanitize(&user.name)))
        }
        SessionUpdate::ParticipantLeft(user) => Some(format!("* {} left", sanitize(&user.name))),
        SessionUpdate::MessageReceived(message) => Some(render_message(message, timestamp_millis)),
        SessionUpdate::Registered(user) => Some(format!("registered as {}", sanitize(&user.name))),
        SessionUpdate::RegistrationRejected(reason) => Some(render_inline_error(reason)),
        SessionUpdate::ConnectionLost(reason) => {
            Some(format!("connection error: {}", sanitize(reason)))
        }
        SessionUpdate::Ignored => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn user(id: &str, name: &str) -> User {
        User::new(UserId::new(id.to_string()).unwrap(), name.to_string())
    }

    fn message_from(sender: User, text: &str, own: bool) -> ReceivedMessage {
        ReceivedMessage {
            sender,
            text: text.to_string(),
            own,
        }
    }

    #[test]
    fn test_linkify_url_only_message() {
        // テスト項目: URL だけの本文がハイパーリンクとして描画される
        // when (操作):
        let rendered = linkify("https://example.com");

        // then (期待する結果): OSC 8 で包まれ、URL 本文も残る
        assert_eq!(
            rendered,
            "\u{1b}]8;;https://example.com\u{1b}\\https://example.com\u{1b}]8;;\u{1b}\\"
        );
    }

    #[test]
    fn test_linkify_leaves_plain_text_unmodified() {
        // テスト項目: URL を含まない本文はそのまま描画される
        // when (操作):
        let rendered = linkify("hello there, no links here");

        // then (期待する結果):
        assert_eq!(rendered, "hello there, no links here");
    }

    #[test]
    fn test_linkify_url_inside_text() {
        // テスト項目: 本文中の URL だけがリンクになり周囲の文字は残る
        // when (操作):
        let rendered = linkify("visit https://example.com now");

        // then (期待する結果):
        assert!(rendered.starts_with("visit "));
        assert!(rendered.ends_with(" now"));
        assert!(rendered.contains("\u{1b}]8;;https://example.com\u{1b}\\"));
    }

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        // テスト項目: 制御文字（ESC を含む）が描画前に除去される
        // when (操作):
        let sanitized = sanitize("evil\u{1b}]8;;https://phish.example\u{1b}\\text\u{7}");

        // then (期待する結果): ESC と BEL が消え、他の文字は残る
        assert_eq!(sanitized, "evil]8;;https://phish.example\\text");
    }

    #[test]
    fn test_sanitize_keeps_tabs_and_newlines() {
        // テスト項目: タブと改行はそのまま残る
        // when (操作):
        let sanitized = sanitize("a\tb\nc");

        // then (期待する結果):
        assert_eq!(sanitized, "a\tb\nc");
    }

    #[test]
    fn test_render_message_other_with_url() {
        // テスト項目: 他人のメッセージは送信者名のヘッダとリンク付き本文で描画される
        // given (前提条件): current user id=1、Bob (id=2) からのメッセージ
        let message = message_from(
            user("2", "Bob"),
            "visit https://example.com now",
            false,
        );

        // when (操作):
        let rendered = render_message(&message, 0);

        // then (期待する結果):
        assert!(rendered.contains("Bob: "));
        assert!(!rendered.contains("You"));
        assert!(rendered.contains("visit "));
        assert!(rendered.contains("\u{1b}]8;;https://example.com\u{1b}\\"));
        assert!(rendered.contains(" now"));
    }

    #[test]
    fn test_render_message_own_shows_you() {
        // テスト項目: 自分のメッセージのヘッダは You になる
        // given (前提条件):
        let message = message_from(user("1", "alice"), "hi", true);

        // when (操作):
        let rendered = render_message(&message, 0);

        // then (期待する結果):
        assert!(rendered.contains("You: hi"));
        assert!(!rendered.contains("alice"));
    }

    #[test]
    fn test_render_message_sanitizes_sender_name() {
        // テスト項目: 送信者名の制御文字も除去される
        // given (前提条件):
        let message = message_from(user("2", "Bo\u{1b}b"), "hi", false);

        // when (操作):
        let rendered = render_message(&message, 0);

        // then (期待する結果):
        assert!(rendered.contains("Bob: hi"));
    }

    #[test]
    fn test_render_roster() {
        // テスト項目: 参加者リストが人数と名前で描画される
        // given (前提条件):
        let users = vec![user("1", "Alice"), user("2", "Bob")];

        // when (操作):
        let rendered = render_roster(&users);

        // then (期待する結果):
        assert_eq!(rendered, "participants (2): Alice, Bob");
    }

    #[test]
    fn test_render_roster_empty() {
        // テスト項目: 空のロースターの描画
        // when (操作):
        let rendered = render_roster(&[]);

        // then (期待する結果):
        assert_eq!(rendered, "participants: (none)");
    }

    #[test]
    fn test_render_update_ignored_renders_nothing() {
        // テスト項目: Ignored は何も描画しない
        // when (操作):
        let rendered = render_update(&SessionUpdate::Ignored, 0);

        // then (期待する結果):
        assert!(rendered.is_none());
    }

    #[test]
    fn test_render_update_join_and_leave() {
        // テスト項目: join/leave の通知行が描画される
        // when (操作) / then (期待する結果):
        assert_eq!(
            render_update(&SessionUpdate::ParticipantJoined(user("2", "Bob")), 0).unwrap(),
            "* Bob joined"
        );
        assert_eq!(
            render_update(&SessionUpdate::ParticipantLeft(user("2", "Bob")), 0).unwrap(),
            "* Bob left"
        );
    }
}
