use teloxide::types::{MediaKind, Message, MessageKind};

use jobgram_directory::UserProfile;

/// Slash commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    Admin,
    Cancel,
}

/// Inline keyboard button presses, parsed from callback data tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Search,
    Categories,
    ChangeRegion,
    Region(i64),
    Category(String),
    Broadcast,
    Stats,
    BackToMenu,
}

/// One inbound event from the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(Command),
    Button(ButtonAction),
    Text(String),
    Photo { file_id: String, caption: String },
    Video { file_id: String, caption: String },
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        // Commands may carry a bot mention suffix ("/start@my_bot").
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?.split('@').next()?;
        match name {
            "start" => Some(Self::Start),
            "menu" => Some(Self::Menu),
            "admin" => Some(Self::Admin),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl ButtonAction {
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(id) = data.strip_prefix("region_") {
            return id.parse().ok().map(Self::Region);
        }
        if let Some(keyword) = data.strip_prefix("category_") {
            return Some(Self::Category(keyword.to_string()));
        }
        match data {
            "search" => Some(Self::Search),
            "categories" => Some(Self::Categories),
            "change_region" => Some(Self::ChangeRegion),
            "broadcast" => Some(Self::Broadcast),
            "stats" => Some(Self::Stats),
            "back_to_menu" => Some(Self::BackToMenu),
            _ => None,
        }
    }

    /// The wire tag this action is carried as in callback data.
    pub fn tag(&self) -> String {
        match self {
            Self::Search => "search".into(),
            Self::Categories => "categories".into(),
            Self::ChangeRegion => "change_region".into(),
            Self::Region(id) => format!("region_{id}"),
            Self::Category(keyword) => format!("category_{keyword}"),
            Self::Broadcast => "broadcast".into(),
            Self::Stats => "stats".into(),
            Self::BackToMenu => "back_to_menu".into(),
        }
    }
}

impl InboundEvent {
    /// Classify a Telegram message. Returns `None` for media kinds this bot
    /// has no use for (stickers, voice, locations, ...).
    pub fn from_message(msg: &Message) -> Option<Self> {
        let MessageKind::Common(ref common) = msg.kind else {
            return None;
        };
        match &common.media_kind {
            MediaKind::Text(t) => match Command::parse(&t.text) {
                Some(command) => Some(Self::Command(command)),
                None => Some(Self::Text(t.text.clone())),
            },
            MediaKind::Photo(p) => {
                // Largest size is last in the array.
                let file_id = p.photo.last()?.file.id.clone();
                Some(Self::Photo {
                    file_id,
                    caption: p.caption.clone().unwrap_or_default(),
                })
            },
            MediaKind::Video(v) => Some(Self::Video {
                file_id: v.video.file.id.clone(),
                caption: v.caption.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

/// Extract the sender's profile fields from a message.
pub fn sender_profile(msg: &Message) -> Option<UserProfile> {
    msg.from.as_ref().map(|user| UserProfile {
        user_id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn message(payload: serde_json::Value) -> Message {
        let mut base = json!({
            "message_id": 1,
            "date": 1,
            "chat": { "id": 42, "type": "private", "first_name": "Alice" },
            "from": {
                "id": 1001,
                "is_bot": false,
                "first_name": "Alice",
                "last_name": "Smith",
                "username": "alice"
            }
        });
        base.as_object_mut()
            .unwrap()
            .extend(payload.as_object().unwrap().clone());
        serde_json::from_value(base).expect("deserialize test message")
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/menu extra"), Some(Command::Menu));
        assert_eq!(Command::parse("/admin@job_bot"), Some(Command::Admin));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse("plain text"), None);
    }

    #[test]
    fn parses_button_tags() {
        assert_eq!(ButtonAction::parse("search"), Some(ButtonAction::Search));
        assert_eq!(ButtonAction::parse("region_66"), Some(ButtonAction::Region(66)));
        assert_eq!(
            ButtonAction::parse("category_driver"),
            Some(ButtonAction::Category("driver".into()))
        );
        assert_eq!(ButtonAction::parse("region_abc"), None);
        assert_eq!(ButtonAction::parse("bogus"), None);
    }

    #[test]
    fn tag_roundtrip() {
        for action in [
            ButtonAction::Search,
            ButtonAction::Region(120),
            ButtonAction::Category("tutor".into()),
            ButtonAction::BackToMenu,
        ] {
            assert_eq!(ButtonAction::parse(&action.tag()), Some(action));
        }
    }

    #[test]
    fn text_message_classified() {
        let msg = message(json!({ "text": "driver" }));
        assert_eq!(
            InboundEvent::from_message(&msg),
            Some(InboundEvent::Text("driver".into()))
        );
    }

    #[test]
    fn command_message_classified() {
        let msg = message(json!({ "text": "/start" }));
        assert_eq!(
            InboundEvent::from_message(&msg),
            Some(InboundEvent::Command(Command::Start))
        );
    }

    #[test]
    fn photo_takes_largest_size_and_caption() {
        let msg = message(json!({
            "photo": [
                { "file_id": "small", "file_unique_id": "u1", "width": 90, "height": 90, "file_size": 100 },
                { "file_id": "large", "file_unique_id": "u2", "width": 800, "height": 800, "file_size": 900 }
            ],
            "caption": "look"
        }));
        assert_eq!(
            InboundEvent::from_message(&msg),
            Some(InboundEvent::Photo {
                file_id: "large".into(),
                caption: "look".into()
            })
        );
    }

    #[test]
    fn unsupported_media_ignored() {
        let msg = message(json!({
            "location": { "latitude": 1.0, "longitude": 2.0 }
        }));
        assert_eq!(InboundEvent::from_message(&msg), None);
    }

    #[test]
    fn sender_profile_extracted() {
        let msg = message(json!({ "text": "hi" }));
        let profile = sender_profile(&msg).expect("profile");
        assert_eq!(profile.user_id, 1001);
        assert_eq!(profile.username.as_deref(), Some("alice"));
        assert_eq!(profile.first_name.as_deref(), Some("Alice"));
    }
}
