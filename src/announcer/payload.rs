//! Renderable announcement content.
//!
//! An [`AnnouncementPayload`] is the transport independent description of an
//! announcement. [`AnnouncementPayload::to_markdown`] turns it into the
//! Markdown body sent to the chat room.

use std::fmt;

/// RGB accent color of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Header block naming the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub icon_url: String,
}

/// A labeled value displayed in the announcement body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    pub name: String,
    pub value: String,
    /// Whether the field may share its line with its neighbours
    pub inline: bool,
}

impl PayloadField {
    pub fn new(name: &str, value: &str, inline: bool) -> Self {
        PayloadField {
            name: name.to_owned(),
            value: value.to_owned(),
            inline,
        }
    }
}

/// Everything needed to display one announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementPayload {
    pub author: Author,
    /// Title displayed as a link to `url`
    pub title: String,
    pub url: String,
    pub description: String,
    /// Fields in display order
    pub fields: Vec<PayloadField>,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub color: Color,
    pub footer: String,
}

impl AnnouncementPayload {
    /// Returns the value of the field named `name`, if any.
    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Renders the payload as Markdown.
    ///
    /// Inline fields are grouped on a single line separated by `|`, other
    /// fields get a line of their own.
    pub fn to_markdown(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!(
                "<font color=\"{}\">**{}**</font>",
                self.color, self.author.name
            ),
            format!("### [{}]({})", self.title, self.url),
        ];

        if !self.description.is_empty() {
            lines.push(self.description.clone());
        }

        let mut inline_group: Vec<String> = Vec::new();
        for field in &self.fields {
            let rendered = format!("**{}**: {}", field.name, field.value);
            if field.inline {
                inline_group.push(rendered);
                continue;
            }
            if !inline_group.is_empty() {
                lines.push(inline_group.join(" | "));
                inline_group.clear();
            }
            lines.push(rendered);
        }
        if !inline_group.is_empty() {
            lines.push(inline_group.join(" | "));
        }

        lines.push(format!("[Image]({})", self.image_url));
        lines.push(format!("> {}", self.footer));

        lines.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_payload() -> AnnouncementPayload {
        AnnouncementPayload {
            author: Author {
                name: "de_alpha".to_string(),
                icon_url: "https://example.com/icon.png".to_string(),
            },
            title: "--Workshop Link--".to_string(),
            url: "https://workshop.example.com/1".to_string(),
            description: "Small map".to_string(),
            fields: vec![
                PayloadField::new("Creator", "Alice", true),
                PayloadField::new("Moderator", "Bob", true),
                PayloadField::new("More Images", "https://imgur.com/a", false),
            ],
            image_url: "https://example.com/featured.png".to_string(),
            thumbnail_url: None,
            color: Color(71, 126, 159),
            footer: "https://example.com/playtesting/".to_string(),
        }
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color(71, 126, 159).to_string(), "#477e9f");
        assert_eq!(Color(214, 91, 47).to_string(), "#d65b2f");
    }

    #[test]
    fn test_field_lookup() {
        let payload = create_test_payload();
        assert_eq!(payload.field("Creator"), Some("Alice"));
        assert_eq!(payload.field("Where?"), None);
    }

    #[test]
    fn test_to_markdown_groups_inline_fields() {
        let markdown = create_test_payload().to_markdown();

        assert!(markdown.contains("<font color=\"#477e9f\">**de_alpha**</font>"));
        assert!(markdown.contains("### [--Workshop Link--](https://workshop.example.com/1)"));
        assert!(markdown.contains("**Creator**: Alice | **Moderator**: Bob"));
        assert!(markdown.contains("\n\n**More Images**: https://imgur.com/a"));
        assert!(markdown.ends_with("> https://example.com/playtesting/"));
    }
}
