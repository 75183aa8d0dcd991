use super::tagged::{decode_payload, TaggedObject, TYPE_KEY};
use super::{Color, DatabaseId, PageId, PartialUser};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The kind of rich text content.
///
/// Each variant carries its specific data: you can't have a "mention" type
/// with no mention data, or an "equation" type with no expression. Kinds
/// this crate does not know are kept verbatim in `Unsupported`.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextType {
    Text {
        content: String,
        link: Option<Link>,
    },
    Mention(Mention),
    Equation(EquationData),
    Unsupported {
        kind: String,
        payload: Option<Value>,
    },
}

impl RichTextType {
    pub fn kind(&self) -> &str {
        match self {
            RichTextType::Text { .. } => "text",
            RichTextType::Mention(_) => "mention",
            RichTextType::Equation(_) => "equation",
            RichTextType::Unsupported { kind, .. } => kind,
        }
    }
}

/// Rich text item with formatting annotations.
///
/// `annotations`, `plain_text` and `href` are filled in by the server;
/// locally built text leaves them unset and they are omitted on output.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Option<Annotations>,
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// A plain text span, the most common rich text variant.
    ///
    /// ```
    /// use notion_blocks::types::RichTextItem;
    /// let item = RichTextItem::text("hello");
    /// assert_eq!(item.display_text(), "hello");
    /// ```
    pub fn text(content: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Text {
            content: content.into(),
            link: None,
        })
    }

    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Text {
            content: content.into(),
            link: Some(Link { url: url.into() }),
        })
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Equation(EquationData {
            expression: expression.into(),
        }))
    }

    pub fn mention(mention: Mention) -> Self {
        Self::from_type(RichTextType::Mention(mention))
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    fn from_type(text_type: RichTextType) -> Self {
        Self {
            text_type,
            annotations: None,
            plain_text: String::new(),
            href: None,
        }
    }

    /// The server's plain rendering, falling back to the local content.
    pub fn display_text(&self) -> &str {
        if !self.plain_text.is_empty() {
            return &self.plain_text;
        }
        match &self.text_type {
            RichTextType::Text { content, .. } => content,
            RichTextType::Equation(equation) => &equation.expression,
            RichTextType::Mention(_) | RichTextType::Unsupported { .. } => "",
        }
    }
}

#[derive(Serialize)]
struct TextPayloadRef<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a Link>,
}

#[derive(Deserialize)]
struct TextPayload {
    #[serde(default)]
    content: String,
    #[serde(default)]
    link: Option<Link>,
}

#[derive(Deserialize)]
struct ItemMetadata {
    #[serde(default)]
    annotations: Option<Annotations>,
    #[serde(default)]
    plain_text: Option<String>,
    #[serde(default)]
    href: Option<String>,
}

impl Serialize for RichTextItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TYPE_KEY, self.text_type.kind())?;
        match &self.text_type {
            RichTextType::Text { content, link } => {
                let text = TextPayloadRef {
                    content,
                    link: link.as_ref(),
                };
                map.serialize_entry("text", &text)?
            }
            RichTextType::Mention(mention) => map.serialize_entry("mention", mention)?,
            RichTextType::Equation(equation) => map.serialize_entry("equation", equation)?,
            RichTextType::Unsupported { kind, payload } => {
                if let Some(payload) = payload {
                    map.serialize_entry(kind, payload)?;
                }
            }
        }
        if let Some(annotations) = &self.annotations {
            map.serialize_entry("annotations", annotations)?;
        }
        if !self.plain_text.is_empty() {
            map.serialize_entry("plain_text", &self.plain_text)?;
        }
        if let Some(href) = &self.href {
            map.serialize_entry("href", href)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RichTextItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::deserialize(deserializer)?;
        rich_text_from_object(object).map_err(D::Error::custom)
    }
}

fn rich_text_from_object(object: Map<String, Value>) -> Result<RichTextItem, serde_json::Error> {
    let mut tagged = TaggedObject::split(object)?;
    let metadata: ItemMetadata = serde_json::from_value(tagged.rest_value())?;
    let TaggedObject { kind, payload, .. } = tagged;

    let text_type = match kind.as_str() {
        "text" => {
            let text: TextPayload = decode_payload("text", payload)?;
            RichTextType::Text {
                content: text.content,
                link: text.link,
            }
        }
        "mention" => RichTextType::Mention(Mention::deserialize(payload_or_empty(payload))?),
        "equation" => RichTextType::Equation(decode_payload("equation", payload)?),
        _ => RichTextType::Unsupported { kind, payload },
    };

    Ok(RichTextItem {
        text_type,
        annotations: metadata.annotations,
        plain_text: metadata.plain_text.unwrap_or_default(),
        href: metadata.href,
    })
}

fn payload_or_empty(payload: Option<Value>) -> Value {
    match payload {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}

/// Inline reference to another object.
#[derive(Debug, Clone, PartialEq)]
pub enum Mention {
    User(PartialUser),
    Page(PageReference),
    Database(DatabaseReference),
    Date(DateValue),
    LinkPreview(LinkPreviewReference),
    TemplateMention(TemplateMention),
    Unsupported { kind: String, payload: Option<Value> },
}

impl Mention {
    pub fn kind(&self) -> &str {
        match self {
            Mention::User(_) => "user",
            Mention::Page(_) => "page",
            Mention::Database(_) => "database",
            Mention::Date(_) => "date",
            Mention::LinkPreview(_) => "link_preview",
            Mention::TemplateMention(_) => "template_mention",
            Mention::Unsupported { kind, .. } => kind,
        }
    }
}

impl Serialize for Mention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TYPE_KEY, self.kind())?;
        match self {
            Mention::User(user) => map.serialize_entry("user", user)?,
            Mention::Page(page) => map.serialize_entry("page", page)?,
            Mention::Database(database) => map.serialize_entry("database", database)?,
            Mention::Date(date) => map.serialize_entry("date", date)?,
            Mention::LinkPreview(preview) => map.serialize_entry("link_preview", preview)?,
            Mention::TemplateMention(template) => {
                map.serialize_entry("template_mention", template)?
            }
            Mention::Unsupported { kind, payload } => {
                if let Some(payload) = payload {
                    map.serialize_entry(kind, payload)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Mention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::deserialize(deserializer)?;
        mention_from_object(object).map_err(D::Error::custom)
    }
}

fn mention_from_object(object: Map<String, Value>) -> Result<Mention, serde_json::Error> {
    let TaggedObject { kind, payload, .. } = TaggedObject::split(object)?;
    let mention = match kind.as_str() {
        "user" => Mention::User(decode_payload("user", payload)?),
        "page" => Mention::Page(decode_payload("page", payload)?),
        "database" => Mention::Database(decode_payload("database", payload)?),
        "date" => Mention::Date(decode_payload("date", payload)?),
        "link_preview" => Mention::LinkPreview(decode_payload("link_preview", payload)?),
        "template_mention" => {
            Mention::TemplateMention(decode_payload("template_mention", payload)?)
        }
        _ => Mention::Unsupported { kind, payload },
    };
    Ok(mention)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageReference {
    pub id: PageId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseReference {
    pub id: DatabaseId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkPreviewReference {
    pub url: String,
}

/// Date or date range, kept as the strings the server sent (a date may or
/// may not carry a time component).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateValue {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateValue {
    /// The start date, if it parses as a calendar date or date-time.
    pub fn start_date(&self) -> Option<chrono::NaiveDate> {
        parse_date_prefix(&self.start)
    }

    pub fn end_date(&self) -> Option<chrono::NaiveDate> {
        self.end.as_deref().and_then(parse_date_prefix)
    }
}

fn parse_date_prefix(input: &str) -> Option<chrono::NaiveDate> {
    let date = input.get(..10)?;
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Placeholder mention inside a template block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateMention {
    TemplateMentionDate { template_mention_date: String },
    TemplateMentionUser { template_mention_user: String },
}
