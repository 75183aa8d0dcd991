use crate::types::tagged::{decode_payload, TaggedObject, TYPE_KEY};
use crate::types::{Timestamp, ValidationError};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Source of a media block or icon: hosted by Notion or linked externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    /// Link an external URL, validating it first.
    pub fn external(url: &str) -> Result<Self, ValidationError> {
        Ok(FileObject::External {
            external: ExternalFile::parse(url)?,
        })
    }

    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }

    /// When a hosted file's signed URL stops working.
    pub fn expiry_time(&self) -> Option<&Timestamp> {
        match self {
            FileObject::External { .. } => None,
            FileObject::File { file } => file.expiry_time.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

impl ExternalFile {
    /// Accepts absolute `http` and `https` URLs only.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = url::Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self {
                url: input.to_string(),
            }),
            other => Err(ValidationError::InvalidUrl {
                url: input.to_string(),
                reason: format!("unsupported scheme `{}`", other),
            }),
        }
    }
}

/// A file uploaded to Notion. The URL is signed and expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<Timestamp>,
}

/// Icon types
///
/// Icon kinds this crate does not know keep their tag and raw payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji { emoji: String },
    External { external: ExternalFile },
    File { file: NotionFile },
    CustomEmoji(CustomEmoji),
    Unsupported { kind: String, payload: Option<Value> },
}

/// A workspace-defined emoji image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEmoji {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Icon {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        Icon::Emoji {
            emoji: emoji.into(),
        }
    }

    /// The wire tag of this icon.
    pub fn kind(&self) -> &str {
        match self {
            Icon::Emoji { .. } => "emoji",
            Icon::External { .. } => "external",
            Icon::File { .. } => "file",
            Icon::CustomEmoji(_) => "custom_emoji",
            Icon::Unsupported { kind, .. } => kind,
        }
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TYPE_KEY, self.kind())?;
        match self {
            Icon::Emoji { emoji } => map.serialize_entry("emoji", emoji)?,
            Icon::External { external } => map.serialize_entry("external", external)?,
            Icon::File { file } => map.serialize_entry("file", file)?,
            Icon::CustomEmoji(custom) => map.serialize_entry("custom_emoji", custom)?,
            Icon::Unsupported { kind, payload } => {
                if let Some(payload) = payload {
                    map.serialize_entry(kind, payload)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::deserialize(deserializer)?;
        icon_from_object(object).map_err(D::Error::custom)
    }
}

fn icon_from_object(object: Map<String, Value>) -> Result<Icon, serde_json::Error> {
    let TaggedObject { kind, payload, .. } = TaggedObject::split(object)?;
    let icon = match kind.as_str() {
        "emoji" => Icon::Emoji {
            emoji: String::deserialize(payload.unwrap_or(Value::Null))
                .map_err(|e| serde_json::Error::custom(format!("invalid `emoji` icon: {}", e)))?,
        },
        "external" => Icon::External {
            external: decode_payload("external", payload)?,
        },
        "file" => Icon::File {
            file: decode_payload("file", payload)?,
        },
        "custom_emoji" => Icon::CustomEmoji(decode_payload("custom_emoji", payload)?),
        _ => Icon::Unsupported { kind, payload },
    };
    Ok(icon)
}
