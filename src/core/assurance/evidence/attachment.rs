//! Evidence attachments.
//!
//! An attachment is either embedded (content carried inline, base64) or
//! external (content referenced by URL with an integrity digest). The wire
//! format has no discriminator; the two forms are told apart by which of
//! `content` and `url` is present.

use anyhow::{bail, Context, Error, Result};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use url::Url;

use crate::core::identifier::HashAlg;
use crate::core::object::member;

use super::EvidenceError;

/// A document attached to an evidence record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Json", into = "Json")]
pub enum Attachment {
    Embedded(EmbeddedAttachment),
    External(ExternalAttachment),
}

impl Attachment {
    /// The optional description, common to both forms.
    pub fn desc(&self) -> Option<&str> {
        match self {
            Self::Embedded(embedded) => embedded.desc.as_deref(),
            Self::External(external) => external.desc.as_deref(),
        }
    }
}

impl TryFrom<Json> for Attachment {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("an attachment must be a JSON object")
        };
        match (object.contains_key("content"), object.contains_key("url")) {
            (true, false) => EmbeddedAttachment::from_object(&object).map(Self::Embedded),
            (false, true) => ExternalAttachment::from_object(&object).map(Self::External),
            _ => Err(EvidenceError::AmbiguousAttachment.into()),
        }
    }
}

impl From<Attachment> for Json {
    fn from(value: Attachment) -> Self {
        match value {
            Attachment::Embedded(embedded) => embedded.into(),
            Attachment::External(external) => external.into(),
        }
    }
}

/// Attachment content carried inline, base64-encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAttachment {
    desc: Option<String>,
    content_type: String,
    content: Vec<u8>,
}

impl EmbeddedAttachment {
    pub fn new(content_type: String, content: Vec<u8>) -> Result<Self> {
        if content_type.is_empty() {
            bail!("a content type must not be empty")
        }
        Ok(Self {
            desc: None,
            content_type,
            content,
        })
    }

    pub fn set_desc(mut self, desc: String) -> Self {
        self.desc = Some(desc);
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    fn from_object(object: &Map<String, Json>) -> Result<Self> {
        let desc = string_member(object, "desc")?;
        let content_type =
            string_member(object, "content_type")?.context("'content_type' is missing")?;
        let encoded = string_member(object, "content")?.context("'content' is missing")?;
        let content = BASE64_STANDARD
            .decode(encoded)
            .context("'content' could not be parsed")?;
        Self::new(content_type, content).map(|a| match desc {
            Some(desc) => a.set_desc(desc),
            None => a,
        })
    }
}

impl From<EmbeddedAttachment> for Json {
    fn from(value: EmbeddedAttachment) -> Self {
        let mut object = Map::default();
        if let Some(desc) = value.desc {
            object.insert("desc".to_owned(), desc.into());
        }
        object.insert("content_type".to_owned(), value.content_type.into());
        object.insert(
            "content".to_owned(),
            BASE64_STANDARD.encode(value.content).into(),
        );
        object.into()
    }
}

/// Attachment content referenced by URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalAttachment {
    desc: Option<String>,
    url: Url,
    access_token: Option<String>,
    expires_in: Option<u64>,
    digest: Digest,
}

impl ExternalAttachment {
    pub fn new(url: Url, digest: Digest) -> Self {
        Self {
            desc: None,
            url,
            access_token: None,
            expires_in: None,
            digest,
        }
    }

    pub fn set_desc(mut self, desc: String) -> Self {
        self.desc = Some(desc);
        self
    }

    pub fn set_access_token(mut self, access_token: String) -> Self {
        self.access_token = Some(access_token);
        self
    }

    pub fn set_expires_in(mut self, expires_in: u64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    fn from_object(object: &Map<String, Json>) -> Result<Self> {
        let url: Url = string_member(object, "url")?
            .context("'url' is missing")?
            .parse()
            .context("'url' could not be parsed")?;
        let digest: Digest = member(object, "digest")?;
        let expires_in = object
            .get("expires_in")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .context("'expires_in' could not be parsed")?;
        Ok(Self {
            desc: string_member(object, "desc")?,
            url,
            access_token: string_member(object, "access_token")?,
            expires_in,
            digest,
        })
    }
}

impl From<ExternalAttachment> for Json {
    fn from(value: ExternalAttachment) -> Self {
        let mut object = Map::default();
        if let Some(desc) = value.desc {
            object.insert("desc".to_owned(), desc.into());
        }
        object.insert("url".to_owned(), value.url.to_string().into());
        if let Some(access_token) = value.access_token {
            object.insert("access_token".to_owned(), access_token.into());
        }
        if let Some(expires_in) = value.expires_in {
            object.insert("expires_in".to_owned(), expires_in.into());
        }
        object.insert("digest".to_owned(), value.digest.into());
        object.into()
    }
}

/// Integrity digest of an external attachment's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    alg: HashAlg,
    value: Vec<u8>,
}

impl Digest {
    pub fn new(alg: HashAlg, value: Vec<u8>) -> Self {
        Self { alg, value }
    }

    pub fn alg(&self) -> &HashAlg {
        &self.alg
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl TryFrom<Json> for Digest {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        let Json::Object(object) = value else {
            bail!("a digest must be a JSON object")
        };
        let alg: HashAlg = member(&object, "alg")?;
        let encoded = string_member(&object, "value")?.context("'value' is missing")?;
        let value = BASE64_STANDARD
            .decode(encoded)
            .context("'value' could not be parsed")?;
        Ok(Self { alg, value })
    }
}

impl From<Digest> for Json {
    fn from(value: Digest) -> Self {
        let mut object = Map::default();
        object.insert("alg".to_owned(), value.alg.into());
        object.insert(
            "value".to_owned(),
            BASE64_STANDARD.encode(value.value).into(),
        );
        object.into()
    }
}

fn string_member(object: &Map<String, Json>, key: &'static str) -> Result<Option<String>> {
    object
        .get(key)
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .context(format!("'{key}' could not be parsed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn embedded_attachment_round_trip() {
        let json = json!({
            "desc": "Front of id document",
            "content_type": "image/png",
            "content": BASE64_STANDARD.encode(b"fake png bytes")
        });
        let attachment = Attachment::try_from(json.clone()).unwrap();
        let Attachment::Embedded(embedded) = &attachment else {
            panic!("expected an embedded attachment")
        };
        assert_eq!(embedded.content_type(), "image/png");
        assert_eq!(embedded.content(), b"fake png bytes");
        assert_eq!(Json::from(attachment), json);
    }

    #[test]
    fn external_attachment_round_trip() {
        let json = json!({
            "desc": "Signed document",
            "url": "https://example.com/attachments/4Ag8IpOf95",
            "access_token": "ksj3n283dke",
            "expires_in": 30,
            "digest": {
                "alg": "sha-256",
                "value": BASE64_STANDARD.encode(b"digest bytes")
            }
        });
        let attachment = Attachment::try_from(json.clone()).unwrap();
        let Attachment::External(external) = &attachment else {
            panic!("expected an external attachment")
        };
        assert_eq!(
            external.url().as_str(),
            "https://example.com/attachments/4Ag8IpOf95"
        );
        assert_eq!(external.digest().alg().as_str(), "sha-256");
        assert_eq!(external.expires_in(), Some(30));
        assert_eq!(Json::from(attachment), json);
    }

    #[test]
    fn malformed_base64_content_is_a_parse_error() {
        let err = Attachment::try_from(json!({
            "content_type": "image/png",
            "content": "not base64!"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("'content'"));
    }

    #[test]
    fn content_and_url_together_are_ambiguous() {
        let err = Attachment::try_from(json!({
            "content": "aGVsbG8=",
            "url": "https://example.com/a"
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "an attachment must contain exactly one of 'content' or 'url'"
        );
    }

    #[test]
    fn neither_content_nor_url_is_ambiguous() {
        assert!(Attachment::try_from(json!({ "desc": "nothing here" })).is_err());
    }

    #[test]
    fn external_attachment_requires_a_digest() {
        let err = Attachment::try_from(json!({
            "url": "https://example.com/a"
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "'digest' is missing");
    }
}
