//! Remote response shapes
//!
//! Every field is optional so that missing data is reported by the normalizers
//! (which know which fields are mandatory) rather than by the deserializer.
//! A field holding the wrong JSON type reads as absent for the same reason.
//! Record arrays are kept as raw JSON and decoded one record at a time, so a
//! malformed record only affects itself.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Scalar that the remote sends either as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Canonical string form (integral floats print without a fraction)
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::UInt(v) => v.to_string(),
            Scalar::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => format!("{}", *v as i64),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(v) => v.clone(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Int(v) => u64::try_from(*v).ok(),
            Scalar::UInt(v) => Some(*v),
            Scalar::Float(v) if *v >= 0.0 && v.fract() == 0.0 => Some(*v as u64),
            Scalar::Float(_) => None,
            Scalar::Text(v) => v.trim().parse().ok(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::UInt(v) => i64::try_from(*v).ok(),
            Scalar::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            Scalar::Float(_) => None,
            Scalar::Text(v) => v.trim().parse().ok(),
        }
    }
}

/// `artists?id=` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub msg: Option<String>,
    pub artist: Option<ArtistRecord>,
    pub hot_songs: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub alias: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pic_url: Option<String>,
    #[serde(rename = "img1v1Url", default, deserialize_with = "lenient_text")]
    pub img1v1_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brief_desc: Option<String>,
}

/// Entry of `hotSongs`
#[derive(Debug, Default, Deserialize)]
pub struct SongStubRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

/// `song/detail?ids=` response
#[derive(Debug, Default, Deserialize)]
pub struct DetailResponse {
    pub songs: Option<Vec<Value>>,
}

/// Entry of `songs`
#[derive(Debug, Default, Deserialize)]
pub struct SongDetailRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(rename = "ar", default, deserialize_with = "lenient_list")]
    pub artists: Option<Vec<Value>>,
    #[serde(rename = "al")]
    pub album: Option<Value>,
}

/// Entry of `ar`
#[derive(Debug, Default, Deserialize)]
pub struct PerformerRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

/// Value of `al`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pic_url: Option<String>,
}

/// `comment/music?id=` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    #[serde(default, deserialize_with = "lenient_list")]
    pub hot_comments: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub comments: Option<Vec<Value>>,
}

/// Entry of `hotComments` / `comments`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub comment_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub liked_count: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub time: Option<Scalar>,
    pub user: Option<UserRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub user_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub avatar_url: Option<String>,
}

/// `song/url?id=` response
#[derive(Debug, Default, Deserialize)]
pub struct UrlResponse {
    pub data: Option<Vec<Value>>,
}

/// Entry of `data`
#[derive(Debug, Default, Deserialize)]
pub struct UrlRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

/// Field read as text; any other JSON type is treated as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Field read as an id, count or timestamp; objects, arrays and booleans are absent
fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<Scalar>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Nested record array; anything but an array is absent
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Decode a single record, logging and returning `None` when it does not fit
pub fn decode_record<T: DeserializeOwned>(record: Value, kind: &'static str) -> Option<T> {
    match serde_json::from_value(record) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(kind, error = %e, "Skipping undecodable record");
            None
        }
    }
}
