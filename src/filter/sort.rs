//! Stable column sort for the asset table.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::taxonomy::TestAsset;

/// Sortable asset columns.
///
/// Text columns compare lower-cased with Latin diacritics folded to their
/// base letter, so `Émile` sorts next to `emile`. Other scripts compare by
/// code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    /// Main category.
    Category,
    Status,
    Assignee,
    Creator,
    Environment,
    CreatedAt,
    UpdatedAt,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    /// Accepts snake_case and camelCase column names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "").as_str() {
            "id" => Ok(SortKey::Id),
            "category" => Ok(SortKey::Category),
            "status" => Ok(SortKey::Status),
            "assignee" => Ok(SortKey::Assignee),
            "creator" => Ok(SortKey::Creator),
            "environment" => Ok(SortKey::Environment),
            "createdat" => Ok(SortKey::CreatedAt),
            "updatedat" => Ok(SortKey::UpdatedAt),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column and direction for the table sort.
///
/// A `None` key leaves the input order untouched. Deserialization accepts
/// the same column names as [`SortSpec::parse`] and maps unknown ones to
/// `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default, deserialize_with = "lenient_key")]
    pub key: Option<SortKey>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    /// Sort by a known column.
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Build from a UI column name; an unrecognized name yields a no-op sort.
    pub fn parse(key: &str, direction: SortDirection) -> Self {
        Self {
            key: key.parse().ok(),
            direction,
        }
    }

    /// Compare two assets under this sort.
    pub fn compare(&self, a: &TestAsset, b: &TestAsset) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };
        self.directed(SortValue::of(a, key).cmp(&SortValue::of(b, key)))
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn lenient_key<'de, D>(deserializer: D) -> Result<Option<SortKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|key| key.parse().ok()))
}

/// Extracted sort key. Within one column every value has the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Number(i64),
    /// Lower-cased, diacritic-folded text, missing treated as empty.
    Text(String),
    /// Milliseconds since the epoch, missing or unparseable treated as 0.
    Time(i64),
}

impl SortValue {
    fn of(asset: &TestAsset, key: SortKey) -> Self {
        let text = |field: &Option<String>| {
            SortValue::Text(fold_text(field.as_deref().unwrap_or_default()))
        };
        let time = |field: &Option<String>| {
            SortValue::Time(field.as_deref().and_then(parse_timestamp_millis).unwrap_or(0))
        };

        match key {
            SortKey::Id => SortValue::Number(asset.id),
            SortKey::Category => text(&asset.main_category),
            SortKey::Status => text(&asset.result_status),
            SortKey::Assignee => text(&asset.assignee_name),
            SortKey::Creator => text(&asset.creator_name),
            SortKey::Environment => text(&asset.environment),
            SortKey::CreatedAt => time(&asset.created_at),
            SortKey::UpdatedAt => time(&asset.updated_at),
        }
    }
}

/// Lower-case and strip Latin diacritics.
fn fold_text(raw: &str) -> String {
    raw.to_lowercase().chars().map(fold_diacritic).collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a backend timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, naive `T`- or space-separated date-times (read as
/// UTC) and bare dates.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Stable sort in place; keys are extracted once per asset.
pub(crate) fn sort_assets(assets: &mut Vec<&TestAsset>, spec: &SortSpec) {
    let Some(key) = spec.key else {
        return;
    };
    let mut keyed: Vec<(SortValue, &TestAsset)> = assets
        .iter()
        .map(|asset| (SortValue::of(asset, key), *asset))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| spec.directed(a.cmp(b)));
    *assets = keyed.into_iter().map(|(_, asset)| asset).collect();
}
