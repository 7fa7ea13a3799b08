use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::core::config::PaginationConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::{PARAM_FIELDS, PARAM_KEYWORD, PARAM_LIMIT, PARAM_PAGE, PARAM_SORT};
use crate::shared::query::schema::{Field, FieldKind, ResourceSchema};
use crate::shared::validation::CONTROL_CHAR_REGEX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static Field,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOperator {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "eq" => Some(Self::Eq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Gt => ">",
            FilterOperator::Gte => ">=",
            FilterOperator::Lt => "<",
            FilterOperator::Lte => "<=",
        }
    }
}

/// A filter value already parsed into the field's type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Uuid(Uuid),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    fn parse(field: &Field, raw: &str) -> Result<Self> {
        let invalid = |expected: &str| {
            AppError::BadRequest(format!(
                "Invalid value for {}: expected {}, got '{}'",
                field.name, expected, raw
            ))
        };

        match field.kind {
            FieldKind::Text => Ok(Self::Text(plain_text(field.name, raw)?.to_string())),
            FieldKind::Uuid => Uuid::parse_str(raw.trim())
                .map(Self::Uuid)
                .map_err(|_| invalid("a UUID")),
            FieldKind::Timestamp => parse_timestamp(raw.trim())
                .map(Self::Timestamp)
                .ok_or_else(|| invalid("an RFC 3339 timestamp or YYYY-MM-DD date")),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: &'static Field,
    pub operator: FilterOperator,
    pub value: FieldValue,
}

/// Which attributes of each document a list response carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    All,
    Include(Vec<&'static Field>),
    Exclude(Vec<&'static Field>),
}

impl Projection {
    /// Restrict a serialized document to the projected attributes
    pub fn apply(&self, document: serde_json::Value) -> serde_json::Value {
        match (self, document) {
            (Projection::All, document) => document,
            (Projection::Include(fields), serde_json::Value::Object(mut map)) => {
                map.retain(|key, _| fields.iter().any(|f| f.name == key.as_str()));
                serde_json::Value::Object(map)
            }
            (Projection::Exclude(fields), serde_json::Value::Object(mut map)) => {
                map.retain(|key, _| !fields.iter().any(|f| f.name == key.as_str()));
                serde_json::Value::Object(map)
            }
            (_, other) => other,
        }
    }
}

/// Validated list request: `page`, `limit`, `sort`, `fields`, `keyword`
/// plus per-field filters such as `name=TVs` or `createdAt[gte]=2024-01-01`.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub schema: &'static ResourceSchema,
    pub page: i64,
    pub limit: i64,
    pub filters: Vec<FilterCondition>,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn parse(
        schema: &'static ResourceSchema,
        params: Vec<(String, String)>,
        config: &PaginationConfig,
    ) -> Result<Self> {
        let mut page = 1;
        let mut limit = config.default_limit;
        let mut sort = None;
        let mut fields = None;
        let mut keyword = None;
        let mut filters = Vec::new();

        for (key, value) in params {
            match key.as_str() {
                PARAM_PAGE => page = parse_positive(PARAM_PAGE, &value)?,
                PARAM_LIMIT => limit = parse_positive(PARAM_LIMIT, &value)?,
                PARAM_SORT => sort = Some(value),
                PARAM_FIELDS => fields = Some(value),
                PARAM_KEYWORD => keyword = Some(plain_text(PARAM_KEYWORD, &value)?.to_string()),
                _ => filters.push(parse_filter(schema, &key, &value)?),
            }
        }

        let mut sort_keys = parse_sort(schema, sort.as_deref().unwrap_or_default())?;
        if sort_keys.is_empty() {
            sort_keys = parse_sort(schema, schema.default_sort)?;
        }

        Ok(Self {
            schema,
            page,
            limit: limit.min(config.max_limit),
            filters,
            sort: sort_keys,
            projection: parse_projection(schema, fields.as_deref().unwrap_or_default())?,
            keyword: keyword
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        })
    }
}

/// Text compared against the database must be free of control characters
fn plain_text<'a>(name: &str, raw: &'a str) -> Result<&'a str> {
    if CONTROL_CHAR_REGEX.is_match(raw) {
        return Err(AppError::BadRequest(format!(
            "Invalid value for {}: control characters are not allowed",
            name
        )));
    }
    Ok(raw)
}

fn parse_positive(name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{} must be a positive integer, got '{}'", name, raw))
        })
}

fn unknown_field(schema: &ResourceSchema, name: &str) -> AppError {
    let known: Vec<&str> = schema.fields.iter().map(|f| f.name).collect();
    AppError::BadRequest(format!(
        "Unknown field '{}'. Expected one of: {}",
        name,
        known.join(", ")
    ))
}

/// `name=value` or `name[op]=value`
fn parse_filter(schema: &ResourceSchema, key: &str, raw: &str) -> Result<FilterCondition> {
    let (name, operator) = match key.split_once('[') {
        Some((name, rest)) => {
            let op = rest
                .strip_suffix(']')
                .and_then(FilterOperator::parse)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Invalid filter '{}'. Supported operators: eq, gt, gte, lt, lte",
                        key
                    ))
                })?;
            (name, op)
        }
        None => (key, FilterOperator::Eq),
    };

    let field = schema.field(name).ok_or_else(|| unknown_field(schema, name))?;

    Ok(FilterCondition {
        field,
        operator,
        value: FieldValue::parse(field, raw)?,
    })
}

/// Comma-separated, `-` prefix for descending; earlier entries take priority
fn parse_sort(schema: &ResourceSchema, raw: &str) -> Result<Vec<SortKey>> {
    let mut keys: Vec<SortKey> = Vec::new();

    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, direction) = match item.strip_prefix('-') {
            Some(name) => (name, SortDirection::Desc),
            None => (item, SortDirection::Asc),
        };
        let field = schema.field(name).ok_or_else(|| unknown_field(schema, name))?;

        if !keys.iter().any(|k| k.field == field) {
            keys.push(SortKey { field, direction });
        }
    }

    Ok(keys)
}

/// `fields=name,slug` keeps only those, `fields=-slug` drops them
fn parse_projection(schema: &ResourceSchema, raw: &str) -> Result<Projection> {
    let mut include: Vec<&'static Field> = Vec::new();
    let mut exclude: Vec<&'static Field> = Vec::new();

    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item.strip_prefix('-') {
            Some(name) => {
                let field = schema.field(name).ok_or_else(|| unknown_field(schema, name))?;
                exclude.push(field);
            }
            None => {
                let field = schema.field(item).ok_or_else(|| unknown_field(schema, item))?;
                include.push(field);
            }
        }
    }

    match (include.is_empty(), exclude.is_empty()) {
        (true, true) => Ok(Projection::All),
        (false, true) => {
            if let Some(id) = schema.field(schema.id_field) {
                if !include.contains(&id) {
                    include.insert(0, id);
                }
            }
            Ok(Projection::Include(include))
        }
        (true, false) => Ok(Projection::Exclude(exclude)),
        (false, false) => Err(AppError::BadRequest(
            "fields cannot mix included and excluded fields".to_string(),
        )),
    }
}
