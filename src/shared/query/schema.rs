/// Value type of a queryable field, used to parse filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Uuid,
    Text,
    Timestamp,
}

/// A field that list requests may filter, sort or project on
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    /// Name used in query strings and JSON bodies
    pub name: &'static str,
    /// Backing column
    pub column: &'static str,
    pub kind: FieldKind,
}

/// The enumerated query surface of one resource
#[derive(Debug)]
pub struct ResourceSchema {
    pub fields: &'static [Field],
    /// Field names matched by `keyword`
    pub searchable: &'static [&'static str],
    /// Sort applied when the request has none, in `sort` parameter syntax
    pub default_sort: &'static str,
    /// Field always kept by inclusion projections and used as sort tiebreaker
    pub id_field: &'static str,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        let fields: &'static [Field] = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    pub fn searchable_fields(&self) -> Vec<&'static Field> {
        self.searchable
            .iter()
            .filter_map(|name| self.field(name))
            .collect()
    }
}
