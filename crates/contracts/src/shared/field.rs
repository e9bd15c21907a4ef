//! Static field descriptions for list views
//!
//! Every collection declares its fields once as a `&'static [FieldSpec]`;
//! filtering, sorting, editing and rendering all read from that slice.

/// How a field is compared and filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Server-assigned identifier, integer or string
    Identifier,
    /// Free text, case-insensitive substring match
    Text,
    /// Value from a small fixed set, case-insensitive equality
    Enum,
    /// Integer or decimal
    Numeric,
    /// Number formatted with grouping/symbol, compared on its numeric value
    CurrencyText,
    /// ISO `YYYY-MM-DD`, compared as the integer `YYYYMMDD`
    DateKey,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Numeric => "numeric",
            Self::CurrencyText => "currency",
            Self::DateKey => "date",
        }
    }

    /// Kinds whose normalized value is a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::Numeric | Self::CurrencyText | Self::DateKey
        )
    }

    /// Kinds that take part in the totals row
    pub fn is_summable(&self) -> bool {
        matches!(self, Self::Numeric | Self::CurrencyText)
    }
}

/// Description of one field of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Internal field name (the key used in records after wire mapping)
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Computed from other fields, never edited directly
    pub derived: bool,
    pub filterable: bool,
    pub enum_values: Option<&'static [&'static str]>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            derived: false,
            filterable: true,
            enum_values: None,
        }
    }

    pub const fn id(label: &'static str) -> Self {
        Self::new(super::record::ID_FIELD, label, FieldKind::Identifier)
    }

    pub const fn derived(mut self) -> Self {
        self.derived = true;
        self
    }

    pub const fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub const fn with_values(mut self, values: &'static [&'static str]) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// The user may change this field in an edit
    pub fn is_editable(&self) -> bool {
        !self.derived && self.kind != FieldKind::Identifier
    }

    /// Whether `value` belongs to the enum set (case-insensitive).
    /// Fields without a declared set accept anything.
    pub fn allows(&self, value: &str) -> bool {
        match self.enum_values {
            Some(values) => values.iter().any(|v| v.eq_ignore_ascii_case(value.trim())),
            None => true,
        }
    }
}

/// Look up a field by internal name
pub fn find_field(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|f| f.name == name)
}
