use super::record::Record;

/// Bidirectional field-name table between internal names and the API's
/// snake_case names. Names without an entry pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pairs: &'static [(&'static str, &'static str)],
}

impl FieldMapping {
    /// `pairs` are `(internal, wire)`
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    pub const fn identity() -> Self {
        Self { pairs: &[] }
    }

    pub fn wire_name<'a>(&self, internal: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(i, _)| *i == internal)
            .map(|(_, w)| *w)
            .unwrap_or(internal)
    }

    pub fn internal_name<'a>(&self, wire: &'a str) -> &'a str {
        self.pairs
            .iter()
            .find(|(_, w)| *w == wire)
            .map(|(i, _)| *i)
            .unwrap_or(wire)
    }

    pub fn to_wire(&self, record: &Record) -> Record {
        let mut out = Record::new();
        for (key, value) in record.iter() {
            out.set(self.wire_name(key), value.clone());
        }
        out
    }

    pub fn from_wire(&self, record: &Record) -> Record {
        let mut out = Record::new();
        for (key, value) in record.iter() {
            out.set(self.internal_name(key), value.clone());
        }
        out
    }
}
