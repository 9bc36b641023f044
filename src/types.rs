use std::collections::HashMap;
use std::io::{self, Write};

const END_OF_RECORD: &str = "<eor>\n";

/// A single ADIF field with name, optional type indicator, and value.
///
/// Serialized as `<name:length[:type]>value ` where `length` is the
/// character count of the value. Names are expected to be letters, digits,
/// and underscores, and type indicators letters and digits; both are kept
/// as opaque strings and are not checked against the ADIF dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, stored with the caller's case
    pub name: String,
    /// Data type indicator (if specified)
    pub data_type: Option<String>,
    /// Field value
    pub value: String,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            value: value.into(),
        }
    }

    /// Create a new field with a type indicator
    pub fn with_type(
        name: impl Into<String>,
        data_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type.into()),
            value: value.into(),
        }
    }

    /// Serialize this field, including the trailing space that separates
    /// consecutive fields in a stream.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let length = self.value.chars().count();
        write!(out, "<{}:{}", self.name, length)?;
        if let Some(data_type) = &self.data_type {
            write!(out, ":{}", data_type)?;
        }
        write!(out, ">{} ", self.value)
    }
}

/// A single QSO (contact) record: an ordered sequence of fields.
///
/// A record read off a stream never contains a field named "EOR"; that
/// field terminates the record and is discarded by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Fields in this record, in insertion order
    pub fields: Vec<Field>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the record
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Get a field by name (case-insensitive, first match over duplicates)
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Get a field value by name (case-insensitive)
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.value.as_str())
    }

    /// Get a field by position, `None` when out of range
    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Serialize every field in order, then the end-of-record marker.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for field in &self.fields {
            field.write(out)?;
        }
        out.write_all(END_OF_RECORD.as_bytes())
    }

    /// Convert to a HashMap for easier access, with uppercased names
    pub fn to_map(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.to_ascii_uppercase(), f.value.clone()))
            .collect()
    }

    /// Get the call sign of the contacted station
    pub fn call(&self) -> Option<&str> {
        self.get_value("CALL")
    }

    /// Get the QSO date
    pub fn qso_date(&self) -> Option<&str> {
        self.get_value("QSO_DATE")
    }

    /// Get the time on (start time)
    pub fn time_on(&self) -> Option<&str> {
        self.get_value("TIME_ON")
    }

    /// Get the band
    pub fn band(&self) -> Option<&str> {
        self.get_value("BAND")
    }

    /// Get the frequency in MHz
    pub fn freq(&self) -> Option<&str> {
        self.get_value("FREQ")
    }

    /// Get the mode
    pub fn mode(&self) -> Option<&str> {
        self.get_value("MODE")
    }

    /// Get the RST sent
    pub fn rst_sent(&self) -> Option<&str> {
        self.get_value("RST_SENT")
    }

    /// Get the RST received
    pub fn rst_rcvd(&self) -> Option<&str> {
        self.get_value("RST_RCVD")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_write_exact_output() {
        let mut record = Record::new();
        record.add_field(Field::new("call", "la1bfa"));
        record.add_field(Field::new("date", "20131212"));
        record.add_field(Field::new("sent_rst", "599"));
        record.add_field(Field::new("rcvd_rst", "559"));

        let mut out = Vec::new();
        record.write(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<call:6>la1bfa <date:8>20131212 <sent_rst:3>599 <rcvd_rst:3>559 <eor>\n"
        );
    }

    #[test]
    fn test_field_write_with_type() {
        let mut out = Vec::new();
        Field::with_type("freq", "n", "14.256").write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<freq:6:n>14.256 ");
    }

    #[test]
    fn test_field_write_empty_value() {
        let mut out = Vec::new();
        Field::new("qrt", "").write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<qrt:0> ");
    }

    #[test]
    fn test_field_write_counts_characters_not_bytes() {
        let mut out = Vec::new();
        Field::new("name", "Håvard").write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<name:6>Håvard ");
    }

    #[test]
    fn test_lookup_misses_are_none() {
        let record = Record::new();
        assert!(record.get("call").is_none());
        assert!(record.field_at(0).is_none());
        assert!(record.is_empty());

        let mut record = Record::new();
        record.add_field(Field::new("call", "la1bfa"));
        assert!(record.get("band").is_none());
        assert!(record.field_at(1).is_none());
        assert_eq!(record.field_at(0).map(|f| f.value.as_str()), Some("la1bfa"));
    }

    #[test]
    fn test_duplicate_names_return_first_match() {
        let mut record = Record::new();
        record.add_field(Field::new("call", "W1AW1"));
        record.add_field(Field::new("CALL", "W1AW2"));
        assert_eq!(record.get_value("call"), Some("W1AW1"));
        assert_eq!(record.get_value("CALL"), Some("W1AW1"));
    }

    #[test]
    fn test_well_known_accessors() {
        let mut record = Record::new();
        record.add_field(Field::new("CALL", "W1AW"));
        record.add_field(Field::new("BAND", "20m"));
        record.add_field(Field::new("MODE", "CW"));
        assert_eq!(record.call(), Some("W1AW"));
        assert_eq!(record.band(), Some("20m"));
        assert_eq!(record.mode(), Some("CW"));
        assert_eq!(record.freq(), None);

        let names: Vec<&str> = record.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["CALL", "BAND", "MODE"]);
    }

    #[test]
    fn test_to_map_uppercases_names() {
        let mut record = Record::new();
        record.add_field(Field::new("call", "W1AW"));
        record.add_field(Field::new("band", "20m"));
        let map = record.to_map();
        assert_eq!(map.get("CALL").map(String::as_str), Some("W1AW"));
        assert_eq!(map.get("BAND").map(String::as_str), Some("20m"));
    }
}
