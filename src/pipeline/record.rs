//! Dataset rows and headerless CSV helpers.

use csv::{ReaderBuilder, WriterBuilder};

/// One CSV row.
///
/// For dataset and part rows, field 0 is the identifier and field 1 the
/// URL; any further fields are carried along untouched so that part files
/// concatenate back to the original dataset. Checker response rows use the
/// same shape with the URL at field 0 and the status token at field 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Creates a record from its fields.
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// The identifier field (field 0).
    #[must_use]
    pub fn id(&self) -> &str {
        self.fields.first().map_or("", String::as_str)
    }

    /// The URL field (field 1), if present and non-empty.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.fields.get(1).map(String::as_str).filter(|url| !url.is_empty())
    }

    /// An arbitrary field by position, if present.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// All fields in order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Parses headerless CSV text into records.
///
/// Rows may have differing field counts; short rows are returned as-is and
/// judged by the consuming stage.
///
/// # Errors
///
/// Returns an error if the text is not well-formed CSV.
pub fn parse_records(text: &str) -> Result<Vec<Record>, String> {
    let mut reader =
        ReaderBuilder::new().has_headers(false).flexible(true).from_reader(text.as_bytes());
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| format!("malformed csv row: {e}"))?;
        records.push(Record::new(row.iter().map(String::from).collect()));
    }
    Ok(records)
}

/// Serializes records back to headerless CSV text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_csv(records: &[Record]) -> Result<String, String> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for record in records {
        writer
            .write_record(record.fields())
            .map_err(|e| format!("failed to serialize csv row: {e}"))?;
    }
    let bytes =
        writer.into_inner().map_err(|e| format!("failed to flush csv output: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("csv output was not utf-8: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifier_and_url() {
        let records = parse_records("b1000001,http://example.org/a\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "b1000001");
        assert_eq!(records[0].url(), Some("http://example.org/a"));
    }

    #[test]
    fn extra_fields_are_preserved() {
        let records = parse_records("b1,http://a,Author Title,1998\n").unwrap();
        assert_eq!(records[0].fields().len(), 4);
        assert_eq!(records[0].field(3), Some("1998"));
        assert_eq!(to_csv(&records).unwrap(), "b1,http://a,Author Title,1998\n");
    }

    #[test]
    fn short_row_has_no_url() {
        let records = parse_records("b1\nb2,\n").unwrap();
        assert_eq!(records[0].url(), None);
        assert_eq!(records[1].url(), None);
    }

    #[test]
    fn quoted_fields_round_trip() {
        let original = "b1,http://a,\"Smith, Jane\"\n";
        let records = parse_records(original).unwrap();
        assert_eq!(records[0].field(2), Some("Smith, Jane"));
        assert_eq!(to_csv(&records).unwrap(), original);
    }

    #[test]
    fn empty_text_parses_to_no_records() {
        assert!(parse_records("").unwrap().is_empty());
        assert_eq!(to_csv(&[]).unwrap(), "");
    }
}
