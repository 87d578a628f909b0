use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

use crate::{config::Config, error::ConvertError};

/// One input line split into its untyped fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Split a single line on `delimiter`, no quoting.
    pub fn from_line(line: &str, delimiter: char) -> Self {
        line.split(delimiter).collect()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Read every record from headerless delimited text.
///
/// Field counts are not checked here; the engine rejects mismatches with row context.
pub fn read_records<R: Read>(reader: R, config: &Config) -> Result<Vec<RawRecord>, ConvertError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        if config.trailing_delimiter
            && fields.len() > 1
            && fields.last().is_some_and(|f| f.is_empty())
        {
            fields.pop();
        }
        out.push(RawRecord::new(fields));
    }

    debug!(records = out.len(), "read delimited records");
    Ok(out)
}
