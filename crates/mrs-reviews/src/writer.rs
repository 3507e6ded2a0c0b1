use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::assemble::Dataset;

pub const HEADERS: [&str; 3] = ["Title", "Review Text", "Review Score"];

/// Output dialect, every row has the same three columns.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CsvWriterConfig {
    #[serde(default = "default_csv_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub escape: Option<char>,
    #[serde(default = "default_csv_terminator")]
    pub terminator: CsvTerminator,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            escape: None,
            terminator: CsvTerminator::Any('\n'),
        }
    }
}

fn default_csv_delimiter() -> char {
    CsvWriterConfig::default().delimiter
}

fn default_csv_terminator() -> CsvTerminator {
    CsvWriterConfig::default().terminator
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CsvTerminator {
    CRLF,
    Any(char),
}

impl From<CsvTerminator> for csv::Terminator {
    fn from(source: CsvTerminator) -> Self {
        match source {
            CsvTerminator::CRLF => Self::CRLF,
            CsvTerminator::Any(c) => Self::Any(c as u8),
        }
    }
}

impl From<&CsvWriterConfig> for csv::WriterBuilder {
    fn from(c: &CsvWriterConfig) -> Self {
        let mut builder = csv::WriterBuilder::new();
        builder.delimiter(c.delimiter as u8);
        builder.terminator(c.terminator.into());
        if let Some(escape) = c.escape {
            builder.double_quote(false);
            builder.escape(escape as u8);
        } else {
            builder.double_quote(true);
        }
        builder
    }
}

pub enum CsvWriter {
    File(csv::Writer<fs::File>),
    Stdout(csv::Writer<io::Stdout>),
}

impl CsvWriter {
    /// Writes to `path` when given, to stdout otherwise.
    pub fn create(config: &CsvWriterConfig, path: Option<&Path>) -> io::Result<Self> {
        let builder = csv::WriterBuilder::from(config);
        let wtr = match path {
            Some(path) => Self::File(builder.from_writer(fs::File::create(path)?)),
            None => Self::Stdout(builder.from_writer(io::stdout())),
        };
        Ok(wtr)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(wtr) => wtr.flush(),
            Self::Stdout(wtr) => wtr.flush(),
        }
    }

    pub fn write_record<I, T>(&mut self, record: I) -> csv::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        match self {
            Self::File(wtr) => wtr.write_record(record),
            Self::Stdout(wtr) => wtr.write_record(record),
        }
    }

    /// Writes the header row then one row per review.
    pub fn write_dataset(&mut self, dataset: &Dataset) -> csv::Result<()> {
        self.write_record(HEADERS)?;
        for record in dataset.records() {
            let score = format!("{:.1}", record.score);
            self.write_record([record.title, record.text, score.as_str()])?;
        }
        self.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{PageExtraction, Review};

    fn dataset() -> Dataset {
        let mut dataset = Dataset::default();
        dataset.push_page(PageExtraction {
            title: "Foo".into(),
            reviews: vec![
                Review {
                    text: "Great, really".into(),
                    score: 4.0,
                },
                Review {
                    text: "Ok".into(),
                    score: 3.5,
                },
            ],
        });
        dataset
    }

    #[test]
    fn csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie_reviews.csv");

        let mut wtr = CsvWriter::create(&CsvWriterConfig::default(), Some(&path)).unwrap();
        wtr.write_dataset(&dataset()).unwrap();
        drop(wtr);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Title,Review Text,Review Score\nFoo,\"Great, really\",4.0\nFoo,Ok,3.5\n"
        );
    }

    #[test]
    fn tsv_with_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie_reviews.tsv");
        let config = CsvWriterConfig {
            delimiter: '\t',
            terminator: CsvTerminator::CRLF,
            ..Default::default()
        };

        let mut wtr = CsvWriter::create(&config, Some(&path)).unwrap();
        wtr.write_dataset(&dataset()).unwrap();
        drop(wtr);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Title\tReview Text\tReview Score\r\n"));
        assert!(written.contains("Foo\tGreat, really\t4.0\r\n"));
    }

    #[test]
    fn dialect_from_yaml() {
        let config: CsvWriterConfig = serde_yaml::from_str("delimiter: ';'").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie_reviews.csv");

        let mut wtr = CsvWriter::create(&config, Some(&path)).unwrap();
        wtr.write_dataset(&dataset()).unwrap();
        drop(wtr);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Title;Review Text;Review Score\nFoo;Great, really;4.0\nFoo;Ok;3.5\n"
        );
    }
}
