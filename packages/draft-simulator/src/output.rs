//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::RosterMetrics;
use crate::types::OutputFormat;

enum Sink {
    Jsonl(BufWriter<File>),
    Csv(csv::Writer<BufWriter<File>>),
}

pub struct OutputWriter {
    sink: Sink,
    path: PathBuf,
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        };
        let path = dir.join(format!("drafts_{timestamp}.{extension}"));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        let writer = BufWriter::new(file);

        let sink = match format {
            OutputFormat::Jsonl => Sink::Jsonl(writer),
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(writer)),
        };
        Ok(Self { sink, path })
    }

    pub fn write_roster(
        &mut self,
        metrics: &RosterMetrics,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.sink {
            Sink::Jsonl(writer) => {
                let json = serde_json::to_string(metrics)?;
                writeln!(writer, "{json}")?;
            }
            // Header row comes from the first serialized record.
            Sink::Csv(writer) => writer.serialize(metrics)?,
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &mut self.sink {
            Sink::Jsonl(writer) => writer.flush()?,
            Sink::Csv(writer) => writer.flush()?,
        }
        Ok(self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
