use std::io::Write;

use clap::ValueEnum;

use crate::error::Result;
use crate::model::Visit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Counted <count> visits from <address> (<description>)`
    #[default]
    Text,
    /// count,address,network,description with a header row
    Csv,
    /// One JSON object per line
    Json,
}

/// Writes the attributed visits to `writer` in the requested format.
pub fn write_report<W: Write>(mut writer: W, visits: &[Visit], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Csv {
        return write_csv(writer, visits);
    }

    for visit in visits {
        match format {
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(visit)?)?,
            _ => writeln!(
                writer,
                "Counted {} visits from {} ({})",
                visit.count, visit.address, visit.description
            )?,
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_csv<W: Write>(writer: W, visits: &[Visit]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    // header comes from the field names
    for visit in visits {
        wtr.serialize(visit)?;
    }
    if visits.is_empty() {
        wtr.write_record(["count", "address", "network", "description"])?;
    }
    wtr.flush()?;
    Ok(())
}
