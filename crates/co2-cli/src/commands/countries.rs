use std::io::{self, Write};

use anyhow::Result;
use co2_core::Table;

use co2_cli::common::{write_json, OutputFormat};

pub fn handle(table: &Table, format: OutputFormat) -> Result<()> {
    render(table, format, io::stdout().lock())
}

pub fn render<W: Write>(table: &Table, format: OutputFormat, mut out: W) -> Result<()> {
    let countries = table.countries();
    match format {
        OutputFormat::Json => write_json(out, &countries),
        OutputFormat::Table => {
            for country in countries {
                writeln!(out, "{country}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use co2_core::EmissionsRecord;

    #[test]
    fn test_lists_each_country_once() {
        let table = Table::from_records(vec![
            EmissionsRecord::new("World", 1900),
            EmissionsRecord::new("Asia", 1900),
            EmissionsRecord::new("World", 1901),
        ]);
        let mut buf = Vec::new();
        render(&table, OutputFormat::Table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "World\nAsia\n");
    }
}
