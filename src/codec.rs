//! JSON and CSV renderings of an [`AllocationTable`].

use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::allocation::AllocationTable;
use crate::error::{ConfigError, ConfigResult};

/// One `address,amount` row. Amounts stay textual so parse errors can be
/// reported with their row.
#[derive(Debug, Deserialize, Serialize)]
struct AllocationRow {
    address: String,
    amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn to_json(table: &AllocationTable, pretty: bool) -> ConfigResult<String> {
    let json_string = if pretty {
        serde_json::to_string_pretty(table)?
    } else {
        serde_json::to_string(table)?
    };
    Ok(json_string)
}

pub fn from_json(text: &str) -> ConfigResult<AllocationTable> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_csv(table: &AllocationTable) -> ConfigResult<String> {
    let mut writer = Writer::from_writer(Vec::new());

    for (address, amount) in table.iter() {
        writer.serialize(AllocationRow {
            address: address.to_string(),
            amount: amount.to_string(),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConfigError::Io(e.into_error()))?;

    String::from_utf8(bytes)
        .map_err(|e| ConfigError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Parses `address,amount` rows. CSV carries no precision column, so the
/// caller supplies `decimals`.
///
/// Addresses are taken verbatim, blank ones included, so any table written by
/// [`to_csv`] reads back unchanged. Only the amount cell is trimmed.
pub fn from_csv(text: &str, decimals: u8) -> ConfigResult<AllocationTable> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let mut airdrop = BTreeMap::new();

    for (i, result) in csv_reader.deserialize::<AllocationRow>().enumerate() {
        let row = i + 1;
        let record = result?;

        let address = record.address;
        let amount = record.amount.trim();

        if amount.is_empty() {
            return Err(ConfigError::EmptyField { row, field: "amount" });
        }

        let amount = amount
            .parse::<u128>()
            .map_err(|_| ConfigError::InvalidAmount {
                row,
                value: amount.to_string(),
            })?;

        if airdrop.contains_key(&address) {
            return Err(ConfigError::DuplicateAddress { row, address });
        }
        airdrop.insert(address, amount);
    }

    Ok(AllocationTable::new(decimals, airdrop))
}

/// Loads a table from disk, choosing the codec by file extension.
/// `decimals` is only consulted for CSV input.
pub fn read_file<P: AsRef<Path>>(path: P, decimals: u8) -> ConfigResult<AllocationTable> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    let table = match format {
        Format::Json => from_json(&content)?,
        Format::Csv => from_csv(&content, decimals)?,
    };

    debug!("Loaded {} allocations from {}", table.len(), path.display());
    Ok(table)
}

pub fn write_file<P: AsRef<Path>>(
    path: P,
    table: &AllocationTable,
    format: Format,
    pretty: bool,
) -> ConfigResult<()> {
    let path = path.as_ref();
    let content = render(table, format, pretty)?;
    std::fs::write(path, content)?;

    debug!("Wrote {} allocations to {}", table.len(), path.display());
    Ok(())
}

pub fn render(table: &AllocationTable, format: Format, pretty: bool) -> ConfigResult<String> {
    match format {
        Format::Json => to_json(table, pretty),
        Format::Csv => to_csv(table),
    }
}
