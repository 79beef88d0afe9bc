//! Endpoint lists stored as headerless CSV, one `protocol,address,port`
//! per line. Empty fields mean "absent"; blank lines are skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::models::filter::Endpoint;
use crate::utils::error::{AppError, AppResult};

const FIELDS: usize = 3;

/// Parse an endpoint list from any reader
pub fn parse_endpoints<R: Read>(reader: R) -> AppResult<Vec<Endpoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut endpoints = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        if let Some(endpoint) = parse_record(&record, line)? {
            endpoints.push(endpoint);
        }
    }

    Ok(endpoints)
}

fn parse_record(record: &StringRecord, line: u64) -> AppResult<Option<Endpoint>> {
    if record.iter().all(str::is_empty) {
        return Ok(None);
    }
    if record.len() > FIELDS {
        return Err(AppError::EndpointParse {
            line,
            message: format!("expected at most {FIELDS} fields, found {}", record.len()),
        });
    }

    let field = |i: usize| record.get(i).filter(|f| !f.is_empty());

    let port = match field(2) {
        Some(raw) => Some(raw.parse::<u16>().map_err(|e| AppError::EndpointParse {
            line,
            message: format!("invalid port '{raw}': {e}"),
        })?),
        None => None,
    };

    Ok(Some(Endpoint::new(field(0), field(1), port)))
}

/// Load the endpoint list stored at `path`
pub fn load_endpoints(path: &Path) -> AppResult<Vec<Endpoint>> {
    debug!("Loading endpoint list from {}", path.display());
    let file = std::fs::File::open(path)?;
    parse_endpoints(file)
}

/// Load several endpoint lists and concatenate them in order
pub fn load_endpoint_lists(paths: &[PathBuf]) -> AppResult<Vec<Endpoint>> {
    let mut endpoints = Vec::new();
    for path in paths {
        endpoints.extend(load_endpoints(path)?);
    }
    info!("Loaded {} endpoints from {} list(s)", endpoints.len(), paths.len());
    Ok(endpoints)
}
