use flate2::read::GzDecoder;
use loanscope_core::{Dataset, Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Read a JSON-lines dataset, one object per line.
///
/// Files ending in `.gz` are decompressed on the fly.
pub fn read_json_lines<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::load(&name, e.to_string()))?;

    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let dataset = parse_json_lines(&name, BufReader::new(reader))?;
    debug!("Read {} rows from {}", dataset.len(), name);
    Ok(dataset)
}

/// Parse JSON lines from any buffered reader. Blank lines are skipped.
pub fn parse_json_lines<R: BufRead>(name: &str, reader: R) -> Result<Dataset> {
    let mut dataset = Dataset::new(name);

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let location = format!("{}:{}", name, line_no);
        let line = line.map_err(|e| Error::load(&location, e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(values)) => dataset.push(line_no, values),
            Ok(_) => return Err(Error::load(location, "expected a JSON object")),
            Err(e) => return Err(Error::load(location, e.to_string())),
        }
    }

    Ok(dataset)
}
