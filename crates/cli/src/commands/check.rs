use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::Value;
use tracing::info;

use crate::schema_file;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_check(
    schema_path: &Path,
    payload_paths: &[PathBuf],
    output: OutputFormat,
    quiet: bool,
) {
    let schema = match schema_file::load(schema_path) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    let decode = sift_core::decoder(schema);
    let mut failed = false;

    for path in payload_paths {
        let label = path.display().to_string();

        let payload = match read_payload(path) {
            Ok(v) => v,
            Err(msg) => {
                report_error(&msg, output, quiet);
                failed = true;
                continue;
            }
        };

        match decode(Some(&payload)) {
            Ok(record) => {
                info!(payload = %label, "payload decoded");
                if quiet {
                    continue;
                }
                match output {
                    OutputFormat::Text => {
                        println!("ok: {}", label);
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&record).unwrap_or_default()
                        );
                    }
                    OutputFormat::Json => {
                        let json = serde_json::json!({
                            "payload": label,
                            "valid": true,
                            "record": record,
                        });
                        println!("{}", json);
                    }
                }
            }
            Err(errors) => {
                info!(payload = %label, failures = errors.len(), "payload rejected");
                failed = true;
                match output {
                    OutputFormat::Text => {
                        if !quiet {
                            eprintln!("invalid: {}", label);
                            for err in &errors {
                                eprintln!("  - {}", err);
                            }
                        }
                    }
                    OutputFormat::Json => {
                        let json = serde_json::json!({
                            "payload": label,
                            "valid": false,
                            "errors": errors,
                        });
                        println!("{}", json);
                    }
                }
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

/// Read and parse one payload. `-` reads stdin.
fn read_payload(path: &Path) -> Result<Value, String> {
    let src = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("error reading payload from stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("error reading payload '{}': {}", path.display(), e))?
    };

    serde_json::from_str(&src)
        .map_err(|e| format!("error parsing JSON in '{}': {}", path.display(), e))
}
