use std::path::Path;
use std::process;

use crate::schema_file;
use crate::{report_error, OutputFormat};

/// Print the fields a schema file declares, in evaluation order.
pub(crate) fn cmd_fields(schema_path: &Path, output: OutputFormat, quiet: bool) {
    let schema = match schema_file::load(schema_path) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }

    match output {
        OutputFormat::Text => {
            for name in schema.names() {
                println!("{}", name);
            }
        }
        OutputFormat::Json => {
            let names: Vec<&str> = schema.names().collect();
            println!("{}", serde_json::json!({ "fields": names }));
        }
    }
}
