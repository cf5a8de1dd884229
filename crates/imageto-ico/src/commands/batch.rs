use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use imageto_ico_core::convert::write_report;
use imageto_ico_core::{ConvertOptions, Converter, IconSize, PayloadFormat, is_supported};

/// Convert every usable input into `output_dir`.
///
/// Inputs that are not regular files or have an unsupported extension are
/// skipped with a warning. Returns an error if nothing was usable or if any
/// conversion failed; the others still complete.
pub fn run(
    inputs: &[PathBuf],
    output_dir: &Path,
    sizes: Vec<IconSize>,
    payload_format: PayloadFormat,
    report: Option<&Path>,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    let files = collect_inputs(inputs, quiet);
    if files.is_empty() {
        return Err("no valid input files found".into());
    }

    fs::create_dir_all(output_dir)
        .map_err(|e| format!("failed to create output directory {}: {}", output_dir.display(), e))?;

    if !quiet {
        println!("Converting {} file(s)...", files.len());
    }

    let converter = Converter::new(ConvertOptions {
        sizes,
        payload_format,
    });
    let results = converter.batch_convert(&files, output_dir);

    let mut failed = 0;
    for result in &results {
        if !result.success {
            failed += 1;
            eprintln!(
                "Failed: {} - {}",
                result.input_path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if let Some(report_path) = report {
        write_report(&results, report_path)
            .map_err(|e| format!("failed to write report {}: {}", report_path.display(), e))?;
    }

    if !quiet {
        println!("\nBatch conversion complete!");
        println!("  Total files: {}", results.len());
        println!("  Successful:  {}", results.len() - failed);
        if failed > 0 {
            println!("  Failed:      {}", failed);
        }
        println!("  Output directory: {}", output_dir.display());
        if let Some(report_path) = report {
            println!("  Report: {}", report_path.display());
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} conversions failed", failed, results.len()).into());
    }

    Ok(())
}

/// Keep regular files with a supported extension, in the given order.
fn collect_inputs(inputs: &[PathBuf], quiet: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        let reason = match fs::metadata(input) {
            Ok(meta) if !meta.is_file() => Some("not a regular file".to_string()),
            Ok(_) if !is_supported(input) => Some("unsupported format".to_string()),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };

        match reason {
            None => files.push(input.clone()),
            Some(reason) => {
                if !quiet {
                    eprintln!("Skipping {}: {}", input.display(), reason);
                }
                log::warn!("skipping {}: {}", input.display(), reason);
            }
        }
    }

    files
}
