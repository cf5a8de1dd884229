use std::error::Error;
use std::path::Path;

use imageto_ico_core::format::supported_extensions;
use imageto_ico_core::{
    ConvertOptions, Converter, IconSize, PayloadFormat, default_output_path, is_supported,
};

use super::format_sizes;

/// Convert one image. Without `output`, the icon is written next to the input.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    sizes: Vec<IconSize>,
    payload_format: PayloadFormat,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    if !is_supported(input) {
        return Err(format!(
            "unsupported file format: {} (supported: {})",
            input.display(),
            supported_extensions().join(", ")
        )
        .into());
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    let converter = Converter::new(ConvertOptions {
        sizes,
        payload_format,
    });
    let result = converter.convert(input, &output);

    if !result.success {
        return Err(result.error.unwrap_or_else(|| "conversion failed".to_string()).into());
    }

    if !quiet {
        println!("Created {}", result.output_path.display());
        println!("  Input:     {}", result.input_path.display());
        println!("  Sizes:     {}", format_sizes(&result.sizes));
        println!("  Frames:    {}", payload_format);
        if let Some(bytes) = result.file_size {
            println!("  File size: {:.2} KB", bytes as f64 / 1024.0);
        }
        if let (Some(format), Some(size)) = (result.original_format, &result.original_size) {
            println!("  Original:  {} ({})", format, size);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sizes() -> Vec<IconSize> {
        vec![IconSize::new(16).unwrap(), IconSize::new(32).unwrap()]
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("readme.md");
        fs::write(&input, b"# hi").unwrap();

        let err = run(&input, None, sizes(), PayloadFormat::Png, true).unwrap_err();
        assert!(err.to_string().contains("unsupported file format"));
    }

    #[test]
    fn writes_next_to_input_by_default() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("badge.png");
        image::RgbaImage::from_pixel(12, 12, image::Rgba([0, 200, 0, 255]))
            .save(&input)
            .unwrap();

        run(&input, None, sizes(), PayloadFormat::Png, true).unwrap();

        assert!(dir.path().join("badge.ico").exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let err =
            run(&dir.path().join("gone.png"), None, sizes(), PayloadFormat::Png, true).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
