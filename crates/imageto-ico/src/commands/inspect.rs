use std::error::Error;
use std::fs;
use std::path::Path;

use imageto_ico_core::container::{IcoDirectory, read_directory};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Print the directory table of an ICO file.
pub fn run(file: &Path) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(file).map_err(|e| format!("failed to read {}: {}", file.display(), e))?;
    let directory = read_directory(&bytes)?;

    println!("{} ({} bytes, {} images)", file.display(), bytes.len(), directory.entries.len());
    for line in describe(&directory, &bytes) {
        println!("  {}", line);
    }

    Ok(())
}

fn describe(directory: &IcoDirectory, bytes: &[u8]) -> Vec<String> {
    directory
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let kind = match directory.payload(bytes, index) {
                Some(data) if data.starts_with(PNG_SIGNATURE) => "png",
                Some(_) => "bmp",
                None => "?",
            };
            format!(
                "#{} {}x{} {}bpp {} {} bytes @ {}",
                index,
                entry.pixel_width(),
                entry.pixel_height(),
                entry.bits_per_pixel,
                kind,
                entry.data_size,
                entry.data_offset
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageto_ico_core::{IconSize, ImagePayload, encode};
    use tempfile::tempdir;

    #[test]
    fn describes_each_entry() {
        let mut png_like = PNG_SIGNATURE.to_vec();
        png_like.extend_from_slice(&[0; 4]);
        let bytes = encode(&[
            ImagePayload::new(IconSize::new(256).unwrap(), png_like),
            ImagePayload::new(IconSize::new(16).unwrap(), vec![40, 0, 0, 0]),
        ])
        .unwrap();
        let directory = read_directory(&bytes).unwrap();

        let lines = describe(&directory, &bytes);

        assert_eq!(lines[0], "#0 256x256 32bpp png 12 bytes @ 38");
        assert_eq!(lines[1], "#1 16x16 32bpp bmp 4 bytes @ 50");
    }

    #[test]
    fn rejects_non_ico_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.ico");
        fs::write(&path, b"hello world").unwrap();

        assert!(run(&path).is_err());
    }
}
