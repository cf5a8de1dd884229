use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::container::{self, ImagePayload};
use crate::error::ConvertError;
use crate::format::{self, InputFormat};
use crate::producer::{PayloadFormat, PayloadProducer, SourceImage};
use crate::size::{self, IconSize};

/// Extension given to every generated file.
pub const ICO_EXTENSION: &str = "ico";

/// Settings shared by every job a [`Converter`] runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Frames to generate, in directory order.
    pub sizes: Vec<IconSize>,
    pub payload_format: PayloadFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            sizes: size::default_sizes(),
            payload_format: PayloadFormat::default(),
        }
    }
}

/// Outcome of one conversion job. Failures are reported here rather than
/// returned as errors, so one bad input never stops a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<IconSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_format: Option<InputFormat>,
    /// Source dimensions as `"WIDTHxHEIGHT"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    fn failed(input: &Path, output: &Path, error: &ConvertError) -> Self {
        ConversionResult {
            success: false,
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            sizes: Vec::new(),
            file_size: None,
            original_format: None,
            original_size: None,
            error: Some(error.to_string()),
        }
    }
}

/// Runs conversion jobs with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Converter { options }
    }

    /// Convert one image file into an ICO file at `output`.
    pub fn convert(&self, input: &Path, output: &Path) -> ConversionResult {
        let source = match open_source(input) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("{}", e);
                return ConversionResult::failed(input, output, &e);
            }
        };

        self.convert_from(input, &source, output)
    }

    /// Build and write an ICO file from an already prepared producer.
    ///
    /// `input` is only used for reporting.
    pub fn convert_from<P>(&self, input: &Path, producer: &P, output: &Path) -> ConversionResult
    where
        P: PayloadProducer + ?Sized,
    {
        let result = self
            .build(producer)
            .and_then(|bytes| write_output(output, &bytes).map(|()| bytes.len() as u64));

        match result {
            Ok(file_size) => {
                let info = producer.source_info();
                log::info!(
                    "converted {} -> {} ({} bytes, {} frames)",
                    input.display(),
                    output.display(),
                    file_size,
                    self.options.sizes.len()
                );

                ConversionResult {
                    success: true,
                    input_path: input.to_path_buf(),
                    output_path: output.to_path_buf(),
                    sizes: self.options.sizes.clone(),
                    file_size: Some(file_size),
                    original_format: Some(info.format),
                    original_size: Some(format!("{}x{}", info.width, info.height)),
                    error: None,
                }
            }
            Err(e) => {
                log::warn!("{}: {}", input.display(), e);
                ConversionResult::failed(input, output, &e)
            }
        }
    }

    /// Produce every requested frame, in order, and encode the container.
    ///
    /// The first frame that fails aborts the job; later sizes are never
    /// rendered.
    pub fn build<P>(&self, producer: &P) -> Result<Vec<u8>, ConvertError>
    where
        P: PayloadProducer + ?Sized,
    {
        let payloads = self
            .options
            .sizes
            .iter()
            .map(|&size| producer.produce(size, self.options.payload_format))
            .collect::<Result<Vec<ImagePayload>, _>>()?;

        Ok(container::encode(&payloads)?)
    }

    /// Convert each input into `<output_dir>/<stem>.ico`.
    ///
    /// Returns one result per input, in input order. Once an input has been
    /// written to an output file, later inputs mapping to the same file fail
    /// instead of overwriting it. A failed job claims nothing.
    pub fn batch_convert(&self, inputs: &[PathBuf], output_dir: &Path) -> Vec<ConversionResult> {
        let mut written: HashSet<PathBuf> = HashSet::new();
        let mut results = Vec::with_capacity(inputs.len());

        for (index, input) in inputs.iter().enumerate() {
            let output = output_path_in(input, output_dir);
            log::debug!("[{}/{}] {}", index + 1, inputs.len(), input.display());

            if written.contains(&output) {
                let error = ConvertError::Write {
                    path: output.clone(),
                    source: io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "output already written by an earlier input in this batch",
                    ),
                };
                log::warn!("{}: {}", input.display(), error);
                results.push(ConversionResult::failed(input, &output, &error));
                continue;
            }

            let result = self.convert(input, &output);
            if result.success {
                written.insert(output);
            }
            results.push(result);
        }

        results
    }
}

/// Convert with default options, optionally overriding the size list.
pub fn convert(input: &Path, output: &Path, sizes: Option<&[IconSize]>) -> ConversionResult {
    converter_for(sizes).convert(input, output)
}

/// Batch form of [`convert`]; see [`Converter::batch_convert`].
pub fn batch_convert(
    inputs: &[PathBuf],
    output_dir: &Path,
    sizes: Option<&[IconSize]>,
) -> Vec<ConversionResult> {
    converter_for(sizes).batch_convert(inputs, output_dir)
}

fn converter_for(sizes: Option<&[IconSize]>) -> Converter {
    let mut options = ConvertOptions::default();
    if let Some(sizes) = sizes {
        options.sizes = sizes.to_vec();
    }
    Converter::new(options)
}

/// `<input dir>/<stem>.ico`, used when no output path is given.
pub fn default_output_path(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    output_path_in(input, dir)
}

/// `<dir>/<stem of input>.ico`.
pub fn output_path_in(input: &Path, dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "icon".into());
    name.push(".");
    name.push(ICO_EXTENSION);
    dir.join(name)
}

/// Write all results as pretty JSON.
pub fn write_report(results: &[ConversionResult], path: &Path) -> io::Result<()> {
    let content = serde_json::to_string_pretty(results)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, content)
}

/// Checks done before any decoding: the file exists and its extension is
/// one we can read.
fn open_source(input: &Path) -> Result<SourceImage, ConvertError> {
    let is_file = fs::metadata(input).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(ConvertError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    if !format::is_supported(input) {
        return Err(ConvertError::UnsupportedFormat {
            path: input.to_path_buf(),
        });
    }

    SourceImage::open(input)
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_error = |source: io::Error| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(output, bytes).map_err(write_error)
}
