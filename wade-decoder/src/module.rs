//! Module decoding driver.
//!
//! Walks a module binary front to back: header first, then the section
//! stream. Known sections must appear in strictly increasing id order and
//! at most once each; custom sections may appear anywhere, any number of
//! times. Decoding is a pure function of the input bytes; whatever decoded
//! before a failure is returned alongside the error so callers can see how
//! far the stream was good.

use log::{debug, trace};

use crate::prelude::*;
use crate::reader::ByteCursor;
use crate::sections;

/// Knobs for the decoding policies the binary grammar leaves open.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Reject global mutability bytes outside {0x00, 0x01} instead of
    /// treating them as immutable.
    pub strict_mutability: bool,
}

/// Result of decoding a module binary.
///
/// The module holds every section that decoded successfully; `error` is
/// set when decoding stopped early.
#[derive(Debug)]
pub struct DecodeOutput {
    /// The decoded (possibly partial) module
    pub module: Module,
    /// The error that stopped decoding, if any
    pub error: Option<Error>,
}

impl DecodeOutput {
    /// Convert into a plain `Result`, dropping the partial module on error.
    pub fn into_result(self) -> Result<Module> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.module),
        }
    }

    /// Whether decoding completed without error.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Decode a WebAssembly module binary with default options.
#[must_use]
pub fn decode_module(bytes: &[u8]) -> DecodeOutput {
    decode_module_with_options(bytes, &DecodeOptions::default())
}

/// Decode a WebAssembly module binary.
#[must_use]
pub fn decode_module_with_options(bytes: &[u8], options: &DecodeOptions) -> DecodeOutput {
    debug!("decoding module: {} bytes", bytes.len());

    let mut cursor = ByteCursor::new(bytes);
    let mut module = Module::new();

    let outcome = read_header(&mut cursor)
        .and_then(|()| read_sections(&mut cursor, &mut module, options));

    match outcome {
        Ok(()) => {
            debug!(
                "decoded module: {} types, {} functions, {} custom sections",
                module.types.len(),
                module.functions.len(),
                module.custom_sections.len()
            );
            DecodeOutput { module, error: None }
        }
        Err(error) => DecodeOutput {
            module,
            error: Some(error),
        },
    }
}

/// Check the 8-byte header: magic then version, both little-endian.
pub(crate) fn read_header(cursor: &mut ByteCursor<'_>) -> Result<()> {
    let magic = cursor.read_u32_le()?;
    if magic != binary::MAGIC_NUMBER {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_MAGIC,
            format!("invalid magic number 0x{magic:08x}"),
        ));
    }

    let version = cursor.read_u32_le()?;
    if version != binary::VERSION_NUMBER {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_VERSION,
            format!("unsupported version {version}"),
        ));
    }

    Ok(())
}

fn read_sections(
    cursor: &mut ByteCursor<'_>,
    module: &mut Module,
    options: &DecodeOptions,
) -> Result<()> {
    let mut prev_id = 0u8;

    while cursor.remaining() > 0 {
        let section_id = cursor.read_byte()?;

        if section_id == binary::CUSTOM_SECTION_ID {
            // Order-independent, may repeat, may interleave.
            sections::read_custom_section(cursor, module)
                .map_err(|e| e.context("custom section"))?;
            continue;
        }

        if section_id <= prev_id || section_id > binary::DATA_SECTION_ID {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::INVALID_SECTION_ORDER,
                format!(
                    "section id {section_id} after section id {prev_id} breaks section ordering"
                ),
            ));
        }

        let (payload_len, _) = cursor.read_var_u32()?;
        trace!("section id {section_id}, {payload_len} byte payload");

        // Each section decoder is obliged to consume exactly its payload;
        // the driver does not re-check consumption.
        match section_id {
            binary::TYPE_SECTION_ID => {
                sections::read_type_section(cursor, module).map_err(|e| e.context("type section"))
            }
            binary::IMPORT_SECTION_ID => sections::read_import_section(cursor, module, options)
                .map_err(|e| e.context("import section")),
            binary::FUNCTION_SECTION_ID => sections::read_function_section(cursor, module)
                .map_err(|e| e.context("function section")),
            binary::TABLE_SECTION_ID => {
                sections::read_table_section(cursor, module).map_err(|e| e.context("table section"))
            }
            binary::MEMORY_SECTION_ID => sections::read_memory_section(cursor, module)
                .map_err(|e| e.context("memory section")),
            binary::GLOBAL_SECTION_ID => sections::read_global_section(cursor, module, options)
                .map_err(|e| e.context("global section")),
            binary::EXPORT_SECTION_ID => sections::read_export_section(cursor, module)
                .map_err(|e| e.context("export section")),
            binary::START_SECTION_ID => {
                sections::read_start_section(cursor, module).map_err(|e| e.context("start section"))
            }
            binary::ELEMENT_SECTION_ID => sections::read_element_section(cursor, module)
                .map_err(|e| e.context("element section")),
            binary::CODE_SECTION_ID => {
                sections::read_code_section(cursor, module).map_err(|e| e.context("code section"))
            }
            binary::DATA_SECTION_ID => {
                sections::read_data_section(cursor, module).map_err(|e| e.context("data section"))
            }
            _ => unreachable!("section id bounds checked above"),
        }?;

        prev_id = section_id;
    }

    Ok(())
}
