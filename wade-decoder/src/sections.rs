//! Section decoders for the WebAssembly binary format.
//!
//! Each decoder is entered with the cursor positioned at the section
//! payload, the driver having consumed the section id and declared length.
//! Known sections are count-prefixed sequences of records; a decoder must
//! consume exactly its payload or every later section desynchronizes.

use crate::module::DecodeOptions;
use crate::prelude::*;
use crate::primitives;
use crate::reader::ByteCursor;
use wade_format::module::{
    Code, CustomSection, Data, Element, Export, ExportDesc, Global, Import, ImportDesc,
    LocalEntry,
};

/// Decode a custom section.
///
/// Not count-prefixed: a name followed by opaque bytes up to the section's
/// declared length. Unrecognized custom sections are preserved unchanged,
/// payload and all.
pub fn read_custom_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (section_len, _) = cursor.read_var_u32()?;
    let (name, prefix_len) = primitives::read_name(cursor)?;

    let consumed = prefix_len + name.len();
    let payload_len = (section_len as usize).checked_sub(consumed).ok_or_else(|| {
        Error::new(
            ErrorCategory::Parse,
            codes::PARSE_ERROR,
            format!(
                "custom section '{name}': name overruns declared length {section_len}"
            ),
        )
    })?;

    let data = cursor.read_bytes(payload_len)?.to_vec();
    module.custom_sections.push(CustomSection { name, data });
    Ok(())
}

/// Decode the type section: a sequence of function types.
pub fn read_type_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.types.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let func_type =
            primitives::read_func_type(cursor).map_err(|e| e.context(&format!("type {i}")))?;
        module.types.push(func_type);
    }
    Ok(())
}

/// Decode the import section.
pub fn read_import_section(
    cursor: &mut ByteCursor<'_>,
    module: &mut Module,
    options: &DecodeOptions,
) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.imports.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let import =
            read_import(cursor, options).map_err(|e| e.context(&format!("import {i}")))?;
        module.imports.push(import);
    }
    Ok(())
}

fn read_import(cursor: &mut ByteCursor<'_>, options: &DecodeOptions) -> Result<Import> {
    let (module_name, _) = primitives::read_name(cursor)?;
    let (name, _) = primitives::read_name(cursor)?;

    let tag = cursor.read_byte()?;
    let desc = match tag {
        binary::IMPORT_TAG_FUNC => {
            let (type_idx, _) = cursor.read_var_u32()?;
            ImportDesc::Func(type_idx)
        }
        binary::IMPORT_TAG_TABLE => ImportDesc::Table(primitives::read_table_type(cursor)?),
        binary::IMPORT_TAG_MEMORY => ImportDesc::Memory(primitives::read_memory_type(cursor)?),
        binary::IMPORT_TAG_GLOBAL => {
            ImportDesc::Global(primitives::read_global_type(cursor, options)?)
        }
        other => {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::INVALID_IMPORT_TAG,
                format!("invalid import tag 0x{other:02x}"),
            ));
        }
    };

    Ok(Import {
        module: module_name,
        name,
        desc,
    })
}

/// Decode the function section: type indices for locally defined functions.
pub fn read_function_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.functions.reserve(cursor.capacity_hint(count));
    for _ in 0..count {
        let (type_idx, _) = cursor.read_var_u32()?;
        module.functions.push(type_idx);
    }
    Ok(())
}

/// Decode the table section.
///
/// Zero or more entries per the general section grammar; restricting a
/// module to one table is a semantic-validation rule, not a parse rule.
pub fn read_table_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.tables.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let table =
            primitives::read_table_type(cursor).map_err(|e| e.context(&format!("table {i}")))?;
        module.tables.push(table);
    }
    Ok(())
}

/// Decode the memory section. Zero or more entries, as for tables.
pub fn read_memory_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.memories.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let memory =
            primitives::read_memory_type(cursor).map_err(|e| e.context(&format!("memory {i}")))?;
        module.memories.push(memory);
    }
    Ok(())
}

/// Decode the global section: a global type plus initializer per entry.
pub fn read_global_section(
    cursor: &mut ByteCursor<'_>,
    module: &mut Module,
    options: &DecodeOptions,
) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.globals.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let entry = (|| {
            let global_type = primitives::read_global_type(cursor, options)?;
            let init = primitives::read_expr(cursor)?;
            Ok(Global { global_type, init })
        })()
        .map_err(|e: Error| e.context(&format!("global {i}")))?;
        module.globals.push(entry);
    }
    Ok(())
}

/// Decode the export section.
pub fn read_export_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.exports.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let export = read_export(cursor).map_err(|e| e.context(&format!("export {i}")))?;
        module.exports.push(export);
    }
    Ok(())
}

fn read_export(cursor: &mut ByteCursor<'_>) -> Result<Export> {
    let (name, _) = primitives::read_name(cursor)?;
    let tag = cursor.read_byte()?;
    let (index, _) = cursor.read_var_u32()?;

    let desc = match tag {
        binary::EXPORT_TAG_FUNC => ExportDesc::Func(index),
        binary::EXPORT_TAG_TABLE => ExportDesc::Table(index),
        binary::EXPORT_TAG_MEMORY => ExportDesc::Memory(index),
        binary::EXPORT_TAG_GLOBAL => ExportDesc::Global(index),
        other => {
            return Err(Error::new(
                ErrorCategory::Parse,
                codes::INVALID_EXPORT_TAG,
                format!("invalid export tag 0x{other:02x}"),
            ));
        }
    };

    Ok(Export { name, desc })
}

/// Decode the start section: a single function index, not count-prefixed.
pub fn read_start_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (func_idx, _) = cursor.read_var_u32()?;
    module.start = Some(func_idx);
    Ok(())
}

/// Decode the element section.
pub fn read_element_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.elements.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let element = read_element(cursor).map_err(|e| e.context(&format!("element {i}")))?;
        module.elements.push(element);
    }
    Ok(())
}

fn read_element(cursor: &mut ByteCursor<'_>) -> Result<Element> {
    let (table, _) = cursor.read_var_u32()?;
    let offset = primitives::read_expr(cursor)?;

    let (func_count, _) = cursor.read_var_u32()?;
    let mut init = Vec::with_capacity(cursor.capacity_hint(func_count));
    for _ in 0..func_count {
        let (func_idx, _) = cursor.read_var_u32()?;
        init.push(func_idx);
    }

    Ok(Element { table, offset, init })
}

/// Decode the code section.
///
/// Each entry declares its byte length up front; the body is whatever is
/// left of the entry after the locals, so no end-marker scan happens here.
pub fn read_code_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.code.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let code = read_code_entry(cursor).map_err(|e| e.context(&format!("code entry {i}")))?;
        module.code.push(code);
    }
    Ok(())
}

fn read_code_entry(cursor: &mut ByteCursor<'_>) -> Result<Code> {
    let (entry_len, _) = cursor.read_var_u32()?;

    let (local_group_count, mut locals_len) = cursor.read_var_u32()?;
    let mut locals = Vec::with_capacity(cursor.capacity_hint(local_group_count));
    for _ in 0..local_group_count {
        let (run_count, consumed) = cursor.read_var_u32()?;
        let val_type = primitives::read_val_type(cursor)?;
        locals_len += consumed + 1;
        locals.push(LocalEntry {
            count: run_count,
            val_type,
        });
    }

    let body_len = (entry_len as usize).checked_sub(locals_len).ok_or_else(|| {
        Error::new(
            ErrorCategory::Parse,
            codes::INVALID_CODE_LENGTH,
            format!("locals ({locals_len} bytes) overrun declared entry length {entry_len}"),
        )
    })?;

    let body = wade_format::types::Expr::new(cursor.read_bytes(body_len)?.to_vec());
    Ok(Code { locals, body })
}

/// Decode the data section: memory index, offset expression, raw bytes.
pub fn read_data_section(cursor: &mut ByteCursor<'_>, module: &mut Module) -> Result<()> {
    let (count, _) = cursor.read_var_u32()?;
    module.data.reserve(cursor.capacity_hint(count));
    for i in 0..count {
        let segment = read_data(cursor).map_err(|e| e.context(&format!("data segment {i}")))?;
        module.data.push(segment);
    }
    Ok(())
}

fn read_data(cursor: &mut ByteCursor<'_>) -> Result<Data> {
    let (memory, _) = cursor.read_var_u32()?;
    let offset = primitives::read_expr(cursor)?;
    let (len, _) = cursor.read_var_u32()?;
    let init = cursor.read_bytes(len as usize)?.to_vec();
    Ok(Data { memory, offset, init })
}
