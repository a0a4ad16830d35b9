//! Decoders for the primitive type encodings.
//!
//! These read single values (value types, limits, table/memory/global
//! types, function types, names, expressions) from a [`ByteCursor`]; the
//! section decoders compose them into count-prefixed sequences.

use crate::module::DecodeOptions;
use crate::prelude::*;
use crate::reader::ByteCursor;
use wade_format::types::{Expr, FuncType, GlobalType, Limits, MemoryType, TableType, ValType};

/// Read a value type byte.
///
/// Any byte is accepted as-is; unknown bytes only fail later, at the point
/// of use (`ValType::name`). Validation may tighten this, the decoder stays
/// permissive for forward compatibility.
pub fn read_val_type(cursor: &mut ByteCursor<'_>) -> Result<ValType> {
    Ok(ValType(cursor.read_byte()?))
}

/// Read a limits encoding: a flag byte, a minimum, and a maximum when the
/// flag says so.
pub fn read_limits(cursor: &mut ByteCursor<'_>) -> Result<Limits> {
    let flag = cursor.read_byte()?;
    match flag {
        binary::LIMITS_FLAG_MIN => {
            let (min, _) = cursor.read_var_u32()?;
            Ok(Limits { min, max: None })
        }
        binary::LIMITS_FLAG_MIN_MAX => {
            let (min, _) = cursor.read_var_u32()?;
            let (max, _) = cursor.read_var_u32()?;
            Ok(Limits { min, max: Some(max) })
        }
        other => Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_LIMITS_FLAG,
            format!("invalid limits flag 0x{other:02x}"),
        )),
    }
}

/// Read a table type: the funcref tag byte followed by limits.
pub fn read_table_type(cursor: &mut ByteCursor<'_>) -> Result<TableType> {
    let tag = cursor.read_byte()?;
    if tag != binary::TABLE_TYPE_TAG {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_TABLE_TAG,
            format!("invalid table element type tag 0x{tag:02x}"),
        ));
    }
    let limits = read_limits(cursor)?;
    Ok(TableType { limits })
}

/// Read a memory type: just limits.
pub fn read_memory_type(cursor: &mut ByteCursor<'_>) -> Result<MemoryType> {
    let limits = read_limits(cursor)?;
    Ok(MemoryType { limits })
}

/// Read a global type: a value type followed by a mutability byte.
///
/// A mutability byte outside {0x00, 0x01} is treated as immutable by
/// default; strict decoding rejects it.
pub fn read_global_type(
    cursor: &mut ByteCursor<'_>,
    options: &DecodeOptions,
) -> Result<GlobalType> {
    let val_type = read_val_type(cursor)?;
    let flag = cursor.read_byte()?;
    if options.strict_mutability && flag != binary::MUTABILITY_CONST && flag != binary::MUTABILITY_VAR {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_MUTABILITY_FLAG,
            format!("invalid global mutability flag 0x{flag:02x}"),
        ));
    }
    Ok(GlobalType {
        val_type,
        mutable: flag == binary::MUTABILITY_VAR,
    })
}

/// Read a function type: the 0x60 tag, then length-prefixed parameter and
/// result value type sequences.
pub fn read_func_type(cursor: &mut ByteCursor<'_>) -> Result<FuncType> {
    let tag = cursor.read_byte()?;
    if tag != binary::FUNC_TYPE_TAG {
        return Err(Error::new(
            ErrorCategory::Parse,
            codes::INVALID_FUNC_TYPE_TAG,
            format!("invalid function type tag 0x{tag:02x}"),
        ));
    }
    let params = read_val_type_sequence(cursor)?;
    let results = read_val_type_sequence(cursor)?;
    Ok(FuncType::new(params, results))
}

fn read_val_type_sequence(cursor: &mut ByteCursor<'_>) -> Result<Vec<ValType>> {
    let (count, _) = cursor.read_var_u32()?;
    let mut types = Vec::with_capacity(cursor.capacity_hint(count));
    for _ in 0..count {
        types.push(read_val_type(cursor)?);
    }
    Ok(types)
}

/// Read a length-prefixed UTF-8 name.
///
/// Returns the string and the number of length-prefix bytes consumed; the
/// custom section decoder needs the prefix width to account for its
/// declared byte length.
pub fn read_name(cursor: &mut ByteCursor<'_>) -> Result<(String, usize)> {
    let (len, prefix_len) = cursor.read_var_u32()?;
    let bytes = cursor.read_bytes(len as usize)?;
    let name = core::str::from_utf8(bytes)
        .map_err(|_| {
            Error::new(
                ErrorCategory::Parse,
                codes::INVALID_UTF8,
                "name is not valid UTF-8",
            )
        })?
        .to_string();
    Ok((name, prefix_len))
}

/// Read an expression by scanning for the `end` opcode.
///
/// The accumulated bytes exclude the terminator. This is the one decoder
/// that does not know its length up front; code bodies use the explicit
/// length path in the code section instead.
pub fn read_expr(cursor: &mut ByteCursor<'_>) -> Result<Expr> {
    let mut bytes = Vec::new();
    loop {
        let op = cursor.read_byte()?;
        if op == binary::END_OPCODE {
            break;
        }
        bytes.push(op);
    }
    Ok(Expr::new(bytes))
}
