//! End-to-end decoding tests against real module binaries.
//!
//! Modules are assembled from text with `wat` so the fixtures stay
//! readable; a few byte-level fixtures cover encodings the assembler
//! normalizes away.

use proptest::prelude::*;
use wade_decoder::{decode_module, primitives, ByteCursor};
use wade_format::binary::write_leb128_u32;
use wade_format::module::{ExportDesc, ImportDesc};
use wade_format::types::{FuncType, ValType};
use wade_error::codes;

fn assemble(source: &str) -> Vec<u8> {
    wat::parse_str(source).unwrap()
}

#[test]
fn decodes_a_module_with_functions_memory_global_and_start() {
    let bytes = assemble(
        r#"
        (module
          (memory (export "mem") 1 2)
          (global $g (mut i32) (i32.const 41))
          (func $add (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.add)
          (func $init)
          (export "add" (func $add))
          (start $init))
        "#,
    );

    let module = decode_module(&bytes).into_result().unwrap();

    assert_eq!(module.functions.len(), 2);
    assert_eq!(module.code.len(), 2);

    let add_sig = &module.types[module.functions[0] as usize];
    assert_eq!(add_sig.params, vec![ValType::I32, ValType::I32]);
    assert_eq!(add_sig.results, vec![ValType::I32]);

    let init_sig = &module.types[module.functions[1] as usize];
    assert!(init_sig.params.is_empty());
    assert!(init_sig.results.is_empty());

    // local.get 0, local.get 1, i32.add; the end marker is stripped.
    assert_eq!(module.code[0].body.as_bytes(), &[0x20, 0x00, 0x20, 0x01, 0x6A]);
    assert_eq!(module.code[0].local_count(), 0);
    assert!(module.code[1].body.as_bytes().is_empty());

    assert_eq!(module.memories.len(), 1);
    assert_eq!(module.memories[0].limits.min, 1);
    assert_eq!(module.memories[0].limits.max, Some(2));

    assert_eq!(module.globals.len(), 1);
    assert!(module.globals[0].global_type.mutable);
    assert_eq!(module.globals[0].global_type.val_type, ValType::I32);
    // i32.const 41
    assert_eq!(module.globals[0].init.as_bytes(), &[0x41, 0x29]);

    let add_export = module.exports.iter().find(|e| e.name == "add").unwrap();
    assert_eq!(add_export.desc, ExportDesc::Func(0));
    let mem_export = module.exports.iter().find(|e| e.name == "mem").unwrap();
    assert_eq!(mem_export.desc, ExportDesc::Memory(0));

    assert_eq!(module.start, Some(1));
}

#[test]
fn decodes_imports() {
    let bytes = assemble(
        r#"
        (module
          (import "env" "print" (func (param i32)))
          (import "env" "mem" (memory 1)))
        "#,
    );

    let module = decode_module(&bytes).into_result().unwrap();
    assert_eq!(module.imports.len(), 2);

    assert_eq!(module.imports[0].module, "env");
    assert_eq!(module.imports[0].name, "print");
    assert_eq!(module.imports[0].desc, ImportDesc::Func(0));

    assert_eq!(module.imports[1].name, "mem");
    match &module.imports[1].desc {
        ImportDesc::Memory(mem) => assert_eq!(mem.limits.min, 1),
        other => panic!("expected memory import, got {other:?}"),
    }
}

#[test]
fn decodes_table_and_element_segment() {
    let bytes = assemble(
        r#"
        (module
          (table 2 funcref)
          (func $f)
          (elem (i32.const 0) $f $f))
        "#,
    );

    let module = decode_module(&bytes).into_result().unwrap();
    assert_eq!(module.tables.len(), 1);
    assert_eq!(module.tables[0].limits.min, 2);

    assert_eq!(module.elements.len(), 1);
    assert_eq!(module.elements[0].table, 0);
    assert_eq!(module.elements[0].offset.as_bytes(), &[0x41, 0x00]);
    assert_eq!(module.elements[0].init, vec![0, 0]);
}

#[test]
fn decodes_data_segment() {
    let bytes = assemble(
        r#"
        (module
          (memory 1)
          (data (i32.const 8) "hi"))
        "#,
    );

    let module = decode_module(&bytes).into_result().unwrap();
    assert_eq!(module.data.len(), 1);
    assert_eq!(module.data[0].memory, 0);
    assert_eq!(module.data[0].offset.as_bytes(), &[0x41, 0x08]);
    assert_eq!(module.data[0].init, b"hi");
}

#[test]
fn truncated_module_keeps_everything_decoded_so_far() {
    let bytes = assemble(
        r#"
        (module
          (func $f (result i32) (i32.const 7))
          (export "f" (func $f)))
        "#,
    );

    // Chop into the final (code) section.
    let output = decode_module(&bytes[..bytes.len() - 2]);
    let err = output.error.unwrap();
    assert_eq!(err.code, codes::UNEXPECTED_EOF);
    assert!(err.message.contains("code section"));

    // Sections before the failure survive.
    assert_eq!(output.module.functions.len(), 1);
    assert_eq!(output.module.exports.len(), 1);
    assert!(output.module.code.is_empty());
}

#[test]
fn decodes_minimal_hex_fixture() {
    // Header plus a type section holding one () -> () signature.
    let bytes = hex::decode("0061736d01000000010401600000").unwrap();
    let module = decode_module(&bytes).into_result().unwrap();
    assert_eq!(module.types, vec![FuncType::default()]);
}

fn arb_val_type() -> impl Strategy<Value = ValType> {
    prop_oneof![
        Just(ValType::I32),
        Just(ValType::I64),
        Just(ValType::F32),
        Just(ValType::F64),
    ]
}

proptest! {
    #[test]
    fn func_type_encoding_round_trips(
        params in prop::collection::vec(arb_val_type(), 0..10),
        results in prop::collection::vec(arb_val_type(), 0..4),
    ) {
        let mut bytes = vec![0x60];
        bytes.extend_from_slice(&write_leb128_u32(params.len() as u32));
        bytes.extend(params.iter().map(|vt| vt.0));
        bytes.extend_from_slice(&write_leb128_u32(results.len() as u32));
        bytes.extend(results.iter().map(|vt| vt.0));

        let mut cursor = ByteCursor::new(&bytes);
        let func_type = primitives::read_func_type(&mut cursor).unwrap();
        prop_assert_eq!(func_type, FuncType::new(params, results));
        prop_assert_eq!(cursor.remaining(), 0);
    }
}
