use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Size of one packed codepoint record: literal/offset (2), length (1), padding (1).
const RECORD_SIZE: usize = 4;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let table_path = manifest_dir.join("data/table.bin");
    let blob_path = manifest_dir.join("data/blob.bin");

    let table = fs::read(&table_path).unwrap();
    let blob = fs::read(&blob_path).unwrap();

    // The artifacts are produced offline; refuse to embed a pair the library
    // would misread at runtime.
    assert!(
        table.len() % RECORD_SIZE == 0,
        "{} is {} bytes, not a multiple of {}",
        table_path.display(),
        table.len(),
        RECORD_SIZE
    );
    assert!(
        blob.len() <= u16::MAX as usize,
        "{} leaves no 16-bit offset free for unmapped codepoints",
        blob_path.display()
    );
    if let Some(pos) = blob.iter().position(|&b| !b.is_ascii()) {
        panic!("{}: non-ASCII byte at offset {}", blob_path.display(), pos);
    }
    for (index, record) in table.chunks_exact(RECORD_SIZE).enumerate() {
        let len = record[2] as usize;
        if len <= 2 && !record[..len].is_ascii() {
            panic!("{}: non-ASCII literal for U+{:04X}", table_path.display(), index);
        }
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("table_meta.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    writeln!(
        f,
        r#"
/// Number of records in the embedded codepoint table.
pub const TABLE_ENTRIES: usize = {entries};

/// Size in bytes of the embedded mapping blob.
pub const BLOB_LEN: usize = {blob_len};
"#,
        entries = table.len() / RECORD_SIZE,
        blob_len = blob.len(),
    )
    .unwrap();

    println!("cargo:rerun-if-changed=data/table.bin");
    println!("cargo:rerun-if-changed=data/blob.bin");
    println!("cargo:rerun-if-changed=build.rs");
}
