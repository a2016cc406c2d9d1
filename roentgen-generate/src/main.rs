use std::io::Write;
use std::path::{Path, PathBuf};

use roentgen::Catalog;
use roentgen_data::ReferenceData;

/// Usage: `roentgen-generate [DATA_DIR] [OUTPUT]`
///
/// Defaults to the library's bundled data directory and writes
/// `roentgen.bin.zst` next to it.
fn main() {
    let lib_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("roentgen-lib");

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| lib_dir.join("data"));
    let out_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("roentgen.bin.zst"));

    if !data_dir.join("elements.csv").exists() {
        eprintln!("Error: no elements.csv in {:?}", data_dir);
        eprintln!("Expected a directory laid out like roentgen-lib/data");
        std::process::exit(1);
    }

    println!("Parsing reference tables from {:?}...", data_dir);
    let catalog = match Catalog::from_dir(&data_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let data = catalog.reference_data();
    println!("  Elements: {} entries", data.elements.len());
    println!("  Compounds: {} entries", data.compounds.len());
    println!("  Attenuation tables: {}", data.attenuation.len());
    println!("  Absorption edges: {}", data.edges.len());
    println!("  Emission lines: {}", data.emission_lines.len());

    println!("\nSerializing with postcard...");
    let serialized = catalog
        .snapshot_payload()
        .expect("postcard serialization failed");
    println!(
        "  Serialized size: {} bytes ({:.2} MB)",
        serialized.len(),
        serialized.len() as f64 / 1_048_576.0
    );

    println!("Compressing with zstd (level 19)...");
    let compressed = zstd::encode_all(&serialized[..], 19).expect("zstd compression failed");
    println!(
        "  Compressed size: {} bytes ({:.2} MB)",
        compressed.len(),
        compressed.len() as f64 / 1_048_576.0
    );
    println!(
        "  Compression ratio: {:.1}x",
        serialized.len() as f64 / compressed.len() as f64
    );

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut f = std::fs::File::create(&out_path).expect("failed to create output file");
    f.write_all(&compressed)
        .expect("failed to write compressed data");

    println!("\nWrote {:?}", out_path);

    // Verify round-trip
    println!("Verifying round-trip deserialization...");
    let decompressed = zstd::decode_all(&compressed[..]).expect("zstd decompression failed");
    assert_eq!(decompressed.len(), serialized.len());
    let restored: ReferenceData =
        postcard::from_bytes(&decompressed).expect("postcard deserialization failed");
    assert_eq!(restored.attenuation, data.attenuation);
    let reloaded = Catalog::from_snapshot(&compressed).expect("snapshot failed to load");
    assert_eq!(reloaded.elements(), catalog.elements());
    println!("  Round-trip OK!");
}
