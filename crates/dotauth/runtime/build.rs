use std::{env, error::Error, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("permissions_descriptor.bin"))
        .compile(&["proto/permissions.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/permissions.proto");

    Ok(())
}
