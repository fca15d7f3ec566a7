//! Generate the error impls for the fixture schema into `OUT_DIR`.
use std::path::PathBuf;

use proto_errgen::schema::load;
use proto_errgen::Generator;

const FIXTURE: &str = "fixtures/errors.schema.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={FIXTURE}");

    let units = load::load_all([FIXTURE], None)?;
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    for artifact in Generator::default().generate(&units)? {
        let path = out_dir.join(&artifact.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, artifact.content)?;
    }
    Ok(())
}
