//! Build script for the Slack relay.
//!
//! Copies the `.env.example` configuration template into the local data
//! directory (`~/.local/share/slackify/.env.example` on Linux), next to
//! where the relay looks for its `.env` file. Problems are reported as
//! cargo warnings and never fail the build.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("slackify");

    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")));
    if let Err(e) = copied {
        println!(
            "cargo:warning=cannot install .env.example into {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
