use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Translate a teki turtle script into a C program for graphics.h.
#[derive(Parser)]
struct Args {
    /// The teki script to read.
    input: PathBuf,
    /// Where to write the generated C source.
    output: PathBuf,
}

fn write_output(path: &Path, output: &str) -> std::io::Result<()> {
    std::fs::write(path, output)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();
    let input = std::fs::read_to_string(&args.input).with_context(|| {
        format!(
            "couldn't open source file {} for reading",
            args.input.display()
        )
    })?;

    let output = teki::transpile(&input)?;

    write_output(&args.output, &output).with_context(|| {
        format!(
            "couldn't open output file {} for writing",
            args.output.display()
        )
    })?;
    log::info!("wrote {} bytes to {}", output.len(), args.output.display());

    Ok(())
}
