use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use luamin_cli::args::CliArgs;
use luamin_cli::{driver, tracing_config};

fn main() -> Result<()> {
    // Initialize tracing if LUAMIN_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    let code = driver::run(&args, &mut out, color)?;
    out.flush()?;
    drop(out);

    if code != driver::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
