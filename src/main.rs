use anyhow::Result;
use font_catalog::cli;

fn main() -> Result<()> {
    match cli::process_cli() {
        Ok(0) => Ok(()),
        // Non-zero exit without an error: a lookup that found nothing
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("font-catalog: error: {e:#}");
            Err(e)
        }
    }
}
