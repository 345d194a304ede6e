use std::env;
use std::fs;

use shell::{ShellConfig, render_document};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: shell [config.json] [output.html]");
        std::process::exit(2);
    }
    let cfg = match args.get(1).filter(|a| a.as_str() != "-") {
        Some(path) => {
            let txt = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            serde_json::from_str::<ShellConfig>(&txt).map_err(|e| format!("{path}: {e}"))?
        }
        None => ShellConfig::default(),
    };
    let html = render_document(&cfg)?;
    match args.get(2) {
        Some(out) => fs::write(out, html).map_err(|e| format!("{out}: {e}"))?,
        None => print!("{html}"),
    }
    Ok(())
}
