use std::io::Read;

use tracing_subscriber::EnvFilter;

use natal_core::prompt::{format_birth_chart, system_prompt};
use natal_core::{format_interpretation, generate_chart_interpretation, BirthChart};

/// Reads a birth chart as JSON from a file argument or stdin and prints the
/// holistic report. `--json` emits the structured interpretation instead,
/// `--prompt` the advisor system prompt.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("natal_core=info")),
        )
        .with_target(false)
        .init();

    let mut as_json = false;
    let mut as_prompt = false;
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "--prompt" => as_prompt = true,
            other => path = Some(other.to_string()),
        }
    }

    let input = match read_input(path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading chart input: {}", e);
            std::process::exit(1);
        }
    };

    let chart: BirthChart = match serde_json::from_str(&input) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error parsing chart JSON: {}", e);
            std::process::exit(1);
        }
    };

    if as_prompt {
        println!("{}", system_prompt(&format_birth_chart(&chart)));
        return;
    }

    match generate_chart_interpretation(&chart) {
        Ok(interpretation) if as_json => match serde_json::to_string_pretty(&interpretation) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing interpretation: {}", e);
                std::process::exit(1);
            }
        },
        Ok(interpretation) => println!("{}", format_interpretation(&interpretation, &chart)),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
