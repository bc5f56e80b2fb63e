use clap::{Parser, Subcommand};
use std::process::ExitCode;

use polls_site::polls::{self, PollsView};
use polls_site::routing::{ParamValue, PathParams, UrlConf};

#[derive(Parser)]
#[command(name = "polls-cli")]
#[command(about = "Inspect the polls route table", long_about = None)]
struct Cli {
    /// Mount prefix the table is served under.
    #[arg(short, long, default_value = "polls/")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in matching order
    Routes,
    /// Resolve a request path (e.g. /polls/7/results/)
    Resolve { path: String },
    /// Build the path for a route name (e.g. polls:detail pk=7)
    Reverse {
        name: String,
        /// Parameters as key=value
        params: Vec<String>,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let urls = polls::urlconf(&cli.prefix)?;

    match cli.command {
        Commands::Routes => {
            print_routes(&urls);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { path } => match urls.resolve(&path) {
            Some(m) => {
                println!("{}", serde_json::to_string_pretty(&m)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("No route matches {}", path);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Reverse { name, params } => {
            let params = parse_params(&params)?;
            match urls.url_for(&name, &params) {
                Ok(url) => {
                    println!("{}", url);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn print_routes(urls: &UrlConf<PollsView>) {
    let namespace = urls.table().namespace();
    for route in urls.table().routes() {
        let name = format!("{}:{}", namespace, route.name);
        let pattern = format!("{}{}", urls.prefix(), route.pattern);
        println!(
            "{:<16} {:<36} {:<12} {}",
            name,
            pattern,
            route.handler.handler_name(),
            route.handler.kind()
        );
    }
}

fn parse_params(raw: &[String]) -> Result<PathParams, String> {
    let mut params = PathParams::new();
    for pair in raw {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got {:?}", pair))?;
        let value = match value.parse::<u64>() {
            Ok(n) => ParamValue::Int(n),
            Err(_) => ParamValue::Str(value.to_string()),
        };
        params.insert(key, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_params_coerces_digits() {
        let params = parse_params(&args(&["question_id=7", "slug=abc"])).unwrap();
        assert_eq!(params.get_int("question_id"), Some(7));
        assert_eq!(
            params.get("slug"),
            Some(&ParamValue::Str("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_params_keeps_text_after_first_equals() {
        let params = parse_params(&args(&["q=a=b"])).unwrap();
        assert_eq!(params.get("q"), Some(&ParamValue::Str("a=b".to_string())));
    }

    #[test]
    fn test_parse_params_rejects_bare_word() {
        let err = parse_params(&args(&["oops"])).unwrap_err();
        assert!(err.contains("expected key=value"));
    }

    #[test]
    fn test_parse_params_empty() {
        assert!(parse_params(&[]).unwrap().is_empty());
    }
}
