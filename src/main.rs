use anyhow::Result;
use clap::{Parser, Subcommand};
use nameme::config::Config;
use nameme::models::{
    ExplainRequest, GenerateRequest, NameExplanation, NameLength, NameSuggestionSet, NamingTask,
    PayloadView,
};
use nameme::render::{render_explanation, render_suggestions};
use nameme::server::{self, build_app_state, errors::error_message};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nameme")]
#[command(about = "Generate and explain Chinese names")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Suggest names for a surname.
    Generate {
        #[arg(long)]
        surname: String,
        #[arg(long)]
        gender: String,
        /// Birth date and hour, free text.
        #[arg(long)]
        birth: Option<String>,
        /// Parental expectation; repeat for several.
        #[arg(long = "expectation")]
        expectations: Vec<String>,
        /// Characters to avoid.
        #[arg(long)]
        avoid: Option<String>,
        /// `single` or `double`.
        #[arg(long, value_parser = parse_length_arg)]
        length: Option<NameLength>,
        #[arg(long, default_value = "en")]
        locale: String,
        /// Print the raw JSON payload.
        #[arg(long)]
        json: bool,
    },
    /// Explain an existing Chinese name.
    Explain {
        #[arg(long)]
        name: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value = "en")]
        locale: String,
        #[arg(long)]
        json: bool,
    },
}

fn parse_length_arg(input: &str) -> std::result::Result<NameLength, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "single" | "1" => Ok(NameLength::Single),
        "double" | "2" => Ok(NameLength::Double),
        _ => Err(format!(
            "Invalid length '{}'. Expected 'single' or 'double'",
            input
        )),
    }
}

fn print_payload<T: PayloadView>(
    payload: &Value,
    json: bool,
    render: impl Fn(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(payload)?);
    } else {
        print!("{}", render(&T::from_payload(payload)));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nameme=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting nameme server");
            server::serve(config).await
        }
        Command::Generate {
            surname,
            gender,
            birth,
            expectations,
            avoid,
            length,
            locale,
            json,
        } => {
            let request = GenerateRequest {
                surname: Some(surname),
                gender: Some(gender),
                birth_date_time: birth,
                expectations: (!expectations.is_empty()).then_some(expectations),
                avoid_chars: avoid,
                name_length_preference: length,
                locale: Some(locale),
            };
            let locale = request.locale();
            let naming = build_app_state(&config).naming;

            match naming.generate(&request).await {
                Ok(payload) => print_payload::<NameSuggestionSet>(&payload, json, |set| {
                    render_suggestions(set, locale)
                }),
                Err(e) => {
                    error!("Generation failed: {}", e);
                    eprintln!("{}", error_message(NamingTask::Generate, locale, &e));
                    std::process::exit(1);
                }
            }
        }
        Command::Explain {
            name,
            context,
            locale,
            json,
        } => {
            let request = ExplainRequest {
                name: Some(name),
                context,
                locale: Some(locale),
            };
            let locale = request.locale();
            let naming = build_app_state(&config).naming;

            match naming.explain(&request).await {
                Ok(payload) => print_payload::<NameExplanation>(&payload, json, |explanation| {
                    render_explanation(explanation, locale)
                }),
                Err(e) => {
                    error!("Explanation failed: {}", e);
                    eprintln!("{}", error_message(NamingTask::Explain, locale, &e));
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length_arg_valid() {
        assert_eq!(parse_length_arg("single").unwrap(), NameLength::Single);
        assert_eq!(parse_length_arg("Double").unwrap(), NameLength::Double);
        assert_eq!(parse_length_arg("2").unwrap(), NameLength::Double);
    }

    #[test]
    fn test_parse_length_arg_invalid() {
        let err = parse_length_arg("triple").unwrap_err();
        assert!(err.contains("single"));
    }

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["nameme"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_collects_expectations() {
        let cli = Cli::try_parse_from([
            "nameme",
            "generate",
            "--surname",
            "李",
            "--gender",
            "male",
            "--expectation",
            "智慧",
            "--expectation",
            "健康",
            "--length",
            "double",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Generate {
                expectations,
                length,
                locale,
                json,
                ..
            }) => {
                assert_eq!(expectations, vec!["智慧", "健康"]);
                assert_eq!(length, Some(NameLength::Double));
                assert_eq!(locale, "en");
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
