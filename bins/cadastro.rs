use std::convert::Infallible;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use models::{NewCity, RecordId, Resource};
use serde_json::json;
use service::{AfterSave, HttpGateway, RecordGateway, ResourceService, SaveIntent, SubmissionState};
use tracing::{error, info};

/// `cadastro` command arguments.
#[derive(Debug, Parser)]
#[command(name = "cadastro", about = "Consulta e mantém cidades e pessoas no backend de cadastro", version)]
struct Cli {
    #[command(subcommand)]
    collection: Collection,
}

#[derive(Debug, Subcommand)]
enum Collection {
    /// Registros de `/cidades`
    Cidades {
        #[command(subcommand)]
        command: CityCommand,
    },
    /// Registros de `/pessoas`
    Pessoas {
        #[command(subcommand)]
        command: RecordCommand,
    },
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Lista uma página, opcionalmente filtrada pelo nome
    List {
        /// Página, começando em 1
        #[arg(default_value_t = 1)]
        page: u32,
        /// Trecho do nome, sem diferenciar maiúsculas
        filter: Option<String>,
        /// Devolve todos os registros filtrados, sem paginar
        #[arg(long)]
        all: bool,
    },
    /// Mostra um registro
    Get {
        #[arg(value_parser = parse_id)]
        id: RecordId,
    },
    /// Remove um registro
    Delete {
        #[arg(value_parser = parse_id)]
        id: RecordId,
    },
}

#[derive(Debug, Subcommand)]
enum CityCommand {
    #[command(flatten)]
    Record(RecordCommand),
    /// Cadastra uma cidade
    Create {
        /// Nome da cidade; várias palavras são unidas com espaço
        #[arg(required = true, num_args = 1..)]
        nome: Vec<String>,
    },
}

fn init_logging() {
    // .env first so RUST_LOG, LOG_FORMAT and API_BASE_URL apply
    dotenv().ok();
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => common::utils::logging::init_logging_json(),
        _ => common::utils::logging::init_logging_default(),
    }
}

/// Command-line ids are plain text; numeric-looking ones are sent as numbers.
fn parse_id(raw: &str) -> Result<RecordId, Infallible> {
    Ok(raw.parse::<i64>().map(RecordId::Number).unwrap_or_else(|_| RecordId::from(raw)))
}

async fn run_record<R: Resource, G: RecordGateway>(
    svc: &ResourceService<R, G>,
    empty_message: &str,
    command: RecordCommand,
) -> anyhow::Result<serde_json::Value> {
    match command {
        RecordCommand::List { page, filter, all } => {
            let listing = svc.list(page, filter.as_deref().unwrap_or(""), all).await?;
            if listing.is_empty() {
                info!("{}", empty_message);
            }
            Ok(json!({
                "items": listing.items,
                "totalCount": listing.total_count,
                "pages": listing.page_count(svc.page_length()),
            }))
        }
        RecordCommand::Get { id } => Ok(serde_json::to_value(svc.get(&id).await?)?),
        RecordCommand::Delete { id } => {
            svc.delete_by_id(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let cfg = configs::AppConfig::load()?;
    info!(base_url = %cfg.api.base_url, policy = ?cfg.identifiers.policy, "configuration loaded");
    let gateway = Arc::new(HttpGateway::from_config(&cfg)?);
    let empty = cfg.listing.empty_list_message.as_str();

    match cli.collection {
        Collection::Cidades { command } => {
            let cities: service::CityService = ResourceService::from_config(gateway, &cfg);
            match command {
                CityCommand::Record(command) => run_record(&cities, empty, command).await,
                CityCommand::Create { nome } => {
                    let mut state = SubmissionState::default();
                    let after = cities.save(&mut state, &RecordId::New, NewCity::new(nome.join(" ")), SaveIntent::Save).await?;
                    match after {
                        AfterSave::Stay(id) => Ok(json!({ "created": id })),
                        other => Ok(json!({ "created": format!("{other:?}") })),
                    }
                }
            }
        }
        Collection::Pessoas { command } => {
            let people: service::PersonService = ResourceService::from_config(gateway, &cfg);
            run_record(&people, empty, command).await
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cadastro").chain(args.iter().copied())).expect("valid arguments")
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_defaults_to_first_page_without_filter() {
        let Collection::Pessoas { command: RecordCommand::List { page, filter, all } } = parse(&["pessoas", "list"]).collection
        else {
            panic!("expected pessoas list");
        };
        assert_eq!((page, filter, all), (1, None, false));
    }

    #[test]
    fn city_list_takes_page_and_filter() {
        let Collection::Cidades { command: CityCommand::Record(RecordCommand::List { page, filter, .. }) } =
            parse(&["cidades", "list", "2", "rec"]).collection
        else {
            panic!("expected cidades list");
        };
        assert_eq!(page, 2);
        assert_eq!(filter.as_deref(), Some("rec"));
    }

    #[test]
    fn ids_keep_their_shape() {
        let Collection::Pessoas { command: RecordCommand::Get { id } } = parse(&["pessoas", "get", "42"]).collection else {
            panic!("expected pessoas get");
        };
        assert_eq!(id, RecordId::Number(42));
        let Collection::Cidades { command: CityCommand::Record(RecordCommand::Delete { id }) } =
            parse(&["cidades", "delete", "f8e6"]).collection
        else {
            panic!("expected cidades delete");
        };
        assert_eq!(id, RecordId::from("f8e6"));
    }

    #[test]
    fn create_joins_words_and_is_city_only() {
        let Collection::Cidades { command: CityCommand::Create { nome } } = parse(&["cidades", "create", "São", "Paulo"]).collection
        else {
            panic!("expected cidades create");
        };
        assert_eq!(nome.join(" "), "São Paulo");
        assert!(Cli::try_parse_from(["cadastro", "pessoas", "create", "Maria"]).is_err());
    }

    #[test]
    fn page_must_be_a_number() {
        assert!(Cli::try_parse_from(["cadastro", "cidades", "list", "dois"]).is_err());
    }
}
