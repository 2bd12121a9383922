use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use latitude_client::{
  ClientError, ErrorDetails, LatitudeClient, extract_parameters, format_parameter_list,
};
use latitude_config::{Credentials, NodeDef};
use latitude_executor::NodeExecutor;

/// Latitude node runner - dispatch prompt runs, chats, and log entries over
/// JSON input records
#[derive(Parser)]
#[command(name = "latitude-node")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a credentials file (default: ~/.latitude-node/credentials.json)
  #[arg(long, global = true)]
  credentials_file: Option<PathBuf>,

  /// Latitude API key; takes precedence over the credentials file
  #[arg(long, global = true, env = "LATITUDE_API_KEY", hide_env_values = true)]
  api_key: Option<String>,

  /// Project id, required together with --api-key
  #[arg(long, global = true, env = "LATITUDE_PROJECT_ID")]
  project_id: Option<i64>,

  /// Gateway base URL override (self-hosted instances)
  #[arg(long, global = true, env = "LATITUDE_GATEWAY_URL")]
  gateway_url: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Execute a node definition against records read from stdin
  Run {
    /// Path to the node definition file (JSON)
    node_file: PathBuf,
  },

  /// Inspect the project's prompts
  Prompts {
    #[command(subcommand)]
    target: PromptsTarget,
  },

  /// Check that the configured credentials can reach the gateway
  Verify,
}

#[derive(Subcommand)]
enum PromptsTarget {
  /// List prompt paths with the parameters each prompt expects
  List,

  /// Show the placeholder parameters of a single prompt
  Params {
    /// Prompt path within the project, e.g. "onboarding/welcome"
    path: String,
  },
}

fn main() -> Result<()> {
  init_tracing();

  let cli = Cli::parse();
  let credentials = load_credentials(&cli)?;

  match cli.command {
    Some(Commands::Run { node_file }) => {
      run_node(node_file, credentials)?;
    }
    Some(Commands::Prompts { target }) => match target {
      PromptsTarget::List => {
        list_prompts(credentials)?;
      }
      PromptsTarget::Params { path } => {
        show_prompt_params(credentials, path)?;
      }
    },
    Some(Commands::Verify) => {
      verify(credentials)?;
    }
    None => {
      println!("latitude-node - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing() {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

  // stdout carries the result JSON; everything else goes to stderr.
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

/// Resolve credentials: explicit key (flag or environment) first, then the
/// credentials file. A gateway override applies on top of either source.
fn load_credentials(cli: &Cli) -> Result<Credentials> {
  if let Some(api_key) = &cli.api_key {
    let project_id = cli
      .project_id
      .context("--project-id (or LATITUDE_PROJECT_ID) is required with --api-key")?;
    return Ok(Credentials {
      api_key: api_key.clone(),
      project_id,
      gateway_url: cli.gateway_url.clone(),
    });
  }

  let path = cli
    .credentials_file
    .clone()
    .unwrap_or_else(default_credentials_path);
  let content = std::fs::read_to_string(&path)
    .with_context(|| format!("failed to read credentials file: {}", path.display()))?;
  let mut credentials: Credentials = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse credentials file: {}", path.display()))?;

  if cli.gateway_url.is_some() {
    credentials.gateway_url = cli.gateway_url.clone();
  }

  Ok(credentials)
}

fn default_credentials_path() -> PathBuf {
  dirs::home_dir()
    .expect("could not determine home directory")
    .join(".latitude-node")
    .join("credentials.json")
}

fn run_node(node_file: PathBuf, credentials: Credentials) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_node_async(node_file, credentials).await })
}

async fn run_node_async(node_file: PathBuf, credentials: Credentials) -> Result<()> {
  // Read node definition
  let node_content = tokio::fs::read_to_string(&node_file)
    .await
    .with_context(|| format!("failed to read node file: {}", node_file.display()))?;

  let node: NodeDef = serde_json::from_str(&node_content)
    .with_context(|| format!("failed to parse node file: {}", node_file.display()))?;

  eprintln!(
    "Loaded node: {} ({})",
    node.name.as_deref().unwrap_or("unnamed"),
    node.operation.kind()
  );

  // Read input records from stdin
  let items = read_records_from_stdin()?;
  eprintln!("Input records: {}", items.len());

  let executor = NodeExecutor::connect(&credentials)?;
  let report = executor.execute(&node, &items).await;

  eprintln!("Execution completed: {}", report.execution_id);

  // Print the report as JSON, even for aborted runs: completed records are
  // part of the result either way.
  println!("{}", serde_json::to_string_pretty(&report)?);

  if let Some(aborted) = &report.aborted {
    anyhow::bail!("run aborted at record {}: {}", aborted.item, aborted.error);
  }

  Ok(())
}

fn list_prompts(credentials: Credentials) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { list_prompts_async(credentials).await })
}

async fn list_prompts_async(credentials: Credentials) -> Result<()> {
  let client = connect(&credentials)?;
  let prompts = client.list_prompts().await.map_err(gateway_error)?;

  eprintln!(
    "Prompts in project {}: {}",
    credentials.project_id,
    prompts.len()
  );
  for prompt in &prompts {
    let parameters = extract_parameters(&prompt.content);
    println!("{} - {}", prompt.path, format_parameter_list(&parameters));
  }

  Ok(())
}

fn show_prompt_params(credentials: Credentials, path: String) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { show_prompt_params_async(credentials, path).await })
}

async fn show_prompt_params_async(credentials: Credentials, path: String) -> Result<()> {
  let client = connect(&credentials)?;
  let prompt = client.get_prompt(&path).await.map_err(gateway_error)?;

  let parameters = extract_parameters(&prompt.content);
  if parameters.is_empty() {
    println!("No parameters required");
  } else {
    for name in parameters {
      println!("{}", name);
    }
  }

  Ok(())
}

fn verify(credentials: Credentials) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { verify_async(credentials).await })
}

async fn verify_async(credentials: Credentials) -> Result<()> {
  let client = connect(&credentials)?;
  let prompts = client
    .list_prompts()
    .await
    .map_err(gateway_error)
    .context("Failed to connect to Latitude. Please verify your credentials.")?;

  println!(
    "Credentials OK: project {} has {} prompts",
    credentials.project_id,
    prompts.len()
  );

  Ok(())
}

fn connect(credentials: &Credentials) -> Result<LatitudeClient> {
  LatitudeClient::new(credentials)
    .context("failed to connect to Latitude (check credentials and gateway URL)")
}

/// Shape a gateway failure for the terminal: redacted message, no raw body.
fn gateway_error(error: ClientError) -> anyhow::Error {
  let details = ErrorDetails::from_client(error);
  match (details.error_code, details.status) {
    (Some(code), Some(status)) => {
      anyhow::anyhow!("{} ({}, status {})", details.message, code, status)
    }
    (Some(code), None) => anyhow::anyhow!("{} ({})", details.message, code),
    (None, Some(status)) => anyhow::anyhow!("{} (status {})", details.message, status),
    (None, None) => anyhow::anyhow!(details.message),
  }
}

fn read_records_from_stdin() -> Result<Vec<serde_json::Value>> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    // No stdin pipe, run the operation once against an empty record
    return Ok(vec![serde_json::json!({})]);
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read records from stdin")?;

  if input.trim().is_empty() {
    return Ok(vec![serde_json::json!({})]);
  }

  let value: serde_json::Value =
    serde_json::from_str(&input).context("failed to parse records JSON from stdin")?;
  match value {
    serde_json::Value::Array(records) => Ok(records),
    record => Ok(vec![record]),
  }
}
