//! alfresco-compose CLI - Docker Compose scaffolding for Alfresco Repository and Search

mod catalog;
mod questions;
mod tables;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use compose_scaffolder::tui::CreateArgs;
use compose_scaffolder::{Answers, ArtifactCatalog, Overrides, ProductConfig, Question};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "ALFRESCO_COMPOSE_LOG";

/// Alfresco product configuration
#[derive(Clone)]
pub struct AlfrescoCompose;

impl ProductConfig for AlfrescoCompose {
    fn name(&self) -> &'static str {
        "alfresco-compose"
    }

    fn display_name(&self) -> &'static str {
        "Alfresco Docker Compose"
    }

    fn default_template_url(&self) -> &'static str {
        "https://github.com/Alfresco/alfresco-compose/releases/latest/download"
    }

    fn template_url_env(&self) -> &'static str {
        "ALFRESCO_COMPOSE_TEMPLATE_URL"
    }

    fn questions(&self) -> Vec<Question> {
        questions::questions()
    }

    fn catalog(&self) -> ArtifactCatalog {
        catalog::catalog()
    }

    fn template_variant<'a>(&self, answers: &'a Answers) -> Option<&'a str> {
        answers.text(questions::ACS_VERSION)
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.alfresco.com/search-services/latest/install/"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install alfresco-compose --force"
    }

    fn next_steps(&self, dir: &Path, compose_command: &str) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push(format!("{} up --build --force-recreate", compose_command));
        steps.push("Open http://localhost:8080/share once the repository is up".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "alfresco-compose")]
#[command(about = "CLI for scaffolding Alfresco Docker Compose deployments")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a Docker Compose deployment
    Create(CliCreateArgs),
    /// Pack the template directory into templates.zip (for development use)
    BuildZip(BuildZipArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project directory to write the deployment into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Take defaults for every unanswered question (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Print the answers and artifact plan without writing files
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub answers: AnswerFlags,

    /// Answer any question by key (repeatable), e.g. --set httpMode=https
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
}

/// One flag per question; values are passed through unvalidated
#[derive(ClapArgs, Debug, Default)]
pub struct AnswerFlags {
    /// Alfresco version (template directory in the bundle)
    #[arg(long = "acs-version")]
    pub acs_version: Option<String>,

    /// community or enterprise
    #[arg(long = "alfresco-version")]
    pub alfresco_version: Option<String>,

    /// http or https
    #[arg(long = "http-mode")]
    pub http_mode: Option<String>,

    /// Deploy a SOLR master-slave pair (true/false)
    #[arg(long)]
    pub replication: Option<String>,

    /// Use Insight Engine instead of Search Services (true/false)
    #[arg(long = "insight-engine")]
    pub insight_engine: Option<String>,

    /// Deploy Zeppelin (true/false)
    #[arg(long)]
    pub zeppelin: Option<String>,

    /// Deploy two SOLR shards (true/false)
    #[arg(long)]
    pub sharding: Option<String>,

    /// DB_ID, DB_ID_RANGE or DATE
    #[arg(long = "sharding-method")]
    pub sharding_method: Option<String>,
}

impl AnswerFlags {
    fn pairs(self) -> impl Iterator<Item = (&'static str, String)> {
        [
            (questions::ACS_VERSION, self.acs_version),
            (questions::ALFRESCO_VERSION, self.alfresco_version),
            (questions::HTTP_MODE, self.http_mode),
            (questions::REPLICATION, self.replication),
            (questions::INSIGHT_ENGINE, self.insight_engine),
            (questions::ZEPPELIN, self.zeppelin),
            (questions::SHARDING, self.sharding),
            (questions::SHARDING_METHOD, self.sharding_method),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl CliCreateArgs {
    /// `--set` pairs first, so the dedicated flags win on conflict
    fn overrides(set: Vec<(String, String)>, answers: AnswerFlags) -> Overrides {
        let mut overrides: Overrides = set.into_iter().collect();
        for (key, value) in answers.pairs() {
            overrides.insert(key, value);
        }
        overrides
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            overrides: CliCreateArgs::overrides(args.set, args.answers),
            yes: args.yes,
            list: args.list,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipArgs {
    /// Template directory to pack (defaults to ./templates)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = AlfrescoCompose;

    match args.command {
        Some(Command::BuildZip(build_args)) => {
            compose_scaffolder::templates::build_zip(&config, &build_args.template_dir)?;
            Ok(())
        }
        command => {
            // No subcommand defaults to interactive create
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                _ => CreateArgs::default(),
            };
            tracing::debug!(?create_args, "starting create");

            let result = compose_scaffolder::run(&config, create_args, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compose_scaffolder::AnswerValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("httpMode=https"),
            Ok(("httpMode".to_string(), "https".to_string()))
        );
        assert_eq!(
            parse_key_value("acsVersion=6.1=x"),
            Ok(("acsVersion".to_string(), "6.1=x".to_string()))
        );
        assert!(parse_key_value("httpMode").is_err());
        assert!(parse_key_value("=https").is_err());
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = Args::parse_from([
            "alfresco-compose",
            "create",
            "--yes",
            "--alfresco-version",
            "enterprise",
            "--sharding",
            "TRUE",
            "--set",
            "httpMode=https",
        ]);

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();

        assert!(create.yes);
        assert_eq!(
            create.overrides.get("alfrescoVersion"),
            Some(&AnswerValue::from("enterprise"))
        );
        assert_eq!(
            create.overrides.get("sharding"),
            Some(&AnswerValue::from("TRUE"))
        );
        assert_eq!(
            create.overrides.get("httpMode"),
            Some(&AnswerValue::from("https"))
        );
        assert_eq!(create.overrides.len(), 3);
    }

    #[test]
    fn test_dedicated_flag_beats_set() {
        let args = Args::parse_from([
            "alfresco-compose",
            "create",
            "--set",
            "httpMode=http",
            "--http-mode",
            "https",
        ]);

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();

        assert_eq!(
            create.overrides.get("httpMode"),
            Some(&AnswerValue::from("https"))
        );
    }

    #[test]
    fn test_build_zip_subcommand() {
        let args = Args::parse_from(["alfresco-compose", "build-zip", "--template-dir", "tpl"]);
        match args.command {
            Some(Command::BuildZip(build)) => {
                assert_eq!(build.template_dir, Some(PathBuf::from("tpl")))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_variant_follows_acs_version() {
        let answers: Answers = [(questions::ACS_VERSION, "6.1")].into_iter().collect();
        assert_eq!(AlfrescoCompose.template_variant(&answers), Some("6.1"));
    }

    #[test]
    fn test_next_steps_end_with_compose_up() {
        let steps = AlfrescoCompose.next_steps(Path::new("/tmp/acs-deployment"), "docker compose");
        assert_eq!(steps[0], "cd /tmp/acs-deployment");
        assert!(steps.contains(&"docker compose up --build --force-recreate".to_string()));
    }
}
