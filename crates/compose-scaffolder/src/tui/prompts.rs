//! Charm-style CLI flow using cliclack

use super::prompter::ClackPrompter;
use crate::artifacts::{ArtifactDirective, Mode};
use crate::product::ProductConfig;
use crate::questions::{resolve, Answers, DefaultPrompter, Overrides, QuestionSet};
use crate::runtime::check;
use crate::templates::{fetcher::TemplateFetcher, renderer, version, TemplateBundle};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Where to send users who have no Docker installed
const DOCKER_DOCS_URL: &str = "https://docs.docker.com/get-docker/";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Answers given on the command line
    pub overrides: Overrides,

    /// Auto-confirm all prompts and take defaults (non-interactive mode)
    pub yes: bool,

    /// Print the artifact plan instead of writing files
    pub list: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve answers (overrides first, prompts for the rest)
    let questions = QuestionSet::new(config.questions())
        .context("Invalid question list")?;
    let answers = resolve_answers(&questions, &args)?;

    // Step 2: Load template bundle
    let mut fetcher = setup_fetcher(config, &args.template_dir)?;
    let bundle = load_bundle(&mut fetcher).await?;
    check_bundle(config, bundle, &answers, cli_version)?;

    // Step 3: Select artifacts
    let directives = config.catalog().select(&answers);

    if args.list {
        print_plan(&answers, &directives)?;
        cliclack::outro("Nothing written (--list)")?;
        return Ok(());
    }

    // Step 4: Select directory
    let project_dir = select_directory(&args)?;

    // Step 5: Render and copy templates
    create_project(bundle, &directives, &project_dir).await?;

    // Step 6: Check container runtime (advisory)
    let compose_command = check_runtime(&args)?;

    // Step 7: Show next steps
    print_next_steps(config, &project_dir, compose_command)?;

    Ok(())
}

fn resolve_answers(questions: &QuestionSet, args: &CreateArgs) -> Result<Answers> {
    for key in args.overrides.keys() {
        if questions.get(key).is_none() {
            cliclack::log::warning(format!("Unknown option '{}' ignored", key))?;
        }
    }

    let answers = if args.yes {
        resolve(questions, &args.overrides, &mut DefaultPrompter)?
    } else {
        resolve(questions, &args.overrides, &mut ClackPrompter)?
    };

    for (key, value) in answers.iter() {
        if args.overrides.get(key).is_some() {
            cliclack::log::info(format!("{}: {} (from command line)", key, value))?;
        }
    }

    Ok(answers)
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => {
            cliclack::log::info("Using remote templates")?;
            TemplateFetcher::from_config(config)?
        }
    };

    Ok(fetcher)
}

async fn load_bundle(fetcher: &mut TemplateFetcher) -> Result<&TemplateBundle> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    match fetcher.fetch_bundle().await {
        Ok(bundle) => {
            spinner.stop(format!(
                "Templates: {} - {}",
                bundle.manifest().name,
                bundle.manifest().description
            ));
            Ok(bundle)
        }
        Err(e) => {
            spinner.stop("Failed to load templates");
            Err(e)
        }
    }
}

fn check_bundle<C: ProductConfig>(
    config: &C,
    bundle: &TemplateBundle,
    answers: &Answers,
    cli_version: &str,
) -> Result<()> {
    if let Some(warning) = version::check_compatibility(
        cli_version,
        &bundle.manifest().version,
        config.upgrade_command(),
    ) {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    if let Some(variant) = config.template_variant(answers) {
        if let Some(warning) = version::check_variant(bundle.manifest(), variant) {
            cliclack::log::warning(warning)?;
        }
    }

    Ok(())
}

fn print_plan(answers: &Answers, directives: &[ArtifactDirective]) -> Result<()> {
    let answers_yaml = serde_yaml::to_string(answers).context("Failed to serialize answers")?;

    println!();
    println!("  Answers");
    println!();
    for line in answers_yaml.lines() {
        println!("    {}", line);
    }

    println!();
    println!("  Artifacts");
    println!();
    for directive in directives {
        let mode = match directive.mode {
            Mode::Render => "render",
            Mode::RawCopy => "copy  ",
        };
        println!(
            "    {}  {} -> {}",
            mode,
            directive.template_id,
            directive.destination.display()
        );
    }
    println!();

    Ok(())
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway? Existing files may be overwritten")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

async fn create_project(
    bundle: &TemplateBundle,
    directives: &[ArtifactDirective],
    project_dir: &Path,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Writing deployment files...");

    match renderer::write_artifacts(bundle, directives, project_dir).await {
        Ok(written) => {
            spinner.stop(format!(
                "Created {} files in {}",
                written.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to write deployment files");
            Err(e)
        }
    }
}

fn check_runtime(args: &CreateArgs) -> Result<&'static str> {
    let spinner = cliclack::spinner();
    spinner.start("Checking container runtime...");

    let runtimes = check::check_container_runtime();
    let runtime_info: Vec<String> = runtimes
        .iter()
        .map(|r| {
            if r.available {
                format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", r.name)
            }
        })
        .collect();

    let compose_command = runtimes
        .iter()
        .find(|r| r.name != "Docker")
        .map(check::compose_command)
        .unwrap_or("docker compose");

    if runtimes.iter().all(|r| r.available) {
        spinner.stop(format!("Detected: {}", runtime_info.join(", ")));
        return Ok(compose_command);
    }

    spinner.stop(format!("Container runtime incomplete: {}", runtime_info.join(", ")));
    cliclack::log::warning("Docker with Compose is needed to start the generated project")?;

    if !args.yes && std::io::stdin().is_terminal() {
        let open_docs: bool = cliclack::confirm("Open the Docker installation guide?")
            .initial_value(false)
            .interact()?;
        if open_docs {
            if let Err(e) = open::that(DOCKER_DOCS_URL) {
                cliclack::log::warning(format!("Could not open {}: {}", DOCKER_DOCS_URL, e))?;
            }
        }
    }

    Ok(compose_command)
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    compose_command: &str,
) -> Result<()> {
    let steps = config.next_steps(project_dir, compose_command);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Documentation: {}", config.docs_url()))?;

    Ok(())
}
