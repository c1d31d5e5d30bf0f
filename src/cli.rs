use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use glen::config::{Config, OutputFormat};
use glen::output::{export_variables, CollectProgress};
use glen::{GitLabClient, GitRemoteReader, Repo, Token, VariableCollector};

const LONG_ABOUT: &str = "\
Glen is a simple command line tool that, when run within a GitLab project,
will call the GitLab API to get all environment variables from your project's
CI/CD pipeline and print them locally, ready for exporting.

With the default flags you can run 'eval $(glen -r)' to export your project's
variables and the variables of every parent group.";

#[derive(Parser)]
#[command(name = "glen")]
#[command(author, version, about = "Prints the variables of a GitLab project and its parent groups", long_about = LONG_ABOUT)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Include the variables of the parent groups
    #[arg(short, long)]
    recurse: bool,

    /// Only get variables from the parent groups
    #[arg(short, long)]
    group_only: bool,

    /// GitLab API key
    #[arg(short = 'k', long, env = "GITLAB_TOKEN", hide_env_values = true)]
    api_key: Option<String>,

    /// Directory of the git repo [default: .]
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Name of the GitLab remote in your git repo [default: origin]
    #[arg(short = 'n', long)]
    remote_name: Option<String>,

    /// Output format [default: export]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// GitLab origin to call instead of https://<remote host>
    #[arg(long)]
    api_url: Option<String>,

    /// Variables requested per API page [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    page_size: Option<u32>,

    /// Configuration file (glen.toml, glen.json, glen.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the glen version
    Version,
}

/// Flags merged over the configuration file.
#[derive(Debug)]
struct Settings {
    directory: PathBuf,
    remote_name: String,
    token: Option<Token>,
    api_url: Option<String>,
    page_size: u32,
    recurse: bool,
    group_only: bool,
    format: OutputFormat,
}

impl Cli {
    fn settings(&self, config: Config) -> Settings {
        Settings {
            directory: self.directory.clone().unwrap_or(config.repo.directory),
            remote_name: self.remote_name.clone().unwrap_or(config.repo.remote_name),
            token: self
                .api_key
                .clone()
                .or(config.gitlab.token)
                .map(Token::from)
                .filter(|token| !token.is_empty()),
            api_url: self.api_url.clone().or(config.gitlab.api_url),
            page_size: self.page_size.unwrap_or(config.gitlab.page_size),
            recurse: self.recurse || config.variables.recurse,
            group_only: self.group_only || config.variables.group_only,
            format: self.output.unwrap_or(config.output.format),
        }
    }

    async fn execute_collect(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let settings = self.settings(config);

        let repo = Repo::open(&GitRemoteReader, &settings.directory, &settings.remote_name)
            .context("failed to initialize the repository")?;

        let token = settings.token.clone().ok_or_else(|| {
            anyhow!(
                "GitLab API key not set. Please use --api-key/-k flag or set GITLAB_TOKEN environment variable."
            )
        })?;

        let client = match &settings.api_url {
            Some(api_url) => GitLabClient::new(api_url, Some(token))?,
            None => GitLabClient::for_host(&repo.remote.base_url, Some(token))?,
        };
        info!("Using GitLab API at {}", client.api_url());

        let collector = VariableCollector::new(client)
            .recurse(settings.recurse)
            .group_only(settings.group_only)
            .page_size(settings.page_size);

        let with_groups = settings.recurse || settings.group_only;
        let scope_count = usize::from(!settings.group_only)
            + if with_groups { repo.groups.len() } else { 0 };

        let progress = CollectProgress::start(&repo.remote.path, scope_count);
        let variables = match collector.collect(&repo.remote.path, &repo.groups).await {
            Ok(variables) => {
                progress.finish(variables.len());
                variables
            }
            Err(e) => {
                progress.fail();
                return Err(e).context("failed to initialize variables");
            }
        };

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        export_variables(&variables, settings.format, &mut handle)?;

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Version) => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => self.execute_collect().await,
        }
    }
}
