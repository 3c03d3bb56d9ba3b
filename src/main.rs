use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};

use movierama_client::api::{
    ApiClient, RegistrationRequest, SortDirection, SortField, UserId, VoteKind,
};
use movierama_client::config::Config;
use movierama_client::logging::init_tracing;
use movierama_client::movies::{ListQuery, ListScope, MovieDraft};
use movierama_client::session::{
    activate_account, authenticate, register, RestoreOutcome, SessionContext,
};
use movierama_client::ui::list::FetchStatus;
use movierama_client::ui::render::render_list;
use movierama_client::ui::ListController;
use movierama_client::votes::{VoteMutator, VoteOutcome};

#[derive(Debug, Parser)]
#[command(name = "movierama", version, about = "Browse, submit and vote on movies")]
struct Cli {
    /// Config file (default: <config_dir>/movierama/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service base URL, overrides `api.base_url`
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create an account
    Register {
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Activate an account with the emailed code
    Activate { code: String },
    /// List all movies
    List {
        #[command(flatten)]
        listing: ListingArgs,
        /// Title substring filter
        #[arg(long)]
        title: Option<String>,
    },
    /// List movies submitted by one user
    Owner {
        user_id: UserId,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Toggle a like/hate vote on a movie
    Vote {
        movie_id: u64,
        #[arg(value_parser = parse_vote_kind)]
        kind: VoteKind,
    },
    /// Submit a new movie
    Add {
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Edit one of your movies
    Edit {
        movie_id: u64,
        #[command(flatten)]
        movie: MovieArgs,
    },
}

impl Command {
    /// Whether the stored session has to be restored first. Account
    /// commands replace or discard it without reading it.
    fn uses_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::Logout
                | Command::Register { .. }
                | Command::Activate { .. }
        )
    }
}

#[derive(Debug, Args)]
struct ListingArgs {
    /// created | likes | hates | published
    #[arg(long, value_parser = parse_sort_field)]
    sort: Option<SortField>,
    /// asc | desc
    #[arg(long, value_parser = parse_sort_direction)]
    direction: Option<SortDirection>,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[derive(Debug, Args)]
struct MovieArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// YYYY-MM-DD
    #[arg(long)]
    published: String,
}

impl From<MovieArgs> for MovieDraft {
    fn from(args: MovieArgs) -> Self {
        MovieDraft {
            title: args.title,
            description: args.description,
            publication_date: args.published,
        }
    }
}

fn parse_sort_field(s: &str) -> Result<SortField, String> {
    SortField::parse(s).ok_or_else(|| format!("unknown sort field '{}'", s))
}

fn parse_sort_direction(s: &str) -> Result<SortDirection, String> {
    SortDirection::parse(s).ok_or_else(|| format!("unknown sort direction '{}'", s))
}

fn parse_vote_kind(s: &str) -> Result<VoteKind, String> {
    VoteKind::parse(s).ok_or_else(|| format!("vote must be 'like' or 'hate', got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate()?;
    }

    let api = ApiClient::new(&config.api)?;
    let mut session = SessionContext::from_config(&config);
    if cli.command.uses_session() {
        match session.restore(&api).await? {
            RestoreOutcome::Invalid { cleared } => {
                eprintln!(
                    "Stored session could not be validated{}",
                    if cleared { " and was removed" } else { "" }
                );
            }
            RestoreOutcome::NoStoredCredential | RestoreOutcome::Restored(_) => {}
        }
    }

    match cli.command {
        Command::Login { email, password } => {
            let user = authenticate(&api, &mut session, &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Signed in as {}", user.full_name());
        }
        Command::Logout => {
            session.logout(&api)?;
            println!("Signed out");
        }
        Command::Whoami => match session.user() {
            Some(user) => println!(
                "{} (id {}), {} vote(s)",
                user.full_name(),
                user.id,
                session.votes().len()
            ),
            None if session.has_credential() => println!("Stored session is not valid"),
            None => println!("Not signed in"),
        },
        Command::Register {
            firstname,
            lastname,
            email,
            password,
        } => {
            let request = RegistrationRequest {
                firstname,
                lastname,
                email,
                password,
            };
            let response = register(&api, &request)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!(
                "{}",
                response
                    .message
                    .unwrap_or_else(|| "Registered. Check your email for the activation code.".to_string())
            );
        }
        Command::Activate { code } => {
            activate_account(&api, &code)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Account activated");
        }
        Command::List { listing, title } => {
            let query = listing_query(&config, &listing, title);
            show_list(&api, &session, &config, ListScope::Global, query).await?;
        }
        Command::Owner { user_id, listing } => {
            let query = listing_query(&config, &listing, None);
            let scope = ListScope::Owner { owner_id: user_id };
            show_list(&api, &session, &config, scope, query).await?;
        }
        Command::Vote { movie_id, kind } => {
            let outcome = VoteMutator::new(&api)
                .submit(&mut session, movie_id, kind)
                .await?;
            match outcome {
                VoteOutcome::Applied { vote, counts, .. } => {
                    match vote {
                        Some(VoteKind::Like) => println!("You like this movie"),
                        Some(VoteKind::Hate) => println!("You hate this movie"),
                        None => println!("Vote retracted"),
                    }
                    if let Some(counts) = counts {
                        println!("Like ({}) | Hate ({})", counts.likes, counts.hates);
                    }
                }
                VoteOutcome::Rejected { description } => bail!("{}", description),
            }
        }
        Command::Add { movie } => {
            let mut controller = ListController::new(ListScope::Global, &config.listing);
            let created = controller
                .create_movie(&api, &session, &MovieDraft::from(movie))
                .await?;
            println!("Created movie #{} {}", created.id, created.title);
        }
        Command::Edit { movie_id, movie } => {
            let mut controller = ListController::new(ListScope::Global, &config.listing);
            let updated = controller
                .edit_movie(&api, &session, movie_id, &MovieDraft::from(movie))
                .await?;
            println!("Updated movie #{} {}", updated.id, updated.title);
        }
    }

    Ok(())
}

fn listing_query(config: &Config, listing: &ListingArgs, title: Option<String>) -> ListQuery {
    ListQuery {
        sort_field: listing.sort.unwrap_or(config.listing.sort_field),
        sort_direction: listing.direction.unwrap_or(config.listing.sort_direction),
        page: listing.page.max(1),
        title: title.unwrap_or_default(),
    }
}

async fn show_list(
    api: &ApiClient,
    session: &SessionContext,
    config: &Config,
    scope: ListScope,
    query: ListQuery,
) -> Result<()> {
    let mut controller = ListController::with_query(scope, &config.listing, query);
    controller.refresh(api).await;

    let today = Local::now().date_naive();
    print!("{}", render_list(controller.state(), session, today));

    if let FetchStatus::Failed { detail, .. } = &controller.state().status {
        bail!("{}", detail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_arguments() {
        let cli = Cli::try_parse_from([
            "movierama", "list", "--sort", "likes", "--direction", "desc", "--page", "3",
            "--title", "heat",
        ])
        .unwrap();
        match cli.command {
            Command::List { listing, title } => {
                assert_eq!(listing.sort, Some(SortField::Likes));
                assert_eq!(listing.direction, Some(SortDirection::Desc));
                assert_eq!(listing.page, 3);
                assert_eq!(title.as_deref(), Some("heat"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parse_vote_arguments() {
        let cli = Cli::try_parse_from(["movierama", "vote", "42", "LIKE"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Vote {
                movie_id: 42,
                kind: VoteKind::Like
            }
        ));
        assert!(Cli::try_parse_from(["movierama", "vote", "42", "meh"]).is_err());
    }

    #[test]
    fn account_commands_skip_session_restore() {
        fn parse(args: &[&str]) -> Command {
            Cli::try_parse_from(args).unwrap().command
        }
        assert!(!parse(&["movierama", "logout"]).uses_session());
        assert!(!parse(&["movierama", "activate", "123456"]).uses_session());
        assert!(!parse(&["movierama", "login", "--email", "a@b.c", "--password", "pw"])
            .uses_session());
        assert!(parse(&["movierama", "whoami"]).uses_session());
        assert!(parse(&["movierama", "vote", "42", "like"]).uses_session());
        assert!(parse(&["movierama", "list"]).uses_session());
    }

    #[test]
    fn listing_query_falls_back_to_config() {
        let config = Config::default();
        let args = ListingArgs {
            sort: None,
            direction: Some(SortDirection::Desc),
            page: 0,
        };
        let query = listing_query(&config, &args, None);
        assert_eq!(query.sort_field, SortField::Created);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(query.page, 1);
    }
}
