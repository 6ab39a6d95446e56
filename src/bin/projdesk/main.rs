use anyhow::anyhow;
use clap::{Parser, Subcommand, ValueEnum};
use projdesk::core::application::Application;
use projdesk::core::config::Config;
use projdesk::domain::auth::{self, ServiceRegisterParams};
use projdesk::domain::platform::{Decision, PhaseKey, ProjectId, Role};
use projdesk::errors::ClientError;
use projdesk::inbound::cli::handlers::dashboard::GradeArgs;
use projdesk::inbound::cli::handlers::team::TeamFile;
use projdesk::inbound::cli::handlers::{auth as auth_handlers, dashboard, projects, team};
use projdesk::inbound::cli::render;
use projdesk::outbound::http::adapter::{HttpGateway, NewHttpGatewayParams};
use projdesk::outbound::session::SessionAdapter;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias = Application<HttpGateway, auth::Service<HttpGateway, SessionAdapter>>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config_path: Option<String>,
    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Keep the session in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Student,
    Mentor,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Student => Role::Student,
            RoleArg::Mentor => Role::Mentor,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the email for the dashboards
    Login {
        #[arg(long, value_enum, default_value = "student")]
        role: RoleArg,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    RegisterStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        usn: String,
        #[arg(long)]
        dept: String,
        #[arg(long)]
        year: i64,
        #[arg(long)]
        sem: i64,
    },
    RegisterMentor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        dept: String,
    },
    Logout,
    Student,
    Mentor {
        /// Show the detail panel of one project
        #[arg(long)]
        expand: Option<i64>,
    },
    Projects {
        #[arg(long)]
        search: Option<String>,
    },
    Approve {
        project_id: i64,
    },
    Reject {
        project_id: i64,
    },
    /// Edit one phase of an approved project and save all phases
    Grade {
        project_id: i64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        phase: u8,
        #[arg(long)]
        marks: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
    },
    CreateTeam {
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?.with_env();
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let application = create_application(config, cli.ephemeral)?;

    let Some(command) = cli.command else {
        return Ok(());
    };

    let text = run(&application, command).await.inspect_err(|e| {
        if let Some(client_error) = e.downcast_ref::<ClientError>() {
            eprintln!("{}", render::error(client_error));
        }
    })?;
    println!("{}", text.trim_end());

    Ok(())
}

fn create_application(config: Config, ephemeral: bool) -> Result<ApplicationAlias, anyhow::Error> {
    tracing::debug!("creating http gateway");
    let gateway = Arc::new(HttpGateway::new(NewHttpGatewayParams {
        base_url: config.base_url.clone(),
        user_agent: Some(config.http.user_agent.clone()),
    })?);

    let session_store = if ephemeral {
        SessionAdapter::memory()
    } else {
        SessionAdapter::file(&config.state_dir)
    };
    let dev_fallback_email = config.dev_fallback_email().map(str::to_string);
    let auth_service = auth::Service::new(gateway.clone(), session_store, dev_fallback_email);

    Ok(Application::new(config, gateway, auth_service))
}

async fn run(app: &ApplicationAlias, command: Commands) -> anyhow::Result<String> {
    let text = match command {
        Commands::Login {
            role,
            email,
            password,
        } => auth_handlers::login(app, role.into(), email, password).await,
        Commands::RegisterStudent {
            name,
            email,
            password,
            usn,
            dept,
            year,
            sem,
        } => {
            auth_handlers::register(
                app,
                ServiceRegisterParams::Student {
                    name,
                    email,
                    password,
                    usn,
                    dept,
                    year,
                    sem,
                },
            )
            .await
        }
        Commands::RegisterMentor {
            name,
            email,
            password,
            dept,
        } => {
            auth_handlers::register(
                app,
                ServiceRegisterParams::Mentor {
                    name,
                    email,
                    password,
                    dept,
                },
            )
            .await
        }
        Commands::Logout => auth_handlers::logout(app).await,
        Commands::Student => dashboard::student(app).await,
        Commands::Mentor { expand } => dashboard::mentor(app, expand.map(ProjectId)).await,
        Commands::Projects { search } => projects::projects(app, search).await,
        Commands::Approve { project_id } => {
            dashboard::decide(app, ProjectId(project_id), Decision::Approve).await
        }
        Commands::Reject { project_id } => {
            dashboard::decide(app, ProjectId(project_id), Decision::Reject).await
        }
        Commands::Grade {
            project_id,
            phase,
            marks,
            remarks,
        } => {
            let phase =
                PhaseKey::from_number(phase).ok_or(anyhow!("phase must be 1, 2 or 3"))?;
            dashboard::grade(
                app,
                GradeArgs {
                    project_id: ProjectId(project_id),
                    phase,
                    marks,
                    remarks,
                },
            )
            .await
        }
        Commands::CreateTeam { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let team_file = TeamFile::parse(&text)?;
            team::create_team(app, team_file).await
        }
    }?;

    Ok(text)
}
