//! Admin command line for the portfolio backend.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use backend_client::{BackendClient, BackendConfig};
use clap::{Parser, Subcommand, ValueEnum};
use server_api::{
    dashboard_menu, delete_skill, list_contacts, list_skills, load_profile, require_admin,
    save_profile, save_skill, send_reply, sign_in, sign_out, update_contact_status,
    upload_profile_asset, AdminSession, ApiContext, ProfileAsset, SkillEditor,
};
use shared::{
    domain::{ContactId, ContactStatus, ProfileSettings, SkillDraft, SkillId},
    error::ApiError,
    protocol::Toast,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "BACKEND_URL", default_value = "http://127.0.0.1:54321")]
    backend_url: String,
    #[arg(long, env = "BACKEND_ANON_KEY")]
    anon_key: String,
    /// Access token from `login`; required by every admin command.
    #[arg(long, env = "PORTFOLIO_ADMIN_TOKEN")]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        email: String,
        #[arg(long, env = "PORTFOLIO_ADMIN_PASSWORD")]
        password: String,
    },
    #[command(flatten)]
    Admin(AdminCommand),
}

/// Commands that need an admin session.
#[derive(Subcommand, Debug)]
enum AdminCommand {
    Logout,
    Dashboard,
    #[command(subcommand)]
    Skills(SkillsCommand),
    #[command(subcommand)]
    Contacts(ContactsCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
enum SkillsCommand {
    List,
    Add(SkillArgs),
    Edit {
        id: Uuid,
        #[command(flatten)]
        skill: SkillArgs,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(clap::Args, Debug)]
struct SkillArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    #[arg(long, default_value_t = shared::domain::DEFAULT_SKILL_PROFICIENCY)]
    proficiency: u8,
    #[arg(long, default_value = "")]
    icon: String,
}

impl From<SkillArgs> for SkillDraft {
    fn from(args: SkillArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            proficiency: args.proficiency,
            icon: args.icon,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ContactsCommand {
    List,
    Status { id: Uuid, status: StatusArg },
    Reply {
        id: Uuid,
        #[arg(long)]
        message: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Pending,
    Replied,
    Archived,
}

impl From<StatusArg> for ContactStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => ContactStatus::Pending,
            StatusArg::Replied => ContactStatus::Replied,
            StatusArg::Archived => ContactStatus::Archived,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    /// Replaces the profile with the JSON document in `file`.
    Set { file: PathBuf },
    Upload { kind: AssetArg, file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AssetArg {
    Image,
    Resume,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let cli = Cli::parse();

    let client = BackendClient::new(BackendConfig::new(&cli.backend_url, &cli.anon_key))
        .with_context(|| format!("invalid backend url '{}'", cli.backend_url))?;
    let ctx = ApiContext::new(Arc::new(client));

    match cli.command {
        Command::Login { email, password } => {
            let session = sign_in(&ctx, &email, &password).await.map_err(api_err)?;
            println!("user_id={}", session.user.id);
            println!("access_token={}", session.access_token);
            Ok(())
        }
        Command::Admin(cmd) => {
            let session = require_admin(&ctx, cli.token.as_deref())
                .await
                .map_err(api_err)?;
            run_admin(&ctx, &session, cmd).await
        }
    }
}

async fn run_admin(ctx: &ApiContext, session: &AdminSession, cmd: AdminCommand) -> Result<()> {
    match cmd {
        AdminCommand::Logout => print_toast(sign_out(ctx, session).await),
        AdminCommand::Dashboard => {
            for item in dashboard_menu() {
                println!("{:<18} {:<22} {}", item.title, item.path, item.description);
            }
            Ok(())
        }
        AdminCommand::Skills(cmd) => run_skills(ctx, session, cmd).await,
        AdminCommand::Contacts(cmd) => run_contacts(ctx, session, cmd).await,
        AdminCommand::Profile(cmd) => run_profile(ctx, session, cmd).await,
    }
}

async fn run_skills(ctx: &ApiContext, session: &AdminSession, cmd: SkillsCommand) -> Result<()> {
    match cmd {
        SkillsCommand::List => {
            for skill in list_skills(ctx, session).await.map_err(api_err)? {
                println!(
                    "{} {:<16} {:<24} {:>3}%",
                    skill.id, skill.category, skill.name, skill.proficiency
                );
            }
            Ok(())
        }
        SkillsCommand::Add(args) => {
            let mut editor = SkillEditor::default();
            editor.start_new();
            editor.draft = args.into();
            print_toast(save_skill(ctx, session, editor.editing, &editor.draft).await)
        }
        SkillsCommand::Edit { id, skill } => {
            let draft = SkillDraft::from(skill);
            print_toast(save_skill(ctx, session, Some(SkillId(id)), &draft).await)
        }
        SkillsCommand::Delete { id } => {
            print_toast(delete_skill(ctx, session, SkillId(id)).await)
        }
    }
}

async fn run_contacts(
    ctx: &ApiContext,
    session: &AdminSession,
    cmd: ContactsCommand,
) -> Result<()> {
    match cmd {
        ContactsCommand::List => {
            for contact in list_contacts(ctx, session).await.map_err(api_err)? {
                println!(
                    "{} [{}] {} <{}> {}",
                    contact.id,
                    contact.status.as_str(),
                    contact.name,
                    contact.email,
                    contact.created_at.to_rfc3339()
                );
                println!("    {}", contact.message.replace('\n', "\n    "));
            }
            Ok(())
        }
        ContactsCommand::Status { id, status } => print_toast(
            update_contact_status(ctx, session, ContactId(id), status.into()).await,
        ),
        ContactsCommand::Reply { id, message } => {
            print_toast(send_reply(ctx, session, ContactId(id), &message).await)
        }
    }
}

async fn run_profile(ctx: &ApiContext, session: &AdminSession, cmd: ProfileCommand) -> Result<()> {
    match cmd {
        ProfileCommand::Show => {
            let profile = load_profile(ctx, session).await.map_err(api_err)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        ProfileCommand::Set { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let profile: ProfileSettings = serde_json::from_str(&raw)
                .with_context(|| format!("'{}' is not a profile document", file.display()))?;
            print_toast(save_profile(ctx, session, &profile).await)
        }
        ProfileCommand::Upload { kind, file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read '{}'", file.display()))?;
            let Some(filename) = file.file_name().and_then(|name| name.to_str()) else {
                bail!("'{}' has no usable file name", file.display());
            };
            let asset = match kind {
                AssetArg::Image => ProfileAsset::Image,
                AssetArg::Resume => ProfileAsset::Resume,
            };
            let (profile, toast) = upload_profile_asset(
                ctx,
                session,
                asset,
                filename,
                bytes,
                &content_type_for(&file),
            )
            .await
            .map_err(api_err)?;
            println!("{}", toast.title);
            let url = match asset {
                ProfileAsset::Image => profile.profile_image_url,
                ProfileAsset::Resume => profile.resume_url,
            };
            if let Some(url) = url {
                println!("{url}");
            }
            Ok(())
        }
    }
}

fn content_type_for(file: &Path) -> String {
    mime_guess::from_path(file)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn print_toast(result: Result<Toast, ApiError>) -> Result<()> {
    let toast = result.map_err(api_err)?;
    match toast.description {
        Some(description) => println!("{}: {description}", toast.title),
        None => println!("{}", toast.title),
    }
    Ok(())
}

fn api_err(err: ApiError) -> anyhow::Error {
    anyhow::Error::new(err)
}
