//! PlotTwist 命令行客户端
//!
//! 子命令对应应用层的命令与查询，输出纯文本。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use plottwist::application::{
    CreatePledge, CreatePledgeHandler, CreateProject, CreateProjectHandler, CrowdfundingApiPort,
    GetProject, GetProjectHandler, ListProjects, ListProjectsHandler, Login, LoginHandler, Logout,
    LogoutHandler, ProjectDetails, SessionStorePort, Signup, SignupHandler, UpdateProject,
    UpdateProjectHandler,
};
use plottwist::config::{load_config_from_path, print_config, AppConfig};
use plottwist::domain::prompts::writing_prompt;
use plottwist::domain::{EntryKind, ProgressReport};
use plottwist::domain::project::{
    genre_image, genres, project_messages, resolve_image_url, ContentType, ImageUpload, PledgeDraft,
    Project, ProjectDraft, ProjectId,
};
use plottwist::infrastructure::{
    FileSessionStore, HttpApiClient, HttpApiClientConfig, InMemorySessionStore,
};

#[derive(Debug, Parser)]
#[command(name = "plottwist", version, about = "Crowdfund stories one verse at a time")]
struct Cli {
    /// 配置文件路径（默认搜索 plottwist.toml / plottwist.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all projects
    Projects,
    /// Show a project with its contribution ledger and progress
    Project { id: u64 },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Contribute text to a project
    Pledge {
        id: u64,
        /// Number of verses or paragraphs pledged
        #[arg(long)]
        amount: Option<u32>,
        #[command(flatten)]
        content: ContentArgs,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long)]
        anonymous: bool,
    },
    /// Start a new project
    CreateProject(ProjectArgs),
    /// Edit a project you own
    UpdateProject {
        id: u64,
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print a random writing prompt
    Prompt {
        #[arg(long, default_value_t = 1)]
        amount: u32,
        #[arg(long, default_value = "story")]
        content_type: String,
    },
}

/// 正文来源：直接给出或从文件读取
#[derive(Debug, Args)]
struct ContentArgs {
    #[arg(long, conflicts_with = "content_file")]
    content: Option<String>,
    #[arg(long)]
    content_file: Option<PathBuf>,
}

impl ContentArgs {
    async fn read(&self) -> anyhow::Result<Option<String>> {
        match (&self.content, &self.content_file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Some(text))
            }
            (None, None) => Ok(None),
        }
    }
}

#[derive(Debug, Args)]
struct ProjectArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// One of the supported genres, e.g. "Fantasy/Mythology"
    #[arg(long)]
    genre: Option<String>,
    /// poem or story
    #[arg(long)]
    content_type: Option<String>,
    /// Number of verses or paragraphs to reach
    #[arg(long)]
    goal: Option<String>,
    #[command(flatten)]
    starting: ContentArgs,
    /// Current assembled text, checked against the goal
    #[arg(long)]
    current_content_file: Option<PathBuf>,
    #[arg(long)]
    is_open: Option<bool>,
    /// Cover image file
    #[arg(long)]
    image: Option<PathBuf>,
}

impl ProjectArgs {
    /// 在已有草稿上覆盖命令行给出的字段
    async fn apply(&self, mut draft: ProjectDraft) -> anyhow::Result<ProjectDraft> {
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(genre) = &self.genre {
            draft.genre = parse_genre(genre)?;
        }
        if let Some(content_type) = &self.content_type {
            draft.content_type = ContentType::parse(content_type.trim());
        }
        if let Some(goal) = &self.goal {
            draft.goal = Some(parse_goal(goal)?);
        }
        if let Some(starting) = self.starting.read().await? {
            draft.starting_content = starting;
        }
        if let Some(path) = &self.current_content_file {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            draft.current_content = Some(text);
        }
        if let Some(is_open) = self.is_open {
            draft.is_open = is_open;
        }
        if let Some(path) = &self.image {
            draft.image = Some(read_image(path).await?);
        }
        Ok(draft)
    }
}

fn parse_goal(raw: &str) -> anyhow::Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(goal) => Ok(goal),
        Err(_) => bail!(project_messages::GOAL_POSITIVE),
    }
}

/// 空值交给草稿校验；非空值必须是已知体裁
fn parse_genre(raw: &str) -> anyhow::Result<String> {
    let genre = raw.trim();
    if genre.is_empty() || genres().any(|known| known == genre) {
        return Ok(genre.to_string());
    }
    bail!(
        "Unknown genre \"{}\". Choose one of: {}",
        genre,
        genres().collect::<Vec<_>>().join(", ")
    )
}

async fn read_image(path: &Path) -> anyhow::Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    let mime_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };

    Ok(ImageUpload {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

/// 已有项目转成可编辑草稿
fn draft_from_project(project: &Project) -> ProjectDraft {
    ProjectDraft {
        title: project.title.clone(),
        description: project.description.clone(),
        genre: project.genre.clone().unwrap_or_default(),
        content_type: Some(project.content_type),
        goal: Some(project.goal),
        starting_content: project.starting_content.clone(),
        current_content: project.current_content.clone(),
        is_open: project.is_open,
        image: None,
    }
}

fn cover_url(config: &AppConfig, project: &Project) -> String {
    match project.image.as_deref() {
        Some(image) => resolve_image_url(&config.api.base_url, Some(image)),
        None => genre_image(&config.media.images_base_url, project.genre.as_deref(), None),
    }
}

fn print_progress(progress: &ProgressReport) {
    println!("{}", progress.summary());
    println!(
        "Written: {} of {} {} ({:.0}%)",
        progress.segment_count,
        progress.goal,
        progress.label().to_lowercase(),
        progress.segment_percentage
    );
    if progress.is_divergent() {
        println!("Pledged: {:.0}%", progress.pledge_percentage);
    }
}

fn print_details(config: &AppConfig, details: &ProjectDetails) {
    let project = &details.project;

    println!("#{} {}", project.id, project.title);
    println!(
        "{} | {} | {}",
        project.genre.as_deref().unwrap_or("Unknown genre"),
        details.ledger.content_type().label(),
        project.status_label()
    );
    if let Some(owner) = &project.owner_username {
        println!("By {}", owner);
    }
    if let Some(created) = project.date_created {
        println!("Tale begun on {}", created.format("%B %-d, %Y"));
    }
    println!("Cover: {}", cover_url(config, project));
    if !project.description.is_empty() {
        println!();
        println!("{}", project.description);
    }
    println!();
    print_progress(&details.progress);

    // 后端给出的当前全文与账本拼接结果不一致时单独展示
    let current = project.display_content();
    if current != details.ledger.full_text() {
        println!();
        println!("Current text:");
        for line in current.lines() {
            println!("  {}", line);
        }
    }

    for entry in details.ledger.entries() {
        println!();
        match entry.kind() {
            EntryKind::Opening => println!("[{}] {} (opening)", entry.ordinal(), entry.author()),
            EntryKind::Contribution { comment, .. } => match comment {
                Some(comment) => println!("[{}] {}: {}", entry.ordinal(), entry.author(), comment),
                None => println!("[{}] {}", entry.ordinal(), entry.author()),
            },
        }
        for segment in entry.segments() {
            println!("  {}", segment.content());
        }
    }

    if details.viewer_is_owner {
        println!();
        println!("You own this project.");
    } else if details.can_contribute {
        println!();
        println!("Add your words with `plottwist pledge {}`.", project.id);
    }
}

fn print_project_line(project: &Project) {
    println!(
        "#{} {} [{}] {}",
        project.id,
        project.title,
        project.content_type,
        project.progress().summary()
    );
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},plottwist={}", config.log.level, config.log.level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr);

    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let api: Arc<dyn CrowdfundingApiPort> = Arc::new(HttpApiClient::new(
        HttpApiClientConfig::new(config.api.base_url.clone()),
    )?);
    let session_store: Arc<dyn SessionStorePort> = if config.session.persist {
        Arc::new(FileSessionStore::new(&config.session.path))
    } else {
        Arc::new(InMemorySessionStore::new())
    };

    match cli.command {
        Command::Projects => {
            let projects = ListProjectsHandler::new(api).handle(ListProjects).await?;
            if projects.is_empty() {
                println!("No projects yet.");
            }
            for project in &projects {
                print_project_line(project);
            }
        }
        Command::Project { id } => {
            let details = GetProjectHandler::new(api, session_store)
                .handle(GetProject {
                    project_id: ProjectId::new(id),
                })
                .await?;
            print_details(&config, &details);
        }
        Command::Login { username, password } => {
            let session = LoginHandler::new(api, session_store)
                .handle(Login { username, password })
                .await?;
            println!("Logged in as {} (user {})", session.username, session.user_id);
        }
        Command::Logout => {
            LogoutHandler::new(session_store).handle(Logout)?;
            println!("Logged out.");
        }
        Command::Whoami => match session_store.load()? {
            Some(session) => println!("{} (user {})", session.username, session.user_id),
            None => println!("Not logged in."),
        },
        Command::Signup {
            username,
            password,
            email,
            first_name,
            last_name,
        } => {
            let user = SignupHandler::new(api)
                .handle(Signup {
                    username,
                    password,
                    email,
                    first_name,
                    last_name,
                })
                .await?;
            println!("Account {} created. You can now log in.", user.username);
        }
        Command::Pledge {
            id,
            amount,
            content,
            comment,
            anonymous,
        } => {
            let draft = PledgeDraft {
                amount: amount.unwrap_or_default(),
                add_content: content.read().await?.unwrap_or_default(),
                comment,
                anonymous,
            };
            let response = CreatePledgeHandler::new(api, session_store)
                .handle(CreatePledge {
                    project_id: ProjectId::new(id),
                    draft,
                })
                .await?;
            println!("Pledge accepted.");
            if let Some(project) = response.project {
                print_progress(&project.progress());
            }
        }
        Command::CreateProject(args) => {
            let draft = args
                .apply(ProjectDraft {
                    is_open: true,
                    ..ProjectDraft::default()
                })
                .await?;
            let project = CreateProjectHandler::new(api, session_store)
                .handle(CreateProject { draft })
                .await?;
            println!("Project #{} \"{}\" created.", project.id, project.title);
        }
        Command::UpdateProject { id, project: args } => {
            let project_id = ProjectId::new(id);
            let existing = api.get_project(project_id).await?;
            let session = session_store.load()?;
            if !session.is_some_and(|s| existing.is_owned_by(s.user_id)) {
                bail!("Only the owner of project #{} can edit it", id);
            }

            let draft = args.apply(draft_from_project(&existing)).await?;
            let project = UpdateProjectHandler::new(api, session_store)
                .handle(UpdateProject { project_id, draft })
                .await?;
            println!("Project #{} updated.", project.id);
        }
        Command::Prompt {
            amount,
            content_type,
        } => {
            let content_type = ContentType::from(content_type.trim());
            let prompt = writing_prompt(&mut rand::rng(), amount, content_type.unit());
            println!("{}", prompt.prompt_text);
            println!("{}", prompt.pledge_text);
        }
    }

    Ok(())
}
