use clap::{Parser, Subcommand};
use quiz_client::{
    AppContext,
    api::{AiOperations, QuestionOperations, TopicOperations, UserOperations},
    config::Config,
    error::AppError,
    models::{ChatForm, LoginForm, RegisterForm, TopicForm, TopicQuery},
    router::{NavigationOutcome, NavigationTarget},
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quiz-client", about = "题库练习平台命令行客户端")]
struct Cli {
    /// 覆盖 API_BASE_URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 登录并保存会话
    Login { username: String, password: String },
    /// 注册新用户
    Register {
        username: String,
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// 退出登录
    Logout,
    /// 显示当前用户
    Whoami,
    /// 查询主题
    Topics {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        name: Option<String>,
    },
    /// 创建主题
    CreateTopic {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        difficulty: Option<i32>,
    },
    /// 更新主题
    UpdateTopic {
        id: i64,
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        difficulty: Option<i32>,
    },
    /// 题库分类
    Categories,
    /// 某分类下的题目
    Questions { category_id: i64 },
    /// 题目详情
    Question { id: i64 },
    /// 题目选项
    Options { id: i64 },
    /// 向 AI 助手提问
    Chat { message: String },
    /// 检查导航到某路径的结果
    Navigate { path: String },
}

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::from_env();
    if let Some(url) = cli.api_base_url.clone() {
        config = config.with_api_base_url(url);
    }

    let ctx = match AppContext::init(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to initialize client: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&ctx, cli.command).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), AppError> {
    let client = &ctx.client;
    match command {
        Command::Login { username, password } => {
            let user = UserOperations::sign_in(client, &LoginForm { username, password }).await?;
            print_json(&user)
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let form = RegisterForm {
                username,
                password,
                email,
            };
            print_json(&UserOperations::register(client, &form).await?)
        }
        Command::Logout => {
            ctx.sign_out();
            Ok(())
        }
        Command::Whoami => match ctx.session.user() {
            Some(user) if ctx.session.is_logged_in() => print_json(&user),
            _ => {
                println!("未登录");
                Ok(())
            }
        },
        Command::Topics { page, size, name } => {
            let query = TopicQuery { page, size, name };
            print_json(&TopicOperations::query(client, &query).await?)
        }
        Command::CreateTopic {
            name,
            description,
            difficulty,
        } => {
            let form = TopicForm {
                name,
                description,
                difficulty,
                question_count: None,
            };
            print_json(&TopicOperations::create(client, &form).await?)
        }
        Command::UpdateTopic {
            id,
            name,
            description,
            difficulty,
        } => {
            let form = TopicForm {
                name,
                description,
                difficulty,
                question_count: None,
            };
            print_json(&TopicOperations::update(client, id, &form).await?)
        }
        Command::Categories => print_json(&QuestionOperations::categories(client).await?),
        Command::Questions { category_id } => {
            print_json(&QuestionOperations::list_by_category(client, category_id).await?)
        }
        Command::Question { id } => print_json(&QuestionOperations::detail(client, id).await?),
        Command::Options { id } => print_json(&QuestionOperations::options(client, id).await?),
        Command::Chat { message } => {
            let reply = AiOperations::chat(client, &ChatForm::new(message))
                .await?
                .into_data()?;
            println!("{}", reply);
            Ok(())
        }
        Command::Navigate { path } => {
            match ctx.guard.before_each(&NavigationTarget::new(path)) {
                NavigationOutcome::Allow => println!("allow"),
                outcome => println!("redirect {}", outcome.location().unwrap_or_default()),
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
