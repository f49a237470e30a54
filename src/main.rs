//! Intake Bot
//!
//! Main application entry point

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{info, warn};

use intake_bot::{
    config::Settings,
    flow::FlowProfile,
    handlers::{self, Command},
    services::ServiceFactory,
    state::AppContext,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", intake_bot::info());

    let profile = FlowProfile::load(settings.flow.profile_path.as_deref()).await?;

    info!("Initializing services...");
    let services = ServiceFactory::new(&settings).await?;
    info!(health = ?services.health(), "Services ready");

    let context = AppContext::from_factory(services, profile, settings.clone()).await?;
    info!(backend = ?settings.sessions.backend, "Session store ready");

    let bot = Bot::new(&settings.bot.token);

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![context])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("Intake bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle regular messages
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, context: AppContext) -> HandlerResult {
    let result = match cmd {
        Command::Start => handlers::handle_start(bot.clone(), msg.clone(), context.clone()).await,
        Command::Help => handlers::handle_help(bot.clone(), msg.clone(), context.clone()).await,
    };

    if let Err(e) = result {
        let user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0);
        handlers::recover(&bot, &context, user_id, msg.chat.id, &e).await;
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, context: AppContext) -> HandlerResult {
    if let Err(e) = handlers::handle_message(bot.clone(), msg.clone(), context.clone()).await {
        let user_id = msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0);
        handlers::recover(&bot, &context, user_id, msg.chat.id, &e).await;
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, context: AppContext) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    if let Err(e) = handlers::handle_callback_query(bot.clone(), query, context.clone()).await {
        handlers::recover(&bot, &context, user_id, chat_id, &e).await;
    }

    Ok(())
}
