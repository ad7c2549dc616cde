use clap::{Parser, Subcommand};
use serde::Serialize;

use chatlink::batch::{self, DEFAULT_MESSAGE_LIMIT};
use chatlink::{ApiClient, ApiError, ChannelType, ClientConfig, ClientTimeouts};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chatlink", about = "Chat platform HTTP API client")]
struct Cli {
    #[arg(long, env = "CHAT_API_BASE_URL")]
    base_url: String,

    #[arg(long, env = "CHAT_API_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    #[arg(long, env = "CHAT_API_CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover and print the gateway URL.
    Gateway,
    Send {
        channel_id: String,
        content: String,
    },
    Receive {
        channel_id: String,
    },
    Edit {
        channel_id: String,
        message_id: String,
        content: String,
    },
    Delete {
        channel_id: String,
        message_id: String,
    },
    User {
        user_id: String,
    },
    Channel {
        channel_id: String,
    },
    /// List recent messages in a channel.
    Messages {
        channel_id: String,
        #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT)]
        limit: u32,
    },
    /// List recent messages sent by a user.
    UserMessages {
        user_id: String,
        #[arg(long, default_value_t = DEFAULT_MESSAGE_LIMIT)]
        limit: u32,
    },
    Friends {
        user_id: String,
    },
    CreateChannel {
        name: String,
        #[arg(long = "type", default_value = "text")]
        channel_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.base_url).with_timeouts(ClientTimeouts {
        request_secs: cli.request_timeout_secs,
        connect_secs: cli.connect_timeout_secs,
    });
    let client = ApiClient::from_config(config)?;

    let result = run(&client, cli.command).await;
    client.close();
    result
}

async fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Gateway => {
            client.connect().await?;
            print_json(&serde_json::json!({ "url": client.gateway_url() }))
        }
        Command::Send { channel_id, content } => print_json(&client.send_message(&channel_id, &content).await?),
        Command::Receive { channel_id } => print_json(&client.receive_message(&channel_id).await?),
        Command::Edit { channel_id, message_id, content } => {
            print_json(&client.edit_message(&channel_id, &message_id, &content).await?)
        }
        Command::Delete { channel_id, message_id } => {
            print_json(&client.delete_message(&channel_id, &message_id).await?)
        }
        Command::User { user_id } => print_json(&client.get_user_info(&user_id).await?),
        Command::Channel { channel_id } => print_json(&client.get_channel_info(&channel_id).await?),
        Command::Messages { channel_id, limit } => {
            print_json(&batch::fetch_channel_messages(client, &channel_id, limit).await?)
        }
        Command::UserMessages { user_id, limit } => {
            print_json(&batch::get_user_messages(client, &user_id, limit).await?)
        }
        Command::Friends { user_id } => print_json(&batch::get_user_friends(client, &user_id).await?),
        Command::CreateChannel { name, channel_type } => {
            let kind = ChannelType::from(channel_type);
            print_json(&batch::create_channel(client, &name, &kind).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
