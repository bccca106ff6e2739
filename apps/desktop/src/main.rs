use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::UsersApi;
use shared::{domain::UserId, protocol::UserFields};

#[derive(Parser, Debug)]
#[command(about = "Command-line access to the user directory service")]
struct Args {
    /// Base URL of the server hosting /api/users.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full user collection.
    List,
    /// Create a user and print the server-assigned record.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Overwrite a user's name and email, printing the updated record.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a user by id.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let api = UsersApi::new(args.server_url);

    match args.command {
        Command::List => {
            let users = api.list().await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Create { name, email } => {
            let created = api.create(&UserFields { name, email }).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        Command::Update { id, name, email } => {
            let updated = api.update(UserId(id), &UserFields { name, email }).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        Command::Delete { id } => {
            api.delete(UserId(id)).await?;
            println!("deleted user {id}");
        }
    }

    Ok(())
}
