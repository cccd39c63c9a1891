use bazaar_app::domain::users::{
    PgUsersService, UsersService, data::NewUser, records::UserUuid,
};
use clap::Args;
use uuid::Uuid;

use crate::cli::args::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Unique, case-insensitive
    #[arg(long)]
    email: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.db().await?);

    let user = service
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("created_at: {}", user.created_at);

    Ok(())
}
