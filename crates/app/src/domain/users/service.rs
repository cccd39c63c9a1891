//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = user.normalized()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        self.repository
            .create_user_cart(&mut tx, created.uuid)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .get_user(&mut tx, user)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
/// User account operations.
pub trait UsersService: Send + Sync {
    /// Creates a user together with their empty cart.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
