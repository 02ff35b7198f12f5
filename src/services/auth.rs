// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::auth::Claims,
    models::user::{User, UserCreateRequest, UserVm},
    services::identity::IdentityProvider,
};

// A fachada de autenticação: bcrypt e JWT ficam aqui; a persistência fica
// atrás do IdentityProvider.
#[derive(Clone)]
pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>, jwt_secret: String) -> Self {
        Self {
            identity,
            jwt_secret,
        }
    }

    pub async fn register_user(&self, request: &UserCreateRequest) -> Result<UserVm, AppError> {
        let hashed_password = Self::hash_password(request.password.clone()).await?;
        let user = self.identity.create_user(request, &hashed_password).await?;
        Ok(user.into())
    }

    pub async fn login_user(&self, user_name: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .identity
            .find_by_user_name(user_name)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password.to_owned(), user.password_hash.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token(&user.id)
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .identity
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        if !Self::verify_password(current_password.to_owned(), user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let hashed_password = Self::hash_password(new_password.to_owned()).await?;
        self.identity
            .set_password_hash(user_id, &hashed_password)
            .await
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Token de usuário que já foi removido não vale mais
        self.identity
            .find_by_id(&token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id.to_owned(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // O bcrypt é pesado: roda em thread separada para não travar o runtime
    async fn hash_password(password: String) -> Result<String, AppError> {
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
        let is_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }
}
