//! Authentication service for farmer registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Farmer;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    token_expiry: i64,
}

/// Input for registering a new farmer
#[derive(Debug)]
pub struct RegisterFarmerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: Option<String>,
}

/// A farmer together with a freshly issued bearer token
#[derive(Debug, Serialize)]
pub struct AuthenticatedFarmer {
    pub farmer: Farmer,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Farmer ID
    pub exp: i64,
    pub iat: i64,
}

/// Farmer row from database
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            name: row.name,
            email: row.email,
            location: row.location,
            created_at: row.created_at,
        }
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            token_expiry: config.jwt.token_expiry,
        }
    }

    /// Register a new farmer account
    pub async fn register(&self, input: RegisterFarmerInput) -> AppResult<AuthenticatedFarmer> {
        let email = input.email.trim().to_lowercase();

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE email = $1")
                .bind(&email)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::Conflict("Farmer already exists".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let location = input
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            INSERT INTO farmers (name, email, password_hash, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, location, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&email)
        .bind(&password_hash)
        .bind(&location)
        .fetch_one(&self.db)
        .await
        .map_err(duplicate_email_conflict)?;

        tracing::info!("Registered farmer {}", row.id);
        self.authenticated(row.into())
    }

    /// Authenticate farmer with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthenticatedFarmer> {
        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, email, password_hash, location, created_at
            FROM farmers
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        self.authenticated(row.into())
    }

    /// Load a farmer profile by ID
    pub async fn find_farmer(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, email, password_hash, location, created_at
            FROM farmers
            WHERE id = $1
            "#,
        )
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }

    /// Validate a bearer token and return the farmer ID it was issued to
    pub fn validate_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = decode_token(token, &self.jwt_secret)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::InvalidToken("Invalid farmer ID in token".to_string()))
    }

    fn authenticated(&self, farmer: Farmer) -> AppResult<AuthenticatedFarmer> {
        let token = issue_token(farmer.id, &self.jwt_secret, self.token_expiry)?;
        Ok(AuthenticatedFarmer {
            farmer,
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
        })
    }
}

/// Sign a token for a farmer, valid for `expiry_secs`
pub fn issue_token(farmer_id: Uuid, secret: &str, expiry_secs: i64) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: farmer_id.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Decode and validate a token's signature and expiry
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::InvalidToken(format!("Invalid token: {}", e)))
}

/// A concurrent registration can pass the existence check and then hit the
/// unique email constraint
fn duplicate_email_conflict(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Farmer already exists".to_string())
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let farmer_id = Uuid::new_v4();
        let token = issue_token(farmer_id, SECRET, 3600).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, farmer_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = issue_token(Uuid::new_v4(), SECRET, 3600).unwrap();
        assert!(matches!(
            decode_token(&token, "another-secret"),
            Err(AppError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Default validation allows 60s leeway
        let token = issue_token(Uuid::new_v4(), SECRET, -3600).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(decode_token("not-a-jwt", SECRET).is_err());
    }

    #[derive(Debug)]
    struct UniqueEmailViolation;

    impl std::fmt::Display for UniqueEmailViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint \"farmers_email_key\"")
        }
    }

    impl std::error::Error for UniqueEmailViolation {}

    impl sqlx::error::DatabaseError for UniqueEmailViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = sqlx::Error::Database(Box::new(UniqueEmailViolation));
        assert!(matches!(duplicate_email_conflict(err), AppError::Conflict(_)));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        assert!(matches!(
            duplicate_email_conflict(sqlx::Error::RowNotFound),
            AppError::DatabaseError(_)
        ));
    }
}
