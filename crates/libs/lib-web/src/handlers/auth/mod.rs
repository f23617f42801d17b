//! # Authentication Handlers
//!
//! Registration and login for the four principal kinds, plus `me`.
//!
//! ## Flow
//!
//! ```text
//! register: validate -> email uniqueness check -> hash_password -> insert -> issue token
//! login:    lookup by email (per kind) -> verify_password -> issue token
//! ```
//!
//! Unknown emails and wrong passwords both answer `401 InvalidCredentials`.

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{
    hash_password, verify_dummy_password, verify_password, Claims, Role, TokenIssuer,
};
use lib_core::dto::{
    normalize_email, AuthResponse, LoginRequest, MeResponse, PrincipalInfo,
    RegisterArtistRequest, RegisterCorporateRequest, RegisterRequest,
};
use lib_core::model::store::models::{
    ArtistForCreate, CorporateUserForCreate, CredentialRecord, UserForCreate,
};
use lib_core::model::store::PrincipalRepository;
use lib_core::{AppError, Config, DbPool, Result};
use tracing::{debug, error, info, instrument, warn};

// region: --- Helpers

/// Fail with `DuplicateEmail` if `email` is taken within the configured scope.
async fn ensure_email_available(
    pool: &DbPool,
    config: &Config,
    email: &str,
    role: Role,
) -> Result<()> {
    if PrincipalRepository::email_taken(pool, email, role, config.email_uniqueness).await? {
        warn!("[REGISTER] Email already registered: {}", email);
        return Err(AppError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}

/// A UNIQUE violation on insert means a concurrent registration won the race.
fn insert_error(email: &str, err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEmail(email.to_string())
        }
        _ => AppError::from(err),
    }
}

fn auth_response(
    issuer: &TokenIssuer,
    id: i64,
    name: String,
    email: String,
    role: Role,
    message: &str,
) -> Result<AuthResponse> {
    let token = issuer.issue(id, &name, role)?;

    Ok(AuthResponse {
        token,
        principal: PrincipalInfo {
            id,
            name,
            email,
            role,
        },
        message: message.to_string(),
    })
}

/// Check `password` against the first principal of `kinds` whose email matches.
///
/// Kinds are tried in order; a wrong password for one kind falls through to
/// the next, so per-kind duplicates resolve to whichever password matches.
/// A stored hash that cannot be parsed is logged and skipped. When no kind has
/// the email, a dummy hash is verified so the response takes as long as a
/// wrong password.
async fn authenticate_credentials(
    pool: &DbPool,
    kinds: &[Role],
    email: &str,
    password: &str,
) -> Result<(CredentialRecord, Role)> {
    let mut found = false;

    for &role in kinds {
        let Some(record) = PrincipalRepository::find_credential(pool, role, email).await? else {
            continue;
        };
        found = true;

        match verify_password(password, &record.password_hash) {
            Ok(true) => return Ok((record, role)),
            Ok(false) => debug!("[LOGIN] Password mismatch for {} account", role),
            Err(e) => error!(
                "[LOGIN] Unusable password hash on {} account {}: {}",
                role, record.id, e
            ),
        }
    }

    if !found {
        verify_dummy_password(password);
    }

    Err(AppError::InvalidCredentials)
}

async fn login_as(
    pool: &DbPool,
    issuer: &TokenIssuer,
    kinds: &[Role],
    req: LoginRequest,
) -> Result<Json<AuthResponse>> {
    req.validate()?;
    let email = normalize_email(&req.email);

    let (record, role) = authenticate_credentials(pool, kinds, &email, &req.password)
        .await
        .inspect_err(|e| warn!("[LOGIN] Failed for {}: {}", email, e))?;

    info!("[LOGIN] Authenticated {} (id: {}, role: {})", record.name, record.id, role);

    let response = auth_response(
        issuer,
        record.id,
        record.name,
        record.email,
        role,
        "Login successful",
    )?;
    Ok(Json(response))
}

// endregion: --- Helpers

// region: --- Registration

/// `POST /api/auth/register` - individual user.
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[REGISTER] New individual user");
    req.validate()?;

    let email = normalize_email(&req.email);
    ensure_email_available(&pool, &config, &email, Role::IndividualUser).await?;

    let user = PrincipalRepository::create_user(
        &pool,
        UserForCreate {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash: hash_password(&req.password)?,
            phone: req.phone,
        },
    )
    .await
    .map_err(|e| insert_error(&email, e))?;

    info!("[REGISTER] User created (id: {})", user.id);

    let response = auth_response(
        &issuer,
        user.id,
        user.name,
        user.email,
        Role::IndividualUser,
        "Registration successful",
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/auth/register-corporate`
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register_corporate(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<RegisterCorporateRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[REGISTER] New corporate account");
    req.validate()?;

    let email = normalize_email(&req.email);
    ensure_email_available(&pool, &config, &email, Role::Corporate).await?;

    let corporate = PrincipalRepository::create_corporate_user(
        &pool,
        CorporateUserForCreate {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash: hash_password(&req.password)?,
            phone: req.phone,
            company_name: req.company_name.trim().to_string(),
            business_type: req.business_type.trim().to_string(),
            tax_id: req.tax_id,
        },
    )
    .await
    .map_err(|e| insert_error(&email, e))?;

    info!(
        "[REGISTER] Corporate account created (id: {}, company: {})",
        corporate.id, corporate.company_name
    );

    let response = auth_response(
        &issuer,
        corporate.id,
        corporate.name,
        corporate.email,
        Role::Corporate,
        "Corporate registration successful",
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /api/auth/register-artist`
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register_artist(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<RegisterArtistRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[REGISTER] New artist");
    req.validate()?;

    let email = normalize_email(&req.email);
    ensure_email_available(&pool, &config, &email, Role::Artist).await?;

    let artist = PrincipalRepository::create_artist(
        &pool,
        ArtistForCreate {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash: hash_password(&req.password)?,
            phone: req.phone,
            bio: req.bio,
        },
    )
    .await
    .map_err(|e| insert_error(&email, e))?;

    info!("[REGISTER] Artist created (id: {})", artist.id);

    let response = auth_response(
        &issuer,
        artist.id,
        artist.name,
        artist.email,
        Role::Artist,
        "Artist registration successful",
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

// endregion: --- Registration

// region: --- Login

/// `POST /api/auth/login` - individual users, then corporate accounts.
#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(
    State(pool): State<DbPool>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    login_as(&pool, &issuer, &[Role::IndividualUser, Role::Corporate], req).await
}

/// `POST /api/auth/artist/login`
#[instrument(skip_all, fields(email = %req.email))]
pub async fn artist_login(
    State(pool): State<DbPool>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    login_as(&pool, &issuer, &[Role::Artist], req).await
}

/// `POST /api/auth/admin/login`
#[instrument(skip_all, fields(email = %req.email))]
pub async fn admin_login(
    State(pool): State<DbPool>,
    State(issuer): State<TokenIssuer>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    login_as(&pool, &issuer, &[Role::Admin], req).await
}

// endregion: --- Login

/// `GET /api/auth/me` - the verified claims of the caller.
pub async fn me(Extension(claims): Extension<Claims>) -> Json<MeResponse> {
    Json(MeResponse::from(&claims))
}

#[cfg(test)]
mod tests;
