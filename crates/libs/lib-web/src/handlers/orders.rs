//! # Order Handlers
//!
//! `POST /api/orders` creates an artwork order or an exhibition booking,
//! depending on `order_type`. Any authenticated principal can buy; the buyer
//! recorded on the order is taken from the token, never from the body.
//!
//! Payment status starts `pending` and is only changed by admins.

use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use lib_auth::{authorize, Claims, Policy};
use lib_core::dto::{
    MessageResponse, MyOrdersResponse, OrderRequest, OrderResponse, OrderType,
    PaymentStatusRequest,
};
use lib_core::model::store::models::{
    ArtworkOrder, ArtworkOrderForCreate, ArtworkStatus, BookingForCreate, Buyer,
    ExhibitionBooking,
};
use lib_core::model::store::{ArtworkRepository, ExhibitionRepository, OrderRepository};
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument, warn};

use super::ArtistScope;

fn buyer_from(claims: &Claims) -> Result<Buyer> {
    Ok(Buyer {
        id: claims.principal_id()?,
        role: claims.role,
        name: claims.name.clone(),
    })
}

async fn order_artwork(pool: &DbPool, buyer: Buyer, req: &OrderRequest) -> Result<OrderResponse> {
    let artwork = ArtworkRepository::find(pool, req.reference_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    if artwork.status == ArtworkStatus::Sold {
        warn!("[ORDER] Artwork {} is already sold", artwork.id);
        return Err(AppError::InvalidInput("Artwork is no longer available".to_string()));
    }

    let order = OrderRepository::create_order(
        pool,
        ArtworkOrderForCreate {
            buyer,
            artwork_id: artwork.id,
            total_amount: req.amount,
            delivery_address: req.delivery_address(),
        },
    )
    .await?;

    info!("[ORDER] Artwork order {} placed for {}", order.id, artwork.title);
    Ok(OrderResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.id,
        ticket_code: None,
    })
}

async fn book_exhibition(pool: &DbPool, buyer: Buyer, req: &OrderRequest) -> Result<OrderResponse> {
    let exhibition = ExhibitionRepository::find(pool, req.reference_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exhibition not found".to_string()))?;

    let booking = OrderRepository::create_booking(
        pool,
        BookingForCreate {
            buyer,
            exhibition_id: exhibition.id,
            slots: req.slots(),
            total_amount: req.amount,
        },
    )
    .await?
    .ok_or_else(|| AppError::InvalidInput("Not enough slots available".to_string()))?;

    info!(
        "[ORDER] Booking {} for {} ({} slots, ticket {})",
        booking.id, exhibition.title, booking.slots, booking.ticket_code
    );
    Ok(OrderResponse {
        message: "Booking confirmed".to_string(),
        order_id: booking.id,
        ticket_code: Some(booking.ticket_code),
    })
}

/// `POST /api/orders`
#[instrument(skip_all, fields(caller = %claims.sub, order_type = ?req.order_type))]
pub async fn create_order(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    authorize(&claims, &Policy::AnyAuthenticated)?;
    req.validate()?;

    let buyer = buyer_from(&claims)?;
    let response = match req.order_type {
        OrderType::Artwork => order_artwork(&pool, buyer, &req).await?,
        OrderType::Exhibition => book_exhibition(&pool, buyer, &req).await?,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/orders/mine`
pub async fn my_orders(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MyOrdersResponse>> {
    authorize(&claims, &Policy::AnyAuthenticated)?;
    let id = claims.principal_id()?;

    let orders = OrderRepository::orders_for_buyer(&pool, id, claims.role).await?;
    let bookings = OrderRepository::bookings_for_buyer(&pool, id, claims.role).await?;

    Ok(Json(MyOrdersResponse { orders, bookings }))
}

/// `GET /api/artist/orders[?artist_id=]`
pub async fn artist_orders(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Query(scope): Query<ArtistScope>,
) -> Result<Json<Vec<ArtworkOrder>>> {
    authorize(&claims, &Policy::ArtistOrAdmin)?;
    let artist_id = scope.resolve(&claims)?;

    Ok(Json(OrderRepository::orders_for_artist(&pool, artist_id).await?))
}

// region: --- Admin

/// `GET /api/admin/orders`
pub async fn all_orders(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ArtworkOrder>>> {
    authorize(&claims, &Policy::AdminOnly)?;
    Ok(Json(OrderRepository::all_orders(&pool).await?))
}

/// `GET /api/admin/tickets`
pub async fn all_tickets(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ExhibitionBooking>>> {
    authorize(&claims, &Policy::AdminOnly)?;
    Ok(Json(OrderRepository::all_bookings(&pool).await?))
}

#[instrument(skip_all, fields(caller = %claims.sub, order_id = id))]
pub async fn set_order_payment(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<PaymentStatusRequest>,
) -> Result<Json<MessageResponse>> {
    authorize(&claims, &Policy::AdminOnly)?;

    if !OrderRepository::set_order_payment(&pool, id, req.payment_status).await? {
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    info!("[PAYMENT] Order {} -> {}", id, req.payment_status);
    Ok(Json(MessageResponse::new(format!(
        "Payment status updated to {}",
        req.payment_status
    ))))
}

#[instrument(skip_all, fields(caller = %claims.sub, booking_id = id))]
pub async fn set_ticket_payment(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<PaymentStatusRequest>,
) -> Result<Json<MessageResponse>> {
    authorize(&claims, &Policy::AdminOnly)?;

    if !OrderRepository::set_booking_payment(&pool, id, req.payment_status).await? {
        return Err(AppError::NotFound("Ticket not found".to_string()));
    }

    info!("[PAYMENT] Booking {} -> {}", id, req.payment_status);
    Ok(Json(MessageResponse::new(format!(
        "Payment status updated to {}",
        req.payment_status
    ))))
}

// endregion: --- Admin
