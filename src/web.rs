use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::SeatingError;
use crate::seating::{BranchRange, Room, SeatRecord, SeatingService};
use crate::store::RoomDirectory;

#[derive(Deserialize)]
pub struct AllocateRequest {
    pub room_name: String,
    #[serde(default)]
    pub branch_ranges: Vec<BranchRange>,
}

#[derive(Deserialize)]
pub struct CheckRollsRequest {
    pub branch_ranges: Vec<BranchRange>,
}

#[derive(Serialize, Deserialize)]
pub struct CheckRollsResponse {
    pub has_duplicates: bool,
    pub duplicates: Vec<u32>,
}

#[derive(Serialize, Deserialize)]
pub struct RoomSeatingResponse {
    pub room: String,
    pub seats: Vec<SeatRecord>,
}

impl ResponseError for SeatingError {
    fn status_code(&self) -> StatusCode {
        if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(error = %self, "Request failed");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({"error": self.to_string()}))
    }
}

// Room listing endpoint
async fn list_rooms(service: web::Data<SeatingService>) -> Result<HttpResponse> {
    let rooms = service.rooms().rooms()?;
    Ok(HttpResponse::Ok().json(rooms))
}

// Room create/replace endpoint
async fn upsert_room(
    room: web::Json<Room>,
    service: web::Data<SeatingService>,
) -> Result<HttpResponse> {
    let room = room.into_inner();
    info!(room = %room.name, capacity = room.capacity, "Saving room");
    service.rooms().upsert_room(room)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Room saved successfully!"})))
}

// Seating generation endpoint
async fn allocate(
    req: web::Json<AllocateRequest>,
    service: web::Data<SeatingService>,
) -> Result<HttpResponse> {
    let plan = service.allocate_seating(&req.room_name, &req.branch_ranges)?;
    Ok(HttpResponse::Ok().json(plan))
}

// Current seating of one room
async fn room_seating(
    name: web::Path<String>,
    service: web::Data<SeatingService>,
) -> Result<HttpResponse> {
    let room = name.into_inner();
    let seats = service.room_seating(&room)?;
    Ok(HttpResponse::Ok().json(RoomSeatingResponse { room, seats }))
}

// Student room lookup endpoint
async fn lookup(
    roll: web::Path<u32>,
    service: web::Data<SeatingService>,
) -> Result<HttpResponse> {
    let found = service.lookup_room(roll.into_inner())?;
    Ok(HttpResponse::Ok().json(found))
}

// Duplicate roll number check
async fn check_rolls(
    req: web::Json<CheckRollsRequest>,
    service: web::Data<SeatingService>,
) -> Result<HttpResponse> {
    let duplicates = service.check_rolls(&req.branch_ranges)?;
    Ok(HttpResponse::Ok().json(CheckRollsResponse {
        has_duplicates: !duplicates.is_empty(),
        duplicates,
    }))
}

async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain")
        .body("Exam seating backend is running"))
}

/// Registers all routes; the service must be added as app data
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(
            web::resource("/api/rooms")
                .route(web::get().to(list_rooms))
                .route(web::post().to(upsert_room)),
        )
        .route("/api/rooms/{name}/seating", web::get().to(room_seating))
        .route("/api/allocate", web::post().to(allocate))
        .route("/api/lookup/{roll}", web::get().to(lookup))
        .route("/api/check-rolls", web::post().to(check_rolls));
}

pub async fn start_server(port: u16, service: SeatingService) -> std::io::Result<()> {
    let service = web::Data::new(service);

    info!(port, "Starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
