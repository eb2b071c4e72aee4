use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES
        // ========================================
        // Employee handlers
        .route(
            "/api/employee",
            get(handlers::a001_employee::list_all).post(handlers::a001_employee::upsert),
        )
        .route(
            "/api/employee/:id",
            get(handlers::a001_employee::get_by_id).delete(handlers::a001_employee::delete),
        )
        .route(
            "/api/employee/:id/absences",
            get(handlers::a001_employee::get_absences),
        )
        // Contractor handlers
        .route(
            "/api/contractor",
            get(handlers::a002_contractor::list_all).post(handlers::a002_contractor::upsert),
        )
        .route(
            "/api/contractor/:id",
            get(handlers::a002_contractor::get_by_id).delete(handlers::a002_contractor::delete),
        )
        // Client handlers
        .route(
            "/api/client",
            get(handlers::a003_client::list_all).post(handlers::a003_client::upsert),
        )
        .route(
            "/api/client/:id",
            get(handlers::a003_client::get_by_id).delete(handlers::a003_client::delete),
        )
        // Project handlers
        .route(
            "/api/project",
            get(handlers::a004_project::list_all).post(handlers::a004_project::upsert),
        )
        .route(
            "/api/project/by-client/:client_id",
            get(handlers::a004_project::list_by_client),
        )
        .route(
            "/api/project/:id",
            get(handlers::a004_project::get_by_id).delete(handlers::a004_project::delete),
        )
        .route(
            "/api/project/:id/costs",
            get(handlers::a004_project::cost_summary),
        )
        // Project period handlers
        .route(
            "/api/project_period",
            get(handlers::a005_project_period::list_all)
                .post(handlers::a005_project_period::upsert),
        )
        .route(
            "/api/project_period/by-project/:project_id",
            get(handlers::a005_project_period::list_by_project),
        )
        .route(
            "/api/project_period/:id",
            get(handlers::a005_project_period::get_by_id)
                .delete(handlers::a005_project_period::delete),
        )
        // Contract handlers
        .route(
            "/api/contract",
            get(handlers::a006_contract::list_all).post(handlers::a006_contract::upsert),
        )
        .route(
            "/api/contract/next-number",
            get(handlers::a006_contract::next_number),
        )
        .route(
            "/api/contract/by-client/:client_id",
            get(handlers::a006_contract::list_by_client),
        )
        .route(
            "/api/contract/:id",
            get(handlers::a006_contract::get_by_id).delete(handlers::a006_contract::delete),
        )
        // Invoice handlers
        .route(
            "/api/invoice",
            get(handlers::a007_invoice::list_all).post(handlers::a007_invoice::upsert),
        )
        .route(
            "/api/invoice/commission-summary",
            get(handlers::a007_invoice::commission_summary),
        )
        .route(
            "/api/invoice/by-client/:client_id",
            get(handlers::a007_invoice::list_by_client),
        )
        .route(
            "/api/invoice/:id",
            get(handlers::a007_invoice::get_by_id).delete(handlers::a007_invoice::delete),
        )
        .route(
            "/api/invoice/:id/pay",
            post(handlers::a007_invoice::mark_paid),
        )
        // Debt handlers
        .route(
            "/api/debt",
            get(handlers::a008_debt::list_all).post(handlers::a008_debt::upsert),
        )
        .route(
            "/api/debt/outstanding-total",
            get(handlers::a008_debt::outstanding_total),
        )
        .route(
            "/api/debt/by-client/:client_id",
            get(handlers::a008_debt::list_by_client),
        )
        .route(
            "/api/debt/:id",
            get(handlers::a008_debt::get_by_id).delete(handlers::a008_debt::delete),
        )
        .route("/api/debt/:id/settle", post(handlers::a008_debt::settle))
        // Absence day handlers
        .route(
            "/api/absence_day",
            get(handlers::a009_absence_day::list_all).post(handlers::a009_absence_day::upsert),
        )
        .route(
            "/api/absence_day/by-employee/:employee_id",
            get(handlers::a009_absence_day::list_by_employee),
        )
        .route(
            "/api/absence_day/:id",
            get(handlers::a009_absence_day::get_by_id).delete(handlers::a009_absence_day::delete),
        )
        // Logs handlers
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
}
