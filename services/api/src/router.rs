use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use hrdesk_core::health::healthz;
use hrdesk_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{login, register, reset_password},
    health::readyz,
    image::{delete_image, list_images, upload_image},
    info_item::{add_info_item, delete_info_item, list_info_items, update_info_item},
    leave::{approve_leave, create_leave, list_my_leaves, list_pending_leaves, reject_leave},
    otp::{send_otp, verify_otp},
    profile::{delete_profile_image, get_profile_image, list_user_cards, upload_profile_image},
};
use crate::state::AppState;

/// Request body ceiling; sized for image uploads.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let images = ServeDir::new(state.blobs.root());

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/register", post(register))
        .route("/login", post(login))
        // Phone verification / password reset
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/reset-password", post(reset_password))
        // Leave workflow
        .route("/requestLeaveApi", post(create_leave))
        .route("/approve-leave-admin/{id}", post(approve_leave))
        .route("/rejectleave/{id}", post(reject_leave))
        .route("/my-leaves-user", get(list_my_leaves))
        .route("/allLeavesforadmin", get(list_pending_leaves))
        // Images
        .route("/upload-image", post(upload_image))
        .route("/all-images", get(list_images))
        .route("/delete-image/{id}", delete(delete_image))
        // Profile images
        .route("/upload-profile-image", post(upload_profile_image))
        .route("/get-profile-image/{id}", get(get_profile_image))
        .route("/delete-profile-image/{id}", delete(delete_profile_image))
        .route(
            "/user-infowithprofileimagenameandrole",
            get(list_user_cards),
        )
        // Info items
        .route("/details", get(list_info_items))
        .route("/additem", post(add_info_item))
        .route("/update/{id}", put(update_info_item))
        .route("/delete/{id}", delete(delete_info_item))
        // Stored blobs
        .nest_service("/Images", images)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
