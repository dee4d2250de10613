use axum::{extract::Extension, Json};

use crate::domains::contact::{send_contact_message, ContactForm};
use crate::server::app::AppState;
use crate::server::error::{ok_with_message, ApiError, ApiResponse, ResultExt};

pub async fn contact_handler(
    Extension(state): Extension<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    send_contact_message(form, &state.deps)
        .await
        .for_action("send message")?;
    Ok(ok_with_message("Message sent successfully", ()))
}
