use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML error page
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();

    match &err {
        ServerError::NotFound | ServerError::BadRequest(_) => {
            tracing::debug!(status, error = %err, "request rejected");
        }
        _ => tracing::error!(status, error = %err, "request failed"),
    }

    let message = match &err {
        ServerError::NotFound => "Page not found".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::Backend(e) => e.user_message(),
        ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".to_string(),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error".to_string())))
}
