use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::state::SharedState;

pub(super) async fn get(
    State(state): SharedState,
    Path(image): Path<String>,
) -> Result<Response, StatusCode> {
    // only plain file names, nothing that walks out of the uploads directory
    if std::path::Path::new(&image).file_name() != Some(std::ffi::OsStr::new(&image)) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let image_file_path = state.config.uploads_path.join(&image);

    let file = match tokio::fs::File::open(&image_file_path).await {
        Ok(it) => it,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                return Err(StatusCode::NOT_FOUND);
            }
            tracing::error!(%image, error = %err, "error reading upload");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let stream = Body::from_stream(ReaderStream::new(file));

    if let Some(mime_guess) = new_mime_guess::from_path(&image_file_path).first() {
        Ok(([("Content-Type", mime_guess.to_string())], stream).into_response())
    } else {
        Ok(stream.into_response())
    }
}
