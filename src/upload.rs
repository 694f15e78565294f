use crate::error::{AppError, Result};
use axum::extract::Multipart;
use std::path::Path;
use tokio::io::AsyncWriteExt;

pub const IMAGE_FIELD: &str = "image";

/// The text fields of a post form, plus the stored name of its image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

/// `<milliseconds since epoch><extension of the original name>`
pub fn stored_file_name(original_name: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}{}", now.timestamp_millis(), extension_of(original_name))
}

/// The part of the base name from its last `.` on, or `""` when there is none
/// or the only `.` leads the name.
fn extension_of(file_name: &str) -> &str {
    let base_name = file_name
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or_default();

    match base_name.rfind('.') {
        Some(0) | None => "",
        Some(dot) => &base_name[dot..],
    }
}

/// Reads the multipart body, writing the image to `uploads_path` as it arrives.
///
/// A file part with an empty file name counts as no file.
/// A file under any field other than `image`, or a second image, is rejected.
/// A failure to write the file is returned as-is; files already written are left in place.
pub async fn receive(mut multipart: Multipart, uploads_path: &Path) -> Result<PostForm> {
    let mut form = PostForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();

        if let Some(original_name) = field.file_name().map(str::to_owned) {
            // browsers send an empty file name when no file was chosen
            if original_name.is_empty() {
                while field.chunk().await?.is_some() {}
                continue;
            }

            if name != IMAGE_FIELD || form.image.is_some() {
                return Err(AppError::UnexpectedFile(name));
            }

            let file_name = stored_file_name(&original_name, chrono::Utc::now());
            let path = uploads_path.join(&file_name);
            let mut file = tokio::fs::File::create(&path).await?;
            while let Some(chunk) = field.chunk().await? {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;

            tracing::debug!(%original_name, stored = %file_name, "stored upload");
            form.image = Some(file_name);
            continue;
        }

        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "content" => form.content = Some(field.text().await?),
            _ => (),
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stored_name_is_millis_plus_extension() {
        let now = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        assert_eq!(stored_file_name("photo.png", now), "1700000000123.png");
    }

    #[test]
    fn stored_name_has_thirteen_digits_now() {
        let pattern = regex::Regex::new(r"^\d{13}\.png$").unwrap();

        assert!(pattern.is_match(&stored_file_name("photo.png", chrono::Utc::now())));
    }

    #[test]
    fn extension_follows_last_dot_of_base_name() {
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("photo"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("photo."), ".");
        assert_eq!(extension_of("dir.d/photo"), "");
        assert_eq!(extension_of("C:\\pics\\cat.JPG"), ".JPG");
    }
}
