use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use lostfound_media::ImageUpload;
use lostfound_types::SubmitForm;
use tracing::debug;

/// Name of the file input on the report form.
pub const PHOTO_FIELD: &str = "photo";

/// A decoded report form post.
#[derive(Debug, Default)]
pub struct Submission {
    pub form: SubmitForm,
    pub photo: Option<ImageUpload>,
}

/// Drains the multipart body into text fields and the optional photo part.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, MultipartError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PHOTO_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            debug!("Photo part {:?}: {} bytes", file_name, bytes.len());
            submission.photo = Some(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await?;
            submission.form.set_field(&name, value);
        }
    }

    Ok(submission)
}
