use crate::auth::credentials::CredentialStore;
use crate::auth::guard::{Operation, authorize};
use crate::core::errors::MedviewError;
use crate::core::filename::secure_filename;
use crate::core::models::{
    image::{ImageFeedback, ImageLink, NO_FEEDBACK},
    session::Identity,
};
use crate::infrastructure::feedback::FeedbackStore;
use crate::infrastructure::storage::ImageStore;
use tracing::{info, warn};

pub struct MedviewService<F: FeedbackStore, I: ImageStore> {
    credentials: CredentialStore,
    feedback: F,
    images: I,
}

impl<F: FeedbackStore, I: ImageStore> MedviewService<F, I> {
    pub fn new(credentials: CredentialStore, feedback: F, images: I) -> Self {
        MedviewService {
            credentials,
            feedback,
            images,
        }
    }

    // LOGIN

    /// Checks a username/password pair and returns the identity a new
    /// session should carry.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, MedviewError> {
        let user = match self.credentials.verify(username, password).await {
            Ok(user) => user,
            Err(err) => {
                warn!(user = %username, "login failed");
                return Err(err);
            }
        };

        info!(user = %user.username, role = %user.role, "login succeeded");
        Ok(Identity::new(&user.username, user.role))
    }

    pub fn authorize(&self, identity: &Identity, operation: Operation) -> Result<(), MedviewError> {
        authorize(identity, operation)
    }

    // IMAGES

    /// Stores an uploaded file under its sanitized name and returns that name.
    pub async fn upload_image(
        &self,
        identity: &Identity,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<String, MedviewError> {
        authorize(identity, Operation::UploadImage)?;

        let original_name = original_name.filter(|name| !name.is_empty()).ok_or(MedviewError::MissingFile)?;
        let filename = secure_filename(original_name);
        if filename.is_empty() {
            return Err(MedviewError::InvalidFilename(original_name.to_string()));
        }

        self.images.save(&filename, data).await?;
        info!(user = %identity.username, file = %filename, bytes = data.len(), "image uploaded");
        Ok(filename)
    }

    pub async fn list_own_images(&self, identity: &Identity) -> Result<Vec<ImageFeedback>, MedviewError> {
        authorize(identity, Operation::ListOwnImages)?;

        let mut listing = Vec::new();
        for filename in self.images.list().await? {
            let feedback = self.feedback_or_placeholder(&filename).await?;
            listing.push(ImageFeedback { filename, feedback });
        }
        Ok(listing)
    }

    pub async fn view_images(&self, identity: &Identity) -> Result<Vec<ImageLink>, MedviewError> {
        authorize(identity, Operation::ViewImages)?;

        Ok(self
            .images
            .list()
            .await?
            .iter()
            .map(|filename| ImageLink::for_file(filename))
            .collect())
    }

    // FEEDBACK

    /// Records feedback for `filename`, replacing any earlier text. The file
    /// does not have to exist.
    pub async fn submit_feedback(&self, identity: &Identity, filename: &str, text: String) -> Result<(), MedviewError> {
        authorize(identity, Operation::SubmitFeedback)?;

        self.feedback.set(filename, text).await?;
        info!(user = %identity.username, file = %filename, "feedback submitted");
        Ok(())
    }

    pub async fn view_feedback(&self, identity: &Identity, filename: &str) -> Result<String, MedviewError> {
        authorize(identity, Operation::ViewFeedback)?;
        self.feedback_or_placeholder(filename).await
    }

    async fn feedback_or_placeholder(&self, filename: &str) -> Result<String, MedviewError> {
        Ok(self
            .feedback
            .get(filename)
            .await?
            .unwrap_or_else(|| NO_FEEDBACK.to_string()))
    }
}
