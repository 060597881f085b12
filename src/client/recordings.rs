use crate::client::core::EnreachClient;
use crate::transport::{decode, ApiRequest};
use crate::types::RecordingMetadata;
use crate::{Error, ErrorContext, Result};
use std::path::{Path, PathBuf};
use tracing::info;

impl EnreachClient {
    pub async fn get_recording_metadata(&self, recording_id: &str) -> Result<RecordingMetadata> {
        if recording_id.trim().is_empty() {
            return Err(Error::validation_with_context(
                "recording_id is required",
                ErrorContext::new()
                    .with_field_path("recording_id")
                    .with_source("recordings"),
            ));
        }
        let request = ApiRequest::get(format!("/calls/recordings/{}", recording_id));
        decode(self.invoker.invoke(request).await?, "recording metadata")
    }

    /// Download a recording to `<dir>/<recording_id>.mp3`, creating `dir` if needed.
    ///
    /// Returns the path of the written file.
    pub async fn get_recording_file(
        &self,
        recording_id: &str,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let metadata = self.get_recording_metadata(recording_id).await?;
        let audio = self.invoker.fetch_bytes(&metadata.url).await?;

        let target = dir.join(format!("{}.mp3", recording_id));
        tokio::fs::write(&target, &audio).await?;
        info!(path = %target.display(), bytes = audio.len(), "recording saved");
        Ok(target)
    }
}
