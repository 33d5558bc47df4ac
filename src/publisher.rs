use api::response::PublisherRecord;

/// Local copy of one stream published by a connection.
///
/// Equality is field by field; a `frame_rate` of NaN never equals itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Publisher {
    pub stream_id: String,
    pub created_at: Option<i64>,
    pub has_audio: Option<bool>,
    pub has_video: Option<bool>,
    pub audio_active: Option<bool>,
    pub video_active: Option<bool>,
    /// Not meaningful for non camera sources
    pub frame_rate: Option<f64>,
    /// e.g. `CAMERA`, `SCREEN`
    pub type_of_video: Option<String>,
    pub video_dimensions: Option<String>,
}

impl Publisher {
    pub fn new(record: PublisherRecord) -> Self {
        let mut publisher = Self {
            stream_id: String::new(),
            created_at: None,
            has_audio: None,
            has_video: None,
            audio_active: None,
            video_active: None,
            frame_rate: None,
            type_of_video: None,
            video_dimensions: None,
        };
        publisher.reset_with_record(record);
        publisher
    }

    /// Overwrite every field from `record`. There is no partial update,
    /// a field missing from the record becomes `None`.
    pub fn reset_with_record(&mut self, record: PublisherRecord) -> &mut Self {
        self.stream_id = record.stream_id;
        self.created_at = record.created_at;
        self.has_audio = record.has_audio;
        self.has_video = record.has_video;
        self.audio_active = record.audio_active;
        self.video_active = record.video_active;
        self.frame_rate = record.frame_rate;
        self.type_of_video = record.type_of_video;
        self.video_dimensions = record.video_dimensions;
        self
    }

    /// Parse `video_dimensions` as `(width, height)`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let (width, height) = self.video_dimensions.as_deref()?.split_once('x')?;
        Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
    }
}
