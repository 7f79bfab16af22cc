//! YouTube transcript and metadata extraction.
//!
//! Metadata comes from `yt-dlp --dump-json`; the transcript is fetched from
//! the caption-track URL listed in that output. Transcripts are frequently
//! unavailable, so their absence is an expected condition, not an error.

use crate::error::{Result, SvarError};
use regex::Regex;
use serde_json::Value;

/// Descriptive metadata for a single video.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<chrono::DateTime<chrono::Utc>>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub duration_seconds: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
}

/// Extracts transcripts and metadata from YouTube videos.
pub struct VideoInfoExtractor {
    video_id_regex: Regex,
    http: reqwest::Client,
}

impl VideoInfoExtractor {
    pub fn new() -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            video_id_regex,
            http: reqwest::Client::new(),
        }
    }

    /// Extract the 11-character video ID from a YouTube URL or bare ID.
    ///
    /// Fails with `InvalidUrl` when the input matches no recognized pattern.
    pub fn extract_video_id(&self, input: &str) -> Result<String> {
        let caps = self
            .video_id_regex
            .captures(input.trim())
            .ok_or_else(|| SvarError::InvalidUrl(input.to_string()))?;

        // Try group 1 (URL format) then group 2 (bare ID)
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| SvarError::InvalidUrl(input.to_string()))
    }

    /// Fetch the English transcript for a video, if one exists.
    ///
    /// Returns `Ok(None)` when the video has no usable caption track.
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<Option<String>> {
        let json = self.dump_json(video_id).await?;
        self.transcript_from_dump(video_id, &json).await
    }

    /// Fetch descriptive metadata for a video URL.
    ///
    /// Fails with `MetadataUnavailable` when the video cannot be resolved.
    pub async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        let video_id = self.extract_video_id(url)?;
        let json = self.dump_json(&video_id).await?;
        Ok(metadata_from_dump(&json))
    }

    /// Fetch combined transcript+metadata context for a video URL with a
    /// single yt-dlp invocation.
    ///
    /// Returns `Ok(None)` when the video has no transcript, since no context
    /// can be derived from it.
    pub async fn fetch_context(&self, url: &str) -> Result<Option<String>> {
        let video_id = self.extract_video_id(url)?;
        let json = self.dump_json(&video_id).await?;

        let Some(transcript) = self.transcript_from_dump(&video_id, &json).await? else {
            return Ok(None);
        };

        Ok(Some(combine(&transcript, &metadata_from_dump(&json))))
    }

    /// Fetch and join the caption track listed in a yt-dlp dump.
    async fn transcript_from_dump(&self, video_id: &str, json: &Value) -> Result<Option<String>> {
        let Some(track_url) = caption_track_url(json) else {
            tracing::debug!("No caption track for video {}", video_id);
            return Ok(None);
        };

        let body: Value = self.http.get(&track_url).send().await?.json().await?;
        let text = join_caption_events(&body);

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    /// Run `yt-dlp --dump-json` for a video and parse the output.
    async fn dump_json(&self, video_id: &str) -> Result<Value> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let output = tokio::process::Command::new("yt-dlp")
            .args(["--dump-json", "--no-download", "--no-warnings", &url])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SvarError::ToolNotFound("yt-dlp".to_string())
                } else {
                    SvarError::MetadataUnavailable(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SvarError::MetadataUnavailable(format!(
                "Video {} not found or unavailable: {}",
                video_id, stderr
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str).map_err(|e| {
            SvarError::MetadataUnavailable(format!("Failed to parse yt-dlp output: {}", e))
        })
    }
}

impl Default for VideoInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a yt-dlp `--dump-json` value to video metadata.
fn metadata_from_dump(json: &Value) -> VideoMetadata {
    let published_date = json["upload_date"].as_str().and_then(|date_str| {
        // yt-dlp returns date as YYYYMMDD
        if date_str.len() == 8 {
            chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
                .ok()
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap().and_utc())
        } else {
            None
        }
    });

    VideoMetadata {
        title: json["title"].as_str().unwrap_or("Unknown Title").to_string(),
        description: json["description"].as_str().map(|s| s.to_string()),
        author: json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .map(|s| s.to_string()),
        published_date,
        views: json["view_count"].as_u64(),
        likes: json["like_count"].as_u64(),
        comments: json["comment_count"].as_u64(),
        duration_seconds: json["duration"].as_f64().map(|d| d as u32),
        thumbnail_url: json["thumbnail"].as_str().map(|s| s.to_string()),
        tags: json["tags"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|t| t.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Combine transcript and metadata into answerable context for the agent.
///
/// Callers must check transcript availability first; this function assumes
/// one exists.
pub fn combine(transcript: &str, metadata: &VideoMetadata) -> String {
    format!(
        "Title: {}\nDescription: {}\nTranscript: {}",
        metadata.title,
        metadata.description.as_deref().unwrap_or(""),
        transcript
    )
}

/// Find an English json3 caption track URL in yt-dlp output.
///
/// Manually uploaded subtitles win over automatic captions.
fn caption_track_url(json: &Value) -> Option<String> {
    for source in ["subtitles", "automatic_captions"] {
        let Some(tracks) = json[source].as_object() else {
            continue;
        };

        let lang_tracks = tracks
            .iter()
            .find(|(lang, _)| *lang == "en" || lang.starts_with("en-"))
            .and_then(|(_, v)| v.as_array());

        if let Some(formats) = lang_tracks {
            let url = formats
                .iter()
                .find(|f| f["ext"].as_str() == Some("json3"))
                .and_then(|f| f["url"].as_str());
            if let Some(url) = url {
                return Some(url.to_string());
            }
        }
    }
    None
}

/// Join the text segments of a json3 caption body in temporal order,
/// separated by single spaces.
fn join_caption_events(body: &Value) -> String {
    let Some(events) = body["events"].as_array() else {
        return String::new();
    };

    events
        .iter()
        .filter_map(|e| e["segs"].as_array())
        .flatten()
        .filter_map(|s| s["utf8"].as_str())
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let extractor = VideoInfoExtractor::new();

        // Test various URL formats
        assert_eq!(
            extractor
                .extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
                .unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extractor
                .extract_video_id("https://youtube.com/watch?v=dQw4w9WgXcQ")
                .unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extractor
                .extract_video_id("https://youtu.be/dQw4w9WgXcQ")
                .unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(extractor.extract_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_video_id_invalid() {
        let extractor = VideoInfoExtractor::new();

        assert!(matches!(
            extractor.extract_video_id("not-a-video-id"),
            Err(SvarError::InvalidUrl(_))
        ));
        assert!(matches!(
            extractor.extract_video_id(""),
            Err(SvarError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_combine() {
        let metadata = VideoMetadata {
            title: "A Talk".to_string(),
            description: Some("About things".to_string()),
            author: None,
            published_date: None,
            views: None,
            likes: None,
            comments: None,
            duration_seconds: None,
            thumbnail_url: None,
            tags: vec![],
        };

        assert_eq!(
            combine("hello world", &metadata),
            "Title: A Talk\nDescription: About things\nTranscript: hello world"
        );
    }

    #[test]
    fn test_join_caption_events() {
        let body = serde_json::json!({
            "events": [
                {"segs": [{"utf8": "hello "}, {"utf8": "\n"}]},
                {"tStartMs": 1000},
                {"segs": [{"utf8": "world"}]}
            ]
        });
        assert_eq!(join_caption_events(&body), "hello world");
    }

    #[test]
    fn test_caption_track_prefers_subtitles() {
        let json = serde_json::json!({
            "subtitles": {
                "en": [{"ext": "vtt", "url": "https://x/vtt"}, {"ext": "json3", "url": "https://x/subs"}]
            },
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://x/auto"}]
            }
        });
        assert_eq!(caption_track_url(&json), Some("https://x/subs".to_string()));
    }

    #[test]
    fn test_metadata_from_dump() {
        let json = serde_json::json!({
            "title": "A Talk",
            "description": "About things",
            "channel": "Someone",
            "upload_date": "20240131",
            "view_count": 1000,
            "like_count": 10,
            "duration": 61.5,
            "thumbnail": "https://x/thumb.jpg",
            "tags": ["a", "b"]
        });
        let metadata = metadata_from_dump(&json);
        assert_eq!(metadata.title, "A Talk");
        assert_eq!(metadata.author.as_deref(), Some("Someone"));
        assert_eq!(metadata.views, Some(1000));
        assert_eq!(metadata.duration_seconds, Some(61));
        assert_eq!(metadata.tags, vec!["a", "b"]);
        assert_eq!(
            metadata.published_date.unwrap().to_rfc3339(),
            "2024-01-31T00:00:00+00:00"
        );
    }

    #[test]
    fn test_metadata_from_dump_missing_fields() {
        let metadata = metadata_from_dump(&serde_json::json!({}));
        assert_eq!(metadata.title, "Unknown Title");
        assert!(metadata.description.is_none());
        assert!(metadata.views.is_none());
        assert!(metadata.tags.is_empty());
    }

    #[test]
    fn test_caption_track_absent() {
        let json = serde_json::json!({"subtitles": {}, "automatic_captions": {}});
        assert_eq!(caption_track_url(&json), None);
    }
}
