//! YouTube transcript source.
//!
//! Reads the caption track list embedded in the video's watch page, then
//! downloads the selected timed-text track and parses its `<text>` elements.

use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::error::FetchError;
use super::source::{TranscriptFragment, TranscriptSource};
use super::video_id::VideoId;
use crate::core::config::TranscriptConfig;

const WATCH_URL: &str = "https://www.youtube.com/watch";

const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";
const CAPTIONS_MARKER: &str = "\"captions\":";
const VIDEO_DETAILS_MARKER: &str = ",\"videoDetails";
const PLAYABILITY_MARKER: &str = "\"playabilityStatus\":";

static TEXT_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<text start="([^"]*)" dur="([^"]*)">([^<]*)</text>"#)
        .expect("Invalid timed-text regex")
});

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(\d+)|#[xX]([0-9a-fA-F]+)|([a-zA-Z]+));")
        .expect("Invalid entity regex")
});

/// A caption track listed on the watch page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsSection {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// Transcript source that talks to youtube.com directly.
#[derive(Debug, Clone)]
pub struct YoutubeTranscriptClient {
    http: reqwest::Client,
    lang: Option<String>,
}

impl YoutubeTranscriptClient {
    /// Build a client from the transcript configuration.
    pub fn new(config: &TranscriptConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            lang: config.lang.clone(),
        })
    }

    /// Preferred caption language, if one is configured.
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Watch page URL for a video.
    pub fn watch_url(video_id: &VideoId) -> Result<String, FetchError> {
        let query = serde_urlencoded::to_string([("v", video_id.as_str())])
            .map_err(|e| FetchError::parse(e.to_string()))?;
        Ok(format!("{}?{}", WATCH_URL, query))
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.http.get(url);
        if let Some(lang) = &self.lang {
            request = request.header(reqwest::header::ACCEPT_LANGUAGE, lang.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    fn name(&self) -> &str {
        "youtube"
    }

    #[instrument(skip_all, fields(video_id = %video_id))]
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>, FetchError> {
        let page = self.get_text(&Self::watch_url(video_id)?).await?;

        let tracks = parse_caption_tracks(&page, video_id)?;
        let track = select_track(&tracks, self.lang.as_deref(), video_id)?;
        debug!(
            "Using caption track {} of {} available",
            track.language_code,
            tracks.len()
        );

        let xml = self.get_text(&track.base_url).await?;
        let fragments = parse_timed_text(&xml, &track.language_code);

        info!("Fetched {} caption fragment(s)", fragments.len());
        Ok(fragments)
    }
}

/// Extract the caption track list from a watch page.
pub fn parse_caption_tracks(html: &str, video_id: &VideoId) -> Result<Vec<CaptionTrack>, FetchError> {
    if html.contains(RECAPTCHA_MARKER) {
        return Err(FetchError::TooManyRequests);
    }

    let Some((_, after)) = html.split_once(CAPTIONS_MARKER) else {
        if !html.contains(PLAYABILITY_MARKER) {
            return Err(FetchError::VideoUnavailable(video_id.to_string()));
        }
        return Err(FetchError::TranscriptsDisabled(video_id.to_string()));
    };

    let section = after
        .split(VIDEO_DETAILS_MARKER)
        .next()
        .unwrap_or(after)
        .replace('\n', "");

    let renderer = serde_json::from_str::<CaptionsSection>(&section)
        .ok()
        .and_then(|c| c.player_captions_tracklist_renderer)
        .ok_or_else(|| FetchError::TranscriptsDisabled(video_id.to_string()))?;

    if renderer.caption_tracks.is_empty() {
        return Err(FetchError::NoTranscript(video_id.to_string()));
    }

    Ok(renderer.caption_tracks)
}

/// Pick the track for `lang`, or the first track when no language is set.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    lang: Option<&str>,
    video_id: &VideoId,
) -> Result<&'a CaptionTrack, FetchError> {
    match lang {
        Some(lang) => tracks
            .iter()
            .find(|t| t.language_code == lang)
            .ok_or_else(|| FetchError::LanguageNotAvailable {
                lang: lang.to_string(),
                available: tracks.iter().map(|t| t.language_code.clone()).collect(),
                video_id: video_id.to_string(),
            }),
        None => tracks
            .first()
            .ok_or_else(|| FetchError::NoTranscript(video_id.to_string())),
    }
}

/// Parse a timed-text document into fragments, in document order.
///
/// Elements with unparseable timings keep their text with a zero timing.
pub fn parse_timed_text(xml: &str, lang: &str) -> Vec<TranscriptFragment> {
    TEXT_ELEMENT_RE
        .captures_iter(xml)
        .map(|caps| TranscriptFragment {
            text: decode_entities(&caps[3]),
            offset: caps[1].parse().unwrap_or(0.0),
            duration: caps[2].parse().unwrap_or(0.0),
            lang: Some(lang.to_string()),
        })
        .collect()
}

/// Named entities seen in caption text. Captions are frequently HTML that
/// was XML-escaped a second time, so HTML names show up alongside the XML
/// ones. Unknown names are left untouched.
fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        "eacute" => '\u{00E9}',
        "egrave" => '\u{00E8}',
        "agrave" => '\u{00E0}',
        "ccedil" => '\u{00E7}',
        "auml" => '\u{00E4}',
        "ouml" => '\u{00F6}',
        "uuml" => '\u{00FC}',
        "szlig" => '\u{00DF}',
        "ntilde" => '\u{00F1}',
        "iexcl" => '\u{00A1}',
        "iquest" => '\u{00BF}',
        _ => return None,
    };
    Some(c)
}

/// Decode XML character references. Timed text is often double-escaped
/// (`&amp;#39;`), so `&amp;` is unwrapped first.
pub fn decode_entities(text: &str) -> String {
    let unwrapped = text.replace("&amp;", "&");
    ENTITY_RE
        .replace_all(&unwrapped, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                named_entity(&caps[3])
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
