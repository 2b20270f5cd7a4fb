//! Playlist source and track types
//!
//! The playlist is an ordered list of track descriptors fetched once at
//! startup, either from a hosted JSON document (a GitHub gist raw URL) or from
//! a `songs.json` file next to the binary. The document is either a bare array
//! of tracks or an object wrapping the array under `"songs"`; both normalize
//! to the same in-memory sequence. There is no schema validation: unknown
//! fields are ignored and missing fields become empty strings.

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use crate::config;

/// One entry of the playlist. Tracks have no identity beyond their position;
/// duplicates are distinct entries.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, rename = "audioSrc")]
    pub audio_src: String,
    #[serde(default, rename = "albumArtUrl")]
    pub album_art_url: String,
}

/// Ordered, immutable-once-loaded track sequence. Empty is a valid state.
pub type Playlist = Vec<Track>;

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistDocument {
    Bare(Vec<Track>),
    Wrapped { songs: Vec<Track> },
}

/// Where the playlist document comes from.
#[derive(Clone, Debug)]
pub enum PlaylistSource {
    Local(PathBuf),
    Remote(String),
}

impl PlaylistSource {
    /// Pick the source from the compiled-in music config: the gist URL when
    /// gist coordinates are set, the local file otherwise.
    pub fn from_config() -> Self {
        match config::playlist_gist_url() {
            Some(url) => PlaylistSource::Remote(url),
            None => PlaylistSource::Local(PathBuf::from(config::MUSIC.local_file)),
        }
    }

    /// Fetch and normalize the playlist document.
    ///
    /// Callers are expected to convert a failure into the empty playlist; the
    /// player then shows its persistent loading placeholder.
    pub async fn fetch(&self) -> Result<Playlist> {
        let body = match self {
            PlaylistSource::Remote(url) => {
                tracing::debug!(url = %url, "fetching remote playlist");
                reqwest::get(url).await?.error_for_status()?.text().await?
            }
            PlaylistSource::Local(path) => {
                tracing::debug!(path = %path.display(), "reading local playlist");
                tokio::fs::read_to_string(path).await?
            }
        };
        parse_playlist(&body)
    }
}

/// Normalize a playlist document (bare array or `{ "songs": [...] }`).
pub fn parse_playlist(body: &str) -> Result<Playlist> {
    let document: PlaylistDocument = serde_json::from_str(body)?;
    Ok(match document {
        PlaylistDocument::Bare(tracks) => tracks,
        PlaylistDocument::Wrapped { songs } => songs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let body = r#"[
            {"title": "A", "artist": "x", "audioSrc": "http://a/1.mp3", "albumArtUrl": "http://a/1.jpg"},
            {"title": "B", "artist": "y", "audioSrc": "http://a/2.mp3", "albumArtUrl": "http://a/2.jpg"}
        ]"#;
        let playlist = parse_playlist(body).unwrap();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist[0].title, "A");
        assert_eq!(playlist[1].audio_src, "http://a/2.mp3");
    }

    #[test]
    fn parses_wrapped_object() {
        let body = r#"{"songs": [{"title": "A", "artist": "x", "audioSrc": "u", "albumArtUrl": "v"}]}"#;
        let playlist = parse_playlist(body).unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist[0].artist, "x");
    }

    #[test]
    fn empty_wrapped_list_is_valid() {
        let playlist = parse_playlist(r#"{"songs": []}"#).unwrap();
        assert!(playlist.is_empty());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let playlist = parse_playlist(r#"[{"title": "only a title"}]"#).unwrap();
        assert_eq!(playlist[0].title, "only a title");
        assert_eq!(playlist[0].artist, "");
        assert_eq!(playlist[0].audio_src, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = r#"{"songs": [{"title": "A", "bpm": 128, "year": 2024}]}"#;
        let playlist = parse_playlist(body).unwrap();
        assert_eq!(playlist[0].title, "A");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_playlist("not json").is_err());
        assert!(parse_playlist(r#"{"tracks": []}"#).is_err());
    }
}
