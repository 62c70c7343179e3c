use crate::models::Song;

const PLACEHOLDER_ART: &str = "https://via.placeholder.com/64";
const SPOTIFY_URL: &str = "https://open.spotify.com";

/// Stand-in for a music catalogue lookup: any non-blank query returns the
/// same two songs.
pub fn search_songs(query: &str) -> Vec<Song> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    (1..=2)
        .map(|n| Song {
            id: n.to_string(),
            name: format!("Mock Song {n}"),
            artist: format!("Artist {n}"),
            album_art: PLACEHOLDER_ART.to_string(),
            preview_url: None,
            spotify_url: SPOTIFY_URL.to_string(),
        })
        .collect()
}
