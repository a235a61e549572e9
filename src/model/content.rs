//! Denormalized, display-ready records built from a catalog snapshot

use super::asset::{Album, Artist, Playlist, Song};

/// One song with its album and artist resolved to names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongRow {
    pub key: String,
    pub song: String,
    pub album: String,
    pub artist: String,
}

impl SongRow {
    /// `Song — Album • Artist`
    pub fn display(&self) -> String {
        format!("{} — {} • {}", self.song, self.album, self.artist)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub albums: Vec<Album>,
    pub songs: Vec<SongRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlbumDetail {
    pub album: Album,
    pub artist_name: String,
    pub songs: Vec<Song>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SongDetail {
    pub song: Song,
    pub album_name: String,
    pub album_year: Option<i64>,
    pub artist_name: String,
    /// Names of the playlists that include this song
    pub playlists: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaylistDetail {
    pub playlist: Playlist,
    pub songs: Vec<SongRow>,
}

impl PlaylistDetail {
    pub fn visibility(&self) -> &'static str {
        if self.playlist.is_private {
            "Private playlist"
        } else {
            "Public playlist"
        }
    }
}

/// Detail dialog contents
#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    Artist(ArtistDetail),
    Album(AlbumDetail),
    Song(SongDetail),
    Playlist(PlaylistDetail),
}

/// Landing page: collection sizes and the most recently listed items of each type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    pub artist_count: usize,
    pub album_count: usize,
    pub song_count: usize,
    pub playlist_count: usize,
    pub recent_artists: Vec<String>,
    pub recent_albums: Vec<String>,
    pub recent_songs: Vec<SongRow>,
    pub recent_playlists: Vec<String>,
}

pub fn song_count_label(count: usize) -> String {
    if count == 1 {
        "1 song".to_string()
    } else {
        format!("{count} songs")
    }
}
