//! Foreign-key resolution over a catalog snapshot
//!
//! Every lookup is a linear scan of the referenced collection. Collections are small and
//! refetched whole, so there is no index to keep in sync. Broken references resolve to a
//! placeholder name instead of failing.

use super::aggregator::Catalog;
use super::asset::{Album, Artist, Playlist, Song};
use super::content::{
    AlbumDetail, ArtistDetail, Dashboard, PlaylistDetail, SongDetail, SongRow,
};

pub const ARTIST_NOT_FOUND: &str = "Artist not found";
pub const ALBUM_NOT_FOUND: &str = "Album not found";
pub const SONG_NOT_FOUND: &str = "Song not found";

const RECENT_COUNT: usize = 5;

impl Catalog {
    pub fn artist(&self, key: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.key == key)
    }

    pub fn album(&self, key: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.key == key)
    }

    pub fn song(&self, key: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.key == key)
    }

    pub fn playlist(&self, key: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.key == key)
    }

    pub fn artist_name_of(&self, artist_key: &str) -> &str {
        self.artist(artist_key)
            .map(|a| a.name.as_str())
            .unwrap_or(ARTIST_NOT_FOUND)
    }

    pub fn song_name_of(&self, song_key: &str) -> &str {
        self.song(song_key)
            .map(|s| s.name.as_str())
            .unwrap_or(SONG_NOT_FOUND)
    }

    /// `(album name, artist name)`, each replaced by its placeholder when the link is broken
    pub fn album_and_artist_of(&self, album_key: &str) -> (&str, &str) {
        match self.album(album_key) {
            Some(album) => (album.name.as_str(), self.artist_name_of(&album.artist.key)),
            None => (ALBUM_NOT_FOUND, ARTIST_NOT_FOUND),
        }
    }

    pub fn song_info(&self, song: &Song) -> SongRow {
        let (album, artist) = self.album_and_artist_of(&song.album.key);
        SongRow {
            key: song.key.clone(),
            song: song.name.clone(),
            album: album.to_string(),
            artist: artist.to_string(),
        }
    }

    /// One row per song reference, in playlist order. References to songs that no longer
    /// exist are dropped.
    pub fn playlist_song_info(&self, playlist: &Playlist) -> Vec<SongRow> {
        playlist
            .songs
            .iter()
            .filter_map(|r| self.song(&r.key))
            .map(|song| self.song_info(song))
            .collect()
    }

    pub fn artist_detail(&self, artist: &Artist) -> ArtistDetail {
        let albums: Vec<Album> = self
            .albums
            .iter()
            .filter(|a| a.artist.key == artist.key)
            .cloned()
            .collect();
        let songs = self
            .songs
            .iter()
            .filter(|s| albums.iter().any(|a| a.key == s.album.key))
            .map(|s| self.song_info(s))
            .collect();

        ArtistDetail {
            artist: artist.clone(),
            albums,
            songs,
        }
    }

    pub fn album_detail(&self, album: &Album) -> AlbumDetail {
        AlbumDetail {
            album: album.clone(),
            artist_name: self.artist_name_of(&album.artist.key).to_string(),
            songs: self
                .songs
                .iter()
                .filter(|s| s.album.key == album.key)
                .cloned()
                .collect(),
        }
    }

    pub fn song_detail(&self, song: &Song) -> SongDetail {
        let (album_name, artist_name) = self.album_and_artist_of(&song.album.key);
        SongDetail {
            song: song.clone(),
            album_name: album_name.to_string(),
            album_year: self.album(&song.album.key).map(|a| a.year),
            artist_name: artist_name.to_string(),
            playlists: self
                .playlists
                .iter()
                .filter(|p| p.songs.iter().any(|r| r.key == song.key))
                .map(|p| p.name.clone())
                .collect(),
        }
    }

    pub fn playlist_detail(&self, playlist: &Playlist) -> PlaylistDetail {
        PlaylistDetail {
            playlist: playlist.clone(),
            songs: self.playlist_song_info(playlist),
        }
    }

    /// Counts plus the last few items of each collection in store order
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            artist_count: self.artists.len(),
            album_count: self.albums.len(),
            song_count: self.songs.len(),
            playlist_count: self.playlists.len(),
            recent_artists: last(&self.artists).iter().map(|a| a.name.clone()).collect(),
            recent_albums: last(&self.albums)
                .iter()
                .map(|a| format!("{} • {}", a.name, self.artist_name_of(&a.artist.key)))
                .collect(),
            recent_songs: last(&self.songs).iter().map(|s| self.song_info(s)).collect(),
            recent_playlists: last(&self.playlists).iter().map(|p| p.name.clone()).collect(),
        }
    }
}

fn last<T>(items: &[T]) -> &[T] {
    &items[items.len().saturating_sub(RECENT_COUNT)..]
}
