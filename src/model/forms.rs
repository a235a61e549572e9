//! Create/edit drafts for the four asset types and the dialog state that edits them

use chrono::Datelike;
use serde_json::Value;

use super::aggregator::Catalog;
use super::asset::{Album, Artist, AssetPayload, AssetRef, AssetType, Playlist, Song};
use super::asset_client::AssetStore;
use super::content::SongRow;
use super::error::{SubmitError, ValidationError};

const YEAR_DIGITS: usize = 4;

pub fn current_year() -> i64 {
    chrono::Local::now().year() as i64
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtistDraft {
    pub key: Option<String>,
    pub name: String,
    pub country: String,
}

impl ArtistDraft {
    pub fn from_existing(artist: &Artist) -> Self {
        Self {
            key: Some(artist.key.clone()),
            name: artist.name.clone(),
            country: artist.country.clone(),
        }
    }

    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        require(&self.name, "Name")?;
        require(&self.country, "Country")?;
        Ok(AssetPayload::Artist {
            name: self.name.clone(),
            country: self.country.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlbumDraft {
    pub key: Option<String>,
    pub name: String,
    pub artist_key: String,
    /// Digits as typed
    pub year: String,
}

impl AlbumDraft {
    pub fn new() -> Self {
        Self {
            key: None,
            name: String::new(),
            artist_key: String::new(),
            year: current_year().to_string(),
        }
    }

    pub fn from_existing(album: &Album) -> Self {
        Self {
            key: Some(album.key.clone()),
            name: album.name.clone(),
            artist_key: album.artist.key.clone(),
            year: album.year.to_string(),
        }
    }

    /// Step the year by `delta`, staying within `0..=current year`
    pub fn adjust_year(&mut self, delta: i64) {
        let year = self.year.parse::<i64>().unwrap_or_else(|_| current_year());
        self.year = (year + delta).clamp(0, current_year()).to_string();
    }

    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        require(&self.name, "Name")?;
        require(&self.artist_key, "Artist")?;
        let year = self
            .year
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidYear)?;
        Ok(AssetPayload::Album {
            name: self.name.clone(),
            artist: AssetRef::new(AssetType::Artist, self.artist_key.clone()),
            year,
        })
    }
}

impl Default for AlbumDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongDraft {
    pub key: Option<String>,
    pub name: String,
    pub album_key: String,
}

impl SongDraft {
    pub fn from_existing(song: &Song) -> Self {
        Self {
            key: Some(song.key.clone()),
            name: song.name.clone(),
            album_key: song.album.key.clone(),
        }
    }

    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        require(&self.name, "Name")?;
        require(&self.album_key, "Album")?;
        Ok(AssetPayload::Song {
            name: self.name.clone(),
            album: AssetRef::new(AssetType::Album, self.album_key.clone()),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaylistDraft {
    pub key: Option<String>,
    pub name: String,
    pub private: bool,
    /// Song keys in the order they were picked
    pub selected_songs: Vec<String>,
    pub song_search: String,
}

impl PlaylistDraft {
    pub fn from_existing(playlist: &Playlist) -> Self {
        Self {
            key: Some(playlist.key.clone()),
            name: playlist.name.clone(),
            private: playlist.is_private,
            selected_songs: playlist.songs.iter().map(|r| r.key.clone()).collect(),
            song_search: String::new(),
        }
    }

    /// Songs matching the search box by song, album or artist name
    pub fn candidates(&self, catalog: &Catalog) -> Vec<SongRow> {
        let needle = self.song_search.to_lowercase();
        catalog
            .songs
            .iter()
            .map(|s| catalog.song_info(s))
            .filter(|row| {
                needle.is_empty()
                    || [&row.song, &row.album, &row.artist]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn is_selected(&self, song_key: &str) -> bool {
        self.selected_songs.iter().any(|k| k == song_key)
    }

    pub fn toggle(&mut self, song_key: &str) {
        if self.is_selected(song_key) {
            self.selected_songs.retain(|k| k != song_key);
        } else {
            self.selected_songs.push(song_key.to_string());
        }
    }

    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        require(&self.name, "Name")?;
        Ok(AssetPayload::Playlist {
            name: self.name.clone(),
            songs: self
                .selected_songs
                .iter()
                .map(|k| AssetRef::new(AssetType::Song, k.clone()))
                .collect(),
            private: self.private,
        })
    }
}

/// A draft of any asset type
#[derive(Clone, Debug, PartialEq)]
pub enum Draft {
    Artist(ArtistDraft),
    Album(AlbumDraft),
    Song(SongDraft),
    Playlist(PlaylistDraft),
}

impl Draft {
    /// Empty draft for a new asset
    pub fn new(asset_type: AssetType) -> Self {
        match asset_type {
            AssetType::Artist => Draft::Artist(ArtistDraft::default()),
            AssetType::Album => Draft::Album(AlbumDraft::new()),
            AssetType::Song => Draft::Song(SongDraft::default()),
            AssetType::Playlist => Draft::Playlist(PlaylistDraft::default()),
        }
    }

    pub fn asset_type(&self) -> AssetType {
        match self {
            Draft::Artist(_) => AssetType::Artist,
            Draft::Album(_) => AssetType::Album,
            Draft::Song(_) => AssetType::Song,
            Draft::Playlist(_) => AssetType::Playlist,
        }
    }

    /// Key of the asset being edited, `None` when creating
    pub fn key(&self) -> Option<&str> {
        match self {
            Draft::Artist(d) => d.key.as_deref(),
            Draft::Album(d) => d.key.as_deref(),
            Draft::Song(d) => d.key.as_deref(),
            Draft::Playlist(d) => d.key.as_deref(),
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        match self {
            Draft::Artist(_) => &[FormField::Name, FormField::Country],
            Draft::Album(_) => &[FormField::Name, FormField::Artist, FormField::Year],
            Draft::Song(_) => &[FormField::Name, FormField::Album],
            Draft::Playlist(_) => &[
                FormField::Name,
                FormField::Private,
                FormField::SongSearch,
                FormField::Songs,
            ],
        }
    }

    pub fn validate(&self) -> Result<AssetPayload, ValidationError> {
        match self {
            Draft::Artist(d) => d.validate(),
            Draft::Album(d) => d.validate(),
            Draft::Song(d) => d.validate(),
            Draft::Playlist(d) => d.validate(),
        }
    }

    /// Validate, then create or update depending on whether the draft has a key.
    /// A draft that fails validation never reaches the store.
    pub async fn submit(&self, store: &dyn AssetStore) -> Result<Value, SubmitError> {
        let payload = self.validate()?;
        let echo = match self.key() {
            Some(key) => store.update(key, &payload).await?,
            None => store.create(&payload).await?,
        };
        Ok(echo)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Country,
    Artist,
    Year,
    Album,
    Private,
    SongSearch,
    Songs,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Country => "Country",
            FormField::Artist => "Artist",
            FormField::Year => "Year",
            FormField::Album => "Album",
            FormField::Private => "Private",
            FormField::SongSearch => "Search songs",
            FormField::Songs => "Songs",
        }
    }

    /// Fields that accept typed characters
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Country | FormField::Year | FormField::SongSearch
        )
    }
}

/// An open create/edit dialog
#[derive(Clone, Debug, PartialEq)]
pub struct FormDialog {
    pub draft: Draft,
    pub focus: usize,
    /// Highlighted row of the playlist song picker
    pub song_cursor: usize,
    pub submitting: bool,
}

impl FormDialog {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            focus: 0,
            song_cursor: 0,
            submitting: false,
        }
    }

    pub fn title(&self) -> String {
        let verb = if self.draft.key().is_some() { "Edit" } else { "New" };
        format!("{verb} {}", self.draft.asset_type())
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.draft.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.draft.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.draft.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match (&mut self.draft, field) {
            (Draft::Artist(d), FormField::Name) => Some(&mut d.name),
            (Draft::Artist(d), FormField::Country) => Some(&mut d.country),
            (Draft::Album(d), FormField::Name) => Some(&mut d.name),
            (Draft::Album(d), FormField::Year) => Some(&mut d.year),
            (Draft::Song(d), FormField::Name) => Some(&mut d.name),
            (Draft::Playlist(d), FormField::Name) => Some(&mut d.name),
            (Draft::Playlist(d), FormField::SongSearch) => Some(&mut d.song_search),
            _ => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.focused_field();
        if field == FormField::Year && (!c.is_ascii_digit()) {
            return;
        }
        if field == FormField::SongSearch {
            self.song_cursor = 0;
        }
        if let Some(text) = self.text_mut(field) {
            if field == FormField::Year && text.len() >= YEAR_DIGITS {
                return;
            }
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        if field == FormField::SongSearch {
            self.song_cursor = 0;
        }
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Left/right on a picker or the year field
    pub fn adjust(&mut self, delta: i64, catalog: &Catalog) {
        let field = self.focused_field();
        match (&mut self.draft, field) {
            (Draft::Album(d), FormField::Artist) => {
                let keys: Vec<&str> = catalog.artists.iter().map(|a| a.key.as_str()).collect();
                d.artist_key = cycle(&keys, &d.artist_key, delta);
            }
            (Draft::Album(d), FormField::Year) => d.adjust_year(delta),
            (Draft::Song(d), FormField::Album) => {
                let keys: Vec<&str> = catalog.albums.iter().map(|a| a.key.as_str()).collect();
                d.album_key = cycle(&keys, &d.album_key, delta);
            }
            _ => {}
        }
    }

    /// Space on a checkbox: the private flag or the highlighted song
    pub fn toggle(&mut self, catalog: &Catalog) {
        let field = self.focused_field();
        let cursor = self.song_cursor;
        if let Draft::Playlist(d) = &mut self.draft {
            match field {
                FormField::Private => d.private = !d.private,
                FormField::Songs => {
                    if let Some(row) = d.candidates(catalog).get(cursor) {
                        d.toggle(&row.key);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn move_song_cursor(&mut self, delta: i64, catalog: &Catalog) {
        if let Draft::Playlist(d) = &self.draft {
            let count = d.candidates(catalog).len();
            if count == 0 {
                self.song_cursor = 0;
                return;
            }
            let next = (self.song_cursor as i64 + delta).clamp(0, count as i64 - 1);
            self.song_cursor = next as usize;
        }
    }

    /// Current value of a field as shown in the dialog
    pub fn field_value(&self, field: FormField, catalog: &Catalog) -> String {
        match (&self.draft, field) {
            (Draft::Artist(d), FormField::Name) => d.name.clone(),
            (Draft::Artist(d), FormField::Country) => d.country.clone(),
            (Draft::Album(d), FormField::Name) => d.name.clone(),
            (Draft::Album(d), FormField::Year) => d.year.clone(),
            (Draft::Album(d), FormField::Artist) => {
                if d.artist_key.is_empty() {
                    "Select an artist".to_string()
                } else {
                    catalog.artist_name_of(&d.artist_key).to_string()
                }
            }
            (Draft::Song(d), FormField::Name) => d.name.clone(),
            (Draft::Song(d), FormField::Album) => {
                if d.album_key.is_empty() {
                    "Select an album".to_string()
                } else {
                    let (album, artist) = catalog.album_and_artist_of(&d.album_key);
                    format!("{album} • {artist}")
                }
            }
            (Draft::Playlist(d), FormField::Name) => d.name.clone(),
            (Draft::Playlist(d), FormField::Private) => {
                let mark = if d.private { "[x]" } else { "[ ]" };
                mark.to_string()
            }
            (Draft::Playlist(d), FormField::SongSearch) => d.song_search.clone(),
            (Draft::Playlist(d), FormField::Songs) => d
                .selected_songs
                .iter()
                .map(|k| catalog.song_name_of(k))
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }
}

/// Move `delta` steps through `keys` from `current`, wrapping. An empty or unknown
/// selection starts from the first (forward) or last (backward) entry.
fn cycle(keys: &[&str], current: &str, delta: i64) -> String {
    if keys.is_empty() {
        return current.to_string();
    }
    let len = keys.len() as i64;
    let next = match keys.iter().position(|k| *k == current) {
        Some(index) => (index as i64 + delta).rem_euclid(len),
        None if delta >= 0 => 0,
        None => len - 1,
    };
    keys[next as usize].to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// The login screen's inputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub submitting: bool,
}

impl LoginForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.username, "Username")?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::model::aggregator::tests::FakeStore;
    use crate::model::error::ApiError;
    use crate::model::resolver::tests::{album, artist, playlist, song};
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog {
            artists: vec![artist("a1", "Who", "UK"), artist("a2", "Kinks", "UK")],
            albums: vec![album("b1", "Tommy", "a1", 1969), album("b2", "Arthur", "a2", 1969)],
            songs: vec![
                song("s1", "Pinball Wizard", "b1"),
                song("s2", "Victoria", "b2"),
                song("s3", "Shangri-La", "b2"),
            ],
            playlists: vec![],
        }
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_network_calls() {
        let store = Arc::new(FakeStore::default());
        let draft = Draft::Artist(ArtistDraft {
            country: "UK".to_string(),
            ..Default::default()
        });

        let result = draft.submit(store.as_ref()).await;

        assert_eq!(
            result,
            Err(SubmitError::Validation(ValidationError::Required("Name")))
        );
        assert_eq!(result.unwrap_err().to_string(), "Name is required");
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn required_fields_per_type() {
        let mut album = AlbumDraft::new();
        album.name = "Tommy".to_string();
        assert_eq!(album.validate(), Err(ValidationError::Required("Artist")));

        let song = SongDraft {
            name: "Pinball Wizard".to_string(),
            ..Default::default()
        };
        assert_eq!(song.validate(), Err(ValidationError::Required("Album")));

        let artist = ArtistDraft {
            name: "Who".to_string(),
            country: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(artist.validate(), Err(ValidationError::Required("Country")));

        assert_eq!(
            PlaylistDraft::default().validate(),
            Err(ValidationError::Required("Name"))
        );
    }

    #[tokio::test]
    async fn new_draft_creates_and_existing_draft_updates() {
        let store = Arc::new(FakeStore::default());
        let created = Draft::Artist(ArtistDraft {
            key: None,
            name: "Who".to_string(),
            country: "UK".to_string(),
        });
        created.submit(store.as_ref()).await.expect("create");

        let existing = artist("a1", "Who", "UK");
        let mut edit = ArtistDraft::from_existing(&existing);
        edit.name = "The Who".to_string();
        Draft::Artist(edit).submit(store.as_ref()).await.expect("update");

        assert_eq!(store.created.lock().unwrap().len(), 1);
        let updated = store.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "a1");
        assert_eq!(updated[0].1.name(), "The Who");
    }

    #[tokio::test]
    async fn store_rejection_is_reported_as_api_error() {
        let store = Arc::new(FakeStore::default());
        store.fail(
            AssetType::Song,
            ApiError::status(409, Some("asset already exists".to_string())),
        );
        let draft = Draft::Song(SongDraft {
            key: None,
            name: "Pinball Wizard".to_string(),
            album_key: "b1".to_string(),
        });

        let err = draft.submit(store.as_ref()).await.unwrap_err();
        assert_eq!(err.to_string(), "asset already exists");
    }

    #[test]
    fn album_payload_carries_artist_reference_and_year() {
        let draft = AlbumDraft::from_existing(&album("b1", "Tommy", "a1", 1969));
        assert_eq!(
            draft.validate(),
            Ok(AssetPayload::Album {
                name: "Tommy".to_string(),
                artist: AssetRef::new(AssetType::Artist, "a1"),
                year: 1969,
            })
        );
    }

    #[test]
    fn year_adjustment_is_clamped() {
        let mut draft = AlbumDraft::new();
        draft.adjust_year(5);
        assert_eq!(draft.year, current_year().to_string());

        draft.year = "1".to_string();
        draft.adjust_year(-3);
        assert_eq!(draft.year, "0");
    }

    #[test]
    fn year_field_accepts_four_digits_only() {
        let mut dialog = FormDialog::new(Draft::Album(AlbumDraft {
            year: String::new(),
            ..AlbumDraft::new()
        }));
        dialog.focus = 2;
        for c in "19a6x95".chars() {
            dialog.input_char(c);
        }
        let Draft::Album(d) = &dialog.draft else {
            panic!("album draft")
        };
        assert_eq!(d.year, "1969");
    }

    #[test]
    fn unparsable_year_fails_validation() {
        let draft = AlbumDraft {
            name: "Tommy".to_string(),
            artist_key: "a1".to_string(),
            year: String::new(),
            key: None,
        };
        assert_eq!(draft.validate(), Err(ValidationError::InvalidYear));
    }

    #[test]
    fn candidates_match_song_album_or_artist() {
        let catalog = catalog();
        let mut draft = PlaylistDraft::default();

        draft.song_search = "kinks".to_string();
        let keys: Vec<String> = draft.candidates(&catalog).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["s2", "s3"]);

        draft.song_search = "WIZARD".to_string();
        assert_eq!(draft.candidates(&catalog).len(), 1);
    }

    #[test]
    fn selection_survives_filter_changes() {
        let catalog = catalog();
        let mut draft = PlaylistDraft::default();
        draft.toggle("s1");
        draft.song_search = "kinks".to_string();
        draft.toggle("s3");

        assert!(draft.candidates(&catalog).iter().all(|r| r.key != "s1"));
        assert_eq!(draft.selected_songs, vec!["s1", "s3"]);

        draft.toggle("s1");
        assert_eq!(draft.selected_songs, vec!["s3"]);
    }

    #[test]
    fn playlist_edit_keeps_song_order() {
        let draft = PlaylistDraft::from_existing(&playlist("p1", "Mix", &["s3", "s1"]));
        let AssetPayload::Playlist { songs, .. } = draft.validate().expect("valid") else {
            panic!("playlist payload")
        };
        let keys: Vec<&str> = songs.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["s3", "s1"]);
    }

    #[test]
    fn dialog_toggles_private_flag_and_highlighted_song() {
        let catalog = catalog();
        let mut dialog = FormDialog::new(Draft::new(AssetType::Playlist));
        assert_eq!(dialog.title(), "New playlist");

        dialog.focus_next();
        assert_eq!(dialog.focused_field(), FormField::Private);
        dialog.toggle(&catalog);

        dialog.focus_next();
        dialog.focus_next();
        assert_eq!(dialog.focused_field(), FormField::Songs);
        dialog.move_song_cursor(1, &catalog);
        dialog.toggle(&catalog);

        let Draft::Playlist(d) = &dialog.draft else {
            panic!("playlist draft")
        };
        assert!(d.private);
        assert_eq!(d.selected_songs, vec!["s2"]);
        assert_eq!(dialog.field_value(FormField::Songs, &catalog), "Victoria");
    }

    #[test]
    fn pickers_cycle_through_catalog() {
        let catalog = catalog();
        let mut dialog = FormDialog::new(Draft::new(AssetType::Song));
        dialog.focus_next();
        assert_eq!(dialog.field_value(FormField::Album, &catalog), "Select an album");

        dialog.adjust(1, &catalog);
        assert_eq!(dialog.field_value(FormField::Album, &catalog), "Tommy • Who");
        dialog.adjust(1, &catalog);
        dialog.adjust(1, &catalog);
        assert_eq!(dialog.field_value(FormField::Album, &catalog), "Tommy • Who");

        let mut album = FormDialog::new(Draft::new(AssetType::Album));
        album.focus_next();
        album.adjust(-1, &catalog);
        assert_eq!(album.field_value(FormField::Artist, &catalog), "Kinks");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut dialog = FormDialog::new(Draft::new(AssetType::Artist));
        dialog.focus_prev();
        assert_eq!(dialog.focused_field(), FormField::Country);
        dialog.focus_next();
        assert_eq!(dialog.focused_field(), FormField::Name);
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::default();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Username is required"
        );
        for c in "admin".chars() {
            form.input_char(c);
        }
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Password is required"
        );
        form.focus_next();
        form.input_char('x');
        assert_eq!(form.validate(), Ok(()));
        assert_eq!(form.password, "x");
    }
}
