//! Filter, sort and paginate a catalog collection for display
//!
//! Pages are recomputed from the snapshot on every render. Nothing here is cached.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::aggregator::Catalog;
use super::asset::{Album, Artist, AssetType, Playlist, Song};

pub const PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Value a row is ordered by. Text compares byte-wise, numbers numerically.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Number(i64),
}

pub trait SortField: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// A record that can be shown in a list section
pub trait Listable: Clone + Send + Sync {
    type Field: SortField;

    const ASSET_TYPE: AssetType;

    fn key(&self) -> &str;

    fn name(&self) -> &str;

    /// Denormalized text the filter matches against
    fn search_fields(&self, catalog: &Catalog) -> Vec<String>;

    fn sort_key(&self, field: Self::Field, catalog: &Catalog) -> SortKey;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArtistSort {
    #[default]
    Name,
    Country,
}

impl SortField for ArtistSort {
    const ALL: &'static [Self] = &[ArtistSort::Name, ArtistSort::Country];

    fn label(self) -> &'static str {
        match self {
            ArtistSort::Name => "name",
            ArtistSort::Country => "country",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlbumSort {
    #[default]
    Name,
    Year,
    Artist,
}

impl SortField for AlbumSort {
    const ALL: &'static [Self] = &[AlbumSort::Name, AlbumSort::Year, AlbumSort::Artist];

    fn label(self) -> &'static str {
        match self {
            AlbumSort::Name => "name",
            AlbumSort::Year => "year",
            AlbumSort::Artist => "artist",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SongSort {
    #[default]
    Name,
    Album,
    Artist,
}

impl SortField for SongSort {
    const ALL: &'static [Self] = &[SongSort::Name, SongSort::Album, SongSort::Artist];

    fn label(self) -> &'static str {
        match self {
            SongSort::Name => "name",
            SongSort::Album => "album",
            SongSort::Artist => "artist",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaylistSort {
    #[default]
    Name,
    SongCount,
}

impl SortField for PlaylistSort {
    const ALL: &'static [Self] = &[PlaylistSort::Name, PlaylistSort::SongCount];

    fn label(self) -> &'static str {
        match self {
            PlaylistSort::Name => "name",
            PlaylistSort::SongCount => "songs",
        }
    }
}

impl Listable for Artist {
    type Field = ArtistSort;
    const ASSET_TYPE: AssetType = AssetType::Artist;

    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self, _catalog: &Catalog) -> Vec<String> {
        vec![self.name.clone(), self.country.clone()]
    }

    fn sort_key(&self, field: ArtistSort, _catalog: &Catalog) -> SortKey {
        match field {
            ArtistSort::Name => SortKey::Text(self.name.clone()),
            ArtistSort::Country => SortKey::Text(self.country.clone()),
        }
    }
}

impl Listable for Album {
    type Field = AlbumSort;
    const ASSET_TYPE: AssetType = AssetType::Album;

    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self, catalog: &Catalog) -> Vec<String> {
        vec![
            self.name.clone(),
            catalog.artist_name_of(&self.artist.key).to_string(),
            self.year.to_string(),
        ]
    }

    fn sort_key(&self, field: AlbumSort, catalog: &Catalog) -> SortKey {
        match field {
            AlbumSort::Name => SortKey::Text(self.name.clone()),
            AlbumSort::Year => SortKey::Number(self.year),
            AlbumSort::Artist => SortKey::Text(catalog.artist_name_of(&self.artist.key).to_string()),
        }
    }
}

impl Listable for Song {
    type Field = SongSort;
    const ASSET_TYPE: AssetType = AssetType::Song;

    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self, catalog: &Catalog) -> Vec<String> {
        let (album, artist) = catalog.album_and_artist_of(&self.album.key);
        vec![self.name.clone(), album.to_string(), artist.to_string()]
    }

    fn sort_key(&self, field: SongSort, catalog: &Catalog) -> SortKey {
        let (album, artist) = catalog.album_and_artist_of(&self.album.key);
        match field {
            SongSort::Name => SortKey::Text(self.name.clone()),
            SongSort::Album => SortKey::Text(album.to_string()),
            SongSort::Artist => SortKey::Text(artist.to_string()),
        }
    }
}

impl Listable for Playlist {
    type Field = PlaylistSort;
    const ASSET_TYPE: AssetType = AssetType::Playlist;

    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self, _catalog: &Catalog) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn sort_key(&self, field: PlaylistSort, _catalog: &Catalog) -> SortKey {
        match field {
            PlaylistSort::Name => SortKey::Text(self.name.clone()),
            PlaylistSort::SongCount => SortKey::Number(self.songs.len() as i64),
        }
    }
}

/// Query, sort and page state of one list section
#[derive(Clone, Debug, PartialEq)]
pub struct ListView<F: SortField> {
    pub query: String,
    pub sort_field: F,
    pub direction: SortDirection,
    /// 1-based
    pub current_page: usize,
    /// Row index within the current page
    pub selected: usize,
}

impl<F: SortField> Default for ListView<F> {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort_field: F::default(),
            direction: SortDirection::default(),
            current_page: 1,
            selected: 0,
        }
    }
}

/// One rendered page
#[derive(Debug)]
pub struct ListPage<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    pub page_count: usize,
    /// Number of items that passed the filter
    pub total: usize,
}

impl<F: SortField> ListView<F> {
    /// Replace the filter text and go back to the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
        self.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    pub fn set_sort_field(&mut self, field: F) {
        self.sort_field = field;
        self.selected = 0;
    }

    pub fn cycle_sort_field(&mut self) {
        self.set_sort_field(self.sort_field.next());
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
        self.selected = 0;
    }

    /// Advance one page if there is one. Returns whether the page changed.
    pub fn next_page(&mut self, page_count: usize) -> bool {
        if self.current_page < page_count {
            self.go_to_page(self.current_page + 1);
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.go_to_page(self.current_page - 1);
            true
        } else {
            false
        }
    }

    /// Jump to any page. Pages past the end are allowed and render empty.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
        self.selected = 0;
    }

    /// Highlighted row index, pulled back onto the last row when a reload shrank the page
    pub fn selected_row(&self, rows_on_page: usize) -> usize {
        self.selected.min(rows_on_page.saturating_sub(1))
    }

    pub fn move_up(&mut self, rows_on_page: usize) {
        self.selected = self.selected_row(rows_on_page).saturating_sub(1);
    }

    pub fn move_down(&mut self, rows_on_page: usize) {
        self.selected = self.selected_row(rows_on_page);
        if self.selected + 1 < rows_on_page {
            self.selected += 1;
        }
    }

    pub fn compute<'a, T>(&self, items: &'a [T], catalog: &Catalog) -> ListPage<'a, T>
    where
        T: Listable<Field = F>,
    {
        let needle = self.query.to_lowercase();
        let mut matching: Vec<(SortKey, &'a T)> = items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item
                        .search_fields(catalog)
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .map(|item| (item.sort_key(self.sort_field, catalog), item))
            .collect();

        matching.sort_by(|(a_key, a), (b_key, b)| {
            compare_keys(a_key, b_key, self.direction).then_with(|| a.key().cmp(b.key()))
        });

        let total = matching.len();
        let page_count = total.div_ceil(PAGE_SIZE);
        let rows = if (1..=page_count).contains(&self.current_page) {
            matching
                .into_iter()
                .skip((self.current_page - 1) * PAGE_SIZE)
                .take(PAGE_SIZE)
                .map(|(_, item)| item)
                .collect()
        } else {
            Vec::new()
        };

        ListPage {
            rows,
            page: self.current_page,
            page_count,
            total,
        }
    }

    /// The selected row of the page this view would render
    pub fn selected_item<'a, T>(&self, items: &'a [T], catalog: &Catalog) -> Option<&'a T>
    where
        T: Listable<Field = F>,
    {
        let rows = self.compute(items, catalog).rows;
        rows.get(self.selected_row(rows.len())).copied()
    }
}

impl<T> ListPage<'_, T> {
    /// `page X of Y`, never showing zero pages
    pub fn position_label(&self) -> String {
        format!("page {} of {}", self.page, self.page_count.max(1))
    }
}

fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resolver::tests::{album, artist, playlist, song};
    use pretty_assertions::assert_eq;

    fn names<T: Listable>(page: &ListPage<'_, T>) -> Vec<String> {
        page.rows.iter().map(|r| r.name().to_string()).collect()
    }

    fn many_artists(n: usize) -> Vec<Artist> {
        (0..n)
            .map(|i| artist(&format!("a{i:02}"), &format!("Artist {i:02}"), "BR"))
            .collect()
    }

    #[test]
    fn page_count_is_ceiling_of_filtered_count() {
        let catalog = Catalog::default();
        let view = ListView::<ArtistSort>::default();

        for (n, expected) in [(0, 0), (1, 1), (10, 1), (11, 2), (25, 3)] {
            let artists = many_artists(n);
            let page = view.compute(&artists, &catalog);
            assert_eq!(page.page_count, expected, "{n} items");
            assert_eq!(page.total, n);
        }
    }

    #[test]
    fn pages_hold_ten_rows_and_the_last_holds_the_rest() {
        let catalog = Catalog::default();
        let artists = many_artists(23);
        let mut view = ListView::<ArtistSort>::default();

        assert_eq!(view.compute(&artists, &catalog).rows.len(), 10);
        view.go_to_page(3);
        let last = view.compute(&artists, &catalog);
        assert_eq!(names(&last), vec!["Artist 20", "Artist 21", "Artist 22"]);
    }

    #[test]
    fn page_out_of_range_is_empty_not_clamped() {
        let catalog = Catalog::default();
        let artists = many_artists(15);
        let mut view = ListView::<ArtistSort>::default();
        view.go_to_page(2);

        // Shrinking the filtered set leaves the view on page 2
        view.query = "Artist 0".to_string();
        let page = view.compute(&artists, &catalog);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.page, 2);
        assert!(page.rows.is_empty());

        view.go_to_page(0);
        assert!(view.compute(&artists, &catalog).rows.is_empty());
    }

    #[test]
    fn next_page_stops_at_last_page() {
        let mut view = ListView::<ArtistSort>::default();
        assert!(view.next_page(2));
        assert!(!view.next_page(2));
        assert_eq!(view.current_page, 2);
        assert!(view.prev_page());
        assert!(!view.prev_page());
    }

    #[test]
    fn setting_the_query_returns_to_first_page() {
        let mut view = ListView::<ArtistSort>::default();
        view.go_to_page(4);
        view.push_query_char('w');
        assert_eq!(view.current_page, 1);
        assert_eq!(view.query, "w");
        view.pop_query_char();
        assert_eq!(view.query, "");
    }

    #[test]
    fn filter_is_case_insensitive() {
        let catalog = Catalog::default();
        let artists = vec![
            artist("a1", "ABBA", "SE"),
            artist("a2", "Blur", "UK"),
            artist("a3", "Can", "DE"),
        ];
        let mut lower = ListView::<ArtistSort>::default();
        lower.set_query("a");
        let mut upper = ListView::<ArtistSort>::default();
        upper.set_query("A");

        let a = names(&lower.compute(&artists, &catalog));
        assert_eq!(a, names(&upper.compute(&artists, &catalog)));
        assert_eq!(a, vec!["ABBA", "Can"]);
    }

    #[test]
    fn song_filter_matches_resolved_album_and_artist() {
        let catalog = Catalog {
            artists: vec![artist("a1", "Who", "UK")],
            albums: vec![album("b1", "Tommy", "a1", 1969)],
            songs: vec![song("s1", "Pinball Wizard", "b1"), song("s2", "Orphan", "gone")],
            playlists: vec![],
        };
        let mut view = ListView::<SongSort>::default();

        view.set_query("who");
        assert_eq!(names(&view.compute(&catalog.songs, &catalog)), vec!["Pinball Wizard"]);
        view.set_query("tommy");
        assert_eq!(names(&view.compute(&catalog.songs, &catalog)), vec!["Pinball Wizard"]);
        view.set_query("not found");
        assert_eq!(names(&view.compute(&catalog.songs, &catalog)), vec!["Orphan"]);
    }

    #[test]
    fn album_filter_matches_year() {
        let catalog = Catalog {
            albums: vec![album("b1", "Tommy", "a1", 1969), album("b2", "Quadrophenia", "a1", 1973)],
            ..Default::default()
        };
        let mut view = ListView::<AlbumSort>::default();
        view.set_query("1973");
        assert_eq!(names(&view.compute(&catalog.albums, &catalog)), vec!["Quadrophenia"]);
    }

    #[test]
    fn toggling_direction_reverses_unequal_keys() {
        let catalog = Catalog::default();
        let albums = vec![
            album("b1", "Tommy", "a1", 1969),
            album("b2", "Quadrophenia", "a1", 1973),
            album("b3", "Sell Out", "a1", 1967),
        ];
        let mut view = ListView::<AlbumSort>::default();
        view.set_sort_field(AlbumSort::Year);

        let ascending = names(&view.compute(&albums, &catalog));
        assert_eq!(ascending, vec!["Sell Out", "Tommy", "Quadrophenia"]);

        view.toggle_direction();
        let mut descending = names(&view.compute(&albums, &catalog));
        descending.reverse();
        assert_eq!(descending, ascending);

        view.toggle_direction();
        assert_eq!(view.direction, SortDirection::Ascending);
    }

    #[test]
    fn ties_break_on_key_in_both_directions() {
        let catalog = Catalog::default();
        let albums = vec![
            album("k3", "C", "a1", 1970),
            album("k1", "A", "a1", 1970),
            album("k2", "B", "a1", 1960),
        ];
        let mut view = ListView::<AlbumSort>::default();
        view.set_sort_field(AlbumSort::Year);
        assert_eq!(names(&view.compute(&albums, &catalog)), vec!["B", "A", "C"]);

        view.toggle_direction();
        assert_eq!(names(&view.compute(&albums, &catalog)), vec!["A", "C", "B"]);
    }

    #[test]
    fn playlists_sort_by_song_count() {
        let catalog = Catalog::default();
        let playlists = vec![
            playlist("p1", "Long", &["s1", "s2", "s3"]),
            playlist("p2", "Empty", &[]),
            playlist("p3", "Short", &["s1"]),
        ];
        let mut view = ListView::<PlaylistSort>::default();
        view.cycle_sort_field();
        assert_eq!(view.sort_field, PlaylistSort::SongCount);
        assert_eq!(names(&view.compute(&playlists, &catalog)), vec!["Empty", "Short", "Long"]);

        view.cycle_sort_field();
        assert_eq!(view.sort_field, PlaylistSort::Name);
    }

    #[test]
    fn selection_stays_within_page() {
        let catalog = Catalog::default();
        let artists = many_artists(3);
        let mut view = ListView::<ArtistSort>::default();

        for _ in 0..5 {
            view.move_down(3);
        }
        assert_eq!(view.selected, 2);
        assert_eq!(view.selected_item(&artists, &catalog).map(|a| a.key.as_str()), Some("a02"));
        view.move_up(3);
        assert_eq!(view.selected, 1);
    }

    #[test]
    fn selection_past_a_shrunken_page_lands_on_the_last_row() {
        let catalog = Catalog::default();
        let mut artists = many_artists(8);
        let mut view = ListView::<ArtistSort>::default();
        for _ in 0..7 {
            view.move_down(8);
        }
        assert_eq!(view.selected, 7);

        artists.truncate(3);
        assert_eq!(view.selected_row(3), 2);
        assert_eq!(view.selected_item(&artists, &catalog).map(|a| a.key.as_str()), Some("a02"));
        view.move_up(3);
        assert_eq!(view.selected, 1);
        view.move_down(3);
        view.move_down(3);
        assert_eq!(view.selected, 2);

        artists.clear();
        assert_eq!(view.selected_item(&artists, &catalog), None);
    }

    #[test]
    fn position_label_never_shows_zero_pages() {
        let catalog = Catalog::default();
        let view = ListView::<ArtistSort>::default();
        let artists: Vec<Artist> = Vec::new();
        assert_eq!(view.compute(&artists, &catalog).position_label(), "page 1 of 1");
    }
}
