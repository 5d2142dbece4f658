//! Page arithmetic for the two read paths: song lists and lyric couplets.

use serde::{Deserialize, Serialize};

use crate::db::repositories::Song;

pub const SONGS_PAGE_SIZE: i64 = 10;

/// Envelope for a paginated read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content<T> {
    pub current_page: i64,
    pub total_page: i64,
    pub total_items: i64,
    pub items: T,
}

/// One unit of lyric pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couplet {
    pub text: String,
}

/// Pull `page` into `[1, total_pages]`.
pub fn clamp_page(page: i64, total_pages: i64) -> i64 {
    page.clamp(1, total_pages.max(1))
}

pub fn song_list_pages(total_items: i64) -> i64 {
    (total_items / SONGS_PAGE_SIZE).max(1)
}

/// Attach page metadata to a song list.
///
/// The items are returned whole rather than windowed to the page; callers
/// receive every match alongside the computed page numbers.
pub fn paginate_songs(songs: Vec<Song>, page: i64) -> Content<Vec<Song>> {
    let total_items = songs.len() as i64;
    let total_page = song_list_pages(total_items);

    Content {
        current_page: clamp_page(page, total_page),
        total_page,
        total_items,
        items: songs,
    }
}

/// One couplet per page; `None` when there are no lines to page through.
pub fn paginate_couplets(mut lines: Vec<String>, page: i64) -> Option<Content<Couplet>> {
    if lines.is_empty() {
        return None;
    }

    let total = lines.len() as i64;
    let current_page = clamp_page(page, total);
    let index = (current_page - 1) as usize;

    Some(Content {
        current_page,
        total_page: total,
        total_items: total,
        items: Couplet {
            text: lines.swap_remove(index),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line{}", i)).collect()
    }

    fn songs(n: usize) -> Vec<Song> {
        (0..n)
            .map(|i| Song {
                name: format!("song {}", i),
                group: "Ryazan".to_string(),
                release_date: "16.07.2006".to_string(),
                text: vec![],
                link: String::new(),
            })
            .collect()
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(-7, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn couplet_past_the_end_is_the_last_line() {
        let content = paginate_couplets(lines(3), 5).unwrap();

        assert_eq!(content.current_page, 3);
        assert_eq!(content.total_page, 3);
        assert_eq!(content.total_items, 3);
        assert_eq!(content.items.text, "line3");
    }

    #[test]
    fn couplet_before_the_start_is_the_first_line() {
        let content = paginate_couplets(lines(3), 0).unwrap();

        assert_eq!(content.current_page, 1);
        assert_eq!(content.items.text, "line1");
    }

    #[test]
    fn couplet_in_range_is_that_line() {
        let content = paginate_couplets(lines(4), 2).unwrap();
        assert_eq!(content.items.text, "line2");
    }

    #[test]
    fn no_lines_no_content() {
        assert!(paginate_couplets(vec![], 1).is_none());
    }

    #[test]
    fn song_pages_round_down_with_a_floor_of_one() {
        assert_eq!(song_list_pages(0), 1);
        assert_eq!(song_list_pages(9), 1);
        assert_eq!(song_list_pages(10), 1);
        assert_eq!(song_list_pages(19), 1);
        assert_eq!(song_list_pages(20), 2);
        assert_eq!(song_list_pages(35), 3);
    }

    #[test]
    fn song_list_keeps_every_item() {
        let content = paginate_songs(songs(25), 7);

        assert_eq!(content.total_items, 25);
        assert_eq!(content.total_page, 2);
        assert_eq!(content.current_page, 2);
        assert_eq!(content.items.len(), 25);
    }

    #[test]
    fn couplet_serializes_as_a_text_object() {
        let content = paginate_couplets(lines(3), 5).unwrap();
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "current_page": 3,
                "total_page": 3,
                "total_items": 3,
                "items": { "text": "line3" }
            })
        );
    }
}
