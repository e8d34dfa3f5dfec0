//! Chapters, volumes and reader navigation.

use serde::Serialize;

use crate::domain::foundation::{ChapterId, Timestamp, ValidationError};

/// Chapters per volume when a chapter carries no explicit volume.
pub const VOLUME_SIZE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    /// Absent for chapters synthesized from a comic's chapter count.
    pub id: Option<ChapterId>,
    pub number: i32,
    pub title: Option<String>,
    pub volume: Option<i32>,
    pub released_at: Option<Timestamp>,
}

impl Chapter {
    /// A synthesized chapter: `Chapter n` in volume `ceil(n / 10)`.
    pub fn placeholder(number: i32) -> Self {
        Self {
            id: None,
            number,
            title: Some(format!("Chapter {}", number)),
            volume: Some(volume_for(number)),
            released_at: None,
        }
    }

    /// Explicit volume, else derived from the chapter number.
    pub fn effective_volume(&self) -> i32 {
        self.volume.unwrap_or_else(|| volume_for(self.number))
    }
}

/// `ceil(number / VOLUME_SIZE)`.
pub fn volume_for(number: i32) -> i32 {
    (number + VOLUME_SIZE - 1).div_euclid(VOLUME_SIZE)
}

/// Chapters `1..=last_chapter` used when a comic has no chapter rows.
pub fn placeholder_chapters(last_chapter: i32) -> Vec<Chapter> {
    (1..=last_chapter.max(0)).map(Chapter::placeholder).collect()
}

/// `max(1, ceil(total / VOLUME_SIZE))`.
pub fn total_volumes(total_chapters: i32) -> i32 {
    volume_for(total_chapters).max(1)
}

/// Validated input for a new chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChapter {
    pub number: i32,
    pub title: Option<String>,
    pub volume: Option<i32>,
    pub released_at: Option<Timestamp>,
    /// Storage paths or absolute URLs, in reading order.
    pub pages: Vec<String>,
}

impl NewChapter {
    pub fn new(
        number: i32,
        title: Option<&str>,
        volume: Option<i32>,
        released_at: Option<Timestamp>,
        pages: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if number < 1 {
            return Err(ValidationError::out_of_range(
                "number",
                1,
                i32::MAX as i64,
                number as i64,
            ));
        }
        if let Some(v) = volume {
            if v < 1 {
                return Err(ValidationError::out_of_range("volume", 1, i32::MAX as i64, v as i64));
            }
        }
        let pages: Vec<String> = pages
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if pages.is_empty() {
            return Err(ValidationError::empty_field("pages"));
        }
        Ok(Self {
            number,
            title: title.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string),
            volume,
            released_at,
            pages,
        })
    }
}

/// Previous/next links around the chapter being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterNavigation {
    pub number: i32,
    pub total: i32,
    pub prev: Option<i32>,
    pub next: Option<i32>,
}

impl ChapterNavigation {
    /// `None` when `number` is outside `1..=total`.
    pub fn new(number: i32, total: i32) -> Option<Self> {
        if total <= 0 || number < 1 || number > total {
            return None;
        }
        Some(Self {
            number,
            total,
            prev: (number > 1).then(|| number - 1),
            next: (number < total).then(|| number + 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_ceiling_of_tenths() {
        assert_eq!(volume_for(1), 1);
        assert_eq!(volume_for(10), 1);
        assert_eq!(volume_for(11), 2);
        assert_eq!(volume_for(20), 2);
        assert_eq!(volume_for(21), 3);
        assert_eq!(volume_for(0), 0);
    }

    #[test]
    fn explicit_volume_wins() {
        let mut ch = Chapter::placeholder(15);
        assert_eq!(ch.effective_volume(), 2);
        ch.volume = Some(7);
        assert_eq!(ch.effective_volume(), 7);
        ch.volume = None;
        assert_eq!(ch.effective_volume(), 2);
    }

    #[test]
    fn placeholders_are_numbered_and_titled() {
        let chapters = placeholder_chapters(12);
        assert_eq!(chapters.len(), 12);
        assert_eq!(chapters[0].title.as_deref(), Some("Chapter 1"));
        assert_eq!(chapters[11].volume, Some(2));
        assert!(placeholder_chapters(0).is_empty());
        assert!(placeholder_chapters(-3).is_empty());
    }

    #[test]
    fn total_volumes_is_at_least_one() {
        assert_eq!(total_volumes(0), 1);
        assert_eq!(total_volumes(10), 1);
        assert_eq!(total_volumes(58), 6);
    }

    #[test]
    fn navigation_bounds() {
        let first = ChapterNavigation::new(1, 3).unwrap();
        assert_eq!((first.prev, first.next), (None, Some(2)));

        let middle = ChapterNavigation::new(2, 3).unwrap();
        assert_eq!((middle.prev, middle.next), (Some(1), Some(3)));

        let last = ChapterNavigation::new(3, 3).unwrap();
        assert_eq!((last.prev, last.next), (Some(2), None));

        assert!(ChapterNavigation::new(4, 3).is_none());
        assert!(ChapterNavigation::new(0, 3).is_none());
        assert!(ChapterNavigation::new(1, 0).is_none());
    }

    #[test]
    fn new_chapter_validation() {
        assert!(NewChapter::new(0, None, None, None, vec!["a.png".into()]).is_err());
        assert!(NewChapter::new(1, None, Some(0), None, vec!["a.png".into()]).is_err());
        assert_eq!(
            NewChapter::new(1, None, None, None, vec!["  ".into()]).unwrap_err(),
            ValidationError::empty_field("pages")
        );

        let ok = NewChapter::new(3, Some("  "), None, None, vec![" p1.jpg ".into()]).unwrap();
        assert_eq!(ok.title, None);
        assert_eq!(ok.pages, vec!["p1.jpg"]);
    }
}
