//! Reading domain - chapters, volume grouping and page URLs.

mod chapter;
mod listing;
mod page;

pub use chapter::{
    placeholder_chapters, total_volumes, volume_for, Chapter, ChapterNavigation, NewChapter,
    VOLUME_SIZE,
};
pub use listing::{chapter_matches, group_by_volume, ChapterOrder, VolumeGroup};
pub use page::{public_image_url, reader_pages, Page, ReaderPage};
