//! Reading handlers: chapter list, the reader, and chapter uploads.

mod create_chapter;
mod list_chapters;
mod read_chapter;

pub use create_chapter::{CreateChapterCommand, CreateChapterHandler};
pub use list_chapters::{ChapterListing, ListChaptersHandler, ListChaptersQuery};
pub use read_chapter::{ChapterReader, PageSource, ReadChapterHandler, ReadChapterQuery, ReaderComic};
