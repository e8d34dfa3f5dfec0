//! Chapter list search and grouping by volume.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::chapter::Chapter;
use crate::domain::catalog::normalized_needle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterOrder {
    #[default]
    Newest,
    Oldest,
}

impl ChapterOrder {
    fn sort(&self, chapters: &mut [Chapter]) {
        match self {
            ChapterOrder::Newest => chapters.sort_by(|a, b| b.number.cmp(&a.number)),
            ChapterOrder::Oldest => chapters.sort_by(|a, b| a.number.cmp(&b.number)),
        }
    }
}

/// Chapters of one volume, in the requested order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeGroup {
    pub volume: i32,
    pub chapters: Vec<Chapter>,
}

/// Matches the chapter number, its title, or `vol {volume}`.
pub fn chapter_matches(chapter: &Chapter, needle: &str) -> bool {
    chapter.number.to_string().contains(needle)
        || chapter
            .title
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(needle))
        || format!("vol {}", chapter.effective_volume()).contains(needle)
}

/// Filters by `search`, then groups by effective volume. Volumes come out
/// highest first; chapters inside each volume follow `order`.
pub fn group_by_volume(
    chapters: Vec<Chapter>,
    search: Option<&str>,
    order: ChapterOrder,
) -> Vec<VolumeGroup> {
    let needle = normalized_needle(search);
    let mut by_volume: BTreeMap<i32, Vec<Chapter>> = BTreeMap::new();
    for chapter in chapters
        .into_iter()
        .filter(|c| needle.as_deref().map_or(true, |n| chapter_matches(c, n)))
    {
        by_volume
            .entry(chapter.effective_volume())
            .or_default()
            .push(chapter);
    }

    by_volume
        .into_iter()
        .rev()
        .map(|(volume, mut chapters)| {
            order.sort(&mut chapters);
            VolumeGroup { volume, chapters }
        })
        .collect()
}
