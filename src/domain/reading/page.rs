//! Chapter pages and their public image URLs.

use serde::Serialize;

/// A stored page: its position and the object path (or absolute URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page_no: i32,
    pub image_path: String,
}

/// A page as the reader receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderPage {
    pub page_no: i32,
    pub url: String,
}

/// Absolute `http(s)` paths pass through; anything else is an object in
/// `bucket` served from the public storage endpoint.
pub fn public_image_url(storage_base: &str, bucket: &str, image_path: &str) -> String {
    let path = image_path.trim();
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/storage/v1/object/public/{}/{}",
        storage_base.trim_end_matches('/'),
        bucket,
        path.trim_start_matches('/')
    )
}

/// Pages sorted by page number with URLs resolved.
pub fn reader_pages(mut pages: Vec<Page>, storage_base: &str, bucket: &str) -> Vec<ReaderPage> {
    pages.sort_by_key(|p| p.page_no);
    pages
        .into_iter()
        .map(|p| ReaderPage {
            page_no: p.page_no,
            url: public_image_url(storage_base, bucket, &p.image_path),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://proj.supabase.co/";

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            public_image_url(BASE, "manga_pages", "https://cdn.example.com/p/1.webp"),
            "https://cdn.example.com/p/1.webp"
        );
        assert_eq!(
            public_image_url(BASE, "manga_pages", "HTTP://cdn.example.com/1.png"),
            "HTTP://cdn.example.com/1.png"
        );
    }

    #[test]
    fn relative_paths_resolve_against_bucket() {
        assert_eq!(
            public_image_url(BASE, "manga_pages", "//solo-leveling/1/001.jpg"),
            "https://proj.supabase.co/storage/v1/object/public/manga_pages/solo-leveling/1/001.jpg"
        );
    }

    #[test]
    fn pages_are_ordered_by_number() {
        let pages = vec![
            Page {
                page_no: 2,
                image_path: "b.jpg".to_string(),
            },
            Page {
                page_no: 1,
                image_path: "a.jpg".to_string(),
            },
        ];
        let out = reader_pages(pages, BASE, "manga_pages");
        assert_eq!(out[0].page_no, 1);
        assert!(out[0].url.ends_with("/manga_pages/a.jpg"));
        assert_eq!(out[1].page_no, 2);
    }
}
