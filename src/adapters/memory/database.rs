//! In-memory implementation of every repository port.
//!
//! One lock guards all tables so multi-table writes (chapter insert,
//! rating upsert, settlement) stay atomic the way the Postgres
//! transactions are. Useful for handler and HTTP tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::account::Profile;
use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::catalog::{Comic, NewComic, RatingSummary, StarRating};
use crate::domain::foundation::{
    AnnouncementId, ChapterId, ComicId, DomainError, ErrorCode, PaymentId, Timestamp, UserId,
};
use crate::domain::premium::{NewPayment, OrderId, Payment, PaymentStatus};
use crate::domain::reading::{Chapter, NewChapter, Page};
use crate::ports::{
    AnnouncementRepository, ChapterRepository, ComicRepository, PaymentRepository,
    ProfileRepository, RatingRepository, Settlement,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    comics: Vec<Comic>,
    chapters: Vec<(ComicId, Chapter)>,
    pages: HashMap<ChapterId, Vec<Page>>,
    ratings: HashMap<(ComicId, UserId), StarRating>,
    genres: Vec<Vec<String>>,
    profiles: HashMap<UserId, Profile>,
    payments: Vec<Payment>,
    announcements: Vec<Announcement>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn comic_mut(&mut self, id: ComicId) -> Option<&mut Comic> {
        self.comics.iter_mut().find(|c| c.id == id)
    }

    fn payment_mut(&mut self, order_id: &OrderId) -> Option<&mut Payment> {
        self.payments.iter_mut().find(|p| &p.order_id == order_id)
    }
}

/// Shared in-memory store; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Seeding
    // ════════════════════════════════════════════════════════════════════════════

    /// Store a comic as-is, keeping its id.
    pub async fn put_comic(&self, comic: Comic) {
        let mut tables = self.tables.write().await;
        tables.next_id = tables.next_id.max(comic.id.value());
        tables.comics.retain(|c| c.id != comic.id);
        tables.comics.push(comic);
    }

    /// Store a chapter row with pages numbered from 1.
    pub async fn put_chapter(&self, comic_id: ComicId, mut chapter: Chapter, pages: &[&str]) {
        let mut tables = self.tables.write().await;
        let id = ChapterId::from_db(tables.next_id());
        chapter.id = Some(id);
        tables.chapters.push((comic_id, chapter));
        tables.pages.insert(
            id,
            pages
                .iter()
                .enumerate()
                .map(|(i, p)| Page {
                    page_no: i as i32 + 1,
                    image_path: p.to_string(),
                })
                .collect(),
        );
    }

    pub async fn put_genre_row(&self, names: &[&str]) {
        let row = names.iter().map(|n| n.to_string()).collect();
        self.tables.write().await.genres.push(row);
    }

    pub async fn put_profile(&self, profile: Profile) {
        self.tables.write().await.profiles.insert(profile.id, profile);
    }

    pub async fn put_announcement(&self, announcement: Announcement) {
        let mut tables = self.tables.write().await;
        tables.next_id = tables.next_id.max(announcement.id.value());
        tables.announcements.push(announcement);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection
    // ════════════════════════════════════════════════════════════════════════════

    pub async fn comic_count(&self) -> usize {
        self.tables.read().await.comics.len()
    }

    pub async fn payment_count(&self) -> usize {
        self.tables.read().await.payments.len()
    }
}

#[async_trait]
impl ComicRepository for InMemoryDatabase {
    async fn list_all(&self) -> Result<Vec<Comic>, DomainError> {
        let mut comics = self.tables.read().await.comics.clone();
        comics.sort_by(|a, b| b.views.cmp(&a.views));
        Ok(comics)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Comic>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.comics.iter().find(|c| c.matches_slug(slug)).cloned())
    }

    async fn find_by_id(&self, id: ComicId) -> Result<Option<Comic>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.comics.iter().find(|c| c.id == id).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.comics.iter().any(|c| c.matches_slug(slug)))
    }

    async fn insert(&self, comic: &NewComic) -> Result<Comic, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.comics.iter().any(|c| c.matches_slug(&comic.slug)) {
            return Err(DomainError::validation("slug", "Slug already in use"));
        }
        let now = Timestamp::now();
        let stored = Comic {
            id: ComicId::from_db(tables.next_id()),
            title: comic.title.clone(),
            slug: comic.slug.clone(),
            cover_url: Some(comic.cover_url.clone()),
            description: comic.description.clone(),
            note: None,
            author: comic.author.clone(),
            genres: comic.genres.clone(),
            status: None,
            rating: None,
            rating_count: 0,
            views: 0,
            last_chapter: comic.last_chapter,
            created_at: now,
            updated_at: now,
        };
        tables.comics.push(stored.clone());
        Ok(stored)
    }

    async fn increment_views(&self, id: ComicId) -> Result<(), DomainError> {
        if let Some(comic) = self.tables.write().await.comic_mut(id) {
            comic.views += 1;
        }
        Ok(())
    }

    async fn genre_rows(&self) -> Result<Vec<Vec<String>>, DomainError> {
        Ok(self.tables.read().await.genres.clone())
    }
}

#[async_trait]
impl ChapterRepository for InMemoryDatabase {
    async fn list_for_comic(&self, comic_id: ComicId) -> Result<Vec<Chapter>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .chapters
            .iter()
            .filter(|(c, _)| *c == comic_id)
            .map(|(_, ch)| ch.clone())
            .collect())
    }

    async fn find(&self, comic_id: ComicId, number: i32) -> Result<Option<Chapter>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .chapters
            .iter()
            .find(|(c, ch)| *c == comic_id && ch.number == number)
            .map(|(_, ch)| ch.clone()))
    }

    async fn pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.pages.get(&chapter_id).cloned().unwrap_or_default())
    }

    async fn insert(&self, comic_id: ComicId, chapter: &NewChapter) -> Result<Chapter, DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .chapters
            .iter()
            .any(|(c, ch)| *c == comic_id && ch.number == chapter.number)
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateChapter,
                format!("Chapter {} already exists", chapter.number),
            ));
        }
        let Some(comic) = tables.comic_mut(comic_id) else {
            return Err(DomainError::new(ErrorCode::ComicNotFound, "Comic not found"));
        };
        comic.last_chapter = comic.last_chapter.max(chapter.number);
        comic.updated_at = Timestamp::now();

        let id = ChapterId::from_db(tables.next_id());
        let stored = Chapter {
            id: Some(id),
            number: chapter.number,
            title: chapter.title.clone(),
            volume: chapter.volume,
            released_at: chapter.released_at,
        };
        tables.chapters.push((comic_id, stored.clone()));
        tables.pages.insert(
            id,
            chapter
                .pages
                .iter()
                .enumerate()
                .map(|(i, p)| Page {
                    page_no: i as i32 + 1,
                    image_path: p.clone(),
                })
                .collect(),
        );
        Ok(stored)
    }
}

#[async_trait]
impl RatingRepository for InMemoryDatabase {
    async fn upsert(
        &self,
        comic_id: ComicId,
        user_id: &UserId,
        rating: StarRating,
    ) -> Result<RatingSummary, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.comic_mut(comic_id).is_none() {
            return Err(DomainError::new(ErrorCode::ComicNotFound, "Comic not found"));
        }
        tables.ratings.insert((comic_id, *user_id), rating);

        let votes: Vec<StarRating> = tables
            .ratings
            .iter()
            .filter(|((c, _), _)| *c == comic_id)
            .map(|(_, v)| *v)
            .collect();
        let summary = RatingSummary::from_votes(&votes);
        if let Some(comic) = tables.comic_mut(comic_id) {
            comic.rating = summary.average;
            comic.rating_count = summary.count;
        }
        Ok(summary)
    }

    async fn find(&self, comic_id: ComicId, user_id: &UserId) -> Result<Option<StarRating>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.ratings.get(&(comic_id, *user_id)).copied())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryDatabase {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryDatabase {
    async fn insert(&self, payment: &NewPayment) -> Result<Payment, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.payments.iter().any(|p| p.order_id == payment.order_id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrder,
                format!("Duplicate order id {}", payment.order_id),
            ));
        }
        let now = Timestamp::now();
        let stored = Payment {
            id: PaymentId::from_db(tables.next_id()),
            user_id: payment.user_id,
            provider: payment.provider.clone(),
            order_id: payment.order_id.clone(),
            amount: payment.amount,
            status: PaymentStatus::Pending,
            raw_payload: None,
            created_at: now,
            updated_at: now,
        };
        tables.payments.push(stored.clone());
        Ok(stored)
    }

    async fn attach_payload(&self, order_id: &OrderId, payload: &Value) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(match tables.payment_mut(order_id) {
            Some(payment) => {
                payment.raw_payload = Some(payload.clone());
                payment.updated_at = Timestamp::now();
                true
            }
            None => false,
        })
    }

    async fn find_by_order(&self, order_id: &OrderId) -> Result<Option<Payment>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.payments.iter().find(|p| &p.order_id == order_id).cloned())
    }

    async fn settle(&self, order_id: &OrderId, at: Timestamp) -> Result<Settlement, DomainError> {
        let mut tables = self.tables.write().await;
        let Some(payment) = tables.payment_mut(order_id) else {
            return Ok(Settlement::UnknownOrder);
        };
        let user_id = payment.user_id;
        if payment.status == PaymentStatus::Paid {
            return Ok(Settlement::AlreadyPaid { user_id });
        }
        payment.status = PaymentStatus::Paid;
        payment.updated_at = at;

        let profile = tables
            .profiles
            .entry(user_id)
            .or_insert_with(|| Profile::regular(user_id));
        if !profile.is_premium {
            profile.is_premium = true;
            profile.premium_since = Some(at);
        }
        Ok(Settlement::Settled { user_id })
    }

    async fn transition(&self, order_id: &OrderId, status: PaymentStatus) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(match tables.payment_mut(order_id) {
            Some(payment) if payment.status.can_transition_to(status) => {
                payment.status = status;
                payment.updated_at = Timestamp::now();
                true
            }
            _ => false,
        })
    }

    async fn recent_for_user(&self, user_id: &UserId, limit: i64) -> Result<Vec<Payment>, DomainError> {
        let tables = self.tables.read().await;
        let mut payments: Vec<Payment> = tables
            .payments
            .iter()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        payments.truncate(limit.max(0) as usize);
        Ok(payments)
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryDatabase {
    async fn list_all(&self) -> Result<Vec<Announcement>, DomainError> {
        let mut items = self.tables.read().await.announcements.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn insert(&self, announcement: &NewAnnouncement) -> Result<Announcement, DomainError> {
        let mut tables = self.tables.write().await;
        let stored = Announcement {
            id: AnnouncementId::from_db(tables.next_id()),
            title: announcement.title.clone(),
            content: announcement.content.clone(),
            created_at: Timestamp::now(),
            updated_at: None,
        };
        tables.announcements.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::comic;
    use crate::domain::premium::Amount;
    use uuid::Uuid;

    fn user() -> UserId {
        UserId::from_uuid(Uuid::new_v4())
    }

    #[tokio::test]
    async fn chapter_insert_raises_last_chapter_and_numbers_pages() {
        let db = InMemoryDatabase::new();
        db.put_comic(comic(1, "Solo Leveling")).await;

        let chapter = NewChapter::new(3, None, None, None, vec!["a.png".into(), "b.png".into()]).unwrap();
        let stored = ChapterRepository::insert(&db, ComicId::from_db(1), &chapter).await.unwrap();

        let comic = db.find_by_id(ComicId::from_db(1)).await.unwrap().unwrap();
        assert_eq!(comic.last_chapter, 3);
        let pages = db.pages(stored.id.unwrap()).await.unwrap();
        assert_eq!(pages.iter().map(|p| p.page_no).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn duplicate_chapter_is_rejected() {
        let db = InMemoryDatabase::new();
        db.put_comic(comic(1, "Solo Leveling")).await;
        let chapter = NewChapter::new(1, None, None, None, vec!["a.png".into()]).unwrap();

        ChapterRepository::insert(&db, ComicId::from_db(1), &chapter).await.unwrap();
        let err = ChapterRepository::insert(&db, ComicId::from_db(1), &chapter)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateChapter);
    }

    #[tokio::test]
    async fn rating_upsert_replaces_vote_and_refreshes_comic() {
        let db = InMemoryDatabase::new();
        db.put_comic(comic(1, "Blue Lock")).await;
        let (a, b) = (user(), user());
        let id = ComicId::from_db(1);

        db.upsert(id, &a, StarRating::new(5).unwrap()).await.unwrap();
        db.upsert(id, &b, StarRating::new(2).unwrap()).await.unwrap();
        let summary = db.upsert(id, &a, StarRating::new(4).unwrap()).await.unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Some(3.0));
        let comic = db.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(comic.rating, Some(3.0));
        assert_eq!(comic.rating_count, 2);
    }

    #[tokio::test]
    async fn settle_is_idempotent_and_keeps_premium_since() {
        let db = InMemoryDatabase::new();
        let owner = user();
        let at = Timestamp::now();
        let payment = NewPayment::premium(owner, Amount::from_db(10_000), at);
        PaymentRepository::insert(&db, &payment).await.unwrap();

        let first = db.settle(&payment.order_id, at).await.unwrap();
        let second = db.settle(&payment.order_id, at.add_days(1)).await.unwrap();

        assert_eq!(first, Settlement::Settled { user_id: owner });
        assert_eq!(second, Settlement::AlreadyPaid { user_id: owner });
        let profile = ProfileRepository::find(&db, &owner).await.unwrap().unwrap();
        assert!(profile.is_premium);
        assert_eq!(profile.premium_since, Some(at));
    }

    #[tokio::test]
    async fn reused_order_id_is_a_duplicate_order() {
        let db = InMemoryDatabase::new();
        let payment = NewPayment::premium(user(), Amount::from_db(10_000), Timestamp::now());
        PaymentRepository::insert(&db, &payment).await.unwrap();

        let err = PaymentRepository::insert(&db, &payment).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateOrder);
        assert_eq!(db.payment_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_votes_are_all_counted() {
        let db = Arc::new(InMemoryDatabase::new());
        db.put_comic(comic(1, "Vagabond")).await;
        let id = ComicId::from_db(1);

        let votes = (1..=5).map(|stars| {
            let db = db.clone();
            tokio::spawn(async move {
                db.upsert(id, &user(), StarRating::new(stars).unwrap()).await.unwrap()
            })
        });
        for vote in votes.collect::<Vec<_>>() {
            vote.await.unwrap();
        }

        let comic = db.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(comic.rating_count, 5);
        assert_eq!(comic.rating, Some(3.0));
    }

    #[tokio::test]
    async fn settle_unknown_order_reports_it() {
        let db = InMemoryDatabase::new();
        let order = OrderId::parse("prem_missing").unwrap();
        assert_eq!(db.settle(&order, Timestamp::now()).await.unwrap(), Settlement::UnknownOrder);
    }

    #[tokio::test]
    async fn expiry_does_not_touch_paid_orders() {
        let db = InMemoryDatabase::new();
        let payment = NewPayment::premium(user(), Amount::from_db(10_000), Timestamp::now());
        PaymentRepository::insert(&db, &payment).await.unwrap();
        db.settle(&payment.order_id, Timestamp::now()).await.unwrap();

        assert!(!db.transition(&payment.order_id, PaymentStatus::Expired).await.unwrap());
        let stored = db.find_by_order(&payment.order_id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
    }
}
