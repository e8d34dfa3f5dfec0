//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::handlers::account::{
    AdminGate, AvatarSettings, GetProfileHandler, OAuthUrlHandler, SignInHandler, SignUpHandler,
    UpdateProfileHandler,
};
use crate::application::handlers::announcement::{CreateAnnouncementHandler, ListAnnouncementsHandler};
use crate::application::handlers::catalog::{
    AdminListComicsHandler, CoverSettings, CreateComicHandler, GetComicByIdHandler,
    GetComicDetailHandler, GetMyRatingHandler, ListComicsHandler, ListGenresHandler,
    PopularComicsHandler, RateComicHandler,
};
use crate::application::handlers::premium::{
    CreatePremiumPaymentHandler, GetPremiumStatusHandler, HandlePaymentWebhookHandler,
    PaymentSettings,
};
use crate::application::handlers::reading::{
    CreateChapterHandler, ListChaptersHandler, PageSource, ReadChapterHandler,
};
use crate::domain::premium::CallbackTokenVerifier;
use crate::ports::{
    AnnouncementRepository, ChapterRepository, ComicRepository, IdentityProvider, ObjectStorage,
    PaymentGateway, PaymentRepository, ProfileRepository, RatingRepository, SessionValidator,
};

/// Values handlers need besides their ports.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub pages: PageSource,
    pub covers: CoverSettings,
    pub avatars: AvatarSettings,
    pub payment: PaymentSettings,
    pub callback_verifier: CallbackTokenVerifier,
    /// Default OAuth redirect target.
    pub site_url: String,
    /// Request body limit for multipart uploads.
    pub max_upload_bytes: usize,
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; ports are `Arc`-wrapped trait objects and handlers
/// are built on demand.
#[derive(Clone)]
pub struct AppState {
    pub comics: Arc<dyn ComicRepository>,
    pub chapters: Arc<dyn ChapterRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn ObjectStorage>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    // Catalog

    pub fn list_comics_handler(&self) -> ListComicsHandler {
        ListComicsHandler::new(self.comics.clone())
    }

    pub fn popular_comics_handler(&self) -> PopularComicsHandler {
        PopularComicsHandler::new(self.comics.clone())
    }

    pub fn comic_detail_handler(&self) -> GetComicDetailHandler {
        GetComicDetailHandler::new(self.comics.clone(), self.chapters.clone())
    }

    pub fn comic_by_id_handler(&self) -> GetComicByIdHandler {
        GetComicByIdHandler::new(self.comics.clone())
    }

    pub fn list_genres_handler(&self) -> ListGenresHandler {
        ListGenresHandler::new(self.comics.clone())
    }

    pub fn admin_list_comics_handler(&self) -> AdminListComicsHandler {
        AdminListComicsHandler::new(self.comics.clone())
    }

    pub fn create_comic_handler(&self) -> CreateComicHandler {
        CreateComicHandler::new(
            self.comics.clone(),
            self.storage.clone(),
            self.settings.covers.clone(),
        )
    }

    pub fn rate_comic_handler(&self) -> RateComicHandler {
        RateComicHandler::new(self.comics.clone(), self.ratings.clone())
    }

    pub fn my_rating_handler(&self) -> GetMyRatingHandler {
        GetMyRatingHandler::new(self.comics.clone(), self.ratings.clone())
    }

    // Reading

    pub fn list_chapters_handler(&self) -> ListChaptersHandler {
        ListChaptersHandler::new(self.comics.clone(), self.chapters.clone())
    }

    pub fn read_chapter_handler(&self) -> ReadChapterHandler {
        ReadChapterHandler::new(
            self.comics.clone(),
            self.chapters.clone(),
            self.settings.pages.clone(),
        )
    }

    pub fn create_chapter_handler(&self) -> CreateChapterHandler {
        CreateChapterHandler::new(self.comics.clone(), self.chapters.clone())
    }

    // Account

    pub fn sign_in_handler(&self) -> SignInHandler {
        SignInHandler::new(self.identity.clone())
    }

    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(self.identity.clone())
    }

    pub fn oauth_url_handler(&self) -> OAuthUrlHandler {
        OAuthUrlHandler::new(self.identity.clone(), self.settings.site_url.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.identity.clone(), self.profiles.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(
            self.identity.clone(),
            self.profiles.clone(),
            self.storage.clone(),
            self.settings.avatars.clone(),
        )
    }

    pub fn admin_gate(&self) -> AdminGate {
        AdminGate::new(self.profiles.clone())
    }

    // Announcements

    pub fn list_announcements_handler(&self) -> ListAnnouncementsHandler {
        ListAnnouncementsHandler::new(self.announcements.clone())
    }

    pub fn create_announcement_handler(&self) -> CreateAnnouncementHandler {
        CreateAnnouncementHandler::new(self.announcements.clone())
    }

    // Premium

    pub fn create_payment_handler(&self) -> CreatePremiumPaymentHandler {
        CreatePremiumPaymentHandler::new(
            self.payments.clone(),
            self.profiles.clone(),
            self.gateway.clone(),
            self.settings.payment.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payments.clone(),
            self.settings.callback_verifier.clone(),
        )
    }

    pub fn premium_status_handler(&self) -> GetPremiumStatusHandler {
        GetPremiumStatusHandler::new(self.profiles.clone(), self.payments.clone())
    }
}
