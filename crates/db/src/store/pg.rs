use async_trait::async_trait;
use resort_core::booking::{validate_transition, BookingStatus};
use resort_core::sales::{ReportGranularity, ReportPeriod, StatWindows, RECENT_SALES_LIMIT};
use resort_core::types::{DbId, Day, Timestamp};

use super::{
    admit_booking, ensure_free_unit, not_found, ResortStore, StoreError, UpdatedAmenity,
};
use crate::models::amenity::{Amenity, AmenityPatch, AmenityWithActivity, NewAmenity};
use crate::models::booking::{Booking, BookingListParams, NewBooking};
use crate::models::dashboard::DashboardStats;
use crate::models::feedback::{CreateFeedback, Feedback, FeedbackFilter};
use crate::models::sale::{CreateSale, Sale, SalesHistoryFilter, SalesReport, SalesStats};
use crate::repositories::{AmenityRepo, BookingRepo, FeedbackRepo, SaleRepo};
use crate::DbPool;

/// [`ResortStore`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResortStore for PgStore {
    async fn list_amenities(&self, day: Day) -> Result<Vec<AmenityWithActivity>, StoreError> {
        Ok(AmenityRepo::list_with_activity(&self.pool, day).await?)
    }

    async fn get_amenity(&self, id: DbId, day: Day) -> Result<AmenityWithActivity, StoreError> {
        AmenityRepo::find_with_activity(&self.pool, id, day)
            .await?
            .ok_or_else(|| not_found("Amenity", id))
    }

    async fn create_amenity(&self, input: NewAmenity) -> Result<Amenity, StoreError> {
        Ok(AmenityRepo::create(&self.pool, &input).await?)
    }

    async fn update_amenity(
        &self,
        id: DbId,
        patch: AmenityPatch,
    ) -> Result<UpdatedAmenity, StoreError> {
        let (amenity, previous_image) = AmenityRepo::update(&self.pool, id, &patch)
            .await?
            .ok_or_else(|| not_found("Amenity", id))?;
        Ok(UpdatedAmenity {
            amenity,
            previous_image,
        })
    }

    async fn delete_amenity(&self, id: DbId) -> Result<Amenity, StoreError> {
        AmenityRepo::delete(&self.pool, id)
            .await?
            .ok_or_else(|| not_found("Amenity", id))
    }

    async fn create_booking(&self, input: NewBooking) -> Result<Booking, StoreError> {
        let mut tx = self.pool.begin().await?;

        let amenity = AmenityRepo::lock_by_id(&mut *tx, input.amenity_id)
            .await?
            .ok_or_else(|| not_found("Amenity", input.amenity_id))?;
        let active = BookingRepo::count_active(&mut *tx, amenity.id, input.booking_date).await?;
        let total_price = admit_booking(&amenity, active, &input)?;

        let booking =
            BookingRepo::insert(&mut *tx, &input, BookingStatus::INITIAL, total_price).await?;
        tx.commit().await?;

        tracing::debug!(
            amenity_id = amenity.id,
            active_before = active,
            "Booking admitted"
        );
        Ok(booking)
    }

    async fn list_bookings(&self, params: BookingListParams) -> Result<Vec<Booking>, StoreError> {
        Ok(BookingRepo::list(&self.pool, &params).await?)
    }

    async fn update_booking_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        // The amenity row is locked before the booking row, the same order
        // as booking insertion and amenity deletion.
        let amenity_id = BookingRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| not_found("Booking", id))?
            .amenity_id;

        let mut tx = self.pool.begin().await?;

        let amenity = AmenityRepo::lock_by_id(&mut *tx, amenity_id)
            .await?
            .ok_or_else(|| not_found("Booking", id))?;
        let current = BookingRepo::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| not_found("Booking", id))?;
        let from = BookingStatus::from_str_value(&current.status)?;
        validate_transition(from, status)?;

        if status.is_active() && !from.is_active() {
            let active =
                BookingRepo::count_active(&mut *tx, amenity.id, current.booking_date).await?;
            ensure_free_unit(&amenity, active, current.booking_date)?;
        }

        let booking = BookingRepo::update_status(&mut *tx, id, status).await?;
        tx.commit().await?;
        Ok(booking)
    }

    async fn record_sale(&self, input: CreateSale, date: Timestamp) -> Result<Sale, StoreError> {
        Ok(SaleRepo::create(&self.pool, &input, date).await?)
    }

    async fn sales_report(
        &self,
        granularity: ReportGranularity,
        period: ReportPeriod,
        today: Day,
    ) -> Result<SalesReport, StoreError> {
        let window = period.window(granularity)?;
        let stats = StatWindows::for_day(today)?;

        let chart_data = SaleRepo::chart(&self.pool, granularity, &window).await?;
        let service_data = SaleRepo::by_service(&self.pool, Some(&window)).await?;
        let recent_sales = SaleRepo::recent(&self.pool, RECENT_SALES_LIMIT).await?;

        let stats = SalesStats {
            today: SaleRepo::sum_in_range(&self.pool, &stats.today).await?,
            this_month: SaleRepo::sum_in_range(&self.pool, &stats.this_month).await?,
            this_year: SaleRepo::sum_in_range(&self.pool, &stats.this_year).await?,
        };

        Ok(SalesReport {
            chart_data,
            service_data,
            recent_sales,
            stats,
        })
    }

    async fn sales_years(&self) -> Result<Vec<i32>, StoreError> {
        Ok(SaleRepo::years(&self.pool).await?)
    }

    async fn sales_history(&self, filter: SalesHistoryFilter) -> Result<Vec<Sale>, StoreError> {
        Ok(SaleRepo::history(&self.pool, &filter).await?)
    }

    async fn create_feedback(
        &self,
        input: CreateFeedback,
        date: Timestamp,
    ) -> Result<Feedback, StoreError> {
        Ok(FeedbackRepo::create(&self.pool, &input, date).await?)
    }

    async fn list_feedback(&self, filter: FeedbackFilter) -> Result<Vec<Feedback>, StoreError> {
        Ok(FeedbackRepo::list(&self.pool, &filter).await?)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let (total_revenue, total_transactions) = SaleRepo::totals(&self.pool).await?;
        Ok(DashboardStats {
            total_revenue,
            total_transactions,
            total_feedback: FeedbackRepo::count(&self.pool).await?,
            sales_by_service: SaleRepo::by_service(&self.pool, None).await?,
            feedback_distribution: FeedbackRepo::distribution(&self.pool).await?,
        })
    }

    async fn health(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}
