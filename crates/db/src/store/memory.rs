use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use resort_core::booking::{validate_transition, BookingStatus};
use resort_core::feedback::Sentiment;
use resort_core::sales::{DateRange, ReportGranularity, ReportPeriod, StatWindows, RECENT_SALES_LIMIT};
use resort_core::types::{DbId, Day, Timestamp};
use tokio::sync::RwLock;

use super::{
    admit_booking, ensure_free_unit, not_found, ResortStore, StoreError, UpdatedAmenity,
};
use crate::models::amenity::{Amenity, AmenityPatch, AmenityWithActivity, NewAmenity};
use crate::models::booking::{Booking, BookingListParams, NewBooking};
use crate::models::dashboard::{DashboardStats, NamedCount};
use crate::models::feedback::{CreateFeedback, Feedback, FeedbackFilter};
use crate::models::sale::{
    ChartPoint, CreateSale, NamedAmount, Sale, SalesHistoryFilter, SalesReport, SalesStats,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    amenities: Vec<Amenity>,
    bookings: Vec<Booking>,
    sales: Vec<Sale>,
    feedback: Vec<Feedback>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn active_count(&self, amenity_id: DbId, day: Day) -> i64 {
        let count = self
            .bookings
            .iter()
            .filter(|b| b.amenity_id == amenity_id && b.booking_date == day)
            .filter(|b| {
                BookingStatus::from_str_value(&b.status)
                    .map(BookingStatus::is_active)
                    .unwrap_or(false)
            })
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn with_activity(&self, amenity: &Amenity, day: Day) -> AmenityWithActivity {
        AmenityWithActivity {
            amenity: amenity.clone(),
            booked_today: self.active_count(amenity.id, day),
        }
    }

    fn sales_in<'a>(&'a self, window: &'a DateRange) -> impl Iterator<Item = &'a Sale> + 'a {
        self.sales.iter().filter(move |s| window.contains(s.date))
    }

    fn sum_in(&self, window: &DateRange) -> f64 {
        self.sales_in(window).map(|s| s.amount).sum()
    }
}

fn by_service<'a>(sales: impl Iterator<Item = &'a Sale>) -> Vec<NamedAmount> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for sale in sales {
        *totals.entry(sale.service_type.as_str()).or_default() += sale.amount;
    }
    let mut rows: Vec<NamedAmount> = totals
        .into_iter()
        .map(|(name, value)| NamedAmount {
            name: name.to_string(),
            value,
        })
        .collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    rows
}

fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (Timestamp, DbId)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// In-memory [`ResortStore`] with the same observable behavior as
/// [`super::PgStore`]. Every write holds the single table lock for its
/// whole check-then-act sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResortStore for MemoryStore {
    async fn list_amenities(&self, day: Day) -> Result<Vec<AmenityWithActivity>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables
            .amenities
            .iter()
            .map(|a| tables.with_activity(a, day))
            .collect();
        rows.sort_by(|a, b| b.amenity.id.cmp(&a.amenity.id));
        Ok(rows)
    }

    async fn get_amenity(&self, id: DbId, day: Day) -> Result<AmenityWithActivity, StoreError> {
        let tables = self.tables.read().await;
        tables
            .amenities
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.with_activity(a, day))
            .ok_or_else(|| not_found("Amenity", id))
    }

    async fn create_amenity(&self, input: NewAmenity) -> Result<Amenity, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let amenity = Amenity {
            id: tables.allocate_id(),
            name: input.name,
            description: input.description,
            category: input.category.as_str().to_string(),
            price: input.price,
            capacity: input.capacity,
            quantity: Some(input.quantity),
            available: input.available.to_string(),
            image: input.image,
            created_at: now,
            updated_at: now,
        };
        tables.amenities.push(amenity.clone());
        Ok(amenity)
    }

    async fn update_amenity(
        &self,
        id: DbId,
        patch: AmenityPatch,
    ) -> Result<UpdatedAmenity, StoreError> {
        let mut tables = self.tables.write().await;
        let amenity = tables
            .amenities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("Amenity", id))?;

        let previous_image = amenity.image.clone();
        if let Some(name) = patch.name {
            amenity.name = name;
        }
        if let Some(description) = patch.description {
            amenity.description = Some(description);
        }
        if let Some(category) = patch.category {
            amenity.category = category.as_str().to_string();
        }
        if let Some(price) = patch.price {
            amenity.price = price;
        }
        if let Some(capacity) = patch.capacity {
            amenity.capacity = capacity;
        }
        if let Some(quantity) = patch.quantity {
            amenity.quantity = Some(quantity);
        }
        if let Some(available) = patch.available {
            amenity.available = available.to_string();
        }
        if let Some(image) = patch.image {
            amenity.image = Some(image);
        }
        amenity.updated_at = Utc::now();

        Ok(UpdatedAmenity {
            amenity: amenity.clone(),
            previous_image,
        })
    }

    async fn delete_amenity(&self, id: DbId) -> Result<Amenity, StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .amenities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| not_found("Amenity", id))?;
        let removed = tables.amenities.remove(index);

        let removed_bookings: BTreeSet<DbId> = tables
            .bookings
            .iter()
            .filter(|b| b.amenity_id == id)
            .map(|b| b.id)
            .collect();
        tables.bookings.retain(|b| b.amenity_id != id);
        for sale in &mut tables.sales {
            if sale.booking_id.is_some_and(|b| removed_bookings.contains(&b)) {
                sale.booking_id = None;
            }
        }
        Ok(removed)
    }

    async fn create_booking(&self, input: NewBooking) -> Result<Booking, StoreError> {
        let mut tables = self.tables.write().await;
        let amenity = tables
            .amenities
            .iter()
            .find(|a| a.id == input.amenity_id)
            .ok_or_else(|| not_found("Amenity", input.amenity_id))?;
        let active = tables.active_count(amenity.id, input.booking_date);
        let total_price = admit_booking(amenity, active, &input)?;

        let now = Utc::now();
        let booking = Booking {
            id: tables.allocate_id(),
            amenity_id: input.amenity_id,
            guest_name: input.guest_name,
            guest_email: input.guest_email,
            booking_date: input.booking_date,
            guests: input.guests,
            notes: input.notes,
            status: BookingStatus::INITIAL.as_str().to_string(),
            total_price,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self, params: BookingListParams) -> Result<Vec<Booking>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| params.date.map_or(true, |d| b.booking_date == d))
            .filter(|b| params.status.map_or(true, |s| b.status == s.as_str()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.booking_date, b.id).cmp(&(a.booking_date, a.id)));
        Ok(rows)
    }

    async fn update_booking_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, StoreError> {
        let mut tables = self.tables.write().await;
        let position = tables
            .bookings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found("Booking", id))?;
        let current = &tables.bookings[position];
        let from = BookingStatus::from_str_value(&current.status)?;
        validate_transition(from, status)?;

        if status.is_active() && !from.is_active() {
            let (amenity_id, on) = (current.amenity_id, current.booking_date);
            let amenity = tables
                .amenities
                .iter()
                .find(|a| a.id == amenity_id)
                .ok_or_else(|| not_found("Amenity", amenity_id))?;
            ensure_free_unit(amenity, tables.active_count(amenity_id, on), on)?;
        }

        let booking = &mut tables.bookings[position];
        booking.status = status.as_str().to_string();
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn record_sale(&self, input: CreateSale, date: Timestamp) -> Result<Sale, StoreError> {
        let mut tables = self.tables.write().await;
        let sale = Sale {
            id: tables.allocate_id(),
            date,
            customer_name: input.customer_name,
            service_type: input.service_type,
            payment_method: input.payment_method,
            amount: input.amount,
            booking_id: input.booking_id,
            created_at: Utc::now(),
        };
        tables.sales.push(sale.clone());
        Ok(sale)
    }

    async fn sales_report(
        &self,
        granularity: ReportGranularity,
        period: ReportPeriod,
        today: Day,
    ) -> Result<SalesReport, StoreError> {
        let window = period.window(granularity)?;
        let windows = StatWindows::for_day(today)?;
        let tables = self.tables.read().await;

        let mut buckets: BTreeMap<u32, ChartPoint> = BTreeMap::new();
        for sale in tables.sales_in(&window) {
            let (key, label) = granularity.bucket(sale.date);
            buckets
                .entry(key)
                .or_insert_with(|| ChartPoint { label, total: 0.0 })
                .total += sale.amount;
        }

        let mut recent_sales = tables.sales.clone();
        newest_first(&mut recent_sales, |s| (s.date, s.id));
        recent_sales.truncate(usize::try_from(RECENT_SALES_LIMIT).unwrap_or(usize::MAX));

        Ok(SalesReport {
            chart_data: buckets.into_values().collect(),
            service_data: by_service(tables.sales_in(&window)),
            recent_sales,
            stats: SalesStats {
                today: tables.sum_in(&windows.today),
                this_month: tables.sum_in(&windows.this_month),
                this_year: tables.sum_in(&windows.this_year),
            },
        })
    }

    async fn sales_years(&self) -> Result<Vec<i32>, StoreError> {
        let tables = self.tables.read().await;
        let years: BTreeSet<i32> = tables.sales.iter().map(|s| s.date.year()).collect();
        Ok(years.into_iter().rev().collect())
    }

    async fn sales_history(&self, filter: SalesHistoryFilter) -> Result<Vec<Sale>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Sale> = tables
            .sales
            .iter()
            .filter(|s| filter.range.map_or(true, |r| r.contains(s.date)))
            .filter(|s| {
                filter
                    .service_type
                    .as_deref()
                    .map_or(true, |t| s.service_type == t)
            })
            .filter(|s| {
                filter
                    .payment_method
                    .as_deref()
                    .map_or(true, |m| s.payment_method == m)
            })
            .cloned()
            .collect();
        newest_first(&mut rows, |s| (s.date, s.id));
        Ok(rows)
    }

    async fn create_feedback(
        &self,
        input: CreateFeedback,
        date: Timestamp,
    ) -> Result<Feedback, StoreError> {
        let mut tables = self.tables.write().await;
        let feedback = Feedback {
            id: tables.allocate_id(),
            customer_name: input.customer_name,
            rating: input.rating,
            comment: input.comment,
            date,
            created_at: Utc::now(),
        };
        tables.feedback.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_feedback(&self, filter: FeedbackFilter) -> Result<Vec<Feedback>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Feedback> = tables
            .feedback
            .iter()
            .filter(|f| filter.range.map_or(true, |r| r.contains(f.date)))
            .filter(|f| {
                filter
                    .sentiment
                    .map_or(true, |s| Sentiment::from_rating(f.rating) == s)
            })
            .cloned()
            .collect();
        newest_first(&mut rows, |f| (f.date, f.id));
        Ok(rows)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let tables = self.tables.read().await;

        let mut counts: HashMap<Sentiment, i64> = HashMap::new();
        for feedback in &tables.feedback {
            *counts.entry(Sentiment::from_rating(feedback.rating)).or_default() += 1;
        }
        let mut feedback_distribution: Vec<NamedCount> = counts
            .into_iter()
            .map(|(sentiment, value)| NamedCount {
                name: sentiment.label().to_string(),
                value,
            })
            .collect();
        feedback_distribution.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

        Ok(DashboardStats {
            total_revenue: tables.sales.iter().map(|s| s.amount).sum(),
            total_transactions: i64::try_from(tables.sales.len()).unwrap_or(i64::MAX),
            total_feedback: i64::try_from(tables.feedback.len()).unwrap_or(i64::MAX),
            sales_by_service: by_service(tables.sales.iter()),
            feedback_distribution,
        })
    }

    async fn health(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
